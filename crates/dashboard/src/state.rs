//! Dashboard view state and statistics projections.

use wanderhub_core::DestinationId;

use crate::api::{AdminStats, BlogPost, Destination, UserRecord};

/// Per-role user counts, split out of the aggregate statistics fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserBreakdown {
    pub total_users: u64,
    pub travelers: u64,
    pub guides: u64,
    pub restaurant_owners: u64,
    pub hotel_owners: u64,
    pub admins: u64,
}

impl From<&AdminStats> for UserBreakdown {
    fn from(stats: &AdminStats) -> Self {
        Self {
            total_users: stats.total_users,
            travelers: stats.travelers,
            guides: stats.guides,
            restaurant_owners: stats.restaurant_owners,
            hotel_owners: stats.hotel_owners,
            admins: stats.admins,
        }
    }
}

/// Entity counts and rating totals, split out of the aggregate statistics
/// fetch.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AdminMetrics {
    pub total_users: u64,
    pub total_destinations: u64,
    pub total_blog_posts: u64,
    pub average_rating: f64,
    pub total_reviews: u64,
}

impl From<&AdminStats> for AdminMetrics {
    fn from(stats: &AdminStats) -> Self {
        Self {
            total_users: stats.total_users,
            total_destinations: stats.total_destinations,
            total_blog_posts: stats.total_blog_posts,
            average_rating: stats.average_rating,
            total_reviews: stats.total_reviews,
        }
    }
}

/// Which destination-editing surface is open, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditorState {
    /// The create/edit surface is showing.
    pub open: bool,
    /// Surrogate key of the destination being edited; `None` when creating.
    pub editing: Option<DestinationId>,
}

/// Local view state owned by one dashboard instance.
///
/// Private, in-memory, per-session: no cross-tab or cross-instance sharing.
/// After any successful mutation plus the following refresh, each collection
/// equals the backend's authoritative state; brief staleness in between is
/// accepted, permanent divergence is not.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardView {
    pub users: Vec<UserRecord>,
    pub destinations: Vec<Destination>,
    pub blog_posts: Vec<BlogPost>,
    pub user_breakdown: UserBreakdown,
    pub admin_metrics: AdminMetrics,
    /// Persistent aggregate-layer failure banner; never auto-dismissed.
    pub load_error: Option<String>,
    /// Coarse flag set before a fetch batch and cleared after it.
    pub loading: bool,
    /// Whether the aggregate layer has ever succeeded this mount.
    pub stats_loaded: bool,
}

impl DashboardView {
    /// Whether the dashboard should render the recovery screen instead of
    /// the normal tabs.
    ///
    /// True when the aggregate layer has never succeeded and its last
    /// attempt failed; downstream views assume the aggregate shape exists.
    #[must_use]
    pub const fn needs_recovery(&self) -> bool {
        !self.stats_loaded && self.load_error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> AdminStats {
        AdminStats {
            total_users: 10,
            travelers: 6,
            guides: 2,
            restaurant_owners: 1,
            hotel_owners: 1,
            admins: 0,
            total_destinations: 4,
            total_blog_posts: 7,
            average_rating: 4.2,
            total_reviews: 31,
        }
    }

    #[test]
    fn test_breakdown_projection() {
        let breakdown = UserBreakdown::from(&stats());
        assert_eq!(breakdown.total_users, 10);
        assert_eq!(breakdown.travelers, 6);
        assert_eq!(breakdown.guides, 2);
        assert_eq!(breakdown.restaurant_owners, 1);
        assert_eq!(breakdown.hotel_owners, 1);
        assert_eq!(breakdown.admins, 0);
    }

    #[test]
    fn test_metrics_projection() {
        let metrics = AdminMetrics::from(&stats());
        assert_eq!(metrics.total_users, 10);
        assert_eq!(metrics.total_destinations, 4);
        assert_eq!(metrics.total_blog_posts, 7);
        assert_eq!(metrics.total_reviews, 31);
        assert!((metrics.average_rating - 4.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_needs_recovery() {
        let mut view = DashboardView::default();
        assert!(!view.needs_recovery(), "no attempt yet");

        view.load_error = Some("backend down".to_string());
        assert!(view.needs_recovery(), "aggregate never succeeded");

        view.stats_loaded = true;
        assert!(
            !view.needs_recovery(),
            "stale data remains usable after one success"
        );
    }
}
