//! The data synchronizer: two independently-failable refresh layers.
//!
//! The aggregate layer is one combined statistics fetch; the detail layer is
//! three per-entity list fetches issued concurrently and joined. The layers
//! share nothing: a failure in one never cancels or rolls back the other's
//! already-applied update.

use tracing::{instrument, warn};

use crate::api::TravelApi;
use crate::dashboard::Dashboard;
use crate::state::{AdminMetrics, UserBreakdown};

impl<A: TravelApi> Dashboard<A> {
    /// Full resynchronization: aggregate layer, then detail layer.
    ///
    /// Invoked on mount, on manual refresh, and after every successful
    /// mutation. There is no polling and no push channel.
    #[instrument(skip(self))]
    pub(crate) async fn resync(&self) {
        let _loading = self.begin_loading();
        self.refresh_aggregate().await;
        self.refresh_detail().await;
    }

    /// Aggregate layer: fetch the combined statistics object and split it
    /// into the user-breakdown and admin-metrics projections.
    ///
    /// Failure raises the persistent inline banner (`load_error`), distinct
    /// from the transient mutation status; prior projections stay visible.
    pub(crate) async fn refresh_aggregate(&self) {
        match self.api().refresh_admin_data().await {
            Ok(envelope) => {
                let stats = envelope.admin_stats;
                self.commit(|view| {
                    view.user_breakdown = UserBreakdown::from(&stats);
                    view.admin_metrics = AdminMetrics::from(&stats);
                    view.stats_loaded = true;
                    view.load_error = None;
                });
            }
            Err(e) => {
                warn!("Aggregate statistics fetch failed: {e}");
                let text = format!("Failed to load dashboard statistics: {e}");
                self.commit(|view| view.load_error = Some(text));
            }
        }
    }

    /// Detail layer: fetch the three entity lists concurrently and commit
    /// them together after the join.
    ///
    /// A failed fetch is non-fatal: it raises one transient warning and
    /// leaves that list at its prior value (empty on first load).
    pub(crate) async fn refresh_detail(&self) {
        let (users, destinations, blog_posts) = tokio::join!(
            self.api().get_user_management_data(),
            self.api().get_destinations(),
            self.api().get_blog_posts(),
        );

        let mut degraded = false;

        self.commit(|view| {
            match users {
                Ok(users) => view.users = users,
                Err(e) => {
                    warn!("User list fetch failed: {e}");
                    degraded = true;
                }
            }
            match destinations {
                Ok(destinations) => view.destinations = destinations,
                Err(e) => {
                    warn!("Destination list fetch failed: {e}");
                    degraded = true;
                }
            }
            match blog_posts {
                Ok(blog_posts) => view.blog_posts = blog_posts,
                Err(e) => {
                    warn!("Blog post list fetch failed: {e}");
                    degraded = true;
                }
            }
        });

        if degraded {
            self.status()
                .error("Some dashboard data could not be refreshed.");
        }
    }
}
