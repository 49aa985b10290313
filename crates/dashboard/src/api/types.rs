//! Wire records for the travel backend.
//!
//! The backend enforces no schema beyond what it happens to return, so every
//! field here is either optional or carries a serde default. View state never
//! holds nulls: absent strings become empty, absent counters become 0.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wanderhub_core::{BlogPostId, DestinationId, ReviewId, Role, UserId, UserStatus};

/// An authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A user row in the management view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A destination record.
///
/// `destination_id` is the stable external key; `id` is the backend's
/// surrogate key. Update and delete address the surrogate key, detail lookup
/// and review submission address the external key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    #[serde(default)]
    pub destination_id: DestinationId,
    #[serde(default)]
    pub id: DestinationId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_sights: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_time_to_visit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Comma-delimited highlight tokens; use [`Destination::highlight_list`].
    #[serde(default)]
    pub highlights: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: u64,
}

impl Destination {
    /// Parse `highlights` into an ordered list of display tokens.
    ///
    /// Splits on commas, trims whitespace around each token, and discards
    /// empty segments. This is the one bit-exact format contract in the core.
    #[must_use]
    pub fn highlight_list(&self) -> Vec<String> {
        parse_highlights(&self.highlights)
    }
}

/// Split a comma-delimited highlights string into trimmed, non-empty tokens.
#[must_use]
pub fn parse_highlights(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

/// A blog post. Opaque to this core beyond its identity: posts are only
/// counted and deleted here, never created or edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: BlogPostId,
    /// Remaining backend fields, preserved but not modeled.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Aggregate counts across all entities. Every field defaults to 0 when the
/// backend omits it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AdminStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub travelers: u64,
    #[serde(default)]
    pub guides: u64,
    #[serde(default)]
    pub restaurant_owners: u64,
    #[serde(default)]
    pub hotel_owners: u64,
    #[serde(default)]
    pub admins: u64,
    #[serde(default)]
    pub total_destinations: u64,
    #[serde(default)]
    pub total_blog_posts: u64,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub total_reviews: u64,
}

/// Envelope returned by the statistics endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AdminStatsEnvelope {
    #[serde(rename = "adminStats", default)]
    pub admin_stats: AdminStats,
}

/// Fields for creating a destination. The backend requires the external key,
/// name, city, country, and image; everything else is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewDestination {
    pub destination_id: DestinationId,
    pub name: String,
    pub city: String,
    pub country: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_sights: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_time_to_visit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlights: Option<String>,
}

/// Partial update for a destination. Only set fields are serialized.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DestinationPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_sights: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_time_to_visit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlights: Option<String>,
}

/// A review to submit. `rating` must be validated to [1, 5] before this is
/// constructed; 0 is the "unset" sentinel and never reaches the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    pub destination_id: DestinationId,
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// A created review, as returned by the backend. Submitted, never read back
/// by this core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub id: ReviewId,
    #[serde(default)]
    pub destination_id: DestinationId,
    #[serde(default)]
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_highlights_trims_and_drops_empty() {
        assert_eq!(
            parse_highlights(" Beach, Culture ,,Adventure "),
            vec!["Beach", "Culture", "Adventure"]
        );
    }

    #[test]
    fn test_parse_highlights_empty_string() {
        assert!(parse_highlights("").is_empty());
        assert!(parse_highlights(" , ,, ").is_empty());
    }

    #[test]
    fn test_parse_highlights_preserves_order() {
        assert_eq!(parse_highlights("c,a,b"), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_destination_defaults() {
        let destination: Destination =
            serde_json::from_str(r#"{"destination_id": 3, "name": "Kyoto"}"#).expect("parses");
        assert_eq!(destination.destination_id.as_i64(), 3);
        assert_eq!(destination.name, "Kyoto");
        assert_eq!(destination.city, "");
        assert!(destination.region.is_none());
        assert!((destination.rating - 0.0).abs() < f64::EPSILON);
        assert_eq!(destination.reviews, 0);
        assert!(destination.highlight_list().is_empty());
    }

    #[test]
    fn test_admin_stats_missing_fields_default_to_zero() {
        let envelope: AdminStatsEnvelope =
            serde_json::from_str(r#"{"adminStats": {"total_users": 10, "travelers": 6}}"#)
                .expect("parses");
        assert_eq!(envelope.admin_stats.total_users, 10);
        assert_eq!(envelope.admin_stats.travelers, 6);
        assert_eq!(envelope.admin_stats.guides, 0);
        assert_eq!(envelope.admin_stats.total_destinations, 0);
        assert!((envelope.admin_stats.average_rating - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_admin_stats_empty_envelope() {
        let envelope: AdminStatsEnvelope = serde_json::from_str("{}").expect("parses");
        assert_eq!(envelope.admin_stats, AdminStats::default());
    }

    #[test]
    fn test_blog_post_keeps_unknown_fields() {
        let post: BlogPost =
            serde_json::from_str(r#"{"id": 5, "title": "Hidden gems", "author": "maya"}"#)
                .expect("parses");
        assert_eq!(post.id.as_i64(), 5);
        assert_eq!(
            post.extra.get("title").and_then(serde_json::Value::as_str),
            Some("Hidden gems")
        );
    }

    #[test]
    fn test_new_review_skips_absent_comment() {
        let review = NewReview {
            destination_id: DestinationId::new(2),
            rating: 4,
            comment: None,
        };
        let json = serde_json::to_string(&review).expect("serialize");
        assert!(!json.contains("comment"));
    }

    #[test]
    fn test_destination_patch_serializes_only_set_fields() {
        let patch = DestinationPatch {
            name: Some("Osaka".to_string()),
            ..DestinationPatch::default()
        };
        let json = serde_json::to_string(&patch).expect("serialize");
        assert_eq!(json, r#"{"name":"Osaka"}"#);
    }

    #[test]
    fn test_user_record_defaults() {
        let user: UserRecord = serde_json::from_str(r#"{"id": 9}"#).expect("parses");
        assert_eq!(user.role, Role::Traveler);
        assert_eq!(user.status, UserStatus::Active);
        assert!(user.created_at.is_none());
        assert_eq!(user.name, "");
    }
}
