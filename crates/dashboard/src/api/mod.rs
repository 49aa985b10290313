//! Typed client for the Wanderhub REST backend.
//!
//! The backend is an external collaborator: this module pins down its
//! operation table as the [`TravelApi`] trait and provides the production
//! [`HttpTravelClient`] implementation over reqwest. Tests substitute an
//! in-memory implementation of the same trait.

mod http;
mod types;

pub use http::HttpTravelClient;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

use wanderhub_core::{BlogPostId, DestinationId, UserId};

/// Errors produced by backend operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend rejected the request with an error body.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error body.
        message: String,
    },

    /// Not authenticated or token rejected.
    #[error("Unauthorized")]
    Unauthorized,

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse a response body.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// The backend-provided message, when the backend supplied one.
    ///
    /// Mutation handlers surface this verbatim; every other variant falls
    /// back to a generic sentence chosen by the caller.
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Operation table of the travel backend.
///
/// One method per REST operation the dashboard core consumes. All methods are
/// point-in-time request/response; the backend never pushes.
#[async_trait]
pub trait TravelApi: Send + Sync {
    /// The currently authenticated identity, if any.
    ///
    /// Never fails: absence means "not authenticated".
    async fn current_user(&self) -> Option<Identity>;

    /// Fetch the combined admin statistics object.
    async fn refresh_admin_data(&self) -> Result<AdminStatsEnvelope, ApiError>;

    /// Fetch the full user list for the management view.
    async fn get_user_management_data(&self) -> Result<Vec<UserRecord>, ApiError>;

    /// Fetch all destinations.
    async fn get_destinations(&self) -> Result<Vec<Destination>, ApiError>;

    /// Fetch all blog posts.
    async fn get_blog_posts(&self) -> Result<Vec<BlogPost>, ApiError>;

    /// Create a destination.
    async fn create_destination(&self, destination: NewDestination)
    -> Result<Destination, ApiError>;

    /// Apply a partial update to a destination.
    async fn update_destination(
        &self,
        id: DestinationId,
        patch: DestinationPatch,
    ) -> Result<Destination, ApiError>;

    /// Delete a destination.
    async fn delete_destination(&self, id: DestinationId) -> Result<(), ApiError>;

    /// Delete a user account.
    async fn delete_user(&self, id: UserId) -> Result<(), ApiError>;

    /// Delete a blog post.
    async fn delete_blog_post(&self, id: BlogPostId) -> Result<(), ApiError>;

    /// Submit a review for a destination.
    async fn create_review(
        &self,
        destination: DestinationId,
        review: NewReview,
    ) -> Result<Review, ApiError>;

    /// Fetch a single destination's detail record.
    async fn get_destination(&self, destination: DestinationId) -> Result<Destination, ApiError>;

    /// Terminate the current session.
    async fn sign_out(&self) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_message_present() {
        let err = ApiError::Api {
            status: 422,
            message: "Destination ID already exists".to_string(),
        };
        assert_eq!(err.backend_message(), Some("Destination ID already exists"));
    }

    #[test]
    fn test_backend_message_absent() {
        let err = ApiError::Api {
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.backend_message(), None);
        assert_eq!(ApiError::Unauthorized.backend_message(), None);
        assert_eq!(
            ApiError::NotFound("destination 4".to_string()).backend_message(),
            None
        );
    }
}
