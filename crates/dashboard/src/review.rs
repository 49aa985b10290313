//! Single-shot review submission.
//!
//! Stateless beyond the form itself: validate locally, submit, reset on
//! success, retain the entered values on failure so the user can retry
//! without re-typing.

use tracing::warn;

use wanderhub_core::DestinationId;

use crate::api::{NewReview, TravelApi};
use crate::dashboard::failure_text;
use crate::status::StatusSlot;

/// Rating form state for one destination.
///
/// A rating of 0 means "unset" and blocks submission; valid ratings are
/// integers in `[1, 5]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewForm {
    destination_id: DestinationId,
    rating: u8,
    comment: String,
    submitted: bool,
}

impl ReviewForm {
    /// Create an empty form for the destination being reviewed.
    #[must_use]
    pub const fn new(destination_id: DestinationId) -> Self {
        Self {
            destination_id,
            rating: 0,
            comment: String::new(),
            submitted: false,
        }
    }

    /// The destination this form submits to.
    #[must_use]
    pub const fn destination_id(&self) -> DestinationId {
        self.destination_id
    }

    /// The currently selected rating (0 = unset).
    #[must_use]
    pub const fn rating(&self) -> u8 {
        self.rating
    }

    /// Select a rating.
    pub const fn set_rating(&mut self, rating: u8) {
        self.rating = rating;
    }

    /// The comment text as entered.
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Replace the comment text.
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    /// Whether a review was submitted successfully from this form.
    #[must_use]
    pub const fn submitted(&self) -> bool {
        self.submitted
    }

    /// Validate and submit the review.
    ///
    /// An unset or out-of-range rating blocks locally with an error status
    /// and no network call. On success the rating resets to 0, the comment
    /// to empty, and a success acknowledgment is shown (it self-clears via
    /// the status slot). On failure the entered values are kept.
    ///
    /// Returns whether the review was accepted by the backend.
    pub async fn submit<A: TravelApi>(&mut self, api: &A, status: &StatusSlot) -> bool {
        if self.rating == 0 {
            status.error("Please select a rating before submitting.");
            return false;
        }
        if self.rating > 5 {
            status.error("Rating must be between 1 and 5.");
            return false;
        }

        let comment = self.comment.trim();
        let review = NewReview {
            destination_id: self.destination_id,
            rating: self.rating,
            comment: (!comment.is_empty()).then(|| comment.to_owned()),
        };

        match api.create_review(self.destination_id, review).await {
            Ok(_) => {
                self.rating = 0;
                self.comment.clear();
                self.submitted = true;
                status.success("Thank you for your review!");
                true
            }
            Err(e) => {
                warn!("Review submission failed: {e}");
                status.error(failure_text(&e));
                false
            }
        }
    }
}
