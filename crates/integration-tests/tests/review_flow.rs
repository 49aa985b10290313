//! Review submission: local validation, reset-on-success, retain-on-failure.

use std::time::Duration;

use wanderhub_core::DestinationId;
use wanderhub_dashboard::api::NewReview;
use wanderhub_dashboard::{ReviewForm, StatusKind, StatusSlot, TravelApi};

use wanderhub_integration_tests::{MockTravel, STATUS_CLEAR, destination};

#[tokio::test]
async fn test_unset_rating_blocks_without_network_call() {
    let backend = MockTravel::new();
    let status = StatusSlot::new(STATUS_CLEAR);
    let mut form = ReviewForm::new(DestinationId::new(7));
    form.set_comment("Lovely place");

    let accepted = form.submit(&backend, &status).await;

    assert!(!accepted);
    assert!(!form.submitted());
    assert_eq!(backend.call_count("create_review"), 0);
    let message = status.current().expect("validation error raised");
    assert_eq!(message.kind, StatusKind::Error);
    assert_eq!(message.text, "Please select a rating before submitting.");
    assert_eq!(form.comment(), "Lovely place", "entered text kept");
}

#[tokio::test]
async fn test_out_of_range_rating_blocks() {
    let backend = MockTravel::new();
    let status = StatusSlot::new(STATUS_CLEAR);
    let mut form = ReviewForm::new(DestinationId::new(7));
    form.set_rating(6);

    let accepted = form.submit(&backend, &status).await;

    assert!(!accepted);
    assert_eq!(backend.call_count("create_review"), 0);
    let message = status.current().expect("validation error raised");
    assert_eq!(message.text, "Rating must be between 1 and 5.");
}

#[tokio::test(start_paused = true)]
async fn test_successful_submission_resets_form_and_acknowledges() {
    let backend = MockTravel::new();
    let status = StatusSlot::new(STATUS_CLEAR);
    let mut form = ReviewForm::new(DestinationId::new(7));
    form.set_rating(4);
    form.set_comment("Great!");

    let accepted = form.submit(&backend, &status).await;

    assert!(accepted);
    assert!(form.submitted());
    assert_eq!(form.rating(), 0, "rating reset");
    assert_eq!(form.comment(), "", "comment reset");

    assert_eq!(
        backend.reviews(),
        vec![NewReview {
            destination_id: DestinationId::new(7),
            rating: 4,
            comment: Some("Great!".to_string()),
        }],
        "review targets the destination being viewed"
    );

    let message = status.current().expect("acknowledgment shown");
    assert_eq!(message.kind, StatusKind::Success);
    assert_eq!(message.text, "Thank you for your review!");

    // The acknowledgment self-clears.
    tokio::time::sleep(STATUS_CLEAR + Duration::from_secs(1)).await;
    assert!(status.current().is_none());
}

#[tokio::test]
async fn test_whitespace_comment_is_submitted_as_absent() {
    let backend = MockTravel::new();
    let status = StatusSlot::new(STATUS_CLEAR);
    let mut form = ReviewForm::new(DestinationId::new(7));
    form.set_rating(5);
    form.set_comment("   ");

    let accepted = form.submit(&backend, &status).await;

    assert!(accepted);
    assert_eq!(
        backend.reviews(),
        vec![NewReview {
            destination_id: DestinationId::new(7),
            rating: 5,
            comment: None,
        }]
    );
}

#[tokio::test]
async fn test_backend_rejection_retains_entered_values() {
    let backend = MockTravel::new();
    backend.fail("create_review", "You have already reviewed this destination");
    let status = StatusSlot::new(STATUS_CLEAR);
    let mut form = ReviewForm::new(DestinationId::new(7));
    form.set_rating(3);
    form.set_comment("Decent");

    let accepted = form.submit(&backend, &status).await;

    assert!(!accepted);
    assert!(!form.submitted());
    assert_eq!(form.rating(), 3, "rating kept for a retry");
    assert_eq!(form.comment(), "Decent", "comment kept for a retry");
    assert!(backend.reviews().is_empty());

    let message = status.current().expect("failure raised");
    assert_eq!(message.kind, StatusKind::Error);
    assert_eq!(message.text, "You have already reviewed this destination");
}

#[tokio::test]
async fn test_review_targets_the_looked_up_destination() {
    let backend = MockTravel::new();
    backend.seed_destinations(vec![destination(42, 3, "Kyoto")]);
    let status = StatusSlot::new(STATUS_CLEAR);

    // Detail lookup goes through the external key, not the surrogate key.
    let detail = backend
        .get_destination(DestinationId::new(42))
        .await
        .expect("detail record found");
    assert_eq!(detail.name, "Kyoto");

    let mut form = ReviewForm::new(detail.destination_id);
    form.set_rating(5);
    assert!(form.submit(&backend, &status).await);

    assert_eq!(backend.reviews()[0].destination_id, DestinationId::new(42));
}

#[tokio::test]
async fn test_forms_are_independent_per_destination() {
    let backend = MockTravel::new();
    let status = StatusSlot::new(STATUS_CLEAR);

    let mut kyoto = ReviewForm::new(DestinationId::new(7));
    kyoto.set_rating(5);
    let mut osaka = ReviewForm::new(DestinationId::new(8));
    osaka.set_rating(2);

    assert!(kyoto.submit(&backend, &status).await);
    assert!(osaka.submit(&backend, &status).await);

    let reviews = backend.reviews();
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0].destination_id, DestinationId::new(7));
    assert_eq!(reviews[1].destination_id, DestinationId::new(8));
}
