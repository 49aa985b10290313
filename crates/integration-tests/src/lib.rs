//! End-to-end tests for the Wanderhub dashboard core.
//!
//! The dashboard is exercised against [`MockTravel`], an in-memory backend
//! implementing [`TravelApi`] with scriptable failures and call recording.
//! Tests run hermetically: no server, no network.
//!
//! # Test Categories
//!
//! - `dashboard_sync` - Initial load, refresh layers, degradation, recovery
//! - `mutations` - Delete/create/update handlers and reconciliation
//! - `review_flow` - Review validation, submission, and acknowledgment

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use wanderhub_core::{BlogPostId, DestinationId, ReviewId, Role, UserId, UserStatus};
use wanderhub_dashboard::api::{
    AdminStats, AdminStatsEnvelope, ApiError, BlogPost, Destination, DestinationPatch, Identity,
    NewDestination, NewReview, Review, UserRecord,
};
use wanderhub_dashboard::{Confirm, Dashboard, SessionStore, TravelApi};

/// Status auto-dismiss delay used across tests.
pub const STATUS_CLEAR: Duration = Duration::from_secs(4);

/// Collections held by the fake backend.
#[derive(Debug, Default)]
pub struct BackendState {
    pub users: Vec<UserRecord>,
    pub destinations: Vec<Destination>,
    pub blog_posts: Vec<BlogPost>,
}

#[derive(Default)]
struct MockInner {
    identity: Mutex<Option<Identity>>,
    state: Mutex<BackendState>,
    stats_override: Mutex<Option<AdminStats>>,
    failures: Mutex<HashMap<String, String>>,
    calls: Mutex<Vec<String>>,
    reviews: Mutex<Vec<NewReview>>,
}

/// In-memory travel backend.
///
/// Cloning is cheap; all clones observe the same backend state, so a test
/// keeps one handle while the dashboard owns another.
#[derive(Clone, Default)]
pub struct MockTravel {
    inner: Arc<MockInner>,
}

impl MockTravel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a call and fail it if scripted to.
    fn begin(&self, op: &str) -> Result<(), ApiError> {
        self.inner
            .calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(op.to_string());

        let failures = self
            .inner
            .failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(message) = failures.get(op) {
            return Err(ApiError::Api {
                status: 500,
                message: message.clone(),
            });
        }
        Ok(())
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut BackendState) -> R) -> R {
        f(&mut self
            .inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner))
    }

    // -------------------------------------------------------------------
    // Scripting
    // -------------------------------------------------------------------

    pub fn set_identity(&self, identity: Option<Identity>) {
        *self
            .inner
            .identity
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = identity;
    }

    pub fn seed_users(&self, users: Vec<UserRecord>) {
        self.with_state(|state| state.users = users);
    }

    pub fn seed_destinations(&self, destinations: Vec<Destination>) {
        self.with_state(|state| state.destinations = destinations);
    }

    pub fn seed_blog_posts(&self, posts: Vec<BlogPost>) {
        self.with_state(|state| state.blog_posts = posts);
    }

    /// Make `op` reject with the given backend message until cleared.
    pub fn fail(&self, op: &str, message: &str) {
        self.inner
            .failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(op.to_string(), message.to_string());
    }

    /// Clear a scripted failure.
    pub fn succeed(&self, op: &str) {
        self.inner
            .failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(op);
    }

    /// Pin the statistics response instead of computing it from state.
    pub fn set_stats(&self, stats: AdminStats) {
        *self
            .inner
            .stats_override
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(stats);
    }

    // -------------------------------------------------------------------
    // Inspection
    // -------------------------------------------------------------------

    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.inner
            .calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn call_count(&self, op: &str) -> usize {
        self.calls().iter().filter(|name| *name == op).count()
    }

    #[must_use]
    pub fn reviews(&self) -> Vec<NewReview> {
        self.inner
            .reviews
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn users(&self) -> Vec<UserRecord> {
        self.with_state(|state| state.users.clone())
    }

    #[must_use]
    pub fn destinations(&self) -> Vec<Destination> {
        self.with_state(|state| state.destinations.clone())
    }

    #[must_use]
    pub fn blog_posts(&self) -> Vec<BlogPost> {
        self.with_state(|state| state.blog_posts.clone())
    }

    /// Statistics as the real backend would compute them.
    #[allow(clippy::cast_precision_loss)]
    fn computed_stats(&self) -> AdminStats {
        self.with_state(|state| {
            let count_role = |role: Role| {
                state.users.iter().filter(|user| user.role == role).count() as u64
            };

            let destination_count = state.destinations.len();
            let average_rating = if destination_count == 0 {
                0.0
            } else {
                state.destinations.iter().map(|d| d.rating).sum::<f64>()
                    / destination_count as f64
            };

            AdminStats {
                total_users: state.users.len() as u64,
                travelers: count_role(Role::Traveler),
                guides: count_role(Role::Guide),
                restaurant_owners: count_role(Role::RestaurantOwner),
                hotel_owners: count_role(Role::HotelOwner),
                admins: count_role(Role::Admin),
                total_destinations: destination_count as u64,
                total_blog_posts: state.blog_posts.len() as u64,
                average_rating,
                total_reviews: state.destinations.iter().map(|d| d.reviews).sum(),
            }
        })
    }
}

#[async_trait]
impl TravelApi for MockTravel {
    async fn current_user(&self) -> Option<Identity> {
        self.inner
            .identity
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn refresh_admin_data(&self) -> Result<AdminStatsEnvelope, ApiError> {
        self.begin("refresh_admin_data")?;
        let admin_stats = self
            .inner
            .stats_override
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .unwrap_or_else(|| self.computed_stats());
        Ok(AdminStatsEnvelope { admin_stats })
    }

    async fn get_user_management_data(&self) -> Result<Vec<UserRecord>, ApiError> {
        self.begin("get_user_management_data")?;
        Ok(self.users())
    }

    async fn get_destinations(&self) -> Result<Vec<Destination>, ApiError> {
        self.begin("get_destinations")?;
        Ok(self.destinations())
    }

    async fn get_blog_posts(&self) -> Result<Vec<BlogPost>, ApiError> {
        self.begin("get_blog_posts")?;
        Ok(self.blog_posts())
    }

    async fn create_destination(
        &self,
        destination: NewDestination,
    ) -> Result<Destination, ApiError> {
        self.begin("create_destination")?;
        let created = self.with_state(|state| {
            let surrogate = state
                .destinations
                .iter()
                .map(|d| d.id.as_i64())
                .max()
                .unwrap_or(0)
                + 1;
            let created = Destination {
                destination_id: destination.destination_id,
                id: DestinationId::new(surrogate),
                name: destination.name,
                city: destination.city,
                country: destination.country,
                region: destination.region,
                image: destination.image,
                about: destination.about,
                key_sights: destination.key_sights,
                best_time_to_visit: destination.best_time_to_visit,
                weather: destination.weather,
                currency: destination.currency,
                language: destination.language,
                description: destination.description,
                highlights: destination.highlights.unwrap_or_default(),
                rating: 0.0,
                reviews: 0,
            };
            state.destinations.push(created.clone());
            created
        });
        Ok(created)
    }

    async fn update_destination(
        &self,
        id: DestinationId,
        patch: DestinationPatch,
    ) -> Result<Destination, ApiError> {
        self.begin("update_destination")?;
        self.with_state(|state| {
            let destination = state
                .destinations
                .iter_mut()
                .find(|d| d.id == id)
                .ok_or_else(|| ApiError::NotFound(format!("destination {id}")))?;

            if let Some(name) = patch.name {
                destination.name = name;
            }
            if let Some(city) = patch.city {
                destination.city = city;
            }
            if let Some(country) = patch.country {
                destination.country = country;
            }
            if let Some(region) = patch.region {
                destination.region = Some(region);
            }
            if let Some(image) = patch.image {
                destination.image = image;
            }
            if let Some(about) = patch.about {
                destination.about = Some(about);
            }
            if let Some(description) = patch.description {
                destination.description = Some(description);
            }
            if let Some(highlights) = patch.highlights {
                destination.highlights = highlights;
            }

            Ok(destination.clone())
        })
    }

    async fn delete_destination(&self, id: DestinationId) -> Result<(), ApiError> {
        self.begin("delete_destination")?;
        self.with_state(|state| state.destinations.retain(|d| d.id != id));
        Ok(())
    }

    async fn delete_user(&self, id: UserId) -> Result<(), ApiError> {
        self.begin("delete_user")?;
        self.with_state(|state| state.users.retain(|user| user.id != id));
        Ok(())
    }

    async fn delete_blog_post(&self, id: BlogPostId) -> Result<(), ApiError> {
        self.begin("delete_blog_post")?;
        self.with_state(|state| state.blog_posts.retain(|post| post.id != id));
        Ok(())
    }

    async fn create_review(
        &self,
        _destination: DestinationId,
        review: NewReview,
    ) -> Result<Review, ApiError> {
        self.begin("create_review")?;
        let mut reviews = self
            .inner
            .reviews
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        reviews.push(review.clone());
        Ok(Review {
            id: ReviewId::new(reviews.len() as i64),
            destination_id: review.destination_id,
            rating: review.rating,
            comment: review.comment,
        })
    }

    async fn get_destination(&self, destination: DestinationId) -> Result<Destination, ApiError> {
        self.begin("get_destination")?;
        self.with_state(|state| {
            state
                .destinations
                .iter()
                .find(|d| d.destination_id == destination)
                .cloned()
                .ok_or_else(|| ApiError::NotFound(format!("destination {destination}")))
        })
    }

    async fn sign_out(&self) -> Result<(), ApiError> {
        self.begin("sign_out")?;
        Ok(())
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// A user record with the given role.
#[must_use]
pub fn user(id: i64, name: &str, role: Role) -> UserRecord {
    UserRecord {
        id: UserId::new(id),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        role,
        phone: None,
        status: UserStatus::Active,
        created_at: None,
    }
}

/// The identity corresponding to a user record.
#[must_use]
pub fn identity_of(user: &UserRecord) -> Identity {
    Identity {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role,
        phone: user.phone.clone(),
    }
}

/// A destination with external key `external` and surrogate key `surrogate`.
#[must_use]
pub fn destination(external: i64, surrogate: i64, name: &str) -> Destination {
    Destination {
        destination_id: DestinationId::new(external),
        id: DestinationId::new(surrogate),
        name: name.to_string(),
        city: name.to_string(),
        country: "Japan".to_string(),
        region: None,
        image: format!("/images/{}.jpg", name.to_lowercase()),
        about: None,
        key_sights: None,
        best_time_to_visit: None,
        weather: None,
        currency: None,
        language: None,
        description: None,
        highlights: "Temples, Food".to_string(),
        rating: 4.0,
        reviews: 10,
    }
}

/// A blog post with no modeled fields beyond its id.
#[must_use]
pub fn blog_post(id: i64) -> BlogPost {
    BlogPost {
        id: BlogPostId::new(id),
        extra: serde_json::Map::new(),
    }
}

/// A dashboard wired to a mock backend and a fresh session.
pub struct TestContext {
    pub backend: MockTravel,
    pub session: SessionStore,
    pub dashboard: Dashboard<MockTravel>,
}

impl TestContext {
    /// Context whose confirmation prompts are always approved.
    #[must_use]
    pub fn new() -> Self {
        Self::with_confirm(Box::new(|_: &str| true))
    }

    /// Context with a custom confirmation collaborator.
    #[must_use]
    pub fn with_confirm(confirm: Box<dyn Confirm>) -> Self {
        let backend = MockTravel::new();
        let session = SessionStore::new();
        let dashboard = Dashboard::new(backend.clone(), session.clone(), confirm, STATUS_CLEAR);
        Self {
            backend,
            session,
            dashboard,
        }
    }

    /// Sign an admin into the session and return the matching user record.
    pub fn sign_in_admin(&self, id: i64, name: &str) -> UserRecord {
        let admin = user(id, name, Role::Admin);
        self.session.sign_in(identity_of(&admin));
        admin
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
