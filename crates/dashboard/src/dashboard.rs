//! The dashboard orchestrator: mount, refresh, and mutation handlers.
//!
//! All backend rejections are caught here and rendered as a short
//! human-readable sentence in the status slot; nothing propagates to a
//! global failure surface.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};
use std::time::Duration;

use tracing::{info, instrument, warn};

use wanderhub_core::{BlogPostId, DestinationId, Role};

use crate::api::{
    ApiError, DestinationPatch, Identity, NewDestination, TravelApi, UserRecord,
};
use crate::session::{self, SessionGuardError, SessionStore};
use crate::state::{DashboardView, EditorState};
use crate::status::StatusSlot;

/// Fallback shown when the backend rejects a write without a usable message.
const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Interactive confirmation for destructive actions.
///
/// The UI supplies a real prompt; tests supply approve/deny stubs. Any
/// `Fn(&str) -> bool` closure implements this.
pub trait Confirm: Send + Sync {
    /// Ask the user to approve an irreversible action.
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// One admin dashboard instance.
///
/// Owns its view state exclusively; the only cross-component shared resource
/// is the [`SessionStore`], which this core reads but never writes outside
/// the sign-out flow.
pub struct Dashboard<A> {
    api: A,
    session: SessionStore,
    confirm: Box<dyn Confirm>,
    view: RwLock<DashboardView>,
    editor: Mutex<EditorState>,
    status: StatusSlot,
    identity: RwLock<Option<Identity>>,
    alive: AtomicBool,
}

/// Clears the coarse loading flag when dropped, so the UI never sticks in a
/// loading state after an early return.
pub(crate) struct LoadingGuard<'a> {
    view: &'a RwLock<DashboardView>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.view
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .loading = false;
    }
}

impl<A: TravelApi> Dashboard<A> {
    /// Create a dashboard over a backend client.
    ///
    /// `status_clear` is the transient message auto-dismiss delay, normally
    /// [`DashboardConfig::status_clear`](crate::config::DashboardConfig).
    #[must_use]
    pub fn new(
        api: A,
        session: SessionStore,
        confirm: Box<dyn Confirm>,
        status_clear: Duration,
    ) -> Self {
        Self {
            api,
            session,
            confirm,
            view: RwLock::new(DashboardView::default()),
            editor: Mutex::new(EditorState::default()),
            status: StatusSlot::new(status_clear),
            identity: RwLock::new(None),
            alive: AtomicBool::new(true),
        }
    }

    /// Gate on the session guard, then perform the initial load.
    ///
    /// # Errors
    ///
    /// Returns the guard error when no admin is signed in; the caller
    /// navigates away without retrying.
    #[instrument(skip(self))]
    pub async fn mount(&self) -> Result<(), SessionGuardError> {
        let identity = session::guard_admin(&self.session)?;
        info!(admin = %identity.id, "Admin dashboard mounted");

        *self
            .identity
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(identity);

        self.resync().await;
        Ok(())
    }

    /// Manual refresh: full re-run of both synchronizer layers.
    pub async fn refresh(&self) {
        self.resync().await;
    }

    /// Mark this instance unmounted. In-flight requests are not aborted;
    /// their late responses are dropped instead of committed.
    pub fn close(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }

    /// Sign the admin out: backend session teardown, then local teardown.
    pub async fn sign_out(&self) {
        if let Err(e) = self.api.sign_out().await {
            warn!("Backend sign-out failed: {e}");
        }
        self.session.sign_out();
        self.close();
    }

    /// Snapshot of the current view state.
    #[must_use]
    pub fn view(&self) -> DashboardView {
        self.view
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The status message slot (shared with the embedding UI).
    #[must_use]
    pub const fn status(&self) -> &StatusSlot {
        &self.status
    }

    /// The destination editing surface state.
    #[must_use]
    pub fn editor(&self) -> EditorState {
        *self.editor.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open the destination editor, optionally targeting an existing record.
    pub fn open_editor(&self, editing: Option<DestinationId>) {
        *self.editor.lock().unwrap_or_else(PoisonError::into_inner) =
            EditorState { open: true, editing };
    }

    /// Close the editing surface and clear the selection.
    pub fn close_editor(&self) {
        *self.editor.lock().unwrap_or_else(PoisonError::into_inner) = EditorState::default();
    }

    /// The identity stored at mount, if the guard passed.
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.identity
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn api(&self) -> &A {
        &self.api
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Apply a view-state update, unless this instance has been unmounted.
    /// Stale responses arriving after [`Dashboard::close`] are dropped here.
    pub(crate) fn commit(&self, apply: impl FnOnce(&mut DashboardView)) {
        if !self.is_alive() {
            return;
        }
        apply(&mut self.view.write().unwrap_or_else(PoisonError::into_inner));
    }

    /// Set the coarse loading flag; the returned guard clears it on drop.
    pub(crate) fn begin_loading(&self) -> LoadingGuard<'_> {
        self.commit(|view| view.loading = true);
        LoadingGuard { view: &self.view }
    }

    // =========================================================================
    // Mutation handlers
    // =========================================================================

    /// Delete a user account.
    ///
    /// Self-delete and deleting another admin are hard-blocked before any
    /// network call, independent of backend enforcement. On success the user
    /// is removed from the local list by identity match and only the
    /// aggregate layer is refreshed; the list is already locally consistent.
    ///
    /// Returns whether the deletion was applied.
    #[instrument(skip(self, target), fields(user = %target.id))]
    pub async fn delete_user(&self, target: &UserRecord) -> bool {
        let Some(acting) = self.identity() else {
            self.status.error("You must be signed in as an admin.");
            return false;
        };

        if target.id == acting.id {
            self.status.error("You cannot delete your own account!");
            return false;
        }

        if target.role == Role::Admin {
            self.status.error("You cannot delete other admin accounts!");
            return false;
        }

        let prompt = format!(
            "Delete user \"{}\"? This cannot be undone.",
            target.name
        );
        if !self.confirm.confirm(&prompt) {
            return false;
        }

        let _loading = self.begin_loading();
        match self.api.delete_user(target.id).await {
            Ok(()) => {
                let id = target.id;
                self.commit(|view| view.users.retain(|user| user.id != id));
                self.status.success("User deleted successfully!");
                self.refresh_aggregate().await;
                true
            }
            Err(e) => {
                warn!("Failed to delete user: {e}");
                self.status.error(failure_text(&e));
                false
            }
        }
    }

    /// Delete a blog post, reconciling the local list by identity match and
    /// refreshing only the aggregate counts.
    #[instrument(skip(self))]
    pub async fn delete_blog_post(&self, id: BlogPostId) -> bool {
        if !self
            .confirm
            .confirm("Delete this blog post? This cannot be undone.")
        {
            return false;
        }

        let _loading = self.begin_loading();
        match self.api.delete_blog_post(id).await {
            Ok(()) => {
                self.commit(|view| view.blog_posts.retain(|post| post.id != id));
                self.status.success("Blog post deleted successfully!");
                self.refresh_aggregate().await;
                true
            }
            Err(e) => {
                warn!("Failed to delete blog post: {e}");
                self.status.error(failure_text(&e));
                false
            }
        }
    }

    /// Create a destination, then re-fetch everything.
    ///
    /// Destinations carry cross-field derived content (highlight parsing),
    /// so the authoritative re-fetch is preferred over an optimistic merge.
    #[instrument(skip(self, destination))]
    pub async fn create_destination(&self, destination: NewDestination) -> bool {
        let _loading = self.begin_loading();
        match self.api.create_destination(destination).await {
            Ok(created) => {
                info!(destination = %created.destination_id, "Destination created");
                self.close_editor();
                self.status.success("Destination created successfully!");
                self.resync().await;
                true
            }
            Err(e) => {
                warn!("Failed to create destination: {e}");
                self.status.error(failure_text(&e));
                false
            }
        }
    }

    /// Apply a partial update to a destination, then re-fetch everything.
    #[instrument(skip(self, patch))]
    pub async fn update_destination(&self, id: DestinationId, patch: DestinationPatch) -> bool {
        let _loading = self.begin_loading();
        match self.api.update_destination(id, patch).await {
            Ok(_) => {
                self.close_editor();
                self.status.success("Destination updated successfully!");
                self.resync().await;
                true
            }
            Err(e) => {
                warn!("Failed to update destination: {e}");
                self.status.error(failure_text(&e));
                false
            }
        }
    }

    /// Delete a destination, then re-fetch everything.
    #[instrument(skip(self))]
    pub async fn delete_destination(&self, id: DestinationId) -> bool {
        if !self
            .confirm
            .confirm("Delete this destination? This cannot be undone.")
        {
            return false;
        }

        let _loading = self.begin_loading();
        match self.api.delete_destination(id).await {
            Ok(()) => {
                self.status.success("Destination deleted successfully!");
                self.resync().await;
                true
            }
            Err(e) => {
                warn!("Failed to delete destination: {e}");
                self.status.error(failure_text(&e));
                false
            }
        }
    }
}

impl<A> std::fmt::Debug for Dashboard<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("alive", &self.alive.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Render a write failure as one short sentence, using the backend's message
/// verbatim when it supplied one.
pub(crate) fn failure_text(error: &ApiError) -> String {
    error
        .backend_message()
        .map_or_else(|| GENERIC_FAILURE.to_string(), str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_text_prefers_backend_message() {
        let err = ApiError::Api {
            status: 409,
            message: "Destination ID already exists".to_string(),
        };
        assert_eq!(failure_text(&err), "Destination ID already exists");
    }

    #[test]
    fn test_failure_text_generic_fallback() {
        assert_eq!(failure_text(&ApiError::Unauthorized), GENERIC_FAILURE);
    }

    #[test]
    fn test_closure_implements_confirm() {
        let always = |_: &str| true;
        assert!(Confirm::confirm(&always, "sure?"));
        let never = |_: &str| false;
        assert!(!Confirm::confirm(&never, "sure?"));
    }
}
