//! Process-wide session state and the admin guard.
//!
//! The authenticated identity is the only state shared across components.
//! It is mutated exclusively by the sign-in/sign-out flows; the dashboard
//! core only ever reads it through [`SessionStore::current`].

use std::sync::{Arc, PoisonError, RwLock};

use thiserror::Error;

use wanderhub_core::Role;

use crate::api::Identity;

/// Why the admin guard rejected a mount.
///
/// Both outcomes are terminal for the dashboard: the caller navigates away
/// and does not retry. A later full reload re-runs the check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionGuardError {
    /// No identity in the session.
    #[error("not authenticated")]
    NotAuthenticated,
    /// Authenticated, but not an admin.
    #[error("not authorized for the admin dashboard")]
    NotAuthorized,
}

/// Shared handle to the process-wide authenticated identity.
///
/// Cloning is cheap; all clones observe the same identity.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<Identity>>>,
}

impl SessionStore {
    /// Create an empty session store (no one signed in).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install an identity (sign-in flow).
    pub fn sign_in(&self, identity: Identity) {
        *self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(identity);
    }

    /// Clear the identity (sign-out flow).
    pub fn sign_out(&self) {
        *self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Read the current identity, if any.
    #[must_use]
    pub fn current(&self) -> Option<Identity> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Gate the dashboard on an authenticated admin identity.
///
/// Runs once per mount; there is no background re-validation.
///
/// # Errors
///
/// Returns [`SessionGuardError::NotAuthenticated`] when no one is signed in,
/// or [`SessionGuardError::NotAuthorized`] when the signed-in identity is not
/// an admin.
pub fn guard_admin(session: &SessionStore) -> Result<Identity, SessionGuardError> {
    let identity = session
        .current()
        .ok_or(SessionGuardError::NotAuthenticated)?;

    if identity.role != Role::Admin {
        return Err(SessionGuardError::NotAuthorized);
    }

    Ok(identity)
}
