//! Transient status messages.
//!
//! Every mutation outcome funnels into a single message slot: the newest
//! message replaces the oldest, and each message schedules its own auto-clear.
//! Replacing a message aborts the pending clear timer, so at most one timer
//! is ever outstanding.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Whether a status message reports success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// A short-lived banner tied to the most recent user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

/// Single-slot holder for the live status message.
///
/// Cloning is cheap; all clones observe the same slot.
#[derive(Clone)]
pub struct StatusSlot {
    inner: Arc<StatusSlotInner>,
}

struct StatusSlotInner {
    message: Mutex<Option<StatusMessage>>,
    timer: Mutex<Option<JoinHandle<()>>>,
    clear_after: Duration,
}

impl StatusSlot {
    /// Create a slot whose messages auto-clear after `clear_after`.
    #[must_use]
    pub fn new(clear_after: Duration) -> Self {
        Self {
            inner: Arc::new(StatusSlotInner {
                message: Mutex::new(None),
                timer: Mutex::new(None),
                clear_after,
            }),
        }
    }

    /// Show a success message.
    pub fn success(&self, text: impl Into<String>) {
        self.set(StatusKind::Success, text.into());
    }

    /// Show an error message.
    pub fn error(&self, text: impl Into<String>) {
        self.set(StatusKind::Error, text.into());
    }

    /// Replace the live message and reschedule the auto-clear.
    ///
    /// Must be called from within a tokio runtime.
    pub fn set(&self, kind: StatusKind, text: String) {
        *self
            .inner
            .message
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(StatusMessage { kind, text });

        let inner = Arc::clone(&self.inner);
        let clear_task = tokio::spawn(async move {
            tokio::time::sleep(inner.clear_after).await;
            *inner
                .message
                .lock()
                .unwrap_or_else(PoisonError::into_inner) = None;
        });

        let previous = self
            .inner
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(clear_task);
        if let Some(task) = previous {
            task.abort();
        }
    }

    /// Dismiss the live message immediately.
    pub fn dismiss(&self) {
        if let Some(task) = self
            .inner
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            task.abort();
        }
        *self
            .inner
            .message
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// The live message, if any.
    #[must_use]
    pub fn current(&self) -> Option<StatusMessage> {
        self.inner
            .message
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl std::fmt::Debug for StatusSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusSlot")
            .field("current", &self.current())
            .field("clear_after", &self.inner.clear_after)
            .finish()
    }
}
