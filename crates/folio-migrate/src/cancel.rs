//! Cooperative cancellation for a migration run.
//!
//! Cancelling stops the run before its next network call. Writes the backend
//! already committed stay committed.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::MigrateError;

/// Shared cancellation flag. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Return [`MigrateError::Cancelled`] once cancellation was requested.
    ///
    /// # Errors
    ///
    /// Fails when [`Self::cancel`] was called on any clone.
    pub fn check(&self) -> Result<(), MigrateError> {
        if self.is_cancelled() {
            Err(MigrateError::Cancelled)
        } else {
            Ok(())
        }
    }
}
