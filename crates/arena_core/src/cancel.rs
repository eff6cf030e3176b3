//! Cooperative cancellation for long-running episodes.
//!
//! Search-backed policies can take arbitrarily long per move, so the episode
//! loop polls a shared flag between moves instead of relying on episodes to
//! finish on their own.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Thread-safe cancellation flag.
///
/// Clones share the same flag, so a token handed to a tournament can be
/// cancelled from another thread. `is_cancelled()` is a single atomic load.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Every clone observes it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Clear the flag so the token can be reused for a new run.
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "cancel_tests.rs"]
mod cancel_tests;
