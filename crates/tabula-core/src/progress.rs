//! Progress tracking shared between a session and whatever drives it.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct ProgressState {
    percent: AtomicU8,
    complete: AtomicBool,
    status: Mutex<Option<String>>,
}

/// Clonable progress handle. Clones observe and update the same state.
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    state: Arc<ProgressState>,
}

impl ProgressTracker {
    /// Fresh tracker at 0%.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report percent complete, clamped to 100.
    pub fn report(&self, percent: u8) {
        self.state.percent.store(percent.min(100), Ordering::Release);
    }

    /// Last reported percentage.
    #[must_use]
    pub fn percent(&self) -> u8 {
        self.state.percent.load(Ordering::Acquire)
    }

    /// Replace the status message.
    pub fn set_status(&self, status: impl Into<String>) {
        if let Ok(mut guard) = self.state.status.lock() {
            *guard = Some(status.into());
        }
    }

    /// Current status message.
    #[must_use]
    pub fn status(&self) -> Option<String> {
        self.state.status.lock().ok().and_then(|g| g.clone())
    }

    /// Mark as finished (100%).
    pub fn complete(&self) {
        self.report(100);
        self.state.complete.store(true, Ordering::Release);
    }

    /// Whether [`complete`](Self::complete) has been called.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state.complete.load(Ordering::Acquire)
    }

    /// Whether two handles share state.
    #[must_use]
    pub fn shares_state_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}
