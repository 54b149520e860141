//! # Request State
//!
//! The busy/error indicator shared by every call made through one
//! [`RequestExecutor`](crate::framework::RequestExecutor).
//!
//! `loading` is derived from a counter of outstanding calls, so two overlapping calls keep the
//! executor busy until *both* settle. `error` is still last-writer-wins: it holds the message of
//! whichever failing call settled most recently, and is cleared whenever a new call starts.
//! Observers that need per-call outcomes should look at the returned `Result` instead.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Point-in-time copy of a [`RequestState`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateSnapshot {
    pub loading: bool,
    pub in_flight: usize,
    pub error: Option<String>,
}

/// Shared busy/error state. Cloning yields another handle to the same state.
#[derive(Debug, Clone, Default)]
pub struct RequestState {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    in_flight: AtomicUsize,
    error: Mutex<Option<String>>,
}

impl RequestState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight() > 0
    }

    pub fn in_flight(&self) -> usize {
        self.inner.in_flight.load(Ordering::SeqCst)
    }

    pub fn error(&self) -> Option<String> {
        self.error_slot().clone()
    }

    pub fn snapshot(&self) -> StateSnapshot {
        let in_flight = self.in_flight();
        StateSnapshot {
            loading: in_flight > 0,
            in_flight,
            error: self.error(),
        }
    }

    /// Marks a call as started and clears the previous error.
    ///
    /// The returned guard marks the call as settled when dropped, whichever way the call ends.
    pub(crate) fn begin(&self) -> InFlightGuard {
        self.inner.in_flight.fetch_add(1, Ordering::SeqCst);
        *self.error_slot() = None;
        InFlightGuard { state: self.clone() }
    }

    pub(crate) fn record_error(&self, message: String) {
        *self.error_slot() = Some(message);
    }

    fn error_slot(&self) -> MutexGuard<'_, Option<String>> {
        // A panic while holding the lock cannot leave the Option half-written.
        self.inner.error.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Releases one in-flight mark on drop.
#[must_use = "dropping the guard immediately settles the call"]
pub struct InFlightGuard {
    state: RequestState,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.state.inner.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
