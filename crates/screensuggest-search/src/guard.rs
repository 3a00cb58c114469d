//! Loading-flag bookkeeping shared by the state holders.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// State that carries a `loading` flag owned by in-flight requests.
pub(crate) trait Loading {
    /// Clears `loading` if request `seq` still owns it.
    fn finish(&mut self, seq: u64);
}

/// Locks `state`, recovering the data from a poisoned lock.
///
/// State here is plain data with no cross-field invariant a panic could
/// leave half-applied.
pub(crate) fn lock<S>(state: &Mutex<S>) -> MutexGuard<'_, S> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears the loading flag when dropped.
///
/// Held across the catalog call so the flag is released on every exit
/// path, including cancellation of the owning future.
pub(crate) struct LoadingGuard<'a, S: Loading> {
    state: &'a Mutex<S>,
    seq: u64,
}

impl<'a, S: Loading> LoadingGuard<'a, S> {
    pub(crate) const fn new(state: &'a Mutex<S>, seq: u64) -> Self {
        Self { state, seq }
    }
}

impl<S: Loading> Drop for LoadingGuard<'_, S> {
    fn drop(&mut self) {
        lock(self.state).finish(self.seq);
    }
}
