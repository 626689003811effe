//! Live-updatable configuration snapshots.

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use crate::retry;

/// Per-operation quality-of-service settings.
///
/// `timeout` of `None` means the caller's deadline applies unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Qos {
    pub timeout: Option<Duration>,
    pub retry: retry::Config,
}

/// A shared configuration cell with copy-on-read semantics.
///
/// Readers always observe a complete value: `get` clones the current state
/// under a read lock, so an in-flight `update` can never expose a torn
/// configuration. Writers replace the whole value at once.
#[derive(Debug, Default)]
pub struct Snapshot<T: Clone> {
    inner: RwLock<T>,
}

impl<T: Clone> Snapshot<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: RwLock::new(value),
        }
    }

    /// Clone the current value.
    pub fn get(&self) -> T {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the value; readers see either the old or new value, never a mix.
    pub fn update(&self, value: T) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = value;
    }
}
