//! Observer pattern for run progress.
//!
//! Observers are called from the map threads as well as the caller's
//! thread, so implementations must be `Send + Sync`.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::progress::MapEvent;

/// Receives progress events from the executor.
pub trait ProgressObserver: Send + Sync {
    /// Handle one event.
    fn on_event(&self, event: &MapEvent);
}

/// Subject that forwards events to a collection of observers.
pub struct ProgressSubject {
    observers: RwLock<Vec<Arc<dyn ProgressObserver>>>,
}

impl ProgressSubject {
    /// Create a new subject with no observers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            observers: RwLock::new(Vec::new()),
        }
    }

    /// Register an observer.
    pub fn register(&self, observer: Arc<dyn ProgressObserver>) {
        self.observers.write().push(observer);
    }

    /// Unregister all observers.
    pub fn clear(&self) {
        self.observers.write().clear();
    }

    /// Get the number of registered observers.
    #[must_use]
    pub fn count(&self) -> usize {
        self.observers.read().len()
    }
}

impl Default for ProgressSubject {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for ProgressSubject {
    fn on_event(&self, event: &MapEvent) {
        for observer in self.observers.read().iter() {
            observer.on_event(event);
        }
    }
}
