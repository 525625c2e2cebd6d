//! Lock-free single-value slot holding the most recently refreshed value.

use arc_swap::ArcSwapOption;
use std::fmt;
use std::sync::Arc;

/// Holds the current value of one beacon, or nothing.
///
/// Reads never block. Only the owning scheduler writes to it.
pub struct CacheCell<T> {
    slot: ArcSwapOption<T>,
}

impl<T> CacheCell<T> {
    /// Creates a cell holding `initial`.
    pub fn new(initial: Option<T>) -> Self {
        Self {
            slot: ArcSwapOption::from(initial.map(Arc::new)),
        }
    }

    /// Gets the current value.
    pub fn load(&self) -> Option<Arc<T>> {
        self.slot.load_full()
    }

    /// Whether the cell currently holds no value.
    pub fn is_empty(&self) -> bool {
        self.slot.load().is_none()
    }

    /// Replaces the current value atomically.
    pub(crate) fn store(&self, value: Option<T>) {
        self.slot.store(value.map(Arc::new));
    }
}

impl<T> Default for CacheCell<T> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<T: fmt::Debug> fmt::Debug for CacheCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheCell")
            .field("value", &self.load())
            .finish()
    }
}
