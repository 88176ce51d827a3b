//! Context-scoped storage for "current" dimension values.
//!
//! Current values are isolated per thread: each thread sees and mutates only
//! its own selections, never another thread's. Storage is keyed by
//! (registry id, dimension name) so independent [`Registry`](crate::Registry)
//! instances on the same thread never observe each other's overrides.
//!
//! Nothing here is initialized implicitly: a thread that never set a current
//! value falls back to the process-wide default, and a thread's entries
//! disappear with the thread. [`ContextScope`] offers explicit teardown for
//! contexts that outlive a unit of work (e.g., one request on a pooled
//! worker thread).

use crate::dimension::DimensionName;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;

thread_local! {
    static CURRENT: RefCell<HashMap<(u64, DimensionName), Value>> =
        RefCell::new(HashMap::new());
}

/// Read this thread's current value for a dimension, if one was set.
pub(crate) fn get(registry: u64, dimension: DimensionName) -> Option<Value> {
    CURRENT.with(|cell| cell.borrow().get(&(registry, dimension)).cloned())
}

/// Store this thread's current value for a dimension.
pub(crate) fn set(registry: u64, dimension: DimensionName, value: Value) {
    CURRENT.with(|cell| {
        cell.borrow_mut().insert((registry, dimension), value);
    });
}

/// Drop this thread's current value for a dimension, reverting to default.
pub(crate) fn clear(registry: u64, dimension: DimensionName) {
    CURRENT.with(|cell| {
        cell.borrow_mut().remove(&(registry, dimension));
    });
}

/// Drop every current value this thread holds for a registry.
pub(crate) fn clear_registry(registry: u64) {
    CURRENT.with(|cell| {
        cell.borrow_mut().retain(|(id, _), _| *id != registry);
    });
}

/// RAII guard marking one logical execution context.
///
/// Obtained from [`Registry::context_scope`](crate::Registry::context_scope).
/// When dropped, it clears every current value the thread set for that
/// registry, so overrides never leak from one unit of work into the next on
/// a reused thread.
#[must_use = "dropping this guard clears the context's current values"]
pub struct ContextScope {
    registry: u64,
}

impl ContextScope {
    pub(crate) fn new(registry: u64) -> Self {
        Self { registry }
    }
}

impl Drop for ContextScope {
    fn drop(&mut self) {
        clear_registry(self.registry);
    }
}
