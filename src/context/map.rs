//! Per-execution-unit context map.
//!
//! One string-to-string map per thread, springing into existence empty on
//! first touch and torn down with the thread. The async scope in
//! `context::future` rebinds it around polls, which is what keeps a
//! logical task's view intact when the runtime multiplexes tasks over a
//! worker pool.

use std::cell::RefCell;
use std::collections::HashMap;

thread_local! {
    static CONTEXT_MAP: RefCell<HashMap<String, String>> = RefCell::new(HashMap::new());
}

/// Get the current value for a context key, or `None` when absent.
///
/// Absence is distinct from presence with an empty value.
pub fn get(key: &str) -> Option<String> {
    CONTEXT_MAP.with(|map| map.borrow().get(key).cloned())
}

/// Set a context key for the current execution unit.
pub fn insert(key: &str, value: &str) {
    CONTEXT_MAP.with(|map| {
        map.borrow_mut().insert(key.to_string(), value.to_string());
    });
}

/// Remove a context key from the current execution unit.
pub fn remove(key: &str) {
    CONTEXT_MAP.with(|map| {
        map.borrow_mut().remove(key);
    });
}

/// Copy of the full current map.
///
/// Sinks read this at emission time; the async scope uses it to capture
/// the creating task's view.
pub fn snapshot() -> HashMap<String, String> {
    CONTEXT_MAP.with(|map| map.borrow().clone())
}

/// Install `next` as the ambient map, returning the previous one.
///
/// Bind/unbind primitive for the async scope. Callers must reinstate the
/// returned map when they are done with the binding.
pub fn swap(next: HashMap<String, String>) -> HashMap<String, String> {
    CONTEXT_MAP.with(|map| std::mem::replace(&mut *map.borrow_mut(), next))
}
