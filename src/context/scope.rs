//! Scoped metadata for synchronous code.
//!
//! `with_metadata` establishes key/value pairs for the duration of a body
//! and restores the prior state of every touched key on every exit path,
//! including unwind. Keys the scope does not name are never read or
//! written.

use crate::context::map;

/// Guard that restores the snapshotted keys when dropped.
///
/// Guards drop in LIFO order with the call stack, so an inner scope
/// restores to the values the outer scope installed and the outer scope
/// restores to the pre-scope state.
#[derive(Debug)]
pub struct ScopeGuard {
    saved: Vec<(String, Option<String>)>,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..) {
            match value {
                Some(v) => map::insert(&key, &v),
                None => map::remove(&key),
            }
        }
    }
}

/// Enter a metadata scope, returning a guard that restores on drop.
///
/// Each entry sets its key for the current execution unit; a `None` value
/// removes the key for the duration of the scope. Entries apply in order,
/// so the last write for a repeated key wins while its pre-scope value is
/// snapshotted once, before the first write.
pub fn enter(entries: &[(&str, Option<&str>)]) -> ScopeGuard {
    let mut saved: Vec<(String, Option<String>)> = Vec::with_capacity(entries.len());

    for &(key, value) in entries {
        if !saved.iter().any(|(k, _)| k.as_str() == key) {
            saved.push((key.to_string(), map::get(key)));
        }
        match value {
            Some(v) => map::insert(key, v),
            None => map::remove(key),
        }
    }

    ScopeGuard { saved }
}

/// Run `body` with the given metadata entries in scope.
///
/// The prior value of every touched key is restored before this returns,
/// whether `body` returns normally or panics. A panic from `body`
/// propagates unchanged; the scope never swallows or wraps it.
///
/// # Examples
/// ```
/// use ctxlog_core::context::{self, with_metadata};
///
/// let result = with_metadata(&[("request_id", Some("req-1"))], || {
///     assert_eq!(context::get("request_id"), Some("req-1".to_string()));
///     42
/// });
/// assert_eq!(result, 42);
/// assert_eq!(context::get("request_id"), None);
/// ```
pub fn with_metadata<T>(entries: &[(&str, Option<&str>)], body: impl FnOnce() -> T) -> T {
    let _guard = enter(entries);
    body()
}
