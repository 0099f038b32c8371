//! Contextual metadata propagation.
//!
//! Key/value pairs established here are visible to every log record
//! emitted during a bounded scope and are restored exactly when the
//! scope exits:
//! - `map` - per-execution-unit context map backend
//! - `scope` - synchronous scopes with guaranteed restoration
//! - `future` - scopes bound to logical tasks over a worker pool

pub mod future;
pub mod map;
pub mod scope;

pub use future::*;
pub use map::*;
pub use scope::*;
