//! ctxlog Core - Scoped context propagation for structured logging
//!
//! This crate attaches contextual metadata to log records and serializes
//! arbitrary values to JSON fields within those records. The implementation
//! prioritizes:
//!
//! 1. **Restoration** - Every scope restores the exact prior context on
//!    every exit path, including unwind and cancellation
//! 2. **Isolation** - Context is private per logical execution unit; tasks
//!    multiplexed over a worker pool never observe each other's metadata
//! 3. **Delegation** - Record emission goes through the `log` facade and
//!    JSON encoding through serde_json; neither is reimplemented here
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `context` - per-unit context map, sync scopes, task-bound futures
//! - `fields` - JSON encoding and top-level field flattening
//! - `record` - record assembly and the sink seam
//! - `logger` - event logger over a sink handle, default-logger helpers
//! - `error` - the encoding error surfaced by logging calls

pub mod context;
pub mod error;
pub mod fields;
pub mod logger;
pub mod record;

pub use context::{scoped, with_metadata, FutureExt, ScopeGuard, ScopedFuture};
pub use error::EncodingError;
pub use logger::{
    default_logger, log_info, log_value, log_value_flat, log_warning, log_warning_with_cause,
    EventLogger,
};
pub use record::{FacadeSink, LogSink, MemorySink, Record};

/// Initialize the process-wide logger backend.
///
/// Idempotent; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_millis()
        .try_init();
}
