//! Default logger and metadata-scoped helpers.
//!
//! Free functions over a process-wide event logger, each establishing the
//! supplied metadata for exactly the emitted record.

use std::error::Error;
use std::fmt::Write as _;

use lazy_static::lazy_static;
use log::Level;
use serde::Serialize;
use serde_json::Value;

use crate::context::with_metadata;
use crate::error::EncodingError;
use crate::logger::event::EventLogger;
use crate::record::FacadeSink;

lazy_static! {
    /// Process-wide logger used by the free logging functions.
    static ref EVENT_LOGGER: EventLogger<FacadeSink> = EventLogger::new(FacadeSink);
}

/// The process-wide default event logger.
pub fn default_logger() -> &'static EventLogger<FacadeSink> {
    &EVENT_LOGGER
}

/// Log at info with additional metadata in scope for the record.
pub fn log_info(message: &str, entries: &[(&str, Option<&str>)]) {
    with_metadata(entries, || EVENT_LOGGER.log(Level::Info, message));
}

/// Log at warn with additional metadata in scope for the record.
pub fn log_warning(message: &str, entries: &[(&str, Option<&str>)]) {
    with_metadata(entries, || EVENT_LOGGER.log(Level::Warn, message));
}

/// Log at warn with the cause chain rendered into an `error` field.
pub fn log_warning_with_cause(
    message: &str,
    cause: &dyn Error,
    entries: &[(&str, Option<&str>)],
) {
    let mut chain = cause.to_string();
    let mut source = cause.source();
    while let Some(err) = source {
        let _ = write!(chain, ": {}", err);
        source = err.source();
    }

    with_metadata(entries, || {
        EVENT_LOGGER.log_json(Level::Warn, message, "error", Value::String(chain));
    });
}

/// Encode `data` and log it at info under `field` on the default logger.
pub fn log_value<T: Serialize>(
    message: &str,
    field: &str,
    data: &T,
) -> Result<(), EncodingError> {
    EVENT_LOGGER.log_value(Level::Info, message, field, data)
}

/// Encode `data` and log it at info with its values at the record root.
pub fn log_value_flat<T: Serialize>(message: &str, data: &T) -> Result<(), EncodingError> {
    EVENT_LOGGER.log_value_flat(Level::Info, message, data)
}
