//! Error types.

use thiserror::Error;

/// Failure to encode a value for attachment to a log record.
///
/// This is the only error originating in this crate; the scope propagator
/// raises nothing of its own. Encoding failures propagate to the caller
/// of the logging call rather than being swallowed, so a bad log call can
/// fail the surrounding code.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// The serializer rejected the value.
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
