//! Structured event logger.

use log::Level;
use serde::Serialize;
use serde_json::Value;

use crate::error::EncodingError;
use crate::fields::{encode, value_fields};
use crate::record::{LogSink, Record};

/// Field name for non-object values logged at the record root.
const DATA_FIELD: &str = "data";

/// Logger that assembles structured records and hands them to a sink.
///
/// Holds the sink by value; cheap handles like
/// [`FacadeSink`](crate::record::FacadeSink) copy freely, and shared
/// sinks can be held behind a reference-counted wrapper by the caller.
#[derive(Debug)]
pub struct EventLogger<S: LogSink> {
    sink: S,
}

impl<S: LogSink> EventLogger<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// The sink this logger emits to.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Emit a message with no structured fields.
    pub fn log(&self, level: Level, message: &str) {
        self.sink.emit(&Record::new(level, message, Vec::new()));
    }

    /// Attach a pre-encoded JSON value under a caller-chosen field key.
    pub fn log_json(&self, level: Level, message: &str, field: &str, json: Value) {
        self.sink
            .emit(&Record::new(level, message, vec![(field.to_string(), json)]));
    }

    /// Encode `data` and attach it under `field`.
    pub fn log_value<T: Serialize>(
        &self,
        level: Level,
        message: &str,
        field: &str,
        data: &T,
    ) -> Result<(), EncodingError> {
        self.log_json(level, message, field, encode(data)?);
        Ok(())
    }

    /// Encode `data` and set its values at the root of the record.
    ///
    /// An encoded object contributes each top-level member as its own
    /// field; any other value lands under the `"data"` field.
    pub fn log_value_flat<T: Serialize>(
        &self,
        level: Level,
        message: &str,
        data: &T,
    ) -> Result<(), EncodingError> {
        let fields = value_fields(DATA_FIELD, encode(data)?);
        self.sink.emit(&Record::new(level, message, fields));
        Ok(())
    }
}
