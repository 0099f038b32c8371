//! Log sinks.
//!
//! The crate hands assembled records to a sink and never inspects what
//! the sink does with them. Formatting, transport, and storage are
//! entirely sink business.

use std::fmt::Write as _;
use std::sync::Mutex;

use crate::fields::value_to_string;
use crate::record::emit::Record;

/// Destination for assembled log records.
pub trait LogSink: Send + Sync {
    fn emit(&self, record: &Record);
}

/// Sink that forwards records through the `log` facade.
///
/// Context entries and fields are rendered as `key=value` pairs after the
/// message, object and array fields as JSON text.
#[derive(Debug, Default, Clone, Copy)]
pub struct FacadeSink;

impl LogSink for FacadeSink {
    fn emit(&self, record: &Record) {
        let mut line = record.message.clone();
        for (key, value) in &record.context {
            let _ = write!(line, " {}={}", key, value);
        }
        for (key, value) in &record.fields {
            let _ = write!(line, " {}={}", key, value_to_string(value));
        }
        log::log!(target: "event", record.level, "{}", line);
    }
}

/// Sink that captures records in memory for assertions.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Record>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every record emitted so far.
    pub fn records(&self) -> Vec<Record> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl LogSink for MemorySink {
    fn emit(&self, record: &Record) {
        match self.records.lock() {
            Ok(mut records) => records.push(record.clone()),
            Err(poisoned) => poisoned.into_inner().push(record.clone()),
        }
    }
}
