//! Log record assembly.

use std::collections::HashMap;

use log::Level;
use serde_json::Value;

use crate::context::map;

/// A structured log record handed to a sink.
#[derive(Debug, Clone)]
pub struct Record {
    pub level: Level,
    pub message: String,
    /// Structured fields in attachment order, values as raw JSON.
    pub fields: Vec<(String, Value)>,
    /// Context map of the emitting execution unit, captured at emission.
    pub context: HashMap<String, String>,
}

impl Record {
    /// Assemble a record, capturing the caller's current context map.
    pub fn new(level: Level, message: &str, fields: Vec<(String, Value)>) -> Self {
        Self {
            level,
            message: message.to_string(),
            fields,
            context: map::snapshot(),
        }
    }

    /// Look up a structured field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}
