//! JSON encoding and field flattening.
//!
//! Values are encoded with serde_json and attached to records as raw JSON
//! values, never re-stringified. An encoded object is flattened into one
//! top-level field per member; everything else lands under a single
//! caller-chosen field key.

use serde::Serialize;
use serde_json::Value;

use crate::error::EncodingError;

/// Encode a value to JSON for attachment to a log record.
pub fn encode<T: Serialize>(data: &T) -> Result<Value, EncodingError> {
    Ok(serde_json::to_value(data)?)
}

/// Turn an encoded value into record fields.
///
/// A JSON object contributes each of its top-level members as a separate
/// field; any other value becomes the single field `field` carrying the
/// raw JSON value.
pub fn value_fields(field: &str, value: Value) -> Vec<(String, Value)> {
    match value {
        Value::Object(members) => members.into_iter().collect(),
        other => vec![(field.to_string(), other)],
    }
}

/// Render a JSON value as a bare string for line-oriented sinks.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => value.to_string(), // Arrays and objects as JSON strings
    }
}
