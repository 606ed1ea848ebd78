//! # Log Sanitization
//!
//! Violation attempts are worth logging, but the rejected payload is
//! exactly the data that must not be written anywhere. Anything that logs
//! a gate input goes through [`sanitize_for_logging`] first.

use serde_json::{Map, Value};

use crate::fields::is_forbidden_field;

/// Replacement for the value of a forbidden field.
pub const REDACTED: &str = "[REDACTED]";

/// Longest string value kept verbatim, in characters.
pub const MAX_LOGGED_CHARS: usize = 50;

fn truncate(s: &str) -> String {
    if s.chars().count() <= MAX_LOGGED_CHARS {
        s.to_string()
    } else {
        let head: String = s.chars().take(MAX_LOGGED_CHARS).collect();
        format!("{head}...")
    }
}

fn sanitize_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(sanitize_for_logging(map)),
        Value::Array(items) => Value::Array(items.iter().map(sanitize_value).collect()),
        Value::String(s) => Value::String(truncate(s)),
        other => Value::String(truncate(&other.to_string())),
    }
}

/// A log-safe copy of `data`.
///
/// Forbidden keys keep their name but lose their value. Strings longer
/// than [`MAX_LOGGED_CHARS`] are cut. Numbers, booleans and nulls become
/// strings. Nested objects and arrays are sanitized recursively, so a
/// forbidden field cannot hide inside a container.
pub fn sanitize_for_logging(data: &Map<String, Value>) -> Map<String, Value> {
    data.iter()
        .map(|(key, value)| {
            let clean = if is_forbidden_field(key) {
                Value::String(REDACTED.to_string())
            } else {
                sanitize_value(value)
            };
            (key.clone(), clean)
        })
        .collect()
}
