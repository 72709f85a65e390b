//! Reduction of arbitrary service error bodies to [`ServiceError`].
//!
//! Services disagree on shape: `{"message"}`, `{"error", "error_description"}`,
//! `{"error": {"message"}}`, `{"detail"}`, bare strings, and field errors as
//! maps of strings, maps of string arrays, or arrays of `{field, message}`.

use serde_json::{Map, Value};

use crate::domain::foundation::ServiceError;
use crate::ports::ServiceFailure;

const MESSAGE_KEYS: [&str; 5] = ["message", "error_description", "error", "detail", "title"];
const FIELD_ERROR_KEYS: [&str; 3] = ["errors", "fieldErrors", "field_errors"];

/// Builds the normalized error for a raw failure.
pub(crate) fn normalize(failure: &ServiceFailure) -> ServiceError {
    let mut error = ServiceError::default();

    if let Value::Object(body) = &failure.body {
        for key in FIELD_ERROR_KEYS {
            if let Some(fields) = body.get(key) {
                collect_field_errors(fields, &mut error);
            }
        }
    }

    error.message = message_of(&failure.body).unwrap_or_else(|| fallback_message(failure, &error));
    error
}

fn message_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Object(map) => MESSAGE_KEYS
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(message_of),
        _ => None,
    }
}

fn fallback_message(failure: &ServiceFailure, error: &ServiceError) -> String {
    if error.has_field_errors() {
        return "Please correct the highlighted fields".to_string();
    }
    match failure.status {
        Some(status) => format!("Request failed with status {}", status),
        None => "Service unreachable".to_string(),
    }
}

fn collect_field_errors(fields: &Value, error: &mut ServiceError) {
    match fields {
        Value::Object(map) => collect_from_map(map, error),
        Value::Array(items) => {
            for item in items {
                let field = item.get("field").and_then(Value::as_str);
                let message = item.get("message").and_then(Value::as_str);
                if let (Some(field), Some(message)) = (field, message) {
                    insert_first(error, field, message);
                }
            }
        }
        _ => {}
    }
}

fn collect_from_map(map: &Map<String, Value>, error: &mut ServiceError) {
    for (field, detail) in map {
        let message = match detail {
            Value::String(s) => Some(s.as_str()),
            Value::Array(items) => items.iter().find_map(Value::as_str),
            Value::Object(inner) => inner.get("message").and_then(Value::as_str),
            _ => None,
        };
        if let Some(message) = message {
            insert_first(error, field, message);
        }
    }
}

fn insert_first(error: &mut ServiceError, field: &str, message: &str) {
    error
        .field_errors
        .entry(field.to_string())
        .or_insert_with(|| message.to_string());
}
