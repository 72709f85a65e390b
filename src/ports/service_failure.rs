//! Raw failure shape returned by service ports.
//!
//! Adapters pass the service's error body through untouched; interpreting it
//! is the coordinators' job.

use serde_json::{json, Value};

/// Unnormalized failure from an external service.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceFailure {
    /// HTTP status, or `None` when the request never got a response.
    pub status: Option<u16>,

    /// Error payload as sent by the service (any JSON shape).
    pub body: Value,
}

impl ServiceFailure {
    /// A response with an error status.
    pub fn http(status: u16, body: Value) -> Self {
        Self {
            status: Some(status),
            body,
        }
    }

    /// The request failed before a response arrived.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            body: json!({ "message": message.into() }),
        }
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self.status, Some(500..=599))
    }
}
