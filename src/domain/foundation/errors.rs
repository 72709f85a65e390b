//! Error types for the domain layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Local, field-attributable rejection raised before any service is called.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be at least {min} characters, got {actual}")]
    TooShort {
        field: String,
        min: usize,
        actual: usize,
    },

    #[error("Field '{field}' does not match '{other}'")]
    Mismatch { field: String, other: String },

    #[error("Field '{field}' must be accepted")]
    NotAccepted { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField {
            field: field.into(),
        }
    }

    /// Creates a minimum length validation error.
    pub fn too_short(field: impl Into<String>, min: usize, actual: usize) -> Self {
        ValidationError::TooShort {
            field: field.into(),
            min,
            actual,
        }
    }

    /// Creates a mismatch error between two fields that must be equal.
    pub fn mismatch(field: impl Into<String>, other: impl Into<String>) -> Self {
        ValidationError::Mismatch {
            field: field.into(),
            other: other.into(),
        }
    }

    /// Creates an error for a checkbox-style field that must be true.
    pub fn not_accepted(field: impl Into<String>) -> Self {
        ValidationError::NotAccepted {
            field: field.into(),
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// The field this error is attributed to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::Mismatch { field, .. }
            | ValidationError::NotAccepted { field }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }

    /// Human-readable reason without the field prefix.
    pub fn reason(&self) -> String {
        match self {
            ValidationError::EmptyField { .. } => "cannot be empty".to_string(),
            ValidationError::TooShort { min, .. } => {
                format!("must be at least {} characters", min)
            }
            ValidationError::Mismatch { other, .. } => format!("must match {}", other),
            ValidationError::NotAccepted { .. } => "must be accepted".to_string(),
            ValidationError::InvalidFormat { reason, .. } => reason.clone(),
        }
    }
}

/// Normalized failure shape shared by every coordinator.
///
/// External services return loosely-typed payloads; coordinators reduce them
/// to a message plus optional per-field details before anything else sees them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceError {
    pub message: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub field_errors: BTreeMap<String, String>,
}

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_errors: BTreeMap::new(),
        }
    }

    /// Attaches a field-level detail.
    pub fn with_field_error(
        mut self,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.field_errors.insert(field.into(), message.into());
        self
    }

    pub fn has_field_errors(&self) -> bool {
        !self.field_errors.is_empty()
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}
