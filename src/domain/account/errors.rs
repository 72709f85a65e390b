//! Account-side errors.
//!
//! Every auth service failure is classified into one closed [`AuthError`]
//! variant carrying the normalized [`ServiceError`] payload.
//!
//! | Variant | Typical origin |
//! |---------|----------------|
//! | Rejected | 401 / 403, bad credentials, OAuth denial |
//! | Conflict | 409, email already registered |
//! | Invalid | 400 / 422, server-side field validation |
//! | Unavailable | transport failure, 5xx, anything else |

use thiserror::Error;

use crate::domain::foundation::{ServiceError, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Authentication rejected: {0}")]
    Rejected(ServiceError),

    #[error("Account conflict: {0}")]
    Conflict(ServiceError),

    #[error("Invalid account details: {0}")]
    Invalid(ServiceError),

    #[error("Auth service unavailable: {0}")]
    Unavailable(ServiceError),
}

impl AuthError {
    pub fn rejected(message: impl Into<String>) -> Self {
        AuthError::Rejected(ServiceError::new(message))
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        AuthError::Unavailable(ServiceError::new(message))
    }

    /// The normalized payload.
    pub fn detail(&self) -> &ServiceError {
        match self {
            AuthError::Rejected(e)
            | AuthError::Conflict(e)
            | AuthError::Invalid(e)
            | AuthError::Unavailable(e) => e,
        }
    }

    /// Raw message suitable for display.
    pub fn message(&self) -> &str {
        &self.detail().message
    }

    /// True when any stored token must be discarded.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::Rejected(_))
    }
}

/// Failure of the `register` contract: either local or from the service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}
