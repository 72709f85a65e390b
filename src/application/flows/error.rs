//! Errors surfaced by the flows.

use thiserror::Error;

use crate::domain::account::{AuthError, RegisterError};
use crate::domain::foundation::{TransitionError, ValidationError};
use crate::domain::subscription::{NoOpError, PaymentInputError, SubscriptionError};

/// Closed union of everything a flow trigger can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    PaymentInput(#[from] PaymentInputError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Subscription(#[from] SubscriptionError),

    #[error(transparent)]
    NoOp(#[from] NoOpError),

    /// The trigger is not available in the current step.
    #[error("'{action}' is not available from {from}")]
    InvalidTransition { from: String, action: &'static str },

    /// The flow reached a terminal step.
    #[error("Flow has already finished")]
    Finished,

    /// The flow was torn down while the call was in flight.
    #[error("Flow was torn down; result discarded")]
    Discarded,
}

impl FlowError {
    pub(crate) fn invalid(from: impl std::fmt::Debug, action: &'static str) -> Self {
        FlowError::InvalidTransition {
            from: format!("{:?}", from),
            action,
        }
    }

    /// Raw message suitable for display next to the trigger.
    pub fn message(&self) -> String {
        match self {
            FlowError::Auth(e) => e.message().to_string(),
            FlowError::Subscription(e) => e.message(),
            other => other.to_string(),
        }
    }

    /// True for informational errors that leave the flow untouched.
    pub fn is_no_op(&self) -> bool {
        matches!(self, FlowError::NoOp(_))
    }
}

impl From<RegisterError> for FlowError {
    fn from(err: RegisterError) -> Self {
        match err {
            RegisterError::Validation(e) => FlowError::Validation(e),
            RegisterError::Auth(e) => FlowError::Auth(e),
        }
    }
}

impl From<TransitionError> for FlowError {
    fn from(err: TransitionError) -> Self {
        FlowError::InvalidTransition {
            from: err.from,
            action: "transition",
        }
    }
}
