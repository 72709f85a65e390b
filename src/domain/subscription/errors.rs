//! Billing-side and payment-input errors.

use thiserror::Error;

use super::SubscriptionPlan;
use crate::domain::foundation::ServiceError;

/// Failure of a subscription service call, or a local guard in front of one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscriptionError {
    /// 402: the card was declined or payment could not be collected.
    #[error("Payment declined: {0}")]
    Declined(ServiceError),

    /// 401 / 403: the session token was rejected.
    #[error("Not authenticated: {0}")]
    Unauthenticated(ServiceError),

    /// Other 4xx responses.
    #[error("Subscription request rejected: {0}")]
    Rejected(ServiceError),

    /// Transport failure or 5xx.
    #[error("Subscription service unavailable: {0}")]
    Unavailable(ServiceError),

    /// A paid plan was requested without a payment method. Never sent.
    #[error("A payment method is required for the paid plan")]
    MissingPaymentMethod,

    /// The service answered with something that is not a subscription.
    #[error("Malformed subscription response: {0}")]
    Malformed(String),
}

impl SubscriptionError {
    /// Raw message suitable for display.
    pub fn message(&self) -> String {
        match self {
            SubscriptionError::Declined(e)
            | SubscriptionError::Unauthenticated(e)
            | SubscriptionError::Rejected(e)
            | SubscriptionError::Unavailable(e) => e.message.clone(),
            other => other.to_string(),
        }
    }

    /// True when the stored session must be discarded.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, SubscriptionError::Unauthenticated(_))
    }
}

/// Card input field a tokenizer error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardField {
    Number,
    Expiry,
    Cvc,
    PostalCode,
    /// The card as a whole (declined, unsupported brand, ...).
    Card,
}

impl CardField {
    /// Maps a provider error code such as `invalid_cvc` to the field it concerns.
    pub fn from_code(code: &str) -> Self {
        if code.contains("number") {
            CardField::Number
        } else if code.contains("expiry") || code == "expired_card" {
            CardField::Expiry
        } else if code.contains("cvc") {
            CardField::Cvc
        } else if code.contains("zip") || code.contains("postal") {
            CardField::PostalCode
        } else {
            CardField::Card
        }
    }
}

/// Card input rejected by the tokenizer. The user corrects it and resubmits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct PaymentInputError {
    pub field: CardField,
    pub code: String,
    pub message: String,
}

impl PaymentInputError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            field: CardField::from_code(&code),
            code,
            message: message.into(),
        }
    }
}

/// Attempted switch to the plan already in effect. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Already on the {plan} plan")]
pub struct NoOpError {
    pub plan: SubscriptionPlan,
}
