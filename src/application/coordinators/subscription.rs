//! Subscription coordinator.
//!
//! Wraps the [`SubscriptionService`] port. Enforces the payment-method guard
//! before any call, turns wire payloads into [`SubscriptionState`], and
//! classifies failures into [`SubscriptionError`].

use std::sync::Arc;

use serde_json::Value;

use super::normalize::normalize;
use crate::domain::foundation::Timestamp;
use crate::domain::subscription::{
    PaymentMethodHandle, SubscriptionError, SubscriptionPlan, SubscriptionState, SubscriptionStatus,
};
use crate::ports::{PlanRequest, ServiceFailure, SubscriptionPayload, SubscriptionService};

#[derive(Clone)]
pub struct SubscriptionCoordinator {
    service: Arc<dyn SubscriptionService>,
}

impl SubscriptionCoordinator {
    pub fn new(service: Arc<dyn SubscriptionService>) -> Self {
        Self { service }
    }

    /// Current subscription. An account without one reads as
    /// [`SubscriptionState::none`].
    pub async fn get(&self) -> Result<SubscriptionState, SubscriptionError> {
        match self.service.get().await {
            Ok(payload) => into_state(payload),
            Err(failure) if failure.status == Some(404) => {
                tracing::debug!("No subscription on record");
                Ok(SubscriptionState::none())
            }
            Err(failure) => Err(classify(&failure, "get")),
        }
    }

    /// Starts a subscription on `plan`.
    pub async fn create(
        &self,
        plan: SubscriptionPlan,
        payment_method: Option<PaymentMethodHandle>,
    ) -> Result<SubscriptionState, SubscriptionError> {
        let payment_method = guard_payment_method(plan, payment_method)?;
        let request = PlanRequest {
            plan,
            payment_method: payment_method.as_ref().map(PaymentMethodHandle::expose),
        };

        tracing::info!(plan = %plan, "Creating subscription");
        match self.service.create(&request).await {
            Ok(payload) => into_state(payload),
            Err(failure) => Err(classify(&failure, "create")),
        }
    }

    /// Switches the existing subscription to `plan`.
    ///
    /// The response is only an acknowledgement. Callers re-fetch with
    /// [`SubscriptionCoordinator::get`] to see trial dates and status.
    pub async fn update(
        &self,
        plan: SubscriptionPlan,
        payment_method: Option<PaymentMethodHandle>,
    ) -> Result<(), SubscriptionError> {
        let payment_method = guard_payment_method(plan, payment_method)?;
        let request = PlanRequest {
            plan,
            payment_method: payment_method.as_ref().map(PaymentMethodHandle::expose),
        };

        tracing::info!(plan = %plan, "Updating subscription");
        self.service
            .update(&request)
            .await
            .map(|_| ())
            .map_err(|failure| classify(&failure, "update"))
    }

    /// Cancels at period end and returns the resulting state.
    pub async fn cancel(&self) -> Result<SubscriptionState, SubscriptionError> {
        tracing::info!("Canceling subscription");
        match self.service.cancel().await {
            Ok(payload) => into_state(payload),
            Err(failure) => Err(classify(&failure, "cancel")),
        }
    }
}

/// Paid requires a handle; free never carries one.
fn guard_payment_method(
    plan: SubscriptionPlan,
    payment_method: Option<PaymentMethodHandle>,
) -> Result<Option<PaymentMethodHandle>, SubscriptionError> {
    match (plan, payment_method) {
        (SubscriptionPlan::Paid, None) => Err(SubscriptionError::MissingPaymentMethod),
        (SubscriptionPlan::Paid, Some(handle)) => Ok(Some(handle)),
        (SubscriptionPlan::Free, Some(_)) => {
            tracing::debug!("Dropping payment method for free plan");
            Ok(None)
        }
        (SubscriptionPlan::Free, None) => Ok(None),
    }
}

fn into_state(payload: SubscriptionPayload) -> Result<SubscriptionState, SubscriptionError> {
    let plan = match payload.plan.as_deref().map(str::trim) {
        None | Some("") => SubscriptionPlan::Free,
        Some(raw) => SubscriptionPlan::from_wire(raw)
            .ok_or_else(|| SubscriptionError::Malformed(format!("unknown plan '{}'", raw)))?,
    };
    let status = payload
        .status
        .as_deref()
        .map(SubscriptionStatus::from_wire)
        .unwrap_or(SubscriptionStatus::None);

    Ok(SubscriptionState {
        plan,
        status,
        trial_ends_at: parse_date(payload.trial_ends_at.as_deref(), "trialEndsAt")?,
        ends_at: parse_date(payload.ends_at.as_deref(), "endsAt")?,
        has_payment_method: payload.has_payment_method.unwrap_or(false),
    })
}

fn parse_date(raw: Option<&str>, field: &str) -> Result<Option<Timestamp>, SubscriptionError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => Timestamp::parse_rfc3339(value)
            .map(Some)
            .ok_or_else(|| {
                SubscriptionError::Malformed(format!("{} is not a date: '{}'", field, value))
            }),
    }
}

fn classify(failure: &ServiceFailure, operation: &'static str) -> SubscriptionError {
    let detail = normalize(failure);
    let error = match failure.status {
        Some(402) => SubscriptionError::Declined(detail),
        Some(401 | 403) => SubscriptionError::Unauthenticated(detail),
        Some(400..=499) if is_decline(&failure.body) => SubscriptionError::Declined(detail),
        Some(400..=499) => SubscriptionError::Rejected(detail),
        _ => SubscriptionError::Unavailable(detail),
    };
    tracing::info!(
        operation,
        status = ?failure.status,
        error = %error,
        "Subscription request failed"
    );
    error
}

fn is_decline(body: &Value) -> bool {
    let nested = body.get("error");
    ["code", "message"].iter().any(|key| {
        let value = body.get(key).or_else(|| nested.and_then(|e| e.get(key)));
        matches!(value.and_then(Value::as_str), Some("card_declined"))
    })
}
