//! Subscription service port.
//!
//! Billing backend for the signed-in account. Responses come back as the
//! loosely-typed [`SubscriptionPayload`]; the `SubscriptionCoordinator` turns
//! them into `SubscriptionState`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ServiceFailure;
use crate::domain::subscription::SubscriptionPlan;

/// Subscription lifecycle for the current account.
#[async_trait]
pub trait SubscriptionService: Send + Sync {
    /// Current subscription.
    async fn get(&self) -> Result<SubscriptionPayload, ServiceFailure>;

    /// Starts a subscription.
    async fn create(
        &self,
        request: &PlanRequest<'_>,
    ) -> Result<SubscriptionPayload, ServiceFailure>;

    /// Switches plan in place.
    async fn update(
        &self,
        request: &PlanRequest<'_>,
    ) -> Result<SubscriptionPayload, ServiceFailure>;

    /// Requests cancellation at period end.
    async fn cancel(&self) -> Result<SubscriptionPayload, ServiceFailure>;
}

/// Body for create and update.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest<'a> {
    pub plan: SubscriptionPlan,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<&'a str>,
}

/// Subscription as sent over the wire. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPayload {
    #[serde(default)]
    pub plan: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default, alias = "trial_ends_at", alias = "trialEnd")]
    pub trial_ends_at: Option<String>,

    #[serde(default, alias = "ends_at", alias = "currentPeriodEnd")]
    pub ends_at: Option<String>,

    #[serde(default, alias = "has_payment_method")]
    pub has_payment_method: Option<bool>,
}

impl SubscriptionPayload {
    pub fn new(plan: &str, status: &str) -> Self {
        Self {
            plan: Some(plan.to_string()),
            status: Some(status.to_string()),
            ..Default::default()
        }
    }

    pub fn with_trial_ends_at(mut self, at: &str) -> Self {
        self.trial_ends_at = Some(at.to_string());
        self
    }

    pub fn with_ends_at(mut self, at: &str) -> Self {
        self.ends_at = Some(at.to_string());
        self
    }

    pub fn with_payment_method(mut self, on_file: bool) -> Self {
        self.has_payment_method = Some(on_file);
        self
    }
}
