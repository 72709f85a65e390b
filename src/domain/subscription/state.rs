//! Normalized subscription snapshot.

use serde::{Deserialize, Serialize};

use super::{SubscriptionPlan, SubscriptionStatus};
use crate::domain::foundation::Timestamp;

/// Billing state as last confirmed by the subscription service.
///
/// Never mutated locally; a confirmed update replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionState {
    pub plan: SubscriptionPlan,
    pub status: SubscriptionStatus,
    pub trial_ends_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub has_payment_method: bool,
}

impl SubscriptionState {
    /// State of an account that has never subscribed.
    pub fn none() -> Self {
        Self {
            plan: SubscriptionPlan::Free,
            status: SubscriptionStatus::None,
            trial_ends_at: None,
            ends_at: None,
            has_payment_method: false,
        }
    }

    /// Date until which access continues after a cancellation.
    ///
    /// `None` unless the subscription is canceled.
    pub fn access_until(&self) -> Option<Timestamp> {
        match self.status {
            SubscriptionStatus::Canceled => self.ends_at,
            _ => None,
        }
    }

    /// True for a paid plan that has not been canceled.
    pub fn is_paid_and_active(&self) -> bool {
        self.plan.is_paid()
            && matches!(
                self.status,
                SubscriptionStatus::Active | SubscriptionStatus::Trialing
            )
    }

    pub fn is_trialing(&self) -> bool {
        self.status == SubscriptionStatus::Trialing
    }
}

impl Default for SubscriptionState {
    fn default() -> Self {
        Self::none()
    }
}
