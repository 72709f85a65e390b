//! Subscription status as reported by the billing service.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// In a trial window; `trial_ends_at` is set.
    Trialing,

    /// Billing normally.
    Active,

    /// Cancellation requested. Access continues until `ends_at`.
    Canceled,

    /// No subscription on record.
    None,
}

impl SubscriptionStatus {
    /// Lenient parse of a service-supplied status. Unknown values map to `None`.
    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "trialing" | "trial" => SubscriptionStatus::Trialing,
            "active" | "past_due" => SubscriptionStatus::Active,
            "canceled" | "cancelled" => SubscriptionStatus::Canceled,
            _ => SubscriptionStatus::None,
        }
    }

    /// Returns true if this status still grants paid features.
    pub fn has_access(&self) -> bool {
        matches!(
            self,
            SubscriptionStatus::Trialing | SubscriptionStatus::Active | SubscriptionStatus::Canceled
        )
    }
}
