//! Subscription plan definitions.

use serde::{Deserialize, Serialize};

/// Plan a user can be enrolled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    /// No billing; never carries a payment method.
    Free,

    /// Billed plan; every enrollment or switch needs a freshly tokenized card.
    Paid,
}

impl SubscriptionPlan {
    /// Returns true if this plan is billed.
    pub fn is_paid(&self) -> bool {
        matches!(self, SubscriptionPlan::Paid)
    }

    /// Wire name used by the subscription service.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionPlan::Free => "free",
            SubscriptionPlan::Paid => "paid",
        }
    }

    /// Lenient parse of a service-supplied plan name.
    ///
    /// Accepts any casing plus the legacy `premium`/`pro` aliases for `Paid`.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "free" => Some(SubscriptionPlan::Free),
            "paid" | "premium" | "pro" => Some(SubscriptionPlan::Paid),
            _ => None,
        }
    }
}

impl std::fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_paid_is_paid() {
        assert!(SubscriptionPlan::Paid.is_paid());
        assert!(!SubscriptionPlan::Free.is_paid());
    }

    #[test]
    fn from_wire_is_case_insensitive() {
        assert_eq!(SubscriptionPlan::from_wire(" PAID "), Some(SubscriptionPlan::Paid));
        assert_eq!(SubscriptionPlan::from_wire("Free"), Some(SubscriptionPlan::Free));
        assert_eq!(SubscriptionPlan::from_wire("premium"), Some(SubscriptionPlan::Paid));
        assert_eq!(SubscriptionPlan::from_wire("enterprise"), None);
    }

    #[test]
    fn plan_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&SubscriptionPlan::Paid).unwrap(), "\"paid\"");
        let plan: SubscriptionPlan = serde_json::from_str("\"free\"").unwrap();
        assert_eq!(plan, SubscriptionPlan::Free);
    }
}
