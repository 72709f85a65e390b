//! Plan choice as it is submitted.

use crate::domain::subscription::{PaymentMethodHandle, SubscriptionPlan};

/// A submitted plan. `Paid` cannot exist without a handle.
pub(crate) enum Enrollment {
    Free,
    Paid(PaymentMethodHandle),
}

impl Enrollment {
    pub(crate) fn plan(&self) -> SubscriptionPlan {
        match self {
            Enrollment::Free => SubscriptionPlan::Free,
            Enrollment::Paid(_) => SubscriptionPlan::Paid,
        }
    }

    pub(crate) fn into_parts(self) -> (SubscriptionPlan, Option<PaymentMethodHandle>) {
        match self {
            Enrollment::Free => (SubscriptionPlan::Free, None),
            Enrollment::Paid(handle) => (SubscriptionPlan::Paid, Some(handle)),
        }
    }
}
