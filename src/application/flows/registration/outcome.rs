//! Terminal result of a registration.

use crate::application::flows::FlowError;
use crate::domain::subscription::{SubscriptionError, SubscriptionPlan, SubscriptionState};

use super::RegistrationStep;

/// Stage at which a registration failed outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    Account,
}

/// How a registration ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// Everything requested was created. `subscription` is present for paid.
    Succeeded {
        plan: SubscriptionPlan,
        subscription: Option<SubscriptionState>,
    },

    /// The account exists and the user is signed in, but the subscription
    /// could not be created.
    PartiallySucceeded { subscription_error: SubscriptionError },

    /// Nothing was created.
    Failed { stage: FailureStage, error: FlowError },
}

impl RegistrationOutcome {
    pub fn account_created(&self) -> bool {
        !matches!(self, RegistrationOutcome::Failed { .. })
    }

    pub fn step(&self) -> RegistrationStep {
        match self {
            RegistrationOutcome::Succeeded { .. } => RegistrationStep::Succeeded,
            RegistrationOutcome::PartiallySucceeded { .. } => RegistrationStep::PartiallySucceeded,
            RegistrationOutcome::Failed { .. } => RegistrationStep::Failed,
        }
    }

    /// Non-blocking notice to show after a partial success.
    pub fn notice(&self) -> Option<String> {
        match self {
            RegistrationOutcome::PartiallySucceeded { subscription_error } => Some(format!(
                "Your account was created, but we could not start your subscription: {}. \
                 You can add a plan from your account settings.",
                subscription_error.message()
            )),
            _ => None,
        }
    }
}
