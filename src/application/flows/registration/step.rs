//! Registration step state machine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Where a registration stands.
///
/// `Succeeded`, `PartiallySucceeded` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStep {
    /// Entering name, email, password and consents.
    CollectingProfile,

    /// Choosing between free and paid.
    SelectingPlan,

    /// Paid chosen; the card input is mounted.
    CollectingPayment,

    /// Account creation and, for paid, subscription creation in flight.
    Submitting,

    /// Account and (for paid) subscription created.
    Succeeded,

    /// Account created; subscription failed.
    PartiallySucceeded,

    /// Account creation failed. Nothing was created.
    Failed,
}

impl StateMachine for RegistrationStep {
    fn can_transition_to(&self, target: &Self) -> bool {
        use RegistrationStep::*;
        matches!(
            (self, target),
            (CollectingProfile, SelectingPlan)
                | (SelectingPlan, CollectingProfile)
                | (SelectingPlan, CollectingPayment)
                | (SelectingPlan, Submitting)
                | (CollectingPayment, CollectingProfile)
                | (CollectingPayment, SelectingPlan)
                | (CollectingPayment, Submitting)
                | (Submitting, Succeeded)
                | (Submitting, PartiallySucceeded)
                | (Submitting, Failed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use RegistrationStep::*;
        match self {
            CollectingProfile => vec![SelectingPlan],
            SelectingPlan => vec![CollectingProfile, CollectingPayment, Submitting],
            CollectingPayment => vec![CollectingProfile, SelectingPlan, Submitting],
            Submitting => vec![Succeeded, PartiallySucceeded, Failed],
            Succeeded | PartiallySucceeded | Failed => vec![],
        }
    }
}
