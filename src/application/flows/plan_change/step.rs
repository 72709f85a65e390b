//! Plan-change step state machine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Where a plan change stands.
///
/// `Viewing`, `Applied` and `Failed` are resting steps: the user can start
/// another change from any of them, so none is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanChangeStep {
    Viewing,
    SelectingPlan,
    CollectingPayment,
    Applying,
    Applied,
    Failed,
    ConfirmingCancel,
    Canceling,
}

impl PlanChangeStep {
    /// True for steps the flow settles in between user actions.
    pub fn is_resting(&self) -> bool {
        matches!(
            self,
            PlanChangeStep::Viewing | PlanChangeStep::Applied | PlanChangeStep::Failed
        )
    }

    /// True while a service call is in flight.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, PlanChangeStep::Applying | PlanChangeStep::Canceling)
    }
}

impl StateMachine for PlanChangeStep {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PlanChangeStep::*;
        match (self, target) {
            // Starting a change from a resting step
            (
                Viewing | Applied | Failed,
                SelectingPlan | CollectingPayment | ConfirmingCancel,
            ) => true,
            (Applied | Failed, Viewing) => true,
            // Choosing
            (SelectingPlan, CollectingPayment | Applying)
            | (CollectingPayment, SelectingPlan | Applying) => true,
            (SelectingPlan | CollectingPayment, Viewing | Applied | Failed) => true,
            // Cancellation
            (ConfirmingCancel, Canceling | Viewing | Applied | Failed) => true,
            // Completion
            (Applying | Canceling, Applied | Failed) => true,
            _ => false,
        }
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PlanChangeStep::*;
        match self {
            Viewing => vec![SelectingPlan, CollectingPayment, ConfirmingCancel],
            Applied | Failed => vec![SelectingPlan, CollectingPayment, ConfirmingCancel, Viewing],
            SelectingPlan => vec![CollectingPayment, Applying, Viewing, Applied, Failed],
            CollectingPayment => vec![SelectingPlan, Applying, Viewing, Applied, Failed],
            ConfirmingCancel => vec![Canceling, Viewing, Applied, Failed],
            Applying | Canceling => vec![Applied, Failed],
        }
    }
}
