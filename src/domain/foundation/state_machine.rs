//! State machine trait for flow step enums.
//!
//! Provides a consistent interface for validating step changes across the
//! registration and plan-change flows.

use thiserror::Error;

/// Rejected step change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot transition from {from} to {to}")]
pub struct TransitionError {
    pub from: String,
    pub to: String,
}

/// Trait for step enums that represent state machines.
///
/// Implementors define the valid edges and get validated transitions and
/// terminal detection for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for RegistrationStep {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (CollectingProfile, SelectingPlan) | ...)
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             CollectingProfile => vec![SelectingPlan],
///             // ...
///         }
///     }
/// }
///
/// let next = step.transition_to(RegistrationStep::SelectingPlan)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, TransitionError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(TransitionError {
                from: format!("{:?}", self),
                to: format!("{:?}", target),
            })
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
