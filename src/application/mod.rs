//! Application layer - coordinators, flows, and handlers.
//!
//! Coordinators wrap one port each and normalize its failures. Flows are the
//! registration and plan-change step machines built on top of them. Handlers
//! cover the remaining one-shot operations.

pub mod coordinators;
pub mod flows;
pub mod handlers;
mod session;

pub use coordinators::{AuthCoordinator, CardCollector, CardSession, SubscriptionCoordinator};
pub use flows::{
    CancelConfirmation, FailureStage, FlowError, PlanChangeFlow, PlanChangeStep, RegistrationFlow,
    RegistrationOutcome, RegistrationStep,
};
pub use handlers::{SignInError, SignInHandler};
