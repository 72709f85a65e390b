//! Flows - the step machines the UI drives.
//!
//! A flow owns its state behind an async mutex that is released before every
//! network call. Triggers that arrive while a call is in flight return the
//! current step and do nothing. [`RegistrationFlow::teardown`] and
//! [`PlanChangeFlow::teardown`] make late completions discard their results.

mod enrollment;
mod error;
pub mod plan_change;
pub mod registration;

pub use error::FlowError;
pub use plan_change::{CancelConfirmation, PlanChangeFlow, PlanChangeStep};
pub use registration::{FailureStage, RegistrationFlow, RegistrationOutcome, RegistrationStep};
