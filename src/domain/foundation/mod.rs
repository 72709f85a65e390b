//! Foundation module - Shared domain primitives.
//!
//! Contains the error vocabulary, the step state machine trait and the
//! timestamp value object used by the account and subscription domains.

mod errors;
mod state_machine;
mod timestamp;

pub use errors::{ServiceError, ValidationError};
pub use state_machine::{StateMachine, TransitionError};
pub use timestamp::Timestamp;
