//! Application handlers.
//!
//! One-shot operations that are not step machines.

pub mod account;

pub use account::{SignInError, SignInHandler};
