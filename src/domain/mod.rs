//! Domain layer containing the signup and billing vocabulary.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (errors, state machine trait, timestamps)
//! - `account` - Credentials, registration draft, auth tokens and auth errors
//! - `subscription` - Plans, subscription state, payment handles and billing errors

pub mod account;
pub mod foundation;
pub mod subscription;
