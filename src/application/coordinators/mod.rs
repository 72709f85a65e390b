//! Coordinators - the boundary between flows and service ports.
//!
//! Each coordinator owns one port, applies the local guards that must hold
//! before a call, and normalizes whatever comes back into the closed domain
//! error enums.

mod auth;
mod normalize;
mod subscription;
mod tokenizer;

pub use auth::AuthCoordinator;
pub use subscription::SubscriptionCoordinator;
pub use tokenizer::{CardCollector, CardSession};
