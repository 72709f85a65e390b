//! Onboarding - sign-in, two-step registration, and subscription plan changes.
//!
//! The crate holds the client-side core of an onboarding experience: the
//! registration and plan-change step machines, the coordinators that talk to
//! the auth, billing and card-tokenization services, and the session store
//! that keeps the bearer token. Rendering is left to the caller; flows expose
//! triggers and observable state only.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
