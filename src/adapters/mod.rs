//! Adapters - Implementations of port interfaces.
//!
//! - `http` - reqwest transports for the auth and subscription services
//! - `session` - in-memory and file-backed session stores
//! - `auth`, `billing`, `tokenizer` - in-process doubles with call tracking

pub mod auth;
pub mod billing;
pub mod http;
pub mod session;
pub mod tokenizer;

mod call_log;

pub use call_log::MethodCall;
