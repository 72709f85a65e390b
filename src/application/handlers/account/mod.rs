//! Account handlers.

mod sign_in;

pub use sign_in::{SignInError, SignInHandler};
