//! Session store port.
//!
//! Holds the bearer token for the current session. Single writer (the flows
//! and the sign-in handler), any number of readers (HTTP transports).

use thiserror::Error;

use crate::domain::account::AuthToken;

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Session persistence failed: {0}")]
    Io(#[from] std::io::Error),
}

pub trait SessionStore: Send + Sync {
    /// Current token, if signed in.
    fn token(&self) -> Option<AuthToken>;

    /// Replaces the current token.
    ///
    /// The token is held in memory even if persisting it fails.
    fn set_token(&self, token: AuthToken) -> Result<(), SessionStoreError>;

    /// Forgets the token.
    fn clear(&self) -> Result<(), SessionStoreError>;

    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}
