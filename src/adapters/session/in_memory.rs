//! In-memory session store.

use std::sync::{PoisonError, RwLock};

use crate::domain::account::AuthToken;
use crate::ports::{SessionStore, SessionStoreError};

/// Token held for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    token: RwLock<Option<AuthToken>>,
}

impl InMemorySessionStore {
    /// Creates an empty (signed-out) store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that starts signed in.
    pub fn with_token(token: AuthToken) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

impl SessionStore for InMemorySessionStore {
    fn token(&self) -> Option<AuthToken> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_token(&self, token: AuthToken) -> Result<(), SessionStoreError> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
