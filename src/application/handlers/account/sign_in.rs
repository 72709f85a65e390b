//! SignInHandler - password and OAuth sign-in, sign-out.

use std::sync::Arc;

use thiserror::Error;

use crate::application::coordinators::AuthCoordinator;
use crate::application::session::{clear_session, store_token};
use crate::domain::account::{AuthError, AuthToken, Credentials};
use crate::domain::foundation::ValidationError;
use crate::ports::{SessionStore, SessionStoreError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignInError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Handler owning the sign-in side of the session.
///
/// Success stores the token; a rejected attempt also drops any stale one.
pub struct SignInHandler {
    auth: AuthCoordinator,
    session: Arc<dyn SessionStore>,
}

impl SignInHandler {
    pub fn new(auth: AuthCoordinator, session: Arc<dyn SessionStore>) -> Self {
        Self { auth, session }
    }

    pub async fn login(&self, credentials: Credentials) -> Result<(), SignInError> {
        // 1. Local check; blank fields never reach the service
        credentials.validate()?;

        // 2. Exchange
        let result = self.auth.login(&credentials).await;
        drop(credentials);

        // 3. Session
        self.apply(result)?;
        tracing::info!("Signed in with password");
        Ok(())
    }

    pub async fn exchange_oauth_callback(&self, query: &str) -> Result<(), AuthError> {
        let result = self.auth.exchange_oauth_callback(query).await;
        self.apply(result)?;
        tracing::info!("Signed in with OAuth");
        Ok(())
    }

    pub fn logout(&self) -> Result<(), SessionStoreError> {
        self.session.clear()?;
        tracing::info!("Signed out");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    fn apply(&self, result: Result<AuthToken, AuthError>) -> Result<(), AuthError> {
        match result {
            Ok(token) => {
                store_token(self.session.as_ref(), token);
                Ok(())
            }
            Err(e) => {
                if e.requires_reauthentication() && self.session.is_authenticated() {
                    clear_session(self.session.as_ref());
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockAuthService;
    use crate::adapters::session::InMemorySessionStore;
    use crate::domain::account::AuthToken;
    use crate::ports::ServiceFailure;
    use serde_json::json;

    fn handler(auth: &MockAuthService, session: &Arc<InMemorySessionStore>) -> SignInHandler {
        SignInHandler::new(AuthCoordinator::new(Arc::new(auth.clone())), session.clone())
    }

    #[tokio::test]
    async fn login_stores_token() {
        let auth = MockAuthService::new().with_token("tok_login");
        let session = Arc::new(InMemorySessionStore::new());
        let handler = handler(&auth, &session);

        handler
            .login(Credentials::new("ada@example.com", "analytical"))
            .await
            .unwrap();

        assert!(handler.is_authenticated());
        assert_eq!(session.token().unwrap().expose(), "tok_login");
    }

    #[tokio::test]
    async fn blank_credentials_never_call_service() {
        let auth = MockAuthService::new();
        let session = Arc::new(InMemorySessionStore::new());

        let err = handler(&auth, &session)
            .login(Credentials::new("ada@example.com", ""))
            .await
            .unwrap_err();

        assert_eq!(err, SignInError::Validation(ValidationError::empty_field("password")));
        assert!(!auth.was_called("login"));
    }

    #[tokio::test]
    async fn rejected_login_clears_stale_token() {
        let auth = MockAuthService::new();
        auth.fail(
            "login",
            ServiceFailure::http(401, json!({"message": "Invalid email or password"})),
        );
        let session = Arc::new(InMemorySessionStore::with_token(AuthToken::new("tok_stale")));

        let err = handler(&auth, &session)
            .login(Credentials::new("ada@example.com", "wrong-password"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Authentication rejected: Invalid email or password");
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn unavailable_keeps_existing_token() {
        let auth = MockAuthService::new();
        auth.fail("login", ServiceFailure::transport("connection refused"));
        let session = Arc::new(InMemorySessionStore::with_token(AuthToken::new("tok_kept")));

        handler(&auth, &session)
            .login(Credentials::new("ada@example.com", "analytical"))
            .await
            .unwrap_err();

        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn oauth_callback_stores_token() {
        let auth = MockAuthService::new().with_token("tok_oauth");
        let session = Arc::new(InMemorySessionStore::new());

        handler(&auth, &session)
            .exchange_oauth_callback("?code=abc")
            .await
            .unwrap();

        assert_eq!(session.token().unwrap().expose(), "tok_oauth");
    }

    #[tokio::test]
    async fn logout_clears_session() {
        let auth = MockAuthService::new();
        let session = Arc::new(InMemorySessionStore::with_token(AuthToken::new("tok")));
        let handler = handler(&auth, &session);

        handler.logout().unwrap();
        assert!(!handler.is_authenticated());
    }
}
