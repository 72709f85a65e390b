//! Auth service port.
//!
//! Login, registration and OAuth callback exchange against whatever identity
//! backend the deployment uses. Implementations return the backend's raw
//! error body; the `AuthCoordinator` normalizes it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ServiceFailure;

/// Issues bearer tokens.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchanges email and password for a token.
    async fn login(&self, request: &LoginRequest<'_>) -> Result<TokenResponse, ServiceFailure>;

    /// Creates an account and signs it in.
    async fn register(&self, request: &RegisterRequest<'_>)
        -> Result<TokenResponse, ServiceFailure>;

    /// Exchanges the raw query string of an OAuth redirect for a token.
    async fn oauth_callback(&self, query: &str) -> Result<TokenResponse, ServiceFailure>;
}

/// Login body. Holds a borrowed password; not `Debug`.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Registration body. Holds a borrowed password; not `Debug`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub accept_terms: bool,
    pub marketing_emails: bool,
}

/// Successful auth response.
#[derive(Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(alias = "accessToken", alias = "access_token")]
    pub token: String,
}

impl TokenResponse {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}
