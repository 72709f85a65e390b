//! Auth coordinator.
//!
//! Wraps the [`AuthService`] port: validates locally, calls the service, and
//! classifies every failure into [`AuthError`]. Holds no token; callers decide
//! where the token goes.

use std::sync::Arc;

use reqwest::Url;
use secrecy::ExposeSecret;

use super::normalize::normalize;
use crate::domain::account::{AuthError, AuthToken, Credentials, RegisterError, RegistrationDraft};
use crate::domain::foundation::ServiceError;
use crate::ports::{AuthService, LoginRequest, RegisterRequest, ServiceFailure, TokenResponse};

#[derive(Clone)]
pub struct AuthCoordinator {
    service: Arc<dyn AuthService>,
}

impl AuthCoordinator {
    pub fn new(service: Arc<dyn AuthService>) -> Self {
        Self { service }
    }

    /// Exchanges credentials for a token.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthToken, AuthError> {
        let request = LoginRequest {
            email: credentials.email.trim(),
            password: credentials.password(),
        };

        let response = self.service.login(&request).await;
        into_token(response, "login")
    }

    /// Creates the account described by `draft`.
    ///
    /// The draft invariant is checked first; an invalid draft never reaches
    /// the service.
    pub async fn register(&self, draft: &RegistrationDraft) -> Result<AuthToken, RegisterError> {
        draft.validate()?;

        let request = RegisterRequest {
            first_name: draft.first_name.trim(),
            last_name: draft.last_name.trim(),
            email: draft.email.trim(),
            password: draft.password.expose_secret(),
            accept_terms: draft.accept_terms,
            marketing_emails: draft.marketing_emails,
        };

        let response = self.service.register(&request).await;
        into_token(response, "register").map_err(RegisterError::from)
    }

    /// Exchanges the query string of an OAuth redirect for a token.
    ///
    /// Redirects that carry an `error` parameter are rejected without a call.
    pub async fn exchange_oauth_callback(&self, query: &str) -> Result<AuthToken, AuthError> {
        let query = query.trim().trim_start_matches('?');
        if query.is_empty() {
            return Err(AuthError::rejected("OAuth callback is missing its parameters"));
        }
        if let Some(denied) = provider_error(query) {
            tracing::info!("OAuth provider denied the sign-in");
            return Err(AuthError::Rejected(denied));
        }

        let response = self.service.oauth_callback(query).await;
        into_token(response, "oauth_callback")
    }
}

fn into_token(
    response: Result<TokenResponse, ServiceFailure>,
    operation: &'static str,
) -> Result<AuthToken, AuthError> {
    match response {
        Ok(TokenResponse { token }) if !token.trim().is_empty() => Ok(AuthToken::new(token)),
        Ok(_) => {
            tracing::warn!(operation, "Auth service returned an empty token");
            Err(AuthError::unavailable("Auth service returned an empty token"))
        }
        Err(failure) => {
            let error = classify(&failure);
            tracing::info!(
                operation,
                status = ?failure.status,
                error = %error,
                "Auth request failed"
            );
            Err(error)
        }
    }
}

fn classify(failure: &ServiceFailure) -> AuthError {
    let detail = normalize(failure);
    match failure.status {
        Some(401 | 403) => AuthError::Rejected(detail),
        Some(409) => AuthError::Conflict(detail),
        Some(400 | 422) => AuthError::Invalid(detail),
        Some(400..=499) if detail.has_field_errors() => AuthError::Invalid(detail),
        _ => AuthError::Unavailable(detail),
    }
}

fn provider_error(query: &str) -> Option<ServiceError> {
    let url = Url::parse(&format!("http://callback.invalid/?{}", query)).ok()?;
    let mut error = None;
    let mut description = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "error" => error = Some(value.into_owned()),
            "error_description" => description = Some(value.into_owned()),
            _ => {}
        }
    }

    let error = error?;
    let message = description
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(error);
    Some(ServiceError::new(message))
}
