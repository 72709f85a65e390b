//! Mock auth service for testing.
//!
//! Configurable per-method responses, call tracking, and pause points for
//! exercising in-flight behavior.
//!
//! # Example
//!
//! ```ignore
//! let auth = MockAuthService::new().with_token("tok_abc");
//! auth.fail("register", ServiceFailure::http(409, json!({"message": "taken"})));
//!
//! let gate = auth.pause("register");
//! // ... start a submission, then
//! gate.notify_one();
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::adapters::call_log::{lock, CallLog, MethodCall};
use crate::ports::{AuthService, LoginRequest, RegisterRequest, ServiceFailure, TokenResponse};

pub const DEFAULT_TEST_TOKEN: &str = "tok_test";

#[derive(Clone, Default)]
pub struct MockAuthService {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    token: Option<String>,
    failures: HashMap<String, ServiceFailure>,
    log: CallLog,
}

impl MockAuthService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token returned by every successful call.
    pub fn with_token(self, token: impl Into<String>) -> Self {
        lock(&self.inner).token = Some(token.into());
        self
    }

    /// Makes `method` fail until cleared.
    pub fn fail(&self, method: &str, failure: ServiceFailure) {
        lock(&self.inner)
            .failures
            .insert(method.to_string(), failure);
    }

    pub fn clear_failures(&self) {
        lock(&self.inner).failures.clear();
    }

    /// The next call to `method` waits until the returned gate is notified.
    pub fn pause(&self, method: &str) -> Arc<Notify> {
        lock(&self.inner).log.pause(method)
    }

    pub fn calls(&self) -> Vec<MethodCall> {
        lock(&self.inner).log.calls()
    }

    pub fn call_count(&self, method: &str) -> usize {
        lock(&self.inner).log.count(method)
    }

    pub fn was_called(&self, method: &str) -> bool {
        self.call_count(method) > 0
    }

    async fn respond(
        &self,
        method: &str,
        args: Vec<String>,
    ) -> Result<TokenResponse, ServiceFailure> {
        let gate = lock(&self.inner).log.record(method, args);
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let state = lock(&self.inner);
        if let Some(failure) = state.failures.get(method) {
            return Err(failure.clone());
        }
        Ok(TokenResponse::new(
            state.token.as_deref().unwrap_or(DEFAULT_TEST_TOKEN),
        ))
    }
}

#[async_trait]
impl AuthService for MockAuthService {
    async fn login(&self, request: &LoginRequest<'_>) -> Result<TokenResponse, ServiceFailure> {
        self.respond("login", vec![request.email.to_string()]).await
    }

    async fn register(
        &self,
        request: &RegisterRequest<'_>,
    ) -> Result<TokenResponse, ServiceFailure> {
        self.respond("register", vec![request.email.to_string()]).await
    }

    async fn oauth_callback(&self, query: &str) -> Result<TokenResponse, ServiceFailure> {
        self.respond("oauth_callback", vec![query.to_string()]).await
    }
}
