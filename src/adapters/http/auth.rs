//! Auth service over HTTP.

use std::time::Duration;

use async_trait::async_trait;

use super::{build_client, join_url, send_json};
use crate::config::ApiConfig;
use crate::ports::{AuthService, LoginRequest, RegisterRequest, ServiceFailure, TokenResponse};

/// `POST {base}/login`, `POST {base}/register`, `GET {base}/oauth/callback?{query}`.
pub struct HttpAuthService {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpAuthService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            base_url: base_url.into(),
            http_client: build_client(timeout)?,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, reqwest::Error> {
        Self::new(config.auth_base_url.clone(), config.request_timeout())
    }

    fn callback_url(&self, query: &str) -> String {
        let query = query.trim_start_matches('?');
        let path = join_url(&self.base_url, "oauth/callback");
        if query.is_empty() {
            path
        } else {
            format!("{}?{}", path, query)
        }
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    async fn login(&self, request: &LoginRequest<'_>) -> Result<TokenResponse, ServiceFailure> {
        let url = join_url(&self.base_url, "login");
        send_json(self.http_client.post(url).json(request)).await
    }

    async fn register(
        &self,
        request: &RegisterRequest<'_>,
    ) -> Result<TokenResponse, ServiceFailure> {
        let url = join_url(&self.base_url, "register");
        send_json(self.http_client.post(url).json(request)).await
    }

    async fn oauth_callback(&self, query: &str) -> Result<TokenResponse, ServiceFailure> {
        send_json(self.http_client.get(self.callback_url(query))).await
    }
}
