//! Subscription service over HTTP.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::{build_client, join_url, send_json};
use crate::config::ApiConfig;
use crate::ports::{
    PlanRequest, ServiceFailure, SessionStore, SubscriptionPayload, SubscriptionService,
};

/// `GET|POST|PATCH {base}/subscription`, `POST {base}/subscription/cancel`.
///
/// Every request carries the session's bearer token when one is held.
pub struct HttpSubscriptionService {
    base_url: String,
    http_client: reqwest::Client,
    session: Arc<dyn SessionStore>,
}

impl HttpSubscriptionService {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        session: Arc<dyn SessionStore>,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            base_url: base_url.into(),
            http_client: build_client(timeout)?,
            session,
        })
    }

    pub fn from_config(
        config: &ApiConfig,
        session: Arc<dyn SessionStore>,
    ) -> Result<Self, reqwest::Error> {
        Self::new(config.billing_base_url.clone(), config.request_timeout(), session)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token.expose()),
            None => request,
        }
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

#[async_trait]
impl SubscriptionService for HttpSubscriptionService {
    async fn get(&self) -> Result<SubscriptionPayload, ServiceFailure> {
        let request = self.http_client.get(self.url("subscription"));
        send_json(self.authorized(request)).await
    }

    async fn create(
        &self,
        request: &PlanRequest<'_>,
    ) -> Result<SubscriptionPayload, ServiceFailure> {
        let builder = self.http_client.post(self.url("subscription")).json(request);
        send_json(self.authorized(builder)).await
    }

    async fn update(
        &self,
        request: &PlanRequest<'_>,
    ) -> Result<SubscriptionPayload, ServiceFailure> {
        let builder = self.http_client.patch(self.url("subscription")).json(request);
        send_json(self.authorized(builder)).await
    }

    async fn cancel(&self) -> Result<SubscriptionPayload, ServiceFailure> {
        let request = self.http_client.post(self.url("subscription/cancel"));
        send_json(self.authorized(request)).await
    }
}
