//! HTTP transports for the auth and subscription services.
//!
//! Thin reqwest clients: they serialize requests, attach the bearer token
//! where needed, and hand error bodies back untouched as `ServiceFailure`.
//! Request timeouts are applied here, not in the flows.

mod auth;
mod subscription;

pub use auth::HttpAuthService;
pub use subscription::HttpSubscriptionService;

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::ports::ServiceFailure;

/// Builds a client with the transport-level timeout.
pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().timeout(timeout).build()
}

/// Joins a base URL and a path with exactly one slash.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Sends a request and decodes the JSON response.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, ServiceFailure> {
    let response = request.send().await.map_err(|e| {
        tracing::warn!(error = %e, "Request failed before a response arrived");
        ServiceFailure::transport(e.to_string())
    })?;

    let status = response.status().as_u16();
    let body = response
        .bytes()
        .await
        .map_err(|e| ServiceFailure::transport(e.to_string()))?;

    decode(status, &body)
}

/// Interprets a response body: JSON `T` on 2xx, otherwise a `ServiceFailure`
/// carrying whatever the service sent (non-JSON bodies become a string).
pub(crate) fn decode<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, ServiceFailure> {
    if (200..300).contains(&status) {
        return serde_json::from_slice(body).map_err(|e| {
            tracing::warn!(status, error = %e, "Unreadable success response");
            ServiceFailure::http(
                status,
                json!({ "message": format!("Unreadable response: {}", e) }),
            )
        });
    }

    let payload = serde_json::from_slice::<Value>(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).trim().to_string()));
    tracing::debug!(status, "Service returned an error response");
    Err(ServiceFailure::http(status, payload))
}
