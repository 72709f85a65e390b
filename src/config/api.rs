//! Service endpoint configuration

use serde::Deserialize;
use std::time::Duration;

use super::environment::Environment;
use super::error::ValidationError;

/// Base URLs of the auth and subscription services
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Auth service base URL (login, register, OAuth callback)
    pub auth_base_url: String,

    /// Subscription service base URL
    pub billing_base_url: String,

    /// Transport-level request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl ApiConfig {
    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate endpoint configuration
    ///
    /// In production, both services must be reached over HTTPS.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        check_url("AUTH_BASE_URL", &self.auth_base_url)?;
        check_url("BILLING_BASE_URL", &self.billing_base_url)?;

        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }

        if environment.is_production()
            && !(self.auth_base_url.starts_with("https://")
                && self.billing_base_url.starts_with("https://"))
        {
            return Err(ValidationError::ServiceUrlMustBeHttps);
        }

        Ok(())
    }
}

fn check_url(name: &'static str, url: &str) -> Result<(), ValidationError> {
    if url.is_empty() {
        return Err(ValidationError::MissingRequired(name));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ValidationError::InvalidServiceUrl(name));
    }
    Ok(())
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            auth_base_url: String::new(),
            billing_base_url: String::new(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_request_timeout() -> u64 {
    30
}
