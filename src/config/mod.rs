//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `ONBOARDING` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use onboarding::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Auth service at {}", config.api.auth_base_url);
//! ```

mod api;
mod environment;
mod error;
mod logging;
mod payment;
mod session;

pub use api::ApiConfig;
pub use environment::Environment;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use payment::PaymentConfig;
pub use session::SessionConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Deployment environment
    #[serde(default)]
    pub environment: Environment,

    /// Auth and subscription service endpoints
    pub api: ApiConfig,

    /// Session token persistence
    #[serde(default)]
    pub session: SessionConfig,

    /// Tokenization provider
    pub payment: PaymentConfig,

    /// Tracing output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `ONBOARDING` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `ONBOARDING__API__AUTH_BASE_URL=...` -> `api.auth_base_url = ...`
    /// - `ONBOARDING__SESSION__TOKEN_FILE=...` -> `session.token_file = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ONBOARDING")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.api.validate(&self.environment)?;
        self.payment.validate(&self.environment)?;
        self.logging.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global; serialize the tests that touch them
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("ONBOARDING__API__AUTH_BASE_URL", "https://auth.example.com");
        env::set_var("ONBOARDING__API__BILLING_BASE_URL", "https://billing.example.com");
        env::set_var("ONBOARDING__PAYMENT__PUBLISHABLE_KEY", "pk_test_xxx");
    }

    fn clear_env() {
        for key in [
            "ONBOARDING__API__AUTH_BASE_URL",
            "ONBOARDING__API__BILLING_BASE_URL",
            "ONBOARDING__API__REQUEST_TIMEOUT_SECS",
            "ONBOARDING__PAYMENT__PUBLISHABLE_KEY",
            "ONBOARDING__SESSION__TOKEN_FILE",
            "ONBOARDING__LOGGING__JSON",
            "ONBOARDING__ENVIRONMENT",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("config should load");
        assert_eq!(config.api.auth_base_url, "https://auth.example.com");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.environment, Environment::Development);
        assert!(!config.session.is_persistent());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().validate().is_ok());
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("ONBOARDING__API__REQUEST_TIMEOUT_SECS", "10");
        env::set_var("ONBOARDING__SESSION__TOKEN_FILE", "/tmp/onboarding/session");
        env::set_var("ONBOARDING__LOGGING__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.api.request_timeout_secs, 10);
        assert!(config.session.is_persistent());
        assert!(config.logging.json);
    }

    #[test]
    fn test_production_rejects_test_key() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("ONBOARDING__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert_eq!(config.validate(), Err(ValidationError::LiveKeyRequired));
    }

    #[test]
    fn test_missing_required_section_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("ONBOARDING__PAYMENT__PUBLISHABLE_KEY", "pk_test_xxx");
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_err());
    }
}
