//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid service URL for {0}")]
    InvalidServiceUrl(&'static str),

    #[error("Service URLs must use HTTPS in production")]
    ServiceUrlMustBeHttps,

    #[error("Invalid payment publishable key format")]
    InvalidPublishableKey,

    #[error("Live payment key required in production")]
    LiveKeyRequired,

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}
