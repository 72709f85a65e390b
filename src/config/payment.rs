//! Payment tokenizer configuration

use serde::Deserialize;

use super::environment::Environment;
use super::error::ValidationError;

/// Tokenization provider configuration
///
/// Only the publishable key lives on the client side; secret keys belong to
/// the subscription service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentConfig {
    /// Provider publishable key (pk_test_... or pk_live_...)
    pub publishable_key: String,
}

impl PaymentConfig {
    /// Check if using a test-mode key
    pub fn is_test_mode(&self) -> bool {
        self.publishable_key.starts_with("pk_test_")
    }

    /// Check if using a live-mode key
    pub fn is_live_mode(&self) -> bool {
        self.publishable_key.starts_with("pk_live_")
    }

    /// Validate payment configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.publishable_key.is_empty() {
            return Err(ValidationError::MissingRequired("PUBLISHABLE_KEY"));
        }

        // A secret key here would ship to every client
        if !self.publishable_key.starts_with("pk_") {
            return Err(ValidationError::InvalidPublishableKey);
        }

        if environment.is_production() && !self.is_live_mode() {
            return Err(ValidationError::LiveKeyRequired);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_test_mode() {
        let config = PaymentConfig {
            publishable_key: "pk_test_xxx".to_string(),
        };
        assert!(config.is_test_mode());
        assert!(!config.is_live_mode());
    }

    #[test]
    fn test_validation_missing_key() {
        let config = PaymentConfig::default();
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::MissingRequired("PUBLISHABLE_KEY"))
        );
    }

    #[test]
    fn test_validation_rejects_secret_key() {
        let config = PaymentConfig {
            publishable_key: "sk_test_xxx".to_string(),
        };
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidPublishableKey)
        );
    }

    #[test]
    fn test_validation_production_requires_live_key() {
        let config = PaymentConfig {
            publishable_key: "pk_test_xxx".to_string(),
        };
        assert!(config.validate(&Environment::Development).is_ok());
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::LiveKeyRequired)
        );
    }
}
