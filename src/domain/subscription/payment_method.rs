//! Opaque payment-method handle produced by the tokenizer.

use secrecy::{ExposeSecret, SecretString};

/// Tokenized card reference.
///
/// Lives for one submission only: it is moved into the coordinator call that
/// uses it and dropped afterwards. Not `Clone`.
pub struct PaymentMethodHandle(SecretString);

impl PaymentMethodHandle {
    /// Wraps a provider token. Returns `None` for an empty token.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(SecretString::new(value)))
        }
    }

    /// Raw handle for the request body.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for PaymentMethodHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PaymentMethodHandle([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tokens_are_not_handles() {
        assert!(PaymentMethodHandle::new("").is_none());
        assert!(PaymentMethodHandle::new("   ").is_none());
    }

    #[test]
    fn debug_is_redacted() {
        let handle = PaymentMethodHandle::new("pm_123").unwrap();
        assert_eq!(handle.expose(), "pm_123");
        assert!(!format!("{:?}", handle).contains("pm_123"));
    }
}
