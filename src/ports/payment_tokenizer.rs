//! Payment tokenization port.
//!
//! The provider owns the card input; the core only ever receives an opaque
//! token or a structured rejection. Card digits never cross this boundary.

use async_trait::async_trait;
use serde::Deserialize;

/// Tokenization provider.
pub trait PaymentTokenizer: Send + Sync {
    /// Attaches a card input and its listeners.
    ///
    /// The returned input must be released with [`CardInput::unmount`].
    fn mount(&self) -> Result<Box<dyn CardInput>, TokenizerFailure>;
}

/// A mounted card input.
#[async_trait]
pub trait CardInput: Send + Sync {
    /// Tokenizes whatever the user typed.
    async fn tokenize(&self) -> Result<String, TokenizerFailure>;

    /// Detaches the input and its listeners. Idempotent.
    fn unmount(&mut self);
}

/// Structured rejection from the provider, e.g. `incomplete_number`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenizerFailure {
    pub code: String,
    pub message: String,
}

impl TokenizerFailure {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
