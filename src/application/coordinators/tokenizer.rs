//! Card collection over the tokenizer port.
//!
//! [`CardCollector::acquire`] mounts a card input and returns a
//! [`CardSession`]; dropping the session unmounts it. Flows keep the session
//! only while they are collecting payment, so the input can never outlive
//! that step.

use std::sync::Arc;

use crate::domain::subscription::{PaymentInputError, PaymentMethodHandle};
use crate::ports::{CardInput, PaymentTokenizer, TokenizerFailure};

#[derive(Clone)]
pub struct CardCollector {
    tokenizer: Arc<dyn PaymentTokenizer>,
}

impl CardCollector {
    pub fn new(tokenizer: Arc<dyn PaymentTokenizer>) -> Self {
        Self { tokenizer }
    }

    /// Mounts a fresh card input.
    pub fn acquire(&self) -> Result<CardSession, PaymentInputError> {
        let input = self.tokenizer.mount().map_err(into_input_error)?;
        tracing::debug!("Card input mounted");
        Ok(CardSession { input })
    }
}

/// A mounted card input. Unmounted on drop.
pub struct CardSession {
    input: Box<dyn CardInput>,
}

impl CardSession {
    /// Tokenizes the card currently entered.
    pub async fn collect_card(&self) -> Result<PaymentMethodHandle, PaymentInputError> {
        let token = self.input.tokenize().await.map_err(into_input_error)?;
        PaymentMethodHandle::new(token).ok_or_else(|| {
            tracing::warn!("Tokenizer returned an empty payment method");
            PaymentInputError::new("empty_token", "Card could not be processed. Please try again.")
        })
    }
}

impl Drop for CardSession {
    fn drop(&mut self) {
        self.input.unmount();
        tracing::debug!("Card input unmounted");
    }
}

impl std::fmt::Debug for CardSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CardSession")
    }
}

fn into_input_error(failure: TokenizerFailure) -> PaymentInputError {
    PaymentInputError::new(failure.code, failure.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::tokenizer::{MockTokenizer, DEFAULT_TEST_PAYMENT_METHOD};
    use crate::domain::subscription::CardField;

    fn collector(mock: &MockTokenizer) -> CardCollector {
        CardCollector::new(Arc::new(mock.clone()))
    }

    #[tokio::test]
    async fn collects_handle() {
        let mock = MockTokenizer::new();
        let session = collector(&mock).acquire().unwrap();

        let handle = session.collect_card().await.unwrap();
        assert_eq!(handle.expose(), DEFAULT_TEST_PAYMENT_METHOD);
    }

    #[tokio::test]
    async fn provider_error_maps_to_field() {
        let mock = MockTokenizer::new();
        mock.push_outcome(Err(TokenizerFailure::new(
            "incomplete_number",
            "Your card number is incomplete.",
        )));
        let session = collector(&mock).acquire().unwrap();

        let err = session.collect_card().await.unwrap_err();
        assert_eq!(err.field, CardField::Number);
        assert_eq!(err.code, "incomplete_number");
        assert_eq!(err.message, "Your card number is incomplete.");
        assert_eq!(mock.mounted(), 1);
    }

    #[tokio::test]
    async fn empty_token_is_an_error() {
        let mock = MockTokenizer::new().with_handle("   ");
        let session = collector(&mock).acquire().unwrap();

        let err = session.collect_card().await.unwrap_err();
        assert_eq!(err.code, "empty_token");
    }

    #[test]
    fn drop_unmounts() {
        let mock = MockTokenizer::new();
        let cards = collector(&mock);

        let first = cards.acquire().unwrap();
        let second = cards.acquire().unwrap();
        assert_eq!(mock.mounted(), 2);

        drop(first);
        assert_eq!(mock.mounted(), 1);
        drop(second);
        assert_eq!(mock.mounted(), 0);
        assert_eq!(mock.mount_count(), 2);
    }

    #[test]
    fn mount_failure_is_payment_input_error() {
        let mock = MockTokenizer::new();
        mock.fail_mount(TokenizerFailure::new("provider_unavailable", "Payments are unavailable"));

        let err = collector(&mock).acquire().unwrap_err();
        assert_eq!(err.field, CardField::Card);
        assert_eq!(mock.mounted(), 0);
    }
}
