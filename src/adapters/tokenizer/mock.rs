//! Mock tokenization provider for testing.
//!
//! Hands out scripted tokenize outcomes and counts how many card inputs are
//! currently mounted, so tests can assert that every mount is released.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::adapters::call_log::lock;
use crate::ports::{CardInput, PaymentTokenizer, TokenizerFailure};

pub const DEFAULT_TEST_PAYMENT_METHOD: &str = "pm_test";

#[derive(Clone, Default)]
pub struct MockTokenizer {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    outcomes: VecDeque<Result<String, TokenizerFailure>>,
    mount_failure: Option<TokenizerFailure>,
    mounted: usize,
    mounts: usize,
    tokenize_calls: usize,
}

impl MockTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the result of the next `tokenize` call. Unqueued calls succeed
    /// with [`DEFAULT_TEST_PAYMENT_METHOD`].
    pub fn push_outcome(&self, outcome: Result<String, TokenizerFailure>) {
        lock(&self.inner).outcomes.push_back(outcome);
    }

    pub fn with_handle(self, handle: impl Into<String>) -> Self {
        self.push_outcome(Ok(handle.into()));
        self
    }

    /// Makes every `mount` fail.
    pub fn fail_mount(&self, failure: TokenizerFailure) {
        lock(&self.inner).mount_failure = Some(failure);
    }

    /// Card inputs mounted and not yet released.
    pub fn mounted(&self) -> usize {
        lock(&self.inner).mounted
    }

    /// Total successful mounts.
    pub fn mount_count(&self) -> usize {
        lock(&self.inner).mounts
    }

    pub fn tokenize_count(&self) -> usize {
        lock(&self.inner).tokenize_calls
    }
}

impl PaymentTokenizer for MockTokenizer {
    fn mount(&self) -> Result<Box<dyn CardInput>, TokenizerFailure> {
        let mut state = lock(&self.inner);
        if let Some(failure) = &state.mount_failure {
            return Err(failure.clone());
        }
        state.mounted += 1;
        state.mounts += 1;
        Ok(Box::new(MockCardInput {
            inner: Arc::clone(&self.inner),
            attached: true,
        }))
    }
}

struct MockCardInput {
    inner: Arc<Mutex<MockState>>,
    attached: bool,
}

#[async_trait]
impl CardInput for MockCardInput {
    async fn tokenize(&self) -> Result<String, TokenizerFailure> {
        let mut state = lock(&self.inner);
        state.tokenize_calls += 1;
        if !self.attached {
            return Err(TokenizerFailure::new("unmounted", "Card input is not mounted"));
        }
        state
            .outcomes
            .pop_front()
            .unwrap_or_else(|| Ok(DEFAULT_TEST_PAYMENT_METHOD.to_string()))
    }

    fn unmount(&mut self) {
        if self.attached {
            self.attached = false;
            lock(&self.inner).mounted -= 1;
        }
    }
}
