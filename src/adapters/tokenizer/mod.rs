//! Payment tokenizer adapters.
//!
//! Card entry happens inside the provider's own input; the only in-process
//! implementation is the test double.

mod mock;

pub use mock::{MockTokenizer, DEFAULT_TEST_PAYMENT_METHOD};
