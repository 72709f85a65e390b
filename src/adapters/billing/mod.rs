//! Subscription service adapters.
//!
//! - `mock` - In-process billing backend with call tracking
//! - the HTTP implementation lives in `adapters::http`

mod mock;

pub use mock::{MockSubscriptionService, MOCK_TRIAL_DAYS};
