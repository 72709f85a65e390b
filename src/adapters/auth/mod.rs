//! Auth service adapters.
//!
//! - `mock` - In-process double with call tracking
//! - the HTTP implementation lives in `adapters::http`

mod mock;

pub use mock::{MockAuthService, DEFAULT_TEST_TOKEN};
