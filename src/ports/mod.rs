//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! core and the outside world. Adapters implement these ports.
//!
//! - `AuthService` - login, registration, OAuth callback exchange
//! - `SubscriptionService` - get / create / update / cancel
//! - `PaymentTokenizer` / `CardInput` - card tokenization capability
//! - `SessionStore` - holder of the current bearer token

mod auth_service;
mod payment_tokenizer;
mod service_failure;
mod session_store;
mod subscription_service;

pub use auth_service::{AuthService, LoginRequest, RegisterRequest, TokenResponse};
pub use payment_tokenizer::{CardInput, PaymentTokenizer, TokenizerFailure};
pub use service_failure::ServiceFailure;
pub use session_store::{SessionStore, SessionStoreError};
pub use subscription_service::{PlanRequest, SubscriptionPayload, SubscriptionService};
