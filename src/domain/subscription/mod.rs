//! Subscription domain: plans, billing status, the confirmed subscription
//! snapshot, payment-method handles and billing-side errors.

mod errors;
mod payment_method;
mod plan;
mod state;
mod status;

pub use errors::{CardField, NoOpError, PaymentInputError, SubscriptionError};
pub use payment_method::PaymentMethodHandle;
pub use plan::SubscriptionPlan;
pub use state::SubscriptionState;
pub use status::SubscriptionStatus;
