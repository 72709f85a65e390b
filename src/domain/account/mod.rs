//! Account domain: credentials, the registration draft, bearer tokens and
//! the normalized auth error taxonomy.

mod credentials;
mod draft;
mod errors;
mod token;

pub use credentials::Credentials;
pub use draft::{RegistrationDraft, MIN_PASSWORD_LENGTH};
pub use errors::{AuthError, RegisterError};
pub use token::AuthToken;
