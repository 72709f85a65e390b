//! Registration draft collected in the first signup step.

use secrecy::{ExposeSecret, SecretString};

use crate::domain::foundation::ValidationError;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Profile fields for a new account.
///
/// Owned by exactly one registration session. It may only advance past the
/// profile step once [`RegistrationDraft::validate`] passes.
pub struct RegistrationDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
    pub accept_terms: bool,
    pub marketing_emails: bool,
}

impl RegistrationDraft {
    /// Creates a draft with a matching confirmation and no consents given.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let password = password.into();
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            confirm_password: SecretString::new(password.clone()),
            password: SecretString::new(password),
            accept_terms: false,
            marketing_emails: false,
        }
    }

    pub fn with_confirm_password(mut self, confirm: impl Into<String>) -> Self {
        self.confirm_password = SecretString::new(confirm.into());
        self
    }

    pub fn with_accept_terms(mut self, accept: bool) -> Self {
        self.accept_terms = accept;
        self
    }

    pub fn with_marketing_emails(mut self, opt_in: bool) -> Self {
        self.marketing_emails = opt_in;
        self
    }

    /// Checks the profile invariant. Returns the first failing field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.first_name.trim().is_empty() {
            return Err(ValidationError::empty_field("first_name"));
        }
        if self.last_name.trim().is_empty() {
            return Err(ValidationError::empty_field("last_name"));
        }

        let email = self.email.trim();
        if email.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if !email.contains('@') {
            return Err(ValidationError::invalid_format("email", "must contain '@'"));
        }

        let password = self.password.expose_secret();
        let length = password.chars().count();
        if length < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::too_short(
                "password",
                MIN_PASSWORD_LENGTH,
                length,
            ));
        }
        if password != self.confirm_password.expose_secret() {
            return Err(ValidationError::mismatch("confirm_password", "password"));
        }

        if !self.accept_terms {
            return Err(ValidationError::not_accepted("accept_terms"));
        }

        Ok(())
    }
}

impl Clone for RegistrationDraft {
    fn clone(&self) -> Self {
        Self {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            password: SecretString::new(self.password.expose_secret().clone()),
            confirm_password: SecretString::new(self.confirm_password.expose_secret().clone()),
            accept_terms: self.accept_terms,
            marketing_emails: self.marketing_emails,
        }
    }
}

impl std::fmt::Debug for RegistrationDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationDraft")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("accept_terms", &self.accept_terms)
            .field("marketing_emails", &self.marketing_emails)
            .finish_non_exhaustive()
    }
}
