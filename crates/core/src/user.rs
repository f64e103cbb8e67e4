//! User registration input and its validation rules.

use serde::Deserialize;
use validator::Validate;

use crate::validation::FieldErrors;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: u64 = 8;

/// Registration payload as submitted by the sign-up form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Registration {
    #[validate(length(min = 1, max = 120, message = "is required"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(max = 30, message = "must be at most 30 characters"))]
    pub phone: Option<String>,
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub password: String,
}

impl Registration {
    /// Trim surrounding whitespace and lowercase the email.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_lowercase();
        self.phone = self
            .phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        self
    }

    /// Normalize, then run the declarative rules.
    pub fn validated(self) -> Result<Self, FieldErrors> {
        let normalized = self.normalized();
        normalized.validate().map_err(FieldErrors::from)?;
        Ok(normalized)
    }
}
