//! Sign-up form validation.
//!
//! Validation runs entirely client-side, before any network call is issued.

use thiserror::Error;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Client-side form validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Password is shorter than the minimum.
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,

    /// Password and confirmation do not match.
    #[error("password confirmation does not match")]
    PasswordMismatch,

    /// Name is empty or whitespace.
    #[error("name cannot be empty")]
    EmptyName,

    /// Email does not look like an address.
    #[error("invalid email address")]
    InvalidEmail,
}

/// A sign-up form awaiting validation.
#[derive(Debug, Clone)]
pub struct SignUpForm {
    /// Email address.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Password confirmation field.
    pub confirm_password: String,
    /// Display name.
    pub name: String,
}

impl SignUpForm {
    /// Validates the form.
    ///
    /// # Errors
    ///
    /// Returns the first failing `ValidationError`, in field order:
    /// name, email, password length, confirmation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }

        // Minimal shape check; the directory service does the real
        // deliverability verification via confirmation email.
        let mut parts = self.email.splitn(2, '@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        if local.is_empty() || domain.is_empty() || !domain.contains('.') {
            return Err(ValidationError::InvalidEmail);
        }

        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::PasswordTooShort);
        }

        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn form() -> SignUpForm {
        SignUpForm {
            email: "dina@company.com".to_string(),
            password: "rahasia123".to_string(),
            confirm_password: "rahasia123".to_string(),
            name: "Dina".to_string(),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(form().validate().is_ok());
    }

    #[test]
    fn test_short_password_rejected() {
        let mut f = form();
        f.password = "abc12".to_string();
        f.confirm_password = "abc12".to_string();
        assert_eq!(f.validate(), Err(ValidationError::PasswordTooShort));
    }

    #[test]
    fn test_mismatched_confirmation_rejected() {
        let mut f = form();
        f.confirm_password = "different".to_string();
        assert_eq!(f.validate(), Err(ValidationError::PasswordMismatch));
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut f = form();
        f.name = "  ".to_string();
        assert_eq!(f.validate(), Err(ValidationError::EmptyName));
    }

    #[rstest]
    #[case("plainaddress")]
    #[case("@company.com")]
    #[case("dina@")]
    #[case("dina@localhost")]
    fn test_malformed_email_rejected(#[case] email: &str) {
        let mut f = form();
        f.email = email.to_string();
        assert_eq!(f.validate(), Err(ValidationError::InvalidEmail));
    }
}
