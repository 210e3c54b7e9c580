//! Authentication helpers.
//!
//! Password hashing for the bundled in-memory directory, and client-side
//! sign-up form validation that runs before any network call is issued.

pub mod password;
pub mod validation;

pub use password::{hash_password, verify_password, PasswordError};
pub use validation::{SignUpForm, ValidationError};
