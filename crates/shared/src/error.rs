//! Application-wide error taxonomy.
//!
//! Two families cross crate boundaries: `AuthError` for identity-provider
//! failures and `DataError` for backing-store failures. Both are surfaced to
//! the caller for user-visible display and never retried automatically.

use thiserror::Error;

/// Errors returned by the directory service (identity provider).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Email/password combination was rejected.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The account exists but its email has not been confirmed.
    #[error("email address has not been confirmed")]
    EmailNotConfirmed,

    /// The account has been deactivated by an administrator.
    #[error("account is inactive")]
    AccountInactive,

    /// The provider rejected the request due to rate limiting.
    #[error("too many attempts, try again later")]
    RateLimited,

    /// An email address is already registered.
    #[error("an account with this email already exists")]
    EmailTaken,

    /// Network or provider-side failure.
    #[error("identity provider error: {0}")]
    Provider(String),
}

/// Errors returned by the backing data store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// The requested row does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A store-side constraint rejected the write.
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// The store's own access rules denied the operation.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Network or backend failure.
    #[error("backend error: {0}")]
    Backend(String),
}

impl DataError {
    /// Returns true if this error means the row simply does not exist,
    /// as opposed to a transport or permission failure.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
