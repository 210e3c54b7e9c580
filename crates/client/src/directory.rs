//! Directory service contract.
//!
//! The directory service is the external identity provider: it owns
//! credentials, issues identities, and stores profile rows. The session store
//! consumes it exclusively through this trait.

use async_trait::async_trait;
use kasbook_shared::error::{AuthError, DataError};
use kasbook_shared::profile::{Identity, Profile, Role};
use kasbook_shared::types::UserId;
use tokio::sync::broadcast;

/// A change in the underlying identity session.
///
/// Emitted on login, logout, and token refresh. Consumers subscribe via
/// [`DirectoryService::subscribe`]; dropping the receiver unsubscribes.
#[derive(Debug, Clone)]
pub enum IdentityEvent {
    /// A user signed in (or an existing session was restored).
    SignedIn(Identity),
    /// The session ended.
    SignedOut,
    /// The session token was refreshed for the same identity.
    TokenRefreshed(Identity),
}

/// Result of a sign-up request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignUpOutcome {
    /// Whether the provider requires email confirmation before the first
    /// sign-in.
    pub requires_confirmation: bool,
}

/// Filter for profile listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileFilter {
    /// Skip profiles whose status is inactive.
    pub exclude_inactive: bool,
}

/// Contract the identity provider must satisfy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Authenticates with email and password.
    ///
    /// On success the provider emits `IdentityEvent::SignedIn`; this call
    /// itself does not return the identity.
    async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError>;

    /// Requests account creation. Does not sign the user in.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<SignUpOutcome, AuthError>;

    /// Ends the provider-side session. Best-effort: must not fail into the
    /// caller.
    async fn sign_out(&self);

    /// Returns the currently authenticated identity, if any.
    async fn current_identity(&self) -> Option<Identity>;

    /// Subscribes to identity change events. Drop the receiver to
    /// unsubscribe.
    fn subscribe(&self) -> broadcast::Receiver<IdentityEvent>;

    /// Creates a confirmed account with the given role (admin operation).
    async fn create_user(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: Role,
    ) -> Result<Identity, AuthError>;

    /// Fetches the profile row for an identity.
    async fn fetch_profile(&self, user_id: UserId) -> Result<Profile, DataError>;

    /// Inserts or replaces a profile row.
    async fn upsert_profile(&self, profile: &Profile) -> Result<(), DataError>;

    /// Soft-deletes a user by flipping its status to inactive.
    async fn deactivate_user(&self, user_id: UserId) -> Result<(), DataError>;

    /// Lists profile rows.
    async fn list_profiles(&self, filter: ProfileFilter) -> Result<Vec<Profile>, DataError>;
}
