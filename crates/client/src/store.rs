//! The session store.
//!
//! A single explicitly-owned object holding the `(identity, profile,
//! loading)` triple for the whole application lifetime. Constructed at app
//! start, passed by reference to consumers, torn down at app exit; never
//! ambient global state.
//!
//! State machine: `Unauthenticated -> Authenticating -> Authenticated`
//! (with `ProfileLoading -> ProfileResolved | ProfileFallback` in parallel)
//! `-> Unauthenticated` on sign-out. Profile resolution is bounded by a
//! configured timeout and always releases the loading flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use kasbook_core::auth::SignUpForm;
use kasbook_core::auth::ValidationError;
use kasbook_shared::config::SessionConfig;
use kasbook_shared::error::{AuthError, DataError};
use kasbook_shared::profile::{Identity, Profile, Role, UserStatus};
use kasbook_shared::types::UserId;
use thiserror::Error;
use tokio::sync::{RwLock, broadcast};
use tracing::{debug, info, warn};

use crate::directory::{DirectoryService, IdentityEvent, ProfileFilter, SignUpOutcome};
use crate::token::TokenShelf;

/// How many times user creation re-checks for the profile row before
/// writing it itself.
const PROFILE_CONFIRM_ATTEMPTS: u32 = 3;

/// Base delay between profile confirmation attempts.
const PROFILE_CONFIRM_BACKOFF: Duration = Duration::from_millis(100);

/// Errors from the sign-up flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignUpError {
    /// The form failed client-side validation; no network call was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The provider rejected the request.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Read-only copy of the session triple handed to consumers.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    /// The authenticated identity, if any.
    pub identity: Option<Identity>,
    /// The resolved (or fallback) profile, if any.
    pub profile: Option<Profile>,
    /// True while a profile resolution is in flight.
    pub loading: bool,
}

impl SessionSnapshot {
    /// Returns true if an identity is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

#[derive(Debug, Default)]
struct SessionState {
    identity: Option<Identity>,
    profile: Option<Profile>,
    loading: bool,
}

/// The session store.
///
/// Owns the only cross-component mutable shared state in the system and
/// mediates every transition on it.
pub struct SessionStore<D> {
    directory: Arc<D>,
    state: RwLock<SessionState>,
    /// Identity generation counter. Every sign-in, sign-out, and token
    /// refresh bumps it; a profile resolution commits only if the generation
    /// it was started for is still current (last-write-wins).
    generation: AtomicU64,
    tokens: TokenShelf,
    config: SessionConfig,
}

impl<D: DirectoryService> SessionStore<D> {
    /// Creates a store over a directory service.
    #[must_use]
    pub fn new(directory: Arc<D>, config: SessionConfig) -> Self {
        Self {
            directory,
            state: RwLock::new(SessionState::default()),
            generation: AtomicU64::new(0),
            tokens: TokenShelf::new(),
            config,
        }
    }

    /// Local token shelf the identity provider persists its tokens into.
    #[must_use]
    pub fn tokens(&self) -> &TokenShelf {
        &self.tokens
    }

    /// Returns a read-only copy of the session triple.
    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read().await;
        SessionSnapshot {
            identity: state.identity.clone(),
            profile: state.profile.clone(),
            loading: state.loading,
        }
    }

    /// Authenticates with email and password.
    ///
    /// On success the provider emits a `SignedIn` identity event, which
    /// drives profile resolution; this method itself does not mutate local
    /// state. Errors are surfaced for display and never retried.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.directory.sign_in(email, password).await
    }

    /// Requests account creation.
    ///
    /// The form is validated before any network call. Sign-up never
    /// authenticates the session directly; the outcome reports whether the
    /// provider requires email confirmation first.
    pub async fn sign_up(&self, form: &SignUpForm) -> Result<SignUpOutcome, SignUpError> {
        form.validate()?;
        let outcome = self
            .directory
            .sign_up(&form.email, &form.password, &form.name)
            .await?;
        info!(
            requires_confirmation = outcome.requires_confirmation,
            "sign-up accepted"
        );
        Ok(outcome)
    }

    /// Signs out.
    ///
    /// Local state is cleared first, unconditionally: identity, then
    /// profile, then every persisted token under the configured key prefix.
    /// The remote sign-out runs after that, bounded by the profile timeout;
    /// its failure is logged and never surfaced, so the UI can never be
    /// stuck logged in.
    pub async fn sign_out(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);

        {
            let mut state = self.state.write().await;
            state.identity = None;
            state.profile = None;
            state.loading = false;
        }

        let purged = self.tokens.purge_prefix(&self.config.token_key_prefix);
        debug!(purged, "cleared persisted session tokens");

        let bound = Duration::from_secs(self.config.profile_timeout_secs);
        if tokio::time::timeout(bound, self.directory.sign_out())
            .await
            .is_err()
        {
            warn!("remote sign-out timed out; local session already cleared");
        }
    }

    /// Consumes the directory's identity event stream until it closes.
    ///
    /// Intended to be spawned once at app start.
    pub async fn run_event_loop(&self) {
        let mut events = self.directory.subscribe();
        loop {
            match events.recv().await {
                Ok(event) => self.apply_event(event).await,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "identity event stream lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }

    /// Applies one identity event to the session state.
    ///
    /// `SignedIn` and `TokenRefreshed` start a bounded profile resolution
    /// for a fresh generation; `SignedOut` clears the triple.
    pub async fn apply_event(&self, event: IdentityEvent) {
        match event {
            IdentityEvent::SignedIn(identity) | IdentityEvent::TokenRefreshed(identity) => {
                let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
                {
                    let mut state = self.state.write().await;
                    state.identity = Some(identity.clone());
                    state.loading = true;
                }
                self.resolve_profile(&identity, generation).await;
            }
            IdentityEvent::SignedOut => {
                self.generation.fetch_add(1, Ordering::SeqCst);
                let mut state = self.state.write().await;
                state.identity = None;
                state.profile = None;
                state.loading = false;
            }
        }
    }

    /// Resolves the profile for an authenticated identity.
    ///
    /// Bounded by the configured timeout. A missing row is replaced by a
    /// synthesized fallback profile which is also written back best-effort;
    /// lookup errors and timeouts degrade to the fallback as well, because
    /// failing to resolve a profile must never block application usability.
    /// The result is committed only if `generation` is still current, so a
    /// slow resolution from an old sign-in can never overwrite a newer
    /// session.
    pub async fn resolve_profile(&self, identity: &Identity, generation: u64) {
        let bound = Duration::from_secs(self.config.profile_timeout_secs);
        let now = chrono::Utc::now();

        let profile = match tokio::time::timeout(
            bound,
            self.directory.fetch_profile(identity.id),
        )
        .await
        {
            Ok(Ok(profile)) => profile,
            Ok(Err(err)) if err.is_not_found() => {
                let fallback =
                    Profile::fallback_for(identity, &self.config.bootstrap_admin_email, now);
                info!(user_id = %identity.id, role = %fallback.role, "synthesized fallback profile");
                if let Err(persist_err) = self.directory.upsert_profile(&fallback).await {
                    // The fallback is still used; persistence is best-effort.
                    warn!(error = %persist_err, "failed to persist fallback profile");
                }
                fallback
            }
            Ok(Err(err)) => {
                warn!(error = %err, "profile lookup failed, using fallback");
                Profile::fallback_for(identity, &self.config.bootstrap_admin_email, now)
            }
            Err(_elapsed) => {
                warn!(
                    timeout_secs = self.config.profile_timeout_secs,
                    "profile resolution timed out, using fallback"
                );
                Profile::fallback_for(identity, &self.config.bootstrap_admin_email, now)
            }
        };

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "discarding stale profile resolution");
            return;
        }

        let mut state = self.state.write().await;
        state.profile = Some(profile);
        state.loading = false;
    }

    /// Creates a user as a two-step sequence: create the identity, then
    /// confirm the profile row exists with the requested name and role,
    /// retrying a bounded number of times on not-found before writing the
    /// row directly (admin operation).
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: Role,
    ) -> Result<Profile, SignUpError> {
        let identity = self.directory.create_user(email, password, name, role).await?;
        let now = chrono::Utc::now();

        for attempt in 1..=PROFILE_CONFIRM_ATTEMPTS {
            match self.directory.fetch_profile(identity.id).await {
                Ok(mut profile) => {
                    profile.name = name.to_string();
                    profile.role = role;
                    profile.updated_at = now;
                    self.directory
                        .upsert_profile(&profile)
                        .await
                        .map_err(|e| AuthError::Provider(e.to_string()))?;
                    return Ok(profile);
                }
                Err(err) if err.is_not_found() => {
                    debug!(attempt, "profile row not yet present after user creation");
                    tokio::time::sleep(PROFILE_CONFIRM_BACKOFF * attempt).await;
                }
                Err(err) => return Err(AuthError::Provider(err.to_string()).into()),
            }
        }

        // The provider never materialized the row; write it ourselves.
        let profile = Profile {
            id: identity.id,
            name: name.to_string(),
            email: identity.email.clone(),
            role,
            status: UserStatus::Active,
            created_at: now,
            updated_at: now,
        };
        self.directory
            .upsert_profile(&profile)
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;
        Ok(profile)
    }

    /// Updates a user's name and role, tagging `updated_at` (admin
    /// operation).
    pub async fn update_user(
        &self,
        user_id: UserId,
        name: &str,
        role: Role,
    ) -> Result<Profile, DataError> {
        let mut profile = self.directory.fetch_profile(user_id).await?;
        profile.name = name.to_string();
        profile.role = role;
        profile.updated_at = chrono::Utc::now();
        self.directory.upsert_profile(&profile).await?;
        Ok(profile)
    }

    /// Soft-deletes a user (admin operation). The row is kept with status
    /// inactive; nothing is physically removed.
    pub async fn deactivate_user(&self, user_id: UserId) -> Result<(), DataError> {
        self.directory.deactivate_user(user_id).await
    }

    /// Lists user profiles (admin operation).
    pub async fn list_users(&self, exclude_inactive: bool) -> Result<Vec<Profile>, DataError> {
        self.directory
            .list_profiles(ProfileFilter { exclude_inactive })
            .await
    }
}
