//! In-memory adapter implementations.
//!
//! [`InMemoryDirectory`] and [`InMemoryLedger`] back the console binary and
//! the integration tests. The directory mimics a hosted identity provider
//! closely enough to exercise the session store's edge paths: sign-up creates
//! an unconfirmed account with no profile row, admin-created users get their
//! row immediately, and [`FailureMode`] injects backend failures and hangs.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use kasbook_core::auth::{hash_password, verify_password};
use kasbook_core::ledger::{Category, Transaction};
use kasbook_shared::error::{AuthError, DataError};
use kasbook_shared::profile::{Identity, Profile, Role, UserStatus};
use kasbook_shared::types::{CategoryId, TransactionId, UserId};
use tokio::sync::broadcast;
use tracing::debug;

use crate::directory::{DirectoryService, IdentityEvent, ProfileFilter, SignUpOutcome};
use crate::ledger::LedgerRepository;

const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Injectable backend failure, for exercising degraded paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Everything succeeds.
    #[default]
    None,
    /// `fetch_profile` returns a backend error.
    FailProfileFetch,
    /// `fetch_profile` never completes.
    HangProfileFetch,
    /// `upsert_profile` returns a backend error.
    FailProfileUpsert,
    /// `sign_out` returns without ending the provider-side session.
    FailSignOut,
    /// `sign_out` never completes.
    HangSignOut,
}

struct Account {
    identity: Identity,
    password_hash: String,
    confirmed: bool,
}

#[derive(Default)]
struct DirectoryState {
    /// Keyed by lowercase email.
    accounts: HashMap<String, Account>,
    profiles: HashMap<UserId, Profile>,
    current: Option<Identity>,
    failure_mode: FailureMode,
}

/// In-memory identity provider.
pub struct InMemoryDirectory {
    state: Mutex<DirectoryState>,
    events: broadcast::Sender<IdentityEvent>,
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: Mutex::new(DirectoryState::default()),
            events,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DirectoryState> {
        self.state.lock().expect("directory state lock poisoned")
    }

    /// Sets the failure mode for subsequent calls.
    pub fn set_failure_mode(&self, mode: FailureMode) {
        self.lock().failure_mode = mode;
    }

    /// Marks an account's email as confirmed, as a confirmation link click
    /// would.
    pub fn confirm_email(&self, email: &str) {
        if let Some(account) = self.lock().accounts.get_mut(&email.to_lowercase()) {
            account.confirmed = true;
        }
    }

    /// Returns the stored profile row, bypassing the service contract.
    #[must_use]
    pub fn profile_row(&self, user_id: UserId) -> Option<Profile> {
        self.lock().profiles.get(&user_id).cloned()
    }

    fn failure_mode(&self) -> FailureMode {
        self.lock().failure_mode
    }
}

#[async_trait]
impl DirectoryService for InMemoryDirectory {
    async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let identity = {
            let state = self.lock();
            let account = state
                .accounts
                .get(&email.to_lowercase())
                .ok_or(AuthError::InvalidCredentials)?;

            let matches = verify_password(password, &account.password_hash)
                .map_err(|e| AuthError::Provider(e.to_string()))?;
            if !matches {
                return Err(AuthError::InvalidCredentials);
            }
            if !account.confirmed {
                return Err(AuthError::EmailNotConfirmed);
            }
            if let Some(profile) = state.profiles.get(&account.identity.id) {
                if profile.status == UserStatus::Inactive {
                    return Err(AuthError::AccountInactive);
                }
            }
            account.identity.clone()
        };

        self.lock().current = Some(identity.clone());
        debug!(email, "signed in");
        let _ = self.events.send(IdentityEvent::SignedIn(identity));
        Ok(())
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<SignUpOutcome, AuthError> {
        let mut state = self.lock();
        let key = email.to_lowercase();
        if state.accounts.contains_key(&key) {
            return Err(AuthError::EmailTaken);
        }

        let password_hash =
            hash_password(password).map_err(|e| AuthError::Provider(e.to_string()))?;
        let identity = Identity {
            id: UserId::new(),
            email: email.to_string(),
            name: Some(name.to_string()),
        };
        // No profile row: the backing store writes one asynchronously, so the
        // first sign-in may race ahead of it.
        state.accounts.insert(
            key,
            Account {
                identity,
                password_hash,
                confirmed: false,
            },
        );

        Ok(SignUpOutcome {
            requires_confirmation: true,
        })
    }

    async fn sign_out(&self) {
        match self.failure_mode() {
            FailureMode::HangSignOut => std::future::pending::<()>().await,
            FailureMode::FailSignOut => {
                debug!("sign-out dropped by provider");
            }
            _ => {
                self.lock().current = None;
                let _ = self.events.send(IdentityEvent::SignedOut);
            }
        }
    }

    async fn current_identity(&self) -> Option<Identity> {
        self.lock().current.clone()
    }

    fn subscribe(&self) -> broadcast::Receiver<IdentityEvent> {
        self.events.subscribe()
    }

    async fn create_user(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: Role,
    ) -> Result<Identity, AuthError> {
        let mut state = self.lock();
        let key = email.to_lowercase();
        if state.accounts.contains_key(&key) {
            return Err(AuthError::EmailTaken);
        }

        let password_hash =
            hash_password(password).map_err(|e| AuthError::Provider(e.to_string()))?;
        let identity = Identity {
            id: UserId::new(),
            email: email.to_string(),
            name: Some(name.to_string()),
        };
        let now = Utc::now();
        state.profiles.insert(
            identity.id,
            Profile {
                id: identity.id,
                name: name.to_string(),
                email: email.to_string(),
                role,
                status: UserStatus::Active,
                created_at: now,
                updated_at: now,
            },
        );
        state.accounts.insert(
            key,
            Account {
                identity: identity.clone(),
                password_hash,
                confirmed: true,
            },
        );

        Ok(identity)
    }

    async fn fetch_profile(&self, user_id: UserId) -> Result<Profile, DataError> {
        match self.failure_mode() {
            FailureMode::FailProfileFetch => {
                return Err(DataError::Backend("profile fetch failed".to_string()));
            }
            FailureMode::HangProfileFetch => std::future::pending::<()>().await,
            _ => {}
        }

        self.lock()
            .profiles
            .get(&user_id)
            .cloned()
            .ok_or_else(|| DataError::NotFound(format!("profile {user_id}")))
    }

    async fn upsert_profile(&self, profile: &Profile) -> Result<(), DataError> {
        if self.failure_mode() == FailureMode::FailProfileUpsert {
            return Err(DataError::Backend("profile upsert failed".to_string()));
        }
        self.lock().profiles.insert(profile.id, profile.clone());
        Ok(())
    }

    async fn deactivate_user(&self, user_id: UserId) -> Result<(), DataError> {
        let mut state = self.lock();
        let profile = state
            .profiles
            .get_mut(&user_id)
            .ok_or_else(|| DataError::NotFound(format!("profile {user_id}")))?;
        profile.status = UserStatus::Inactive;
        profile.updated_at = Utc::now();
        Ok(())
    }

    async fn list_profiles(&self, filter: ProfileFilter) -> Result<Vec<Profile>, DataError> {
        let state = self.lock();
        let mut profiles: Vec<Profile> = state
            .profiles
            .values()
            .filter(|p| !(filter.exclude_inactive && p.status == UserStatus::Inactive))
            .cloned()
            .collect();
        profiles.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(profiles)
    }
}

#[derive(Default)]
struct LedgerState {
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
}

/// In-memory transaction and category store.
#[derive(Default)]
pub struct InMemoryLedger {
    state: Mutex<LedgerState>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LedgerState> {
        self.state.lock().expect("ledger state lock poisoned")
    }
}

#[async_trait]
impl LedgerRepository for InMemoryLedger {
    async fn list_transactions(&self) -> Result<Vec<Transaction>, DataError> {
        let mut transactions = self.lock().transactions.clone();
        transactions.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(transactions)
    }

    async fn upsert_transaction(
        &self,
        transaction: Transaction,
    ) -> Result<Transaction, DataError> {
        let mut state = self.lock();
        if let Some(existing) = state
            .transactions
            .iter_mut()
            .find(|t| t.id == transaction.id)
        {
            *existing = transaction.clone();
        } else {
            state.transactions.insert(0, transaction.clone());
        }
        Ok(transaction)
    }

    async fn delete_transaction(&self, id: TransactionId) -> Result<(), DataError> {
        let mut state = self.lock();
        let before = state.transactions.len();
        state.transactions.retain(|t| t.id != id);
        if state.transactions.len() == before {
            return Err(DataError::NotFound(format!("transaction {id}")));
        }
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, DataError> {
        Ok(self.lock().categories.clone())
    }

    async fn upsert_category(&self, category: Category) -> Result<Category, DataError> {
        let mut state = self.lock();
        if let Some(existing) = state.categories.iter_mut().find(|c| c.id == category.id) {
            *existing = category.clone();
        } else {
            state.categories.push(category.clone());
        }
        Ok(category)
    }

    async fn delete_category(&self, id: CategoryId) -> Result<(), DataError> {
        let mut state = self.lock();
        let before = state.categories.len();
        state.categories.retain(|c| c.id != id);
        if state.categories.len() == before {
            return Err(DataError::NotFound(format!("category {id}")));
        }
        Ok(())
    }
}
