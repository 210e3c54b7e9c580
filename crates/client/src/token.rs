//! Local persistence of session tokens.
//!
//! Stands in for the browser's local storage: the identity provider persists
//! its tokens under keys sharing a configured prefix, and sign-out must purge
//! every key under that prefix regardless of how the remote call went.

use std::collections::HashMap;
use std::sync::Mutex;

/// In-process key/value shelf for session tokens.
#[derive(Debug, Default)]
pub struct TokenShelf {
    entries: Mutex<HashMap<String, String>>,
}

impl TokenShelf {
    /// Creates an empty shelf.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a token under a key.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries
            .lock()
            .expect("token shelf lock poisoned")
            .insert(key.into(), value.into());
    }

    /// Returns the token stored under a key, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("token shelf lock poisoned")
            .get(key)
            .cloned()
    }

    /// Removes every key starting with the given prefix, returning how many
    /// were removed.
    pub fn purge_prefix(&self, prefix: &str) -> usize {
        let mut entries = self.entries.lock().expect("token shelf lock poisoned");
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        before - entries.len()
    }
}
