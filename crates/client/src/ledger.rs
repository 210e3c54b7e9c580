//! Ledger repository contract.
//!
//! Row CRUD for transactions and categories against the backing store. The
//! store's own row-level security is the authoritative access check; see
//! `kasbook_core::policy` for the client-side affordance predicates.

use async_trait::async_trait;
use kasbook_core::ledger::{Category, Transaction};
use kasbook_shared::error::DataError;
use kasbook_shared::types::{CategoryId, TransactionId};

/// Contract the transaction/category store must satisfy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Lists all visible transactions, newest first.
    async fn list_transactions(&self) -> Result<Vec<Transaction>, DataError>;

    /// Inserts or replaces a transaction, returning the stored row.
    async fn upsert_transaction(&self, transaction: Transaction)
        -> Result<Transaction, DataError>;

    /// Deletes a transaction by ID.
    async fn delete_transaction(&self, id: TransactionId) -> Result<(), DataError>;

    /// Lists all categories.
    async fn list_categories(&self) -> Result<Vec<Category>, DataError>;

    /// Inserts or replaces a category, returning the stored row.
    async fn upsert_category(&self, category: Category) -> Result<Category, DataError>;

    /// Deletes a category by ID.
    async fn delete_category(&self, id: CategoryId) -> Result<(), DataError>;
}
