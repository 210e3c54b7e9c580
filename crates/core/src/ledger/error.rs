//! Ledger error types.

use thiserror::Error;

use super::types::FlowKind;

/// Ledger validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Amount must be a non-negative magnitude.
    #[error("amount cannot be negative")]
    NegativeAmount,

    /// Description must not be empty.
    #[error("description cannot be empty")]
    EmptyDescription,

    /// Transaction kind must match its category's kind.
    #[error("transaction kind {transaction} does not match category kind {category}")]
    KindMismatch {
        /// The transaction's flow kind.
        transaction: FlowKind,
        /// The category's flow kind.
        category: FlowKind,
    },

    /// Referenced category does not exist.
    #[error("unknown category")]
    UnknownCategory,
}
