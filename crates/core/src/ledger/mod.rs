//! Ledger domain types and validation.
//!
//! This module defines the transaction and category records the rest of the
//! system aggregates over, and the validation applied before any write is
//! handed to the repository.

pub mod error;
pub mod types;
pub mod validation;

pub use error::LedgerError;
pub use types::{Category, FlowKind, Transaction};
pub use validation::validate_transaction;
