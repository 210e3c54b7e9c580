//! Transaction validation rules.

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{Category, Transaction};

/// Validates a transaction before it is handed to the repository.
///
/// Checks the stored-magnitude invariant (amount >= 0), requires a
/// non-empty description, and verifies that the transaction's kind agrees
/// with its category's kind when a category is assigned.
///
/// # Errors
///
/// Returns `LedgerError::NegativeAmount` if the amount is negative.
/// Returns `LedgerError::EmptyDescription` if the description is blank.
/// Returns `LedgerError::UnknownCategory` if `category_id` does not resolve.
/// Returns `LedgerError::KindMismatch` if the kinds disagree.
pub fn validate_transaction(
    transaction: &Transaction,
    categories: &[Category],
) -> Result<(), LedgerError> {
    if transaction.amount < Decimal::ZERO {
        return Err(LedgerError::NegativeAmount);
    }

    if transaction.description.trim().is_empty() {
        return Err(LedgerError::EmptyDescription);
    }

    if let Some(category_id) = transaction.category_id {
        let category = categories
            .iter()
            .find(|c| c.id == category_id)
            .ok_or(LedgerError::UnknownCategory)?;

        if category.kind != transaction.kind {
            return Err(LedgerError::KindMismatch {
                transaction: transaction.kind,
                category: category.kind,
            });
        }
    }

    Ok(())
}
