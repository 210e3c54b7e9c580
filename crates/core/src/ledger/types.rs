//! Transaction and category types.

use chrono::{DateTime, NaiveDate, Utc};
use kasbook_shared::types::{CategoryId, TransactionId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a money flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

impl std::fmt::Display for FlowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// A single recorded transaction.
///
/// `amount` is always a non-negative magnitude; the sign of a flow is derived
/// from `kind` at aggregation and display time, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// Human-readable description.
    pub description: String,
    /// Non-negative monetary magnitude.
    pub amount: Decimal,
    /// Income or expense.
    pub kind: FlowKind,
    /// Calendar date the transaction applies to.
    pub date: NaiveDate,
    /// Category reference, if assigned.
    pub category_id: Option<CategoryId>,
    /// The user who recorded the transaction.
    pub user_id: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Returns the amount with the sign implied by the flow kind.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            FlowKind::Income => self.amount,
            FlowKind::Expense => -self.amount,
        }
    }
}

/// An admin-managed transaction category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Which flow kind this category applies to.
    pub kind: FlowKind,
}
