//! Aggregation result types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::FlowKind;

/// Filter window applied before summarizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Trailing 7 calendar days, including today.
    Weekly,
    /// Trailing one calendar month, including today.
    Monthly,
    /// No filter.
    All,
}

/// Summary figures for a filtered period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// Sum of income amounts in the window.
    pub income: Decimal,
    /// Sum of expense amounts in the window.
    pub expense: Decimal,
    /// Income minus expense.
    pub net: Decimal,
    /// Number of transactions in the window.
    pub count: usize,
}

impl PeriodSummary {
    /// An all-zero summary, returned for empty windows.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
            net: Decimal::ZERO,
            count: 0,
        }
    }
}

/// One day of the weekly cash-flow chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyFlow {
    /// Calendar day this bucket covers.
    pub day: NaiveDate,
    /// Income recorded on exactly this day.
    pub income: Decimal,
    /// Expense recorded on exactly this day.
    pub expense: Decimal,
}

impl DailyFlow {
    /// Net profit for the day.
    #[must_use]
    pub fn profit(&self) -> Decimal {
        self.income - self.expense
    }
}

/// One month of the monthly trend chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyFlow {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Income recorded in this month.
    pub income: Decimal,
    /// Expense recorded in this month.
    pub expense: Decimal,
}

/// Aggregated total for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Resolved category name, or the `"unknown"` sentinel.
    pub category: String,
    /// Flow kind of the first transaction that opened this bucket.
    pub kind: FlowKind,
    /// Sum of amounts grouped under this name.
    pub total: Decimal,
}
