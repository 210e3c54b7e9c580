//! The aggregation engine.
//!
//! Pure, side-effect-free reductions of a flat transaction list into the
//! figures the dashboard and report views display:
//! - Income/expense totals and all-time profit
//! - Monthly net income
//! - Trailing weekly and monthly time series
//! - Per-category distribution
//! - Period summaries (weekly, monthly, all)
//!
//! Every function takes "today" as an explicit parameter so results are
//! reproducible and referentially transparent.

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::ReportService;
pub use types::{CategoryTotal, DailyFlow, MonthlyFlow, Period, PeriodSummary};
