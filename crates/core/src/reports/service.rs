//! Aggregation service.

use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::Decimal;

use super::types::{CategoryTotal, DailyFlow, MonthlyFlow, Period, PeriodSummary};
use crate::ledger::{Category, FlowKind, Transaction};

/// Sentinel label for transactions whose category does not resolve.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Pure aggregation functions over a transaction list.
///
/// All functions are referentially transparent: no I/O, no mutation of
/// inputs, and "today" is always an explicit parameter. Empty input yields
/// zeroed sums and empty series.
pub struct ReportService;

impl ReportService {
    /// Sums the amounts of all transactions of the given kind.
    #[must_use]
    pub fn total_by_kind(transactions: &[Transaction], kind: FlowKind) -> Decimal {
        transactions
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.amount)
            .sum()
    }

    /// Net income for a calendar month: income minus expense over the
    /// transactions whose date has the given year and month components.
    #[must_use]
    pub fn monthly_net(transactions: &[Transaction], year: i32, month: u32) -> Decimal {
        transactions
            .iter()
            .filter(|t| t.date.year() == year && t.date.month() == month)
            .map(Transaction::signed_amount)
            .sum()
    }

    /// All-time profit: total income minus total expense over the
    /// unfiltered set.
    #[must_use]
    pub fn all_time_profit(transactions: &[Transaction]) -> Decimal {
        transactions.iter().map(Transaction::signed_amount).sum()
    }

    /// Cash flow for each of the trailing 7 calendar days, ending today.
    ///
    /// Always returns exactly 7 entries in chronological order. Sums use
    /// calendar-day equality, not a rolling 24-hour window.
    #[must_use]
    pub fn weekly_series(transactions: &[Transaction], today: NaiveDate) -> Vec<DailyFlow> {
        let start = today
            .checked_sub_days(Days::new(6))
            .unwrap_or(NaiveDate::MIN);

        start
            .iter_days()
            .take_while(|day| *day <= today)
            .map(|day| {
                let on_day = |kind| {
                    transactions
                        .iter()
                        .filter(|t| t.date == day && t.kind == kind)
                        .map(|t| t.amount)
                        .sum()
                };
                DailyFlow {
                    day,
                    income: on_day(FlowKind::Income),
                    expense: on_day(FlowKind::Expense),
                }
            })
            .collect()
    }

    /// Income and expense per calendar month for the trailing `months`
    /// months, ending with the month containing `today`.
    #[must_use]
    pub fn monthly_series(
        transactions: &[Transaction],
        today: NaiveDate,
        months: u32,
    ) -> Vec<MonthlyFlow> {
        (0..months)
            .rev()
            .filter_map(|back| today.checked_sub_months(Months::new(back)))
            .map(|anchor| {
                let (year, month) = (anchor.year(), anchor.month());
                let in_month = |kind| {
                    transactions
                        .iter()
                        .filter(|t| {
                            t.date.year() == year && t.date.month() == month && t.kind == kind
                        })
                        .map(|t| t.amount)
                        .sum()
                };
                MonthlyFlow {
                    year,
                    month,
                    income: in_month(FlowKind::Income),
                    expense: in_month(FlowKind::Expense),
                }
            })
            .collect()
    }

    /// Groups transactions by resolved category name.
    ///
    /// Transactions whose `category_id` does not resolve are grouped under
    /// the `"unknown"` sentinel. Buckets appear in order of first appearance
    /// for display stability; no sorting is applied.
    #[must_use]
    pub fn category_distribution(
        transactions: &[Transaction],
        categories: &[Category],
    ) -> Vec<CategoryTotal> {
        let mut buckets: Vec<CategoryTotal> = Vec::new();

        for transaction in transactions {
            let name = transaction
                .category_id
                .and_then(|id| categories.iter().find(|c| c.id == id))
                .map_or(UNKNOWN_CATEGORY, |c| c.name.as_str());

            match buckets.iter_mut().find(|b| b.category == name) {
                Some(bucket) => bucket.total += transaction.amount,
                None => buckets.push(CategoryTotal {
                    category: name.to_string(),
                    kind: transaction.kind,
                    total: transaction.amount,
                }),
            }
        }

        buckets
    }

    /// Summary figures for a filtered period window.
    ///
    /// `Weekly` covers the trailing 7 calendar days including today,
    /// `Monthly` the trailing one calendar month including today, and `All`
    /// applies no filter.
    #[must_use]
    pub fn period_summary(
        transactions: &[Transaction],
        period: Period,
        today: NaiveDate,
    ) -> PeriodSummary {
        let start = match period {
            Period::Weekly => Some(
                today
                    .checked_sub_days(Days::new(6))
                    .unwrap_or(NaiveDate::MIN),
            ),
            Period::Monthly => Some(
                today
                    .checked_sub_months(Months::new(1))
                    .unwrap_or(NaiveDate::MIN),
            ),
            Period::All => None,
        };

        let in_window = |t: &&Transaction| match start {
            Some(start) => t.date >= start && t.date <= today,
            None => true,
        };

        let mut summary = PeriodSummary::zero();
        for transaction in transactions.iter().filter(in_window) {
            match transaction.kind {
                FlowKind::Income => summary.income += transaction.amount,
                FlowKind::Expense => summary.expense += transaction.amount,
            }
            summary.count += 1;
        }
        summary.net = summary.income - summary.expense;
        summary
    }

    /// The most recent transactions, newest first, up to `limit`.
    ///
    /// Ordered by transaction date, then creation time for same-day rows.
    #[must_use]
    pub fn recent(transactions: &[Transaction], limit: usize) -> Vec<Transaction> {
        let mut sorted: Vec<Transaction> = transactions.to_vec();
        sorted.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        sorted.truncate(limit);
        sorted
    }
}
