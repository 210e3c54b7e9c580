use chrono::{NaiveDate, TimeZone, Utc};
use kasbook_shared::types::{CategoryId, TransactionId, UserId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::service::{ReportService, UNKNOWN_CATEGORY};
use super::types::{Period, PeriodSummary};
use crate::ledger::{Category, FlowKind, Transaction};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 25).unwrap()
}

fn tx_on(date: NaiveDate, kind: FlowKind, amount: Decimal) -> Transaction {
    Transaction {
        id: TransactionId::new(),
        description: "test".to_string(),
        amount,
        kind,
        date,
        category_id: None,
        user_id: UserId::new(),
        created_at: Utc.with_ymd_and_hms(2024, 6, 25, 12, 0, 0).unwrap(),
    }
}

fn tx(kind: FlowKind, amount: Decimal) -> Transaction {
    tx_on(today(), kind, amount)
}

#[test]
fn test_total_by_kind() {
    let transactions = vec![
        tx(FlowKind::Income, dec!(1250000)),
        tx(FlowKind::Income, dec!(500000)),
        tx(FlowKind::Expense, dec!(250000)),
    ];

    assert_eq!(
        ReportService::total_by_kind(&transactions, FlowKind::Income),
        dec!(1750000)
    );
    assert_eq!(
        ReportService::total_by_kind(&transactions, FlowKind::Expense),
        dec!(250000)
    );
}

#[test]
fn test_all_time_profit() {
    let transactions = vec![
        tx(FlowKind::Income, dec!(1750000)),
        tx(FlowKind::Expense, dec!(5400000)),
    ];

    assert_eq!(
        ReportService::all_time_profit(&transactions),
        dec!(-3650000)
    );
}

#[test]
fn test_monthly_net_filters_by_calendar_components() {
    let transactions = vec![
        tx_on(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            FlowKind::Income,
            dec!(100),
        ),
        tx_on(
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            FlowKind::Expense,
            dec!(30),
        ),
        // Same month number, different year: must be excluded
        tx_on(
            NaiveDate::from_ymd_opt(2023, 6, 15).unwrap(),
            FlowKind::Income,
            dec!(999),
        ),
        // Different month
        tx_on(
            NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(),
            FlowKind::Income,
            dec!(999),
        ),
    ];

    assert_eq!(ReportService::monthly_net(&transactions, 2024, 6), dec!(70));
}

#[test]
fn test_period_summary_all_scenario() {
    // 100000 income + 40000 expense on the same day
    let transactions = vec![
        tx(FlowKind::Income, dec!(100000)),
        tx(FlowKind::Expense, dec!(40000)),
    ];

    let summary = ReportService::period_summary(&transactions, Period::All, today());
    assert_eq!(summary.income, dec!(100000));
    assert_eq!(summary.expense, dec!(40000));
    assert_eq!(summary.net, dec!(60000));
    assert_eq!(summary.count, 2);
}

#[test]
fn test_period_summary_weekly_window() {
    let transactions = vec![
        // 6 days ago: inside the window
        tx_on(
            NaiveDate::from_ymd_opt(2024, 6, 19).unwrap(),
            FlowKind::Income,
            dec!(100),
        ),
        // 7 days ago: outside
        tx_on(
            NaiveDate::from_ymd_opt(2024, 6, 18).unwrap(),
            FlowKind::Income,
            dec!(999),
        ),
        // Tomorrow: outside (trailing windows never include the future)
        tx_on(
            NaiveDate::from_ymd_opt(2024, 6, 26).unwrap(),
            FlowKind::Expense,
            dec!(999),
        ),
    ];

    let summary = ReportService::period_summary(&transactions, Period::Weekly, today());
    assert_eq!(summary.income, dec!(100));
    assert_eq!(summary.expense, dec!(0));
    assert_eq!(summary.count, 1);
}

#[test]
fn test_period_summary_monthly_window() {
    let transactions = vec![
        tx_on(
            NaiveDate::from_ymd_opt(2024, 5, 25).unwrap(),
            FlowKind::Income,
            dec!(100),
        ),
        tx_on(
            NaiveDate::from_ymd_opt(2024, 5, 24).unwrap(),
            FlowKind::Income,
            dec!(999),
        ),
    ];

    let summary = ReportService::period_summary(&transactions, Period::Monthly, today());
    assert_eq!(summary.income, dec!(100));
    assert_eq!(summary.count, 1);
}

#[test]
fn test_empty_list_yields_zeroes_everywhere() {
    let transactions: Vec<Transaction> = Vec::new();

    assert_eq!(
        ReportService::total_by_kind(&transactions, FlowKind::Income),
        Decimal::ZERO
    );
    assert_eq!(ReportService::all_time_profit(&transactions), Decimal::ZERO);
    assert_eq!(
        ReportService::monthly_net(&transactions, 2024, 6),
        Decimal::ZERO
    );
    assert_eq!(
        ReportService::period_summary(&transactions, Period::All, today()),
        PeriodSummary::zero()
    );
    assert!(ReportService::category_distribution(&transactions, &[]).is_empty());
    assert!(ReportService::recent(&transactions, 5).is_empty());

    let series = ReportService::weekly_series(&transactions, today());
    assert_eq!(series.len(), 7);
    assert!(series.iter().all(|d| d.income.is_zero() && d.expense.is_zero()));
}

#[test]
fn test_weekly_series_buckets_by_calendar_day() {
    let transactions = vec![
        tx_on(today(), FlowKind::Income, dec!(400000)),
        tx_on(today(), FlowKind::Expense, dec!(150000)),
        tx_on(
            NaiveDate::from_ymd_opt(2024, 6, 19).unwrap(),
            FlowKind::Income,
            dec!(500000),
        ),
        // Outside the trailing week
        tx_on(
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            FlowKind::Income,
            dec!(999),
        ),
    ];

    let series = ReportService::weekly_series(&transactions, today());
    assert_eq!(series.len(), 7);
    assert_eq!(series[0].day, NaiveDate::from_ymd_opt(2024, 6, 19).unwrap());
    assert_eq!(series[0].income, dec!(500000));
    assert_eq!(series[6].day, today());
    assert_eq!(series[6].income, dec!(400000));
    assert_eq!(series[6].expense, dec!(150000));
    assert_eq!(series[6].profit(), dec!(250000));
    // Days with no transactions stay zeroed
    assert_eq!(series[3].income, dec!(0));
}

#[test]
fn test_monthly_series_trailing_months() {
    let transactions = vec![
        tx_on(
            NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
            FlowKind::Income,
            dec!(7200000),
        ),
        tx_on(
            NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
            FlowKind::Expense,
            dec!(4200000),
        ),
        tx_on(
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            FlowKind::Income,
            dec!(999),
        ),
    ];

    let series = ReportService::monthly_series(&transactions, today(), 6);
    assert_eq!(series.len(), 6);
    assert_eq!((series[0].year, series[0].month), (2024, 1));
    assert_eq!((series[5].year, series[5].month), (2024, 6));
    assert_eq!(series[5].income, dec!(7200000));
    assert_eq!(series[4].expense, dec!(4200000));
    // December 2023 falls outside the trailing 6 months
    assert!(series.iter().all(|m| m.year == 2024));
}

#[test]
fn test_category_distribution_groups_and_preserves_order() {
    let sales = Category {
        id: CategoryId::new(),
        name: "Penjualan".to_string(),
        kind: FlowKind::Income,
    };
    let transport = Category {
        id: CategoryId::new(),
        name: "Transportasi".to_string(),
        kind: FlowKind::Expense,
    };
    let categories = vec![sales.clone(), transport.clone()];

    let mut first = tx(FlowKind::Income, dec!(500000));
    first.category_id = Some(sales.id);
    let mut second = tx(FlowKind::Expense, dec!(150000));
    second.category_id = Some(transport.id);
    let mut third = tx(FlowKind::Income, dec!(1250000));
    third.category_id = Some(sales.id);

    let distribution =
        ReportService::category_distribution(&[first, second, third], &categories);

    assert_eq!(distribution.len(), 2);
    assert_eq!(distribution[0].category, "Penjualan");
    assert_eq!(distribution[0].kind, FlowKind::Income);
    assert_eq!(distribution[0].total, dec!(1750000));
    assert_eq!(distribution[1].category, "Transportasi");
    assert_eq!(distribution[1].total, dec!(150000));
}

#[test]
fn test_category_distribution_unknown_sentinel() {
    let mut dangling = tx(FlowKind::Expense, dec!(100));
    dangling.category_id = Some(CategoryId::new());
    let uncategorized = tx(FlowKind::Expense, dec!(50));

    let distribution = ReportService::category_distribution(&[dangling, uncategorized], &[]);

    assert_eq!(distribution.len(), 1);
    assert_eq!(distribution[0].category, UNKNOWN_CATEGORY);
    assert_eq!(distribution[0].total, dec!(150));
}

#[test]
fn test_recent_orders_newest_first_and_truncates() {
    let transactions = vec![
        tx_on(
            NaiveDate::from_ymd_opt(2024, 6, 21).unwrap(),
            FlowKind::Expense,
            dec!(1),
        ),
        tx_on(
            NaiveDate::from_ymd_opt(2024, 6, 25).unwrap(),
            FlowKind::Income,
            dec!(2),
        ),
        tx_on(
            NaiveDate::from_ymd_opt(2024, 6, 23).unwrap(),
            FlowKind::Income,
            dec!(3),
        ),
    ];

    let recent = ReportService::recent(&transactions, 2);
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].amount, dec!(2));
    assert_eq!(recent[1].amount, dec!(3));
}

#[test]
fn test_recent_does_not_mutate_input() {
    let transactions = vec![
        tx_on(
            NaiveDate::from_ymd_opt(2024, 6, 21).unwrap(),
            FlowKind::Expense,
            dec!(1),
        ),
        tx_on(
            NaiveDate::from_ymd_opt(2024, 6, 25).unwrap(),
            FlowKind::Income,
            dec!(2),
        ),
    ];
    let before = transactions.clone();

    let _ = ReportService::recent(&transactions, 1);
    assert_eq!(transactions, before);
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn arb_transaction()(
            amount in 0u64..10_000_000,
            is_income in any::<bool>(),
            days_back in 0i64..30,
        ) -> Transaction {
            let kind = if is_income { FlowKind::Income } else { FlowKind::Expense };
            let date = today() - chrono::Duration::days(days_back);
            tx_on(date, kind, Decimal::from(amount))
        }
    }

    proptest! {
        // Income total minus expense total equals all-time profit exactly.
        #[test]
        fn prop_profit_identity(transactions in prop::collection::vec(arb_transaction(), 0..50)) {
            let income = ReportService::total_by_kind(&transactions, FlowKind::Income);
            let expense = ReportService::total_by_kind(&transactions, FlowKind::Expense);
            prop_assert_eq!(income - expense, ReportService::all_time_profit(&transactions));
        }
    }

    proptest! {
        // The weekly window is a subset of all time.
        #[test]
        fn prop_weekly_subset_of_all_time(
            transactions in prop::collection::vec(arb_transaction(), 0..50),
        ) {
            let series = ReportService::weekly_series(&transactions, today());
            let weekly_income: Decimal = series.iter().map(|d| d.income).sum();
            let weekly_expense: Decimal = series.iter().map(|d| d.expense).sum();

            let all_income = ReportService::total_by_kind(&transactions, FlowKind::Income);
            let all_expense = ReportService::total_by_kind(&transactions, FlowKind::Expense);

            prop_assert!(weekly_income + weekly_expense <= all_income + all_expense);
        }
    }

    proptest! {
        // Weekly series totals agree with the weekly period summary.
        #[test]
        fn prop_weekly_series_matches_weekly_summary(
            transactions in prop::collection::vec(arb_transaction(), 0..50),
        ) {
            let series = ReportService::weekly_series(&transactions, today());
            let summary = ReportService::period_summary(&transactions, Period::Weekly, today());

            let series_income: Decimal = series.iter().map(|d| d.income).sum();
            let series_expense: Decimal = series.iter().map(|d| d.expense).sum();

            prop_assert_eq!(series_income, summary.income);
            prop_assert_eq!(series_expense, summary.expense);
        }
    }

    proptest! {
        // Category distribution totals cover every transaction exactly once.
        #[test]
        fn prop_distribution_totals_cover_all(
            transactions in prop::collection::vec(arb_transaction(), 0..50),
        ) {
            let distribution = ReportService::category_distribution(&transactions, &[]);
            let distributed: Decimal = distribution.iter().map(|b| b.total).sum();

            let all = ReportService::total_by_kind(&transactions, FlowKind::Income)
                + ReportService::total_by_kind(&transactions, FlowKind::Expense);

            prop_assert_eq!(distributed, all);
        }
    }

    proptest! {
        // Aggregations are idempotent: same input, identical output.
        #[test]
        fn prop_aggregations_idempotent(
            transactions in prop::collection::vec(arb_transaction(), 0..50),
        ) {
            prop_assert_eq!(
                ReportService::all_time_profit(&transactions),
                ReportService::all_time_profit(&transactions)
            );
            prop_assert_eq!(
                ReportService::weekly_series(&transactions, today()),
                ReportService::weekly_series(&transactions, today())
            );
            prop_assert_eq!(
                ReportService::period_summary(&transactions, Period::Monthly, today()),
                ReportService::period_summary(&transactions, Period::Monthly, today())
            );
            prop_assert_eq!(
                ReportService::category_distribution(&transactions, &[]),
                ReportService::category_distribution(&transactions, &[])
            );
        }
    }

    proptest! {
        // A period summary's net always equals income minus expense.
        #[test]
        fn prop_summary_net_consistent(
            transactions in prop::collection::vec(arb_transaction(), 0..50),
            period in prop_oneof![
                Just(Period::Weekly),
                Just(Period::Monthly),
                Just(Period::All),
            ],
        ) {
            let summary = ReportService::period_summary(&transactions, period, today());
            prop_assert_eq!(summary.net, summary.income - summary.expense);
            prop_assert!(summary.count <= transactions.len());
        }
    }
}
