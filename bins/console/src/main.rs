//! Kasbook demo console.
//!
//! Seeds the in-memory directory and ledger with demo users and
//! transactions, runs a full sign-in lifecycle through the session store,
//! and prints the dashboard figures.
//!
//! Usage: cargo run --bin console

use std::sync::Arc;
use std::time::Duration;

use chrono::{Days, Utc};
use kasbook_client::mem::{InMemoryDirectory, InMemoryLedger};
use kasbook_client::{LedgerRepository, SessionStore};
use kasbook_core::ledger::{Category, FlowKind, Transaction};
use kasbook_core::reports::{Period, ReportService};
use kasbook_shared::config::AppConfig;
use kasbook_shared::profile::Role;
use kasbook_shared::types::{CategoryId, TransactionId, UserId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kasbook=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().map_err(|e| anyhow::anyhow!("failed to load config: {e}"))?;

    let directory = Arc::new(InMemoryDirectory::new());
    let store = Arc::new(SessionStore::new(directory, config.session.clone()));
    let event_loop = tokio::spawn({
        let store = Arc::clone(&store);
        async move { store.run_event_loop().await }
    });

    info!("seeding demo users...");
    let admin = store
        .create_user(
            &config.session.bootstrap_admin_email,
            "admin12345",
            "Admin Utama",
            Role::Admin,
        )
        .await
        .map_err(|e| anyhow::anyhow!("failed to seed admin: {e}"))?;
    store
        .create_user("dina@company.com", "rahasia123", "Dina", Role::Employee)
        .await
        .map_err(|e| anyhow::anyhow!("failed to seed employee: {e}"))?;

    let ledger = InMemoryLedger::new();
    let categories = seed_categories(&ledger).await?;
    seed_transactions(&ledger, admin.id, &categories).await?;

    info!("signing in as {}...", admin.email);
    store
        .sign_in(&admin.email, "admin12345")
        .await
        .map_err(|e| anyhow::anyhow!("sign-in failed: {e}"))?;

    // The spawned event loop picks up the SignedIn event and resolves the
    // profile.
    let mut profile = None;
    for _ in 0..200 {
        if let Some(resolved) = store.snapshot().await.profile {
            profile = Some(resolved);
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    let profile = profile.ok_or_else(|| anyhow::anyhow!("profile never resolved"))?;
    info!(name = %profile.name, role = %profile.role, "session established");

    print_dashboard(&ledger).await?;

    store.sign_out().await;
    info!("signed out");
    event_loop.abort();

    Ok(())
}

async fn seed_categories(ledger: &InMemoryLedger) -> anyhow::Result<Vec<Category>> {
    let mut categories = Vec::new();
    for (name, kind) in [
        ("Penjualan", FlowKind::Income),
        ("Jasa", FlowKind::Income),
        ("Gaji", FlowKind::Expense),
        ("Operasional", FlowKind::Expense),
    ] {
        let category = ledger
            .upsert_category(Category {
                id: CategoryId::new(),
                name: name.to_string(),
                kind,
            })
            .await?;
        categories.push(category);
    }
    Ok(categories)
}

async fn seed_transactions(
    ledger: &InMemoryLedger,
    user_id: UserId,
    categories: &[Category],
) -> anyhow::Result<()> {
    let today = Utc::now().date_naive();
    let rows: [(&str, Decimal, FlowKind, u64, usize); 6] = [
        ("Penjualan produk A", dec!(1500000), FlowKind::Income, 0, 0),
        ("Jasa konsultasi", dec!(750000), FlowKind::Income, 2, 1),
        ("Gaji karyawan", dec!(900000), FlowKind::Expense, 3, 2),
        ("Listrik dan air", dec!(250000), FlowKind::Expense, 5, 3),
        ("Penjualan produk B", dec!(2000000), FlowKind::Income, 12, 0),
        ("Sewa kantor", dec!(1200000), FlowKind::Expense, 20, 3),
    ];

    for (description, amount, kind, days_ago, category_idx) in rows {
        let date = today
            .checked_sub_days(Days::new(days_ago))
            .ok_or_else(|| anyhow::anyhow!("date out of range"))?;
        ledger
            .upsert_transaction(Transaction {
                id: TransactionId::new(),
                description: description.to_string(),
                amount,
                kind,
                date,
                category_id: Some(categories[category_idx].id),
                user_id,
                created_at: Utc::now(),
            })
            .await?;
    }
    Ok(())
}

async fn print_dashboard(ledger: &InMemoryLedger) -> anyhow::Result<()> {
    let transactions = ledger.list_transactions().await?;
    let categories = ledger.list_categories().await?;
    let today = Utc::now().date_naive();

    info!(
        profit = %ReportService::all_time_profit(&transactions),
        income = %ReportService::total_by_kind(&transactions, FlowKind::Income),
        expense = %ReportService::total_by_kind(&transactions, FlowKind::Expense),
        "all-time totals"
    );

    let weekly = ReportService::period_summary(&transactions, Period::Weekly, today);
    info!(
        income = %weekly.income,
        expense = %weekly.expense,
        net = %weekly.net,
        count = weekly.count,
        "this week"
    );

    for day in ReportService::weekly_series(&transactions, today) {
        info!(date = %day.day, income = %day.income, expense = %day.expense, "daily flow");
    }

    for bucket in ReportService::category_distribution(&transactions, &categories) {
        info!(category = %bucket.category, total = %bucket.total, "category total");
    }

    for transaction in ReportService::recent(&transactions, 5) {
        info!(
            date = %transaction.date,
            amount = %transaction.amount,
            kind = ?transaction.kind,
            "{}", transaction.description
        );
    }

    Ok(())
}
