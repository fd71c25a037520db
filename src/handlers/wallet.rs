//! Wallet page

use chrono::{DateTime, Utc};

use crate::domain::stats::WalletSummary;
use crate::domain::time::format_relative;
use crate::handlers::Screen;
use crate::models::{Paginated, Transaction, TransactionKind, Wallet};
use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use crate::utils::helpers::{create_pagination_info, format_currency};
use crate::utils::logging::log_user_action;

pub async fn handle_overview(
    services: &ServiceFactory,
    page: u32,
    limit: u32,
    kind: Option<TransactionKind>,
) -> Result<String> {
    services.session.require_user().await?;
    let (wallet, transactions) = tokio::try_join!(
        services.wallets.mine(),
        services.wallets.transactions(page, limit, kind),
    )?;
    Ok(render_wallet(&wallet, &transactions, Utc::now()))
}

pub async fn handle_deposit(services: &ServiceFactory, amount: f64) -> Result<String> {
    let user = services.session.require_user().await?;
    let tx = services.wallets.deposit(amount).await?;
    log_user_action(Some(&user.id), "deposit", Some(&tx.id));
    Ok(format!("Deposit of {} is {} (transaction {}).", format_currency(tx.amount, "USD"), tx.status, tx.id))
}

pub async fn handle_withdraw(services: &ServiceFactory, amount: f64, destination: &str) -> Result<String> {
    let user = services.session.require_user().await?;
    let tx = services.wallets.withdraw(amount, destination).await?;
    log_user_action(Some(&user.id), "withdraw", Some(&tx.id));
    Ok(format!(
        "Withdrawal of {} to {} is {} (transaction {}).",
        format_currency(tx.amount.abs(), "USD"),
        destination,
        tx.status,
        tx.id
    ))
}

pub fn render_wallet(wallet: &Wallet, transactions: &Paginated<Transaction>, now: DateTime<Utc>) -> String {
    let summary = WalletSummary::from_transactions(&transactions.items);
    let currency = wallet.currency.as_str();

    let rows: Vec<String> = transactions
        .items
        .iter()
        .map(|tx| {
            let sign = if tx.kind.is_credit() { "+" } else { "-" };
            format!(
                "  {:<15} {}{:<10} {:<10} {}",
                tx.kind.as_str(),
                sign,
                format_currency(tx.amount.abs(), currency),
                tx.status,
                format_relative(tx.created_at, now)
            )
        })
        .collect();

    let totals: Vec<String> = summary
        .totals
        .iter()
        .map(|(kind, amount)| format!("  {:<15} {}", kind.as_str(), format_currency(*amount, currency)))
        .collect();

    Screen::new("Wallet")
        .field("Available", format_currency(wallet.balance, currency))
        .field("In escrow", format_currency(wallet.escrow_balance, currency))
        .field("Total", format_currency(wallet.total(), currency))
        .section("Transactions")
        .lines_or(rows, "No transactions yet")
        .line(create_pagination_info(
            transactions.page as usize,
            transactions.total_pages() as usize,
            transactions.total as usize,
        ))
        .section("This page")
        .lines(totals)
        .field("Net flow", format_currency(summary.net_flow(), currency))
        .field("Pending", summary.pending)
        .finish()
}
