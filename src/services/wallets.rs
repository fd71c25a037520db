//! Wallet endpoints
//!
//! Balances and escrow are owned by the backend; this service only reads
//! them and forwards deposit and withdrawal requests.

use tracing::info;

use crate::models::{DepositRequest, Paginated, Transaction, TransactionKind, Wallet, WithdrawRequest};
use crate::services::client::ApiClient;
use crate::services::query::QueryBuilder;
use crate::utils::errors::{PayTaskError, Result};

/// Smallest amount accepted for deposits and withdrawals
pub const MIN_TRANSFER: f64 = 1.0;

/// Service for `/wallets`
#[derive(Clone, Debug)]
pub struct WalletService {
    client: ApiClient,
}

impl WalletService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn mine(&self) -> Result<Wallet> {
        self.client.get("wallets/me").await
    }

    pub async fn transactions(&self, page: u32, limit: u32, kind: Option<TransactionKind>) -> Result<Paginated<Transaction>> {
        let query = QueryBuilder::new()
            .push("page", Some(page))
            .push("limit", Some(limit))
            .push("type", kind)
            .finish();
        self.client.get_with_query("wallets/transactions", &query).await
    }

    pub async fn deposit(&self, amount: f64) -> Result<Transaction> {
        check_amount(amount)?;
        let tx: Transaction = self.client.post("wallets/deposit", &DepositRequest { amount }).await?;
        info!(transaction_id = %tx.id, amount = amount, "Deposit requested");
        Ok(tx)
    }

    pub async fn withdraw(&self, amount: f64, destination: &str) -> Result<Transaction> {
        check_amount(amount)?;
        if destination.trim().is_empty() {
            return Err(PayTaskError::InvalidInput("A withdrawal destination is required".to_string()));
        }

        let request = WithdrawRequest {
            amount,
            destination: destination.to_string(),
        };
        let tx: Transaction = self.client.post("wallets/withdraw", &request).await?;
        info!(transaction_id = %tx.id, amount = amount, "Withdrawal requested");
        Ok(tx)
    }
}

fn check_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < MIN_TRANSFER {
        return Err(PayTaskError::InvalidInput(format!(
            "Amount must be at least {:.2}, got {}",
            MIN_TRANSFER, amount
        )));
    }
    Ok(())
}
