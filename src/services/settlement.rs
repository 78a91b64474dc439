//! Wallet movements shared by the escrow steps and the self-service wallet.
//!
//! Every function here expects to run inside a transaction: the wallet row is
//! fetched with `FOR UPDATE` and written back before the caller commits.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::ConnectionTrait;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::wallets as wallet_db;
use crate::error::ServiceError;
use crate::models::{payments, projects, wallets};

/// How long a project must sit untouched in IN_PROGRESS before the client may refund it.
pub const REFUND_COOLDOWN_HOURS: i64 = 24;

/// Largest balance a wallet may reach.
pub const MAX_BALANCE: Decimal = crate::models::MAX_AMOUNT;

/// Result of a committed escrow step.
#[derive(Debug, Clone)]
pub struct EscrowOutcome {
    pub project: projects::Model,
    pub payment: payments::Model,
}

async fn lock_wallet<C: ConnectionTrait>(
    txn: &C,
    user_id: Uuid,
) -> Result<wallets::Model, ServiceError> {
    wallet_db::lock_wallet_by_user(txn, user_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Wallet"))
}

/// Take `amount` out of the user's wallet, failing when the balance is too low.
pub async fn debit<C: ConnectionTrait>(
    txn: &C,
    user_id: Uuid,
    amount: Decimal,
) -> Result<wallets::Model, ServiceError> {
    let wallet = lock_wallet(txn, user_id).await?;
    if wallet.balance < amount {
        warn!(%user_id, %amount, balance = %wallet.balance, "Debit rejected: not enough money");
        return Err(ServiceError::InsufficientFunds);
    }

    let balance = wallet.balance - amount;
    let wallet = wallet_db::set_balance(txn, wallet, balance).await?;
    info!(%user_id, %amount, balance = %wallet.balance, "Wallet debited");
    Ok(wallet)
}

/// Add `amount` to the user's wallet.
pub async fn credit<C: ConnectionTrait>(
    txn: &C,
    user_id: Uuid,
    amount: Decimal,
) -> Result<wallets::Model, ServiceError> {
    let wallet = lock_wallet(txn, user_id).await?;
    let balance = wallet.balance + amount;
    if balance > MAX_BALANCE {
        warn!(%user_id, %amount, "Credit rejected: balance limit exceeded");
        return Err(ServiceError::BadRequest(format!(
            "Balance can not exceed {MAX_BALANCE}"
        )));
    }

    let wallet = wallet_db::set_balance(txn, wallet, balance).await?;
    info!(%user_id, %amount, balance = %wallet.balance, "Wallet credited");
    Ok(wallet)
}

/// Whether enough time has passed since the project's last update to allow a refund.
pub fn refund_cooldown_elapsed(updated_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now - updated_at >= Duration::hours(REFUND_COOLDOWN_HOURS)
}
