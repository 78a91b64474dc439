use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::auth::Caller;
use crate::db::wallets as wallet_db;
use crate::error::ServiceError;
use crate::models::users::Role;
use crate::models::wallets::{self, Deposit, Withdraw};
use crate::services::settlement;

const WALLET_ROLES: [Role; 2] = [Role::Client, Role::Freelancer];

pub async fn get(db: &DatabaseConnection, caller: &Caller) -> Result<wallets::Model, ServiceError> {
    caller.require_role(&WALLET_ROLES)?;
    wallet_db::get_wallet_by_user(db, caller.id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Wallet"))
}

/// Top up the caller's wallet from a (simulated) card.
pub async fn deposit(
    db: &DatabaseConnection,
    caller: &Caller,
    input: Deposit,
) -> Result<wallets::Model, ServiceError> {
    caller.require_role(&WALLET_ROLES)?;
    input.validate()?;

    let txn = db.begin().await?;
    let wallet = settlement::credit(&txn, caller.id, input.amount).await?;
    txn.commit().await?;
    Ok(wallet)
}

/// Cash out from the caller's wallet.
pub async fn withdraw(
    db: &DatabaseConnection,
    caller: &Caller,
    input: Withdraw,
) -> Result<wallets::Model, ServiceError> {
    caller.require_role(&WALLET_ROLES)?;
    input.validate()?;

    let txn = db.begin().await?;
    let wallet = settlement::debit(&txn, caller.id, input.amount).await?;
    txn.commit().await?;
    Ok(wallet)
}
