use rust_decimal::Decimal;
use sea_orm::*;
use uuid::Uuid;

use crate::models::wallets;

/// Create the empty wallet that every user owns.
pub async fn insert_wallet<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> Result<wallets::Model, DbErr> {
    let wallet = wallets::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        balance: Set(Decimal::ZERO),
    };

    wallet.insert(db).await
}

pub async fn get_wallet_by_user<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> Result<Option<wallets::Model>, DbErr> {
    wallets::Entity::find()
        .filter(wallets::Column::UserId.eq(user_id))
        .one(db)
        .await
}

/// Fetch a user's wallet with `SELECT ... FOR UPDATE`. Only meaningful inside a transaction.
pub async fn lock_wallet_by_user<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> Result<Option<wallets::Model>, DbErr> {
    wallets::Entity::find()
        .filter(wallets::Column::UserId.eq(user_id))
        .lock_exclusive()
        .one(db)
        .await
}

pub async fn set_balance<C: ConnectionTrait>(
    db: &C,
    wallet: wallets::Model,
    balance: Decimal,
) -> Result<wallets::Model, DbErr> {
    let mut active: wallets::ActiveModel = wallet.into();
    active.balance = Set(balance);
    active.update(db).await
}
