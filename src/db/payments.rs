use rust_decimal::Decimal;
use sea_orm::*;
use uuid::Uuid;

use crate::models::payments::{self, PaymentStatus};

/// Default platform commission, in percent. Recorded on every payment but not deducted.
pub const DEFAULT_COMMISSION: Decimal = Decimal::TEN;

/// Record funds held in escrow for a project.
pub async fn insert_reserved<C: ConnectionTrait>(
    db: &C,
    sender_id: Uuid,
    recipient_id: Uuid,
    project_id: Uuid,
    amount: Decimal,
) -> Result<payments::Model, DbErr> {
    let now = chrono::Utc::now();
    let payment = payments::ActiveModel {
        id: Set(Uuid::new_v4()),
        sender_id: Set(sender_id),
        recipient_id: Set(recipient_id),
        project_id: Set(project_id),
        amount: Set(amount),
        commission: Set(DEFAULT_COMMISSION),
        status: Set(PaymentStatus::Reserved),
        created_at: Set(now),
        updated_at: Set(now),
    };

    payment.insert(db).await
}

pub async fn get_payment_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<payments::Model>, DbErr> {
    payments::Entity::find_by_id(id).one(db).await
}

/// The escrow payment of a project, locked for the rest of the transaction.
pub async fn lock_payment_by_project<C: ConnectionTrait>(
    db: &C,
    project_id: Uuid,
) -> Result<Option<payments::Model>, DbErr> {
    payments::Entity::find()
        .filter(payments::Column::ProjectId.eq(project_id))
        .lock_exclusive()
        .one(db)
        .await
}

pub async fn get_payment_by_project<C: ConnectionTrait>(
    db: &C,
    project_id: Uuid,
) -> Result<Option<payments::Model>, DbErr> {
    payments::Entity::find()
        .filter(payments::Column::ProjectId.eq(project_id))
        .one(db)
        .await
}

/// Payments the user sent or received, most recently changed first.
pub async fn get_payments_by_user<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> Result<Vec<payments::Model>, DbErr> {
    payments::Entity::find()
        .filter(
            Condition::any()
                .add(payments::Column::SenderId.eq(user_id))
                .add(payments::Column::RecipientId.eq(user_id)),
        )
        .order_by_desc(payments::Column::UpdatedAt)
        .all(db)
        .await
}

pub async fn set_status<C: ConnectionTrait>(
    db: &C,
    payment: payments::Model,
    status: PaymentStatus,
) -> Result<payments::Model, DbErr> {
    let mut active: payments::ActiveModel = payment.into();
    active.status = Set(status);
    active.updated_at = Set(chrono::Utc::now());
    active.update(db).await
}
