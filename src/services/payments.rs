use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::Caller;
use crate::db::payments as payment_db;
use crate::error::ServiceError;
use crate::models::payments;

/// Payments the caller sent or received.
pub async fn for_caller(
    db: &DatabaseConnection,
    caller: &Caller,
) -> Result<Vec<payments::Model>, ServiceError> {
    Ok(payment_db::get_payments_by_user(db, caller.id).await?)
}

/// A payment is visible to its sender, its recipient and admins.
pub async fn find(
    db: &DatabaseConnection,
    caller: &Caller,
    id: Uuid,
) -> Result<payments::Model, ServiceError> {
    let payment = payment_db::get_payment_by_id(db, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Payment"))?;

    let involved = payment.sender_id == caller.id || payment.recipient_id == caller.id;
    if !involved && !caller.is_admin() {
        return Err(ServiceError::Forbidden(
            "You can not access this payment".into(),
        ));
    }
    Ok(payment)
}
