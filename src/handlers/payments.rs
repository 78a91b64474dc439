use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::error::ServiceError;
use crate::services::payments;

/// GET /api/payment/user: payments the caller sent or received.
pub async fn list_own(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ServiceError> {
    let list = payments::for_caller(db.get_ref(), &user.0).await?;
    Ok(HttpResponse::Ok().json(list))
}

/// GET /api/payment/{id}
pub async fn get(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let payment = payments::find(db.get_ref(), &user.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(payment))
}
