use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::auth::middleware::AuthenticatedUser;
use crate::error::ServiceError;
use crate::models::wallets::{Deposit, Withdraw};
use crate::services::wallets;

/// GET /api/wallet
pub async fn get(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ServiceError> {
    let wallet = wallets::get(db.get_ref(), &user.0).await?;
    Ok(HttpResponse::Ok().json(wallet))
}

/// PATCH /api/wallet/deposit
pub async fn deposit(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<Deposit>,
) -> Result<HttpResponse, ServiceError> {
    let wallet = wallets::deposit(db.get_ref(), &user.0, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(wallet))
}

/// PATCH /api/wallet/withdraw
pub async fn withdraw(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<Withdraw>,
) -> Result<HttpResponse, ServiceError> {
    let wallet = wallets::withdraw(db.get_ref(), &user.0, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(wallet))
}
