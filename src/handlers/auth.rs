use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::auth::middleware::{AuthenticatedUser, JwtSettings};
use crate::error::ServiceError;
use crate::models::users::LoginRequest;
use crate::services::users;

/// POST /api/auth/login: exchange credentials for an access token.
pub async fn login(
    db: web::Data<DatabaseConnection>,
    settings: web::Data<JwtSettings>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ServiceError> {
    let token = users::login(db.get_ref(), settings.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "access_token": token })))
}

/// GET /api/auth/status: succeeds for any valid token.
pub async fn status(_user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json("OK")
}
