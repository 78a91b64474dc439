use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::cache::CategoryCache;
use crate::error::ServiceError;
use crate::models::categories::{CreateCategory, DeleteCategory, UpdateCategory};
use crate::services::categories;

/// GET /api/category
pub async fn list(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CategoryCache>,
) -> Result<HttpResponse, ServiceError> {
    let list = categories::list(db.get_ref(), cache.get_ref()).await?;
    Ok(HttpResponse::Ok().json(list.as_ref()))
}

/// GET /api/category/{id}
pub async fn get(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CategoryCache>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let category = categories::find(db.get_ref(), cache.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(category))
}

/// POST /api/category (admin)
pub async fn create(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CategoryCache>,
    body: web::Json<CreateCategory>,
) -> Result<HttpResponse, ServiceError> {
    let category =
        categories::create(db.get_ref(), cache.get_ref(), &user.0, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(category))
}

/// PATCH /api/category (admin)
pub async fn update(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CategoryCache>,
    body: web::Json<UpdateCategory>,
) -> Result<HttpResponse, ServiceError> {
    let category =
        categories::update(db.get_ref(), cache.get_ref(), &user.0, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(category))
}

/// DELETE /api/category (admin)
pub async fn delete(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CategoryCache>,
    body: web::Json<DeleteCategory>,
) -> Result<HttpResponse, ServiceError> {
    categories::delete(db.get_ref(), cache.get_ref(), &user.0, body.id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "OK" })))
}
