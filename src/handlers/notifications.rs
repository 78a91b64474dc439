use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::cache::CacheData;
use crate::error::ServiceError;
use crate::services::notifications;

/// GET /api/notification: unread notifications, newest first.
pub async fn list(
    user: AuthenticatedUser,
    cache: web::Data<CacheData>,
) -> Result<HttpResponse, ServiceError> {
    let list = notifications::list_unread(cache.get_ref(), &user.0).await?;
    Ok(HttpResponse::Ok().json(list))
}

/// PATCH /api/notification/{id}: mark as read.
pub async fn mark_read(
    user: AuthenticatedUser,
    cache: web::Data<CacheData>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let notification =
        notifications::mark_read(cache.get_ref(), &user.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(notification))
}

/// DELETE /api/notification/{id}
pub async fn delete(
    user: AuthenticatedUser,
    cache: web::Data<CacheData>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    notifications::delete(cache.get_ref(), &user.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "OK" })))
}
