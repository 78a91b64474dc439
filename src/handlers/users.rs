use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{CacheData, USER_PROFILE_TTL_SECS, keys};
use crate::error::ServiceError;
use crate::models::users::{BlockUser, RegisterUser, UpdateUser, UserResponse};
use crate::services::users;

async fn invalidate_profile(cache: &CacheData, id: Uuid) {
    if let Err(e) = cache.delete(&keys::user(id)).await {
        tracing::warn!("Cache error: {}", e);
    }
}

/// POST /api/user/register: create an account and its wallet.
pub async fn register(
    db: web::Data<DatabaseConnection>,
    body: web::Json<RegisterUser>,
) -> Result<HttpResponse, ServiceError> {
    let user = users::register(db.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

async fn cached_profile(
    db: &DatabaseConnection,
    cache: &CacheData,
    id: Uuid,
) -> Result<HttpResponse, ServiceError> {
    let cache_key = keys::user(id);

    match cache.get::<UserResponse>(&cache_key).await {
        Ok(Some(cached)) => return Ok(HttpResponse::Ok().json(cached)),
        Ok(None) => {}
        Err(e) => tracing::warn!("Cache error: {}", e),
    }

    let profile = users::get_profile(db, id).await?;
    if let Err(e) = cache
        .set(&cache_key, &profile, Some(USER_PROFILE_TTL_SECS))
        .await
    {
        tracing::warn!("Cache error: {}", e);
    }
    Ok(HttpResponse::Ok().json(profile))
}

/// GET /api/user/profile: the caller's own profile.
pub async fn own_profile(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
) -> Result<HttpResponse, ServiceError> {
    cached_profile(db.get_ref(), cache.get_ref(), user.0.id).await
}

/// GET /api/user/profile/{id}
pub async fn profile(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    cached_profile(db.get_ref(), cache.get_ref(), path.into_inner()).await
}

/// PATCH /api/user: update the caller's account.
pub async fn update(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    body: web::Json<UpdateUser>,
) -> Result<HttpResponse, ServiceError> {
    let updated = users::update(db.get_ref(), &user.0, body.into_inner()).await?;
    invalidate_profile(cache.get_ref(), updated.id).await;
    Ok(HttpResponse::Ok().json(updated))
}

/// PATCH /api/user/block (admin)
pub async fn block(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    body: web::Json<BlockUser>,
) -> Result<HttpResponse, ServiceError> {
    let updated = users::block(db.get_ref(), &user.0, &body.email).await?;
    invalidate_profile(cache.get_ref(), updated.id).await;
    Ok(HttpResponse::Ok().json(updated))
}

/// PATCH /api/user/unblock (admin)
pub async fn unblock(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    body: web::Json<BlockUser>,
) -> Result<HttpResponse, ServiceError> {
    let updated = users::unblock(db.get_ref(), &user.0, &body.email).await?;
    invalidate_profile(cache.get_ref(), updated.id).await;
    Ok(HttpResponse::Ok().json(updated))
}

/// PATCH /api/user/soft-delete
pub async fn soft_delete(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
) -> Result<HttpResponse, ServiceError> {
    let updated = users::soft_delete(db.get_ref(), &user.0).await?;
    invalidate_profile(cache.get_ref(), updated.id).await;
    Ok(HttpResponse::Ok().json(updated))
}
