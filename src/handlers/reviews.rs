use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::error::ServiceError;
use crate::models::reviews::{CreateReview, ReviewTarget};
use crate::services::reviews;

/// POST /api/review?project_id= (client)
pub async fn create(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    target: web::Query<ReviewTarget>,
    body: web::Json<CreateReview>,
) -> Result<HttpResponse, ServiceError> {
    let review =
        reviews::create(db.get_ref(), &user.0, target.project_id, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(review))
}

/// GET /api/review: reviews the caller received.
pub async fn list_own(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ServiceError> {
    let list = reviews::for_user(db.get_ref(), user.0.id).await?;
    Ok(HttpResponse::Ok().json(list))
}

/// GET /api/review/{id}
pub async fn get(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let review = reviews::find(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(review))
}

/// GET /api/review/user/{id}
pub async fn for_user(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let list = reviews::for_user(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(list))
}

/// GET /api/review/project/{id}
pub async fn for_project(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let review = reviews::find_by_project(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(review))
}
