use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::cache::CacheData;
use crate::error::ServiceError;
use crate::models::PaginationQuery;
use crate::models::notifications::EscrowEvent;
use crate::models::projects::{CreateProject, FilterQuery, SearchQuery, UpdateProject};
use crate::services::{notifications, projects};

fn ok() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "message": "OK" }))
}

/// POST /api/project
pub async fn create(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateProject>,
) -> Result<HttpResponse, ServiceError> {
    let project = projects::create(db.get_ref(), &user.0, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(project))
}

/// GET /api/project: open projects, paginated.
pub async fn find_all(
    db: web::Data<DatabaseConnection>,
    query: web::Query<PaginationQuery>,
) -> Result<HttpResponse, ServiceError> {
    let page = projects::find_all(db.get_ref(), query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/project/search?title=
pub async fn search(
    db: web::Data<DatabaseConnection>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, ServiceError> {
    let page = projects::search(db.get_ref(), query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/project/filter?categories=&sort_by=
pub async fn filter(
    db: web::Data<DatabaseConnection>,
    query: web::Query<FilterQuery>,
) -> Result<HttpResponse, ServiceError> {
    let page = projects::filter(db.get_ref(), query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/project/{id}
pub async fn get(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let project = projects::find(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(project))
}

/// GET /api/project/user/{id}
pub async fn find_by_user(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let list = projects::find_by_user(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(list))
}

/// PATCH /api/project/{id}
pub async fn update(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProject>,
) -> Result<HttpResponse, ServiceError> {
    let project =
        projects::update(db.get_ref(), &user.0, path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(project))
}

/// DELETE /api/project/{id}
pub async fn delete(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    projects::delete(db.get_ref(), &user.0, path.into_inner()).await?;
    Ok(ok())
}

/// PATCH /api/project/send-approval/{id} (assigned freelancer)
pub async fn send_approval(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let project = projects::send_approval(db.get_ref(), &user.0, path.into_inner()).await?;
    notifications::notify(
        cache.get_ref(),
        project.client_id,
        EscrowEvent::ApprovalRequested {
            project_title: project.title,
        },
    )
    .await;
    Ok(ok())
}

/// PATCH /api/project/approve/{id} (client)
pub async fn approve(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let outcome = projects::approve(db.get_ref(), &user.0, path.into_inner()).await?;
    notifications::notify(
        cache.get_ref(),
        outcome.payment.recipient_id,
        EscrowEvent::ProjectApproved {
            project_title: outcome.project.title,
        },
    )
    .await;
    Ok(ok())
}

/// PATCH /api/project/cancel/{id} (client)
pub async fn cancel_approval(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    projects::cancel_approval(db.get_ref(), &user.0, path.into_inner()).await?;
    Ok(ok())
}

/// PATCH /api/project/refund/{id} (client)
pub async fn refund(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let outcome = projects::refund(db.get_ref(), &user.0, path.into_inner()).await?;
    notifications::notify(
        cache.get_ref(),
        outcome.payment.recipient_id,
        EscrowEvent::ProjectRefunded {
            project_title: outcome.project.title,
        },
    )
    .await;
    Ok(ok())
}
