use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::cache::CacheData;
use crate::error::ServiceError;
use crate::models::notifications::EscrowEvent;
use crate::models::proposals::{CreateProposal, UpdateProposal};
use crate::services::{notifications, proposals};

fn ok() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "message": "OK" }))
}

/// POST /api/proposal (freelancer)
pub async fn submit(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    body: web::Json<CreateProposal>,
) -> Result<HttpResponse, ServiceError> {
    let (proposal, project) =
        proposals::submit(db.get_ref(), &user.0, body.into_inner()).await?;
    notifications::notify(
        cache.get_ref(),
        project.client_id,
        EscrowEvent::ProposalSubmitted {
            project_title: project.title,
        },
    )
    .await;
    Ok(HttpResponse::Created().json(proposal))
}

/// PATCH /api/proposal/accept/{id} (client)
pub async fn accept(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let outcome = proposals::accept(db.get_ref(), &user.0, path.into_inner()).await?;
    notifications::notify(
        cache.get_ref(),
        outcome.payment.recipient_id,
        EscrowEvent::ProposalAccepted {
            project_title: outcome.project.title,
        },
    )
    .await;
    Ok(ok())
}

/// PATCH /api/proposal/reject/{id} (client)
pub async fn reject(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let (proposal, project) = proposals::reject(db.get_ref(), &user.0, path.into_inner()).await?;
    notifications::notify(
        cache.get_ref(),
        proposal.freelancer_id,
        EscrowEvent::ProposalRejected {
            project_title: project.title,
        },
    )
    .await;
    Ok(ok())
}

/// PATCH /api/proposal/{id} (author)
pub async fn update(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProposal>,
) -> Result<HttpResponse, ServiceError> {
    let proposal =
        proposals::update(db.get_ref(), &user.0, path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(proposal))
}

/// DELETE /api/proposal/{id} (author)
pub async fn withdraw(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    proposals::withdraw(db.get_ref(), &user.0, path.into_inner()).await?;
    Ok(ok())
}

/// GET /api/proposal/freelancer
pub async fn list_own(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ServiceError> {
    let list = proposals::list_by_freelancer(db.get_ref(), &user.0).await?;
    Ok(HttpResponse::Ok().json(list))
}

/// GET /api/proposal/project/{id} (project client)
pub async fn list_by_project(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let list = proposals::list_by_project(db.get_ref(), &user.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(list))
}

/// GET /api/proposal/{id}
pub async fn get(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let proposal = proposals::find(db.get_ref(), &user.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(proposal))
}
