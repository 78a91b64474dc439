use sea_orm::{DatabaseConnection, DbErr, SqlErr};
use tracing::info;
use uuid::Uuid;

use crate::auth::Caller;
use crate::auth::authorization::ensure_project_client;
use crate::db::{projects as project_db, reviews as review_db};
use crate::error::ServiceError;
use crate::models::projects::ProjectStatus;
use crate::models::reviews::{self, CreateReview};
use crate::models::users::Role;

fn duplicate() -> ServiceError {
    ServiceError::Conflict("Project already has a review".into())
}

/// The client reviews the freelancer of one of their completed projects.
pub async fn create(
    db: &DatabaseConnection,
    caller: &Caller,
    project_id: Uuid,
    input: CreateReview,
) -> Result<reviews::Model, ServiceError> {
    caller.require_role(&[Role::Client])?;
    input.validate()?;

    let project = project_db::get_project_by_id(db, project_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Project"))?;
    ensure_project_client(&project, caller)?;

    if project.status != ProjectStatus::Completed {
        return Err(ServiceError::InvalidState(format!(
            "Only completed projects can be reviewed, this one is {}",
            project.status.as_str()
        )));
    }
    let recipient_id = project
        .freelancer_id
        .ok_or_else(|| ServiceError::Internal("Completed project has no freelancer".into()))?;

    if review_db::get_review_by_project(db, project.id).await?.is_some() {
        return Err(duplicate());
    }

    let review = review_db::insert_review(
        db,
        input.comment,
        input.rating,
        caller.id,
        recipient_id,
        project.id,
    )
    .await
    .map_err(|e: DbErr| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => duplicate(),
        _ => ServiceError::Database(e),
    })?;

    info!(review_id = %review.id, project_id = %project.id, rating = review.rating, "Review created");
    Ok(review)
}

pub async fn find(db: &DatabaseConnection, id: Uuid) -> Result<reviews::Model, ServiceError> {
    review_db::get_review_by_id(db, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Review"))
}

pub async fn find_by_project(
    db: &DatabaseConnection,
    project_id: Uuid,
) -> Result<reviews::Model, ServiceError> {
    review_db::get_review_by_project(db, project_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Review"))
}

/// Reviews a user has received.
pub async fn for_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<reviews::Model>, ServiceError> {
    Ok(review_db::get_reviews_for_user(db, user_id).await?)
}
