use sea_orm::*;
use uuid::Uuid;

use crate::models::proposals::{self, ProposalStatus};

pub async fn insert_proposal<C: ConnectionTrait>(
    db: &C,
    message: String,
    project_id: Uuid,
    freelancer_id: Uuid,
) -> Result<proposals::Model, DbErr> {
    let new_proposal = proposals::ActiveModel {
        id: Set(Uuid::new_v4()),
        message: Set(message),
        status: Set(ProposalStatus::Pending),
        project_id: Set(project_id),
        freelancer_id: Set(freelancer_id),
        created_at: Set(chrono::Utc::now()),
    };

    new_proposal.insert(db).await
}

pub async fn get_proposal_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<proposals::Model>, DbErr> {
    proposals::Entity::find_by_id(id).one(db).await
}

pub async fn lock_proposal<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<proposals::Model>, DbErr> {
    proposals::Entity::find_by_id(id)
        .lock_exclusive()
        .one(db)
        .await
}

/// Whether the freelancer has ever proposed on this project, in any status.
pub async fn exists_for_pair<C: ConnectionTrait>(
    db: &C,
    project_id: Uuid,
    freelancer_id: Uuid,
) -> Result<bool, DbErr> {
    let count = proposals::Entity::find()
        .filter(proposals::Column::ProjectId.eq(project_id))
        .filter(proposals::Column::FreelancerId.eq(freelancer_id))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// All proposals written by a freelancer, newest first.
pub async fn get_proposals_by_freelancer<C: ConnectionTrait>(
    db: &C,
    freelancer_id: Uuid,
) -> Result<Vec<proposals::Model>, DbErr> {
    proposals::Entity::find()
        .filter(proposals::Column::FreelancerId.eq(freelancer_id))
        .order_by_desc(proposals::Column::CreatedAt)
        .all(db)
        .await
}

/// Proposals on a project that are still awaiting a decision, oldest first.
pub async fn get_pending_by_project<C: ConnectionTrait>(
    db: &C,
    project_id: Uuid,
) -> Result<Vec<proposals::Model>, DbErr> {
    proposals::Entity::find()
        .filter(proposals::Column::ProjectId.eq(project_id))
        .filter(proposals::Column::Status.eq(ProposalStatus::Pending))
        .order_by_asc(proposals::Column::CreatedAt)
        .all(db)
        .await
}

pub async fn update_message<C: ConnectionTrait>(
    db: &C,
    proposal: proposals::Model,
    message: String,
) -> Result<proposals::Model, DbErr> {
    let mut active: proposals::ActiveModel = proposal.into();
    active.message = Set(message);
    active.update(db).await
}

pub async fn set_status<C: ConnectionTrait>(
    db: &C,
    proposal: proposals::Model,
    status: ProposalStatus,
) -> Result<proposals::Model, DbErr> {
    let mut active: proposals::ActiveModel = proposal.into();
    active.status = Set(status);
    active.update(db).await
}

pub async fn delete_proposal<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<DeleteResult, DbErr> {
    proposals::Entity::delete_by_id(id).exec(db).await
}
