use sea_orm::{DatabaseConnection, DbErr, SqlErr, TransactionTrait};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::auth::Caller;
use crate::auth::authorization::ensure_project_client;
use crate::db::{
    payments as payment_db, projects as project_db, proposals as proposal_db, users as user_db,
};
use crate::error::ServiceError;
use crate::models::projects::{self, ProjectEvent, ProjectStatus};
use crate::models::proposals::{self, CreateProposal, ProposalEvent, UpdateProposal};
use crate::models::users::{Role, UserStatus};
use crate::services::settlement::{self, EscrowOutcome};

fn duplicate() -> ServiceError {
    ServiceError::Conflict("You have already sent a proposal for this project".into())
}

async fn find_proposal<C: sea_orm::ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<proposals::Model, ServiceError> {
    proposal_db::get_proposal_by_id(db, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Proposal"))
}

/// Load a proposal the caller wrote and may still edit.
async fn find_own_pending(
    db: &DatabaseConnection,
    caller: &Caller,
    id: Uuid,
) -> Result<proposals::Model, ServiceError> {
    let proposal = find_proposal(db, id).await?;
    if proposal.freelancer_id != caller.id {
        return Err(ServiceError::Forbidden(
            "You can not access this proposal".into(),
        ));
    }
    if !proposal.status.is_editable() {
        return Err(ServiceError::InvalidState(format!(
            "Proposal is already {}",
            proposal.status.as_str()
        )));
    }
    Ok(proposal)
}

/// A freelancer offers to work on an open project. Returns the proposal and its project.
pub async fn submit(
    db: &DatabaseConnection,
    caller: &Caller,
    input: CreateProposal,
) -> Result<(proposals::Model, projects::Model), ServiceError> {
    caller.require_role(&[Role::Freelancer])?;
    input.validate()?;

    user_db::get_user_by_id(db, caller.id)
        .await?
        .ok_or_else(|| ServiceError::not_found("User"))?;
    let project = project_db::get_project_by_id(db, input.project_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Project"))?;

    if project.status != ProjectStatus::Created {
        return Err(ServiceError::InvalidState(format!(
            "Project is {} and no longer accepts proposals",
            project.status.as_str()
        )));
    }
    if proposal_db::exists_for_pair(db, project.id, caller.id).await? {
        return Err(duplicate());
    }

    let proposal = proposal_db::insert_proposal(db, input.message, project.id, caller.id)
        .await
        .map_err(|e: DbErr| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => duplicate(),
            _ => ServiceError::Database(e),
        })?;
    info!(proposal_id = %proposal.id, project_id = %project.id, freelancer_id = %caller.id, "Proposal submitted");
    Ok((proposal, project))
}

pub async fn update(
    db: &DatabaseConnection,
    caller: &Caller,
    id: Uuid,
    input: UpdateProposal,
) -> Result<proposals::Model, ServiceError> {
    caller.require_role(&[Role::Freelancer])?;
    input.validate()?;

    let proposal = find_own_pending(db, caller, id).await?;
    Ok(proposal_db::update_message(db, proposal, input.message).await?)
}

/// Delete a pending proposal written by the caller.
pub async fn withdraw(db: &DatabaseConnection, caller: &Caller, id: Uuid) -> Result<(), ServiceError> {
    caller.require_role(&[Role::Freelancer])?;

    let proposal = find_own_pending(db, caller, id).await?;
    proposal_db::delete_proposal(db, proposal.id).await?;
    info!(proposal_id = %id, freelancer_id = %caller.id, "Proposal withdrawn");
    Ok(())
}

pub async fn list_by_freelancer(
    db: &DatabaseConnection,
    caller: &Caller,
) -> Result<Vec<proposals::Model>, ServiceError> {
    caller.require_role(&[Role::Freelancer])?;
    Ok(proposal_db::get_proposals_by_freelancer(db, caller.id).await?)
}

/// Pending proposals on one of the caller's projects.
pub async fn list_by_project(
    db: &DatabaseConnection,
    caller: &Caller,
    project_id: Uuid,
) -> Result<Vec<proposals::Model>, ServiceError> {
    caller.require_role(&[Role::Client])?;

    let project = project_db::get_project_by_id(db, project_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Project"))?;
    ensure_project_client(&project, caller)?;

    Ok(proposal_db::get_pending_by_project(db, project.id).await?)
}

/// A proposal is visible to its author, the project's client and admins.
pub async fn find(
    db: &DatabaseConnection,
    caller: &Caller,
    id: Uuid,
) -> Result<proposals::Model, ServiceError> {
    let proposal = find_proposal(db, id).await?;
    if caller.is_admin() || proposal.freelancer_id == caller.id {
        return Ok(proposal);
    }

    let project = project_db::get_project_by_id(db, proposal.project_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Project"))?;
    ensure_project_client(&project, caller)?;
    debug!(proposal_id = %id, "Proposal read by project client");
    Ok(proposal)
}

/// Accept a proposal: assign the freelancer, move the project into work and
/// reserve its price from the client's wallet. All or nothing.
pub async fn accept(
    db: &DatabaseConnection,
    caller: &Caller,
    id: Uuid,
) -> Result<EscrowOutcome, ServiceError> {
    caller.require_role(&[Role::Client])?;

    let txn = db.begin().await?;
    let project_id = find_proposal(&txn, id).await?.project_id;

    // Lock order: project, proposal, wallet.
    let project = project_db::lock_project(&txn, project_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Project"))?;
    ensure_project_client(&project, caller)?;
    let proposal = proposal_db::lock_proposal(&txn, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Proposal"))?;
    let next_proposal = proposal.status.transition(ProposalEvent::Accept)?;

    let freelancer = user_db::get_user_by_id(&txn, proposal.freelancer_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Freelancer"))?;
    if freelancer.status != UserStatus::Active {
        warn!(proposal_id = %id, freelancer_id = %freelancer.id, "Accept rejected: freelancer is not active");
        return Err(ServiceError::Forbidden(format!(
            "Freelancer is {}",
            freelancer.status.as_str().to_lowercase()
        )));
    }

    let next_project = project.status.transition(ProjectEvent::Assign)?;
    let price = project.price;

    settlement::debit(&txn, caller.id, price).await?;
    proposal_db::set_status(&txn, proposal, next_proposal).await?;
    let project =
        project_db::assign_freelancer(&txn, project, next_project, freelancer.id).await?;
    let payment =
        payment_db::insert_reserved(&txn, caller.id, freelancer.id, project.id, price).await?;
    txn.commit().await?;

    info!(
        proposal_id = %id,
        project_id = %project.id,
        payment_id = %payment.id,
        client_id = %caller.id,
        freelancer_id = %freelancer.id,
        amount = %price,
        "Escrow reserved"
    );
    Ok(EscrowOutcome { project, payment })
}

/// Decline a pending proposal. No money moves. Returns the proposal and its project.
pub async fn reject(
    db: &DatabaseConnection,
    caller: &Caller,
    id: Uuid,
) -> Result<(proposals::Model, projects::Model), ServiceError> {
    caller.require_role(&[Role::Client])?;

    let txn = db.begin().await?;
    let project_id = find_proposal(&txn, id).await?.project_id;
    let project = project_db::lock_project(&txn, project_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Project"))?;
    let proposal = proposal_db::lock_proposal(&txn, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Proposal"))?;

    let next = proposal.status.transition(ProposalEvent::Reject)?;
    ensure_project_client(&project, caller)?;

    let proposal = proposal_db::set_status(&txn, proposal, next).await?;
    txn.commit().await?;
    info!(proposal_id = %id, project_id = %project.id, "Proposal rejected");
    Ok((proposal, project))
}
