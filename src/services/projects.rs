use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::Caller;
use crate::auth::authorization::{ensure_assigned_freelancer, ensure_project_client};
use crate::db::{
    categories as category_db, payments as payment_db, projects as project_db,
    users as user_db,
};
use crate::error::ServiceError;
use crate::models::payments::PaymentEvent;
use crate::models::projects::{
    self, CreateProject, FilterQuery, ProjectEvent, ProjectStatus, SearchQuery, UpdateProject,
};
use crate::models::users::Role;
use crate::models::{Paginated, PaginationQuery};
use crate::services::settlement::{self, EscrowOutcome};

fn page(
    (data, total): (Vec<projects::Model>, u64),
    limit: u64,
    offset: u64,
) -> Paginated<projects::Model> {
    Paginated {
        data,
        total,
        limit,
        offset,
    }
}

fn paging(limit: Option<u64>, offset: Option<u64>) -> (u64, u64) {
    let q = PaginationQuery { limit, offset };
    (q.limit(), q.offset())
}

async fn ensure_category_exists<C: sea_orm::ConnectionTrait>(
    db: &C,
    category_id: Uuid,
) -> Result<(), ServiceError> {
    category_db::get_category_by_id(db, category_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| ServiceError::not_found("Category"))
}

/// Editing and deleting are only possible before any escrow exists.
fn ensure_editable(project: &projects::Model) -> Result<(), ServiceError> {
    if project.status != ProjectStatus::Created {
        return Err(ServiceError::InvalidState(format!(
            "Project can not be changed while it is {}",
            project.status.as_str()
        )));
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    caller: &Caller,
    input: CreateProject,
) -> Result<projects::Model, ServiceError> {
    caller.require_role(&[Role::Client])?;
    input.validate()?;
    ensure_category_exists(db, input.category_id).await?;

    let project = project_db::insert_project(db, input, caller.id).await?;
    info!(project_id = %project.id, client_id = %caller.id, price = %project.price, "Project created");
    Ok(project)
}

pub async fn find(db: &DatabaseConnection, id: Uuid) -> Result<projects::Model, ServiceError> {
    project_db::get_project_by_id(db, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Project"))
}

pub async fn update(
    db: &DatabaseConnection,
    caller: &Caller,
    id: Uuid,
    input: UpdateProject,
) -> Result<projects::Model, ServiceError> {
    caller.require_role(&[Role::Client])?;
    input.validate()?;

    let txn = db.begin().await?;
    let project = project_db::lock_project(&txn, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Project"))?;
    ensure_project_client(&project, caller)?;
    ensure_editable(&project)?;
    if let Some(category_id) = input.category_id {
        ensure_category_exists(&txn, category_id).await?;
    }

    let updated = project_db::update_project_fields(
        &txn,
        project,
        input.title,
        input.description,
        input.price,
        input.category_id,
    )
    .await?;
    txn.commit().await?;
    Ok(updated)
}

pub async fn delete(db: &DatabaseConnection, caller: &Caller, id: Uuid) -> Result<(), ServiceError> {
    caller.require_role(&[Role::Client])?;

    let txn = db.begin().await?;
    let project = project_db::lock_project(&txn, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Project"))?;
    ensure_project_client(&project, caller)?;
    ensure_editable(&project)?;

    project_db::delete_project(&txn, project.id).await?;
    txn.commit().await?;
    info!(project_id = %id, client_id = %caller.id, "Project deleted");
    Ok(())
}

/// Open projects, newest first.
pub async fn find_all(
    db: &DatabaseConnection,
    query: PaginationQuery,
) -> Result<Paginated<projects::Model>, ServiceError> {
    let (limit, offset) = (query.limit(), query.offset());
    let rows = project_db::get_open_projects(db, limit, offset).await?;
    Ok(page(rows, limit, offset))
}

pub async fn search(
    db: &DatabaseConnection,
    query: SearchQuery,
) -> Result<Paginated<projects::Model>, ServiceError> {
    let (limit, offset) = paging(query.limit, query.offset);
    let title = query.title.unwrap_or_default();
    let rows = project_db::search_open_projects(db, title.trim(), limit, offset).await?;
    Ok(page(rows, limit, offset))
}

pub async fn filter(
    db: &DatabaseConnection,
    query: FilterQuery,
) -> Result<Paginated<projects::Model>, ServiceError> {
    let (limit, offset) = paging(query.limit, query.offset);
    let category_ids = query.category_ids()?;
    let sort = query.sort_by.unwrap_or_default();
    let rows = project_db::filter_projects(db, category_ids, sort, limit, offset).await?;
    Ok(page(rows, limit, offset))
}

/// Projects where the user is the client or the assigned freelancer.
pub async fn find_by_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<projects::Model>, ServiceError> {
    user_db::get_user_by_id(db, user_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("User"))?;
    Ok(project_db::get_projects_by_user(db, user_id).await?)
}

/// The assigned freelancer asks the client to sign off on the work.
pub async fn send_approval(
    db: &DatabaseConnection,
    caller: &Caller,
    id: Uuid,
) -> Result<projects::Model, ServiceError> {
    caller.require_role(&[Role::Freelancer])?;

    let txn = db.begin().await?;
    let project = project_db::lock_project(&txn, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Project"))?;
    ensure_assigned_freelancer(&project, caller)?;
    let next = project.status.transition(ProjectEvent::SendApproval)?;

    let project = project_db::set_status(&txn, project, next).await?;
    txn.commit().await?;
    info!(project_id = %project.id, freelancer_id = %caller.id, "Approval requested");
    Ok(project)
}

/// The client signs off: escrow is released to the freelancer.
pub async fn approve(
    db: &DatabaseConnection,
    caller: &Caller,
    id: Uuid,
) -> Result<EscrowOutcome, ServiceError> {
    caller.require_role(&[Role::Client])?;

    let txn = db.begin().await?;
    let project = project_db::lock_project(&txn, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Project"))?;
    ensure_project_client(&project, caller)?;
    let next_project = project.status.transition(ProjectEvent::Approve)?;

    let payment = payment_db::lock_payment_by_project(&txn, project.id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Payment"))?;
    let next_payment = payment.status.transition(PaymentEvent::Release)?;

    settlement::credit(&txn, payment.recipient_id, payment.amount).await?;
    let payment = payment_db::set_status(&txn, payment, next_payment).await?;
    let project = project_db::set_status(&txn, project, next_project).await?;
    txn.commit().await?;

    info!(
        project_id = %project.id,
        payment_id = %payment.id,
        recipient_id = %payment.recipient_id,
        amount = %payment.amount,
        "Escrow released"
    );
    Ok(EscrowOutcome { project, payment })
}

/// The client sends the work back; no money moves.
pub async fn cancel_approval(
    db: &DatabaseConnection,
    caller: &Caller,
    id: Uuid,
) -> Result<projects::Model, ServiceError> {
    caller.require_role(&[Role::Client])?;

    let txn = db.begin().await?;
    let project = project_db::lock_project(&txn, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Project"))?;
    ensure_project_client(&project, caller)?;
    let next = project.status.transition(ProjectEvent::CancelApproval)?;

    let project = project_db::set_status(&txn, project, next).await?;
    txn.commit().await?;
    info!(project_id = %project.id, "Approval cancelled");
    Ok(project)
}

/// Return the escrow to the client of a project stuck in progress.
pub async fn refund(
    db: &DatabaseConnection,
    caller: &Caller,
    id: Uuid,
) -> Result<EscrowOutcome, ServiceError> {
    caller.require_role(&[Role::Client])?;

    let txn = db.begin().await?;
    let project = project_db::lock_project(&txn, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Project"))?;
    ensure_project_client(&project, caller)?;
    let next_project = project.status.transition(ProjectEvent::Refund)?;

    if !settlement::refund_cooldown_elapsed(project.updated_at, Utc::now()) {
        warn!(project_id = %project.id, "Refund rejected: cooldown not elapsed");
        return Err(ServiceError::InvalidState(format!(
            "Refund is available {} hours after the last project update",
            settlement::REFUND_COOLDOWN_HOURS
        )));
    }

    let payment = payment_db::lock_payment_by_project(&txn, project.id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Payment"))?;
    let next_payment = payment.status.transition(PaymentEvent::Refund)?;

    settlement::credit(&txn, payment.sender_id, payment.amount).await?;
    let payment = payment_db::set_status(&txn, payment, next_payment).await?;
    let project = project_db::set_status(&txn, project, next_project).await?;
    txn.commit().await?;

    info!(
        project_id = %project.id,
        payment_id = %payment.id,
        sender_id = %payment.sender_id,
        amount = %payment.amount,
        "Escrow refunded"
    );
    Ok(EscrowOutcome { project, payment })
}
