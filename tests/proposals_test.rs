//! Proposal negotiation: submit, edit, withdraw, list and reject.
//!
//! Run with: `cargo test --test proposals_test`
mod common;

use rust_decimal_macros::dec;
use uuid::Uuid;

use freelance_backend::ServiceError;
use freelance_backend::auth::Caller;
use freelance_backend::db::proposals as proposal_db;
use freelance_backend::models::proposals::{CreateProposal, ProposalStatus, UpdateProposal};
use freelance_backend::services::proposals;
use sea_orm::{DatabaseConnection, SqlErr};

use crate::common::*;

fn offer(project_id: Uuid) -> CreateProposal {
    CreateProposal {
        message: "I have done this many times before".into(),
        project_id,
    }
}

async fn setup() -> (DatabaseConnection, Caller, Caller, Uuid) {
    let db = setup_test_db().await.expect("Failed to set up test DB");
    let client = create_client(&db, "client").await;
    let freelancer = create_freelancer(&db, "freelancer").await;
    let category = create_category(&db, "Design").await;
    let project = create_project(&db, &client, category.id, "Logo design", dec!(50.00)).await;
    (db, client, freelancer, project.id)
}

#[tokio::test]
async fn test_submit_creates_pending_proposal() {
    let (db, client, freelancer, project_id) = setup().await;

    let (proposal, project) = proposals::submit(&db, &freelancer, offer(project_id))
        .await
        .unwrap();

    assert_eq!(proposal.status, ProposalStatus::Pending);
    assert_eq!(proposal.freelancer_id, freelancer.id);
    assert_eq!(project.client_id, client.id);
}

#[tokio::test]
async fn test_duplicate_proposal_conflicts_even_after_rejection() {
    let (db, client, freelancer, project_id) = setup().await;
    let (proposal, _) = proposals::submit(&db, &freelancer, offer(project_id))
        .await
        .unwrap();

    let result = proposals::submit(&db, &freelancer, offer(project_id)).await;
    assert!(matches!(result, Err(ServiceError::Conflict(_))));

    proposals::reject(&db, &client, proposal.id).await.unwrap();
    let result = proposals::submit(&db, &freelancer, offer(project_id)).await;
    assert!(matches!(result, Err(ServiceError::Conflict(_))));
}

#[tokio::test]
async fn test_schema_rejects_a_second_proposal_for_the_same_pair() {
    let (db, _, freelancer, project_id) = setup().await;

    proposal_db::insert_proposal(&db, "First offer for this".into(), project_id, freelancer.id)
        .await
        .unwrap();
    let err = proposal_db::insert_proposal(
        &db,
        "Second offer for this".into(),
        project_id,
        freelancer.id,
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));

    let other = create_freelancer(&db, "other-freelancer").await;
    proposal_db::insert_proposal(&db, "Another freelancer".into(), project_id, other.id)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_clients_cannot_submit() {
    let (db, client, _, project_id) = setup().await;
    let result = proposals::submit(&db, &client, offer(project_id)).await;
    assert!(matches!(result, Err(ServiceError::Forbidden(_))));
}

#[tokio::test]
async fn test_submit_to_missing_project_is_not_found() {
    let (db, _, freelancer, _) = setup().await;
    let result = proposals::submit(&db, &freelancer, offer(Uuid::new_v4())).await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}

#[tokio::test]
async fn test_submit_to_project_in_progress_is_rejected() {
    let (db, client, freelancer, project_id) = setup().await;
    let (proposal, _) = proposals::submit(&db, &freelancer, offer(project_id))
        .await
        .unwrap();
    fund(&db, &client, dec!(50.00)).await;
    proposals::accept(&db, &client, proposal.id).await.unwrap();

    let late = create_freelancer(&db, "late").await;
    let result = proposals::submit(&db, &late, offer(project_id)).await;
    assert!(matches!(result, Err(ServiceError::InvalidState(_))));
}

#[tokio::test]
async fn test_short_message_is_bad_request() {
    let (db, _, freelancer, project_id) = setup().await;
    let result = proposals::submit(
        &db,
        &freelancer,
        CreateProposal {
            message: "hi".into(),
            project_id,
        },
    )
    .await;
    assert!(matches!(result, Err(ServiceError::BadRequest(_))));
}

#[tokio::test]
async fn test_author_can_edit_and_withdraw_while_pending() {
    let (db, _, freelancer, project_id) = setup().await;
    let (proposal, _) = proposals::submit(&db, &freelancer, offer(project_id))
        .await
        .unwrap();

    let updated = proposals::update(
        &db,
        &freelancer,
        proposal.id,
        UpdateProposal {
            message: "Updated offer with a shorter timeline".into(),
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.message, "Updated offer with a shorter timeline");

    proposals::withdraw(&db, &freelancer, proposal.id)
        .await
        .unwrap();
    assert!(proposals::list_by_freelancer(&db, &freelancer)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_other_freelancers_cannot_edit() {
    let (db, _, freelancer, project_id) = setup().await;
    let (proposal, _) = proposals::submit(&db, &freelancer, offer(project_id))
        .await
        .unwrap();
    let other = create_freelancer(&db, "other").await;

    let result = proposals::withdraw(&db, &other, proposal.id).await;
    assert!(matches!(result, Err(ServiceError::Forbidden(_))));
}

#[tokio::test]
async fn test_decided_proposal_is_frozen() {
    let (db, client, freelancer, project_id) = setup().await;
    let (proposal, _) = proposals::submit(&db, &freelancer, offer(project_id))
        .await
        .unwrap();
    proposals::reject(&db, &client, proposal.id).await.unwrap();

    let result = proposals::update(
        &db,
        &freelancer,
        proposal.id,
        UpdateProposal {
            message: "Please reconsider my proposal".into(),
        },
    )
    .await;
    assert!(matches!(result, Err(ServiceError::InvalidState(_))));

    let result = proposals::withdraw(&db, &freelancer, proposal.id).await;
    assert!(matches!(result, Err(ServiceError::InvalidState(_))));
}

#[tokio::test]
async fn test_list_by_project_shows_only_pending_to_the_client() {
    let (db, client, freelancer, project_id) = setup().await;
    let second = create_freelancer(&db, "second").await;
    let (rejected, _) = proposals::submit(&db, &freelancer, offer(project_id))
        .await
        .unwrap();
    let (pending, _) = proposals::submit(&db, &second, offer(project_id))
        .await
        .unwrap();
    proposals::reject(&db, &client, rejected.id).await.unwrap();

    let list = proposals::list_by_project(&db, &client, project_id)
        .await
        .unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, pending.id);

    let other = create_client(&db, "other").await;
    let result = proposals::list_by_project(&db, &other, project_id).await;
    assert!(matches!(result, Err(ServiceError::Forbidden(_))));
}

#[tokio::test]
async fn test_reject_requires_pending_and_project_client() {
    let (db, client, freelancer, project_id) = setup().await;
    let (proposal, _) = proposals::submit(&db, &freelancer, offer(project_id))
        .await
        .unwrap();

    let other = create_client(&db, "other").await;
    let result = proposals::reject(&db, &other, proposal.id).await;
    assert!(matches!(result, Err(ServiceError::Forbidden(_))));

    let (rejected, _) = proposals::reject(&db, &client, proposal.id).await.unwrap();
    assert_eq!(rejected.status, ProposalStatus::Rejected);

    let result = proposals::reject(&db, &client, proposal.id).await;
    assert!(matches!(result, Err(ServiceError::InvalidState(_))));
}

#[tokio::test]
async fn test_proposal_visibility() {
    let (db, client, freelancer, project_id) = setup().await;
    let (proposal, _) = proposals::submit(&db, &freelancer, offer(project_id))
        .await
        .unwrap();

    assert!(proposals::find(&db, &freelancer, proposal.id).await.is_ok());
    assert!(proposals::find(&db, &client, proposal.id).await.is_ok());
    assert!(proposals::find(&db, &create_admin(&db).await, proposal.id)
        .await
        .is_ok());

    let stranger = create_client(&db, "stranger").await;
    let result = proposals::find(&db, &stranger, proposal.id).await;
    assert!(matches!(result, Err(ServiceError::Forbidden(_))));
}
