//! Accounts, wallets, payments, reviews and categories.
//!
//! Run with: `cargo test --test accounts_test`
mod common;

use rust_decimal_macros::dec;
use std::time::Duration;
use uuid::Uuid;

use freelance_backend::ServiceError;
use freelance_backend::auth::Caller;
use freelance_backend::auth::jwt::validate_token;
use freelance_backend::auth::middleware::JwtSettings;
use freelance_backend::cache::CategoryCache;
use freelance_backend::models::categories::{CreateCategory, UpdateCategory};
use freelance_backend::models::proposals::CreateProposal;
use freelance_backend::models::reviews::CreateReview;
use freelance_backend::models::users::{
    LoginRequest, RegisterUser, Role, UpdateUser, UserStatus,
};
use freelance_backend::models::wallets::Withdraw;
use freelance_backend::services::{
    categories, payments, projects, proposals, reviews, users, wallets,
};
use sea_orm::DatabaseConnection;

use crate::common::*;

fn jwt() -> JwtSettings {
    JwtSettings {
        secret: "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx".into(),
        ttl_secs: 3600,
    }
}

fn registration(username: &str, role: Role) -> RegisterUser {
    RegisterUser {
        username: username.into(),
        email: format!("{username}@example.com"),
        password: "Password1".into(),
        confirm_password: "Password1".into(),
        role,
    }
}

#[tokio::test]
async fn test_register_creates_user_with_empty_wallet_and_can_log_in() {
    let db = setup_test_db().await.unwrap();

    let user = users::register(&db, registration("alice", Role::Client))
        .await
        .unwrap();
    assert_eq!(user.status, UserStatus::Active);
    assert_eq!(balance(&db, user.id).await, dec!(0));

    let token = users::login(
        &db,
        &jwt(),
        LoginRequest {
            email: "alice@example.com".into(),
            password: "Password1".into(),
        },
    )
    .await
    .unwrap();
    let claims = validate_token(&token, &jwt().secret).unwrap();
    assert_eq!(claims.user_id().unwrap(), user.id);
    assert_eq!(claims.role, Role::Client);

    let result = users::login(
        &db,
        &jwt(),
        LoginRequest {
            email: "alice@example.com".into(),
            password: "WrongPassword".into(),
        },
    )
    .await;
    assert!(matches!(result, Err(ServiceError::Unauthorized(_))));
}

#[tokio::test]
async fn test_duplicate_email_or_username_conflicts() {
    let db = setup_test_db().await.unwrap();
    create_user(&db, "alice", Role::Client).await;

    let result = users::register(&db, registration("alice", Role::Freelancer)).await;
    assert!(matches!(result, Err(ServiceError::Conflict(_))));

    let mut same_name = registration("alice", Role::Client);
    same_name.email = "other@example.com".into();
    let result = users::register(&db, same_name).await;
    assert!(matches!(result, Err(ServiceError::Conflict(_))));
}

#[tokio::test]
async fn test_update_rejects_taken_username() {
    let db = setup_test_db().await.unwrap();
    let alice = create_client(&db, "alice").await;
    create_client(&db, "bobby").await;

    let result = users::update(
        &db,
        &alice,
        UpdateUser {
            username: Some("bobby".into()),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(result, Err(ServiceError::Conflict(_))));

    let updated = users::update(
        &db,
        &alice,
        UpdateUser {
            username: Some("alice2".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.username, "alice2");
}

#[tokio::test]
async fn test_admin_blocks_and_unblocks() {
    let db = setup_test_db().await.unwrap();
    let admin = create_admin(&db).await;
    let client = create_client(&db, "client").await;

    let result = users::block(&db, &client, "client@example.com").await;
    assert!(matches!(result, Err(ServiceError::Forbidden(_))));

    let blocked = users::block(&db, &admin, "client@example.com").await.unwrap();
    assert_eq!(blocked.status, UserStatus::Blocked);

    let active = users::unblock(&db, &admin, "client@example.com").await.unwrap();
    assert_eq!(active.status, UserStatus::Active);

    let result = users::block(&db, &admin, "nobody@example.com").await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}

#[tokio::test]
async fn test_soft_deleted_user_cannot_log_in() {
    let db = setup_test_db().await.unwrap();
    let user = users::register(&db, registration("carol", Role::Freelancer))
        .await
        .unwrap();
    let caller = Caller {
        id: user.id,
        email: user.email.clone(),
        role: user.role,
    };

    let deleted = users::soft_delete(&db, &caller).await.unwrap();
    assert_eq!(deleted.status, UserStatus::Deleted);

    let result = users::login(
        &db,
        &jwt(),
        LoginRequest {
            email: "carol@example.com".into(),
            password: "Password1".into(),
        },
    )
    .await;
    assert!(matches!(result, Err(ServiceError::Forbidden(_))));
}

#[tokio::test]
async fn test_deposit_and_withdraw() {
    let db = setup_test_db().await.unwrap();
    let client = create_client(&db, "client").await;

    let wallet = wallets::deposit(&db, &client, card(dec!(120.50))).await.unwrap();
    assert_eq!(wallet.balance, dec!(120.50));

    let wallet = wallets::withdraw(&db, &client, Withdraw { amount: dec!(20.25) })
        .await
        .unwrap();
    assert_eq!(wallet.balance, dec!(100.25));

    let result = wallets::withdraw(&db, &client, Withdraw { amount: dec!(100.50) }).await;
    assert!(matches!(result, Err(ServiceError::InsufficientFunds)));
    assert_eq!(balance(&db, client.id).await, dec!(100.25));

    assert_eq!(wallets::get(&db, &client).await.unwrap().balance, dec!(100.25));
}

#[tokio::test]
async fn test_wallet_amount_validation() {
    let db = setup_test_db().await.unwrap();
    let client = create_client(&db, "client").await;

    for amount in [dec!(0), dec!(-1.00), dec!(10.001)] {
        let result = wallets::deposit(&db, &client, card(amount)).await;
        assert!(matches!(result, Err(ServiceError::BadRequest(_))));
    }

    let mut bad_card = card(dec!(10.00));
    bad_card.cvv = "12".into();
    let result = wallets::deposit(&db, &client, bad_card).await;
    assert!(matches!(result, Err(ServiceError::BadRequest(_))));

    let admin = create_admin(&db).await;
    let result = wallets::get(&db, &admin).await;
    assert!(matches!(result, Err(ServiceError::Forbidden(_))));
}

/// Client, freelancer and a project taken all the way to COMPLETED.
async fn completed_project(db: &DatabaseConnection) -> (Caller, Caller, Uuid) {
    let client = create_client(db, "client").await;
    let freelancer = create_freelancer(db, "freelancer").await;
    let web = create_category(db, "Web").await;
    let project = create_project(db, &client, web.id, "Landing page", dec!(100.00)).await;
    let (proposal, _) = proposals::submit(
        db,
        &freelancer,
        CreateProposal {
            message: "Ready to start right away".into(),
            project_id: project.id,
        },
    )
    .await
    .unwrap();
    fund(db, &client, dec!(100.00)).await;
    proposals::accept(db, &client, proposal.id).await.unwrap();
    projects::send_approval(db, &freelancer, project.id)
        .await
        .unwrap();
    projects::approve(db, &client, project.id).await.unwrap();
    (client, freelancer, project.id)
}

fn review() -> CreateReview {
    CreateReview {
        comment: "Great work, delivered on time".into(),
        rating: 9,
    }
}

#[tokio::test]
async fn test_review_on_completed_project() {
    let db = setup_test_db().await.unwrap();
    let (client, freelancer, project_id) = completed_project(&db).await;

    let created = reviews::create(&db, &client, project_id, review())
        .await
        .unwrap();
    assert_eq!(created.recipient_id, freelancer.id);
    assert_eq!(created.sender_id, client.id);

    let result = reviews::create(&db, &client, project_id, review()).await;
    assert!(matches!(result, Err(ServiceError::Conflict(_))));

    let received = reviews::for_user(&db, freelancer.id).await.unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(
        reviews::find_by_project(&db, project_id).await.unwrap().id,
        created.id
    );
    assert_eq!(reviews::find(&db, created.id).await.unwrap().rating, 9);
}

#[tokio::test]
async fn test_review_on_open_project_is_rejected() {
    let db = setup_test_db().await.unwrap();
    let client = create_client(&db, "client").await;
    let web = create_category(&db, "Web").await;
    let project = create_project(&db, &client, web.id, "Landing page", dec!(100.00)).await;

    let result = reviews::create(&db, &client, project.id, review()).await;
    assert!(matches!(result, Err(ServiceError::InvalidState(_))));
}

#[tokio::test]
async fn test_review_by_stranger_or_with_bad_rating_is_rejected() {
    let db = setup_test_db().await.unwrap();
    let (client, _, project_id) = completed_project(&db).await;
    let stranger = create_client(&db, "stranger").await;

    let result = reviews::create(&db, &stranger, project_id, review()).await;
    assert!(matches!(result, Err(ServiceError::Forbidden(_))));

    let mut bad = review();
    bad.rating = 11;
    let result = reviews::create(&db, &client, project_id, bad).await;
    assert!(matches!(result, Err(ServiceError::BadRequest(_))));
}

#[tokio::test]
async fn test_payments_are_visible_to_participants_only() {
    let db = setup_test_db().await.unwrap();
    let (client, freelancer, _) = completed_project(&db).await;

    let mine = payments::for_caller(&db, &client).await.unwrap();
    assert_eq!(mine.len(), 1);
    let payment_id = mine[0].id;

    assert!(payments::find(&db, &freelancer, payment_id).await.is_ok());
    assert!(payments::find(&db, &create_admin(&db).await, payment_id)
        .await
        .is_ok());

    let stranger = create_client(&db, "stranger").await;
    let result = payments::find(&db, &stranger, payment_id).await;
    assert!(matches!(result, Err(ServiceError::Forbidden(_))));
    assert!(payments::for_caller(&db, &stranger).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_category_admin_and_cache_invalidation() {
    let db = setup_test_db().await.unwrap();
    let cache = CategoryCache::new(Duration::from_secs(60));
    let admin = create_admin(&db).await;
    let client = create_client(&db, "client").await;

    let result = categories::create(&db, &cache, &client, CreateCategory { name: "Web".into() }).await;
    assert!(matches!(result, Err(ServiceError::Forbidden(_))));

    let result = categories::create(&db, &cache, &admin, CreateCategory { name: " ".into() }).await;
    assert!(matches!(result, Err(ServiceError::BadRequest(_))));

    let web = categories::create(&db, &cache, &admin, CreateCategory { name: "Web".into() })
        .await
        .unwrap();
    assert_eq!(categories::list(&db, &cache).await.unwrap().len(), 1);

    categories::update(
        &db,
        &cache,
        &admin,
        UpdateCategory {
            id: web.id,
            name: "Web development".into(),
        },
    )
    .await
    .unwrap();
    assert_eq!(
        categories::find(&db, &cache, web.id).await.unwrap().name,
        "Web development"
    );
    assert_eq!(
        categories::list(&db, &cache).await.unwrap()[0].name,
        "Web development"
    );

    categories::delete(&db, &cache, &admin, web.id).await.unwrap();
    assert!(categories::list(&db, &cache).await.unwrap().is_empty());
    let result = categories::find(&db, &cache, web.id).await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}
