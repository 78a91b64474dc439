#![allow(dead_code)]

use chrono::Duration;
use migration::{Migrator, MigratorTrait};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, DbErr, Set};
use uuid::Uuid;

use freelance_backend::auth::Caller;
use freelance_backend::db::{
    categories as category_db, projects as project_db, users as user_db,
    wallets as wallet_db,
};
use freelance_backend::models::categories;
use freelance_backend::models::projects::{self, CreateProject};
use freelance_backend::models::users::{self, Role};
use freelance_backend::models::wallets::Deposit;
use freelance_backend::services::{projects as project_service, wallets as wallet_service};

/// Set up an in-memory SQLite database with the real migrations applied.
///
/// A single pooled connection keeps the in-memory database alive for the whole test.
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

pub fn caller_of(user: &users::Model) -> Caller {
    Caller {
        id: user.id,
        email: user.email.clone(),
        role: user.role,
    }
}

/// Insert a user and its empty wallet without going through password hashing.
pub async fn create_user(db: &DatabaseConnection, username: &str, role: Role) -> users::Model {
    let user = user_db::insert_user(
        db,
        username.to_string(),
        format!("{username}@example.com"),
        "not-a-real-hash".to_string(),
        role,
    )
    .await
    .expect("insert user");
    wallet_db::insert_wallet(db, user.id)
        .await
        .expect("insert wallet");
    user
}

pub async fn create_client(db: &DatabaseConnection, username: &str) -> Caller {
    caller_of(&create_user(db, username, Role::Client).await)
}

pub async fn create_freelancer(db: &DatabaseConnection, username: &str) -> Caller {
    caller_of(&create_user(db, username, Role::Freelancer).await)
}

pub async fn create_admin(db: &DatabaseConnection) -> Caller {
    caller_of(&create_user(db, "admin", Role::Admin).await)
}

pub async fn create_category(db: &DatabaseConnection, name: &str) -> categories::Model {
    category_db::insert_category(db, name.to_string())
        .await
        .expect("insert category")
}

pub async fn create_project(
    db: &DatabaseConnection,
    client: &Caller,
    category_id: Uuid,
    title: &str,
    price: Decimal,
) -> projects::Model {
    project_service::create(
        db,
        client,
        CreateProject {
            title: title.to_string(),
            description: format!("{title} for a small business"),
            price,
            category_id,
        },
    )
    .await
    .expect("create project")
}

pub fn card(amount: Decimal) -> Deposit {
    Deposit {
        card_number: "4242424242424242".into(),
        expiration_date: "12/30".into(),
        cvv: "123".into(),
        amount,
    }
}

pub async fn fund(db: &DatabaseConnection, user: &Caller, amount: Decimal) {
    wallet_service::deposit(db, user, card(amount))
        .await
        .expect("deposit");
}

pub async fn balance(db: &DatabaseConnection, user_id: Uuid) -> Decimal {
    wallet_db::get_wallet_by_user(db, user_id)
        .await
        .expect("query wallet")
        .expect("wallet exists")
        .balance
}

pub async fn reload_project(db: &DatabaseConnection, id: Uuid) -> projects::Model {
    project_db::get_project_by_id(db, id)
        .await
        .expect("query project")
        .expect("project exists")
}

/// Pretend the project was last touched `hours` ago.
pub async fn age_project(db: &DatabaseConnection, id: Uuid, hours: i64) {
    let project = reload_project(db, id).await;
    let updated_at = project.updated_at - Duration::hours(hours);
    let mut active: projects::ActiveModel = project.into();
    active.updated_at = Set(updated_at);
    active.update(db).await.expect("age project");
}
