use sea_orm::*;
use uuid::Uuid;

use crate::models::users::{self, Role, UserStatus};

/// Insert a new user row. The caller is responsible for creating the wallet in
/// the same transaction.
pub async fn insert_user<C: ConnectionTrait>(
    db: &C,
    username: String,
    email: String,
    password_hash: String,
    role: Role,
) -> Result<users::Model, DbErr> {
    let now = chrono::Utc::now();
    let new_user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(username),
        email: Set(email),
        password_hash: Set(password_hash),
        role: Set(role),
        status: Set(UserStatus::Active),
        profile_picture: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };

    new_user.insert(db).await
}

/// Fetch a single user by ID.
pub async fn get_user_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find_by_id(id).one(db).await
}

pub async fn get_user_by_email<C: ConnectionTrait>(
    db: &C,
    email: &str,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await
}

pub async fn get_user_by_username<C: ConnectionTrait>(
    db: &C,
    username: &str,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .one(db)
        .await
}

/// Persist a modified user, bumping `updated_at`.
pub async fn save_user<C: ConnectionTrait>(
    db: &C,
    mut active: users::ActiveModel,
) -> Result<users::Model, DbErr> {
    active.updated_at = Set(chrono::Utc::now());
    active.update(db).await
}

pub async fn set_user_status<C: ConnectionTrait>(
    db: &C,
    user: users::Model,
    status: UserStatus,
) -> Result<users::Model, DbErr> {
    let mut active: users::ActiveModel = user.into();
    active.status = Set(status);
    save_user(db, active).await
}
