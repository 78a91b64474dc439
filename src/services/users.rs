use sea_orm::{DatabaseConnection, Set, TransactionTrait};
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::middleware::JwtSettings;
use crate::auth::{Caller, jwt, password};
use crate::db::{users as user_db, wallets as wallet_db};
use crate::error::ServiceError;
use crate::models::users::{
    self, LoginRequest, RegisterUser, Role, UpdateUser, UserResponse, UserStatus,
};

async fn ensure_email_free(
    db: &DatabaseConnection,
    email: &str,
    except: Option<Uuid>,
) -> Result<(), ServiceError> {
    match user_db::get_user_by_email(db, email).await? {
        Some(existing) if Some(existing.id) != except => Err(ServiceError::Conflict(
            "User with this email already exists".into(),
        )),
        _ => Ok(()),
    }
}

async fn ensure_username_free(
    db: &DatabaseConnection,
    username: &str,
    except: Option<Uuid>,
) -> Result<(), ServiceError> {
    match user_db::get_user_by_username(db, username).await? {
        Some(existing) if Some(existing.id) != except => Err(ServiceError::Conflict(
            "User with this username already exists".into(),
        )),
        _ => Ok(()),
    }
}

fn hash(password: &str) -> Result<String, ServiceError> {
    password::hash_password(password)
        .map_err(|e| ServiceError::Internal(format!("Failed to hash password: {e}")))
}

/// Create an ACTIVE user together with an empty wallet.
pub async fn register(
    db: &DatabaseConnection,
    input: RegisterUser,
) -> Result<UserResponse, ServiceError> {
    input.validate()?;
    ensure_email_free(db, &input.email, None).await?;
    ensure_username_free(db, &input.username, None).await?;

    let password_hash = hash(&input.password)?;

    let txn = db.begin().await?;
    let user = user_db::insert_user(
        &txn,
        input.username,
        input.email,
        password_hash,
        input.role,
    )
    .await?;
    wallet_db::insert_wallet(&txn, user.id).await?;
    txn.commit().await?;

    info!(user_id = %user.id, role = user.role.as_str(), "User registered");
    Ok(UserResponse::from(user))
}

/// Check credentials and issue an access token.
pub async fn login(
    db: &DatabaseConnection,
    settings: &JwtSettings,
    input: LoginRequest,
) -> Result<String, ServiceError> {
    let invalid = || ServiceError::Unauthorized("Invalid email or password".into());

    let user = user_db::get_user_by_email(db, &input.email)
        .await?
        .ok_or_else(invalid)?;

    if !password::verify_password(&input.password, &user.password_hash) {
        warn!(user_id = %user.id, "Login with wrong password");
        return Err(invalid());
    }

    if user.status != UserStatus::Active {
        return Err(ServiceError::Forbidden(format!(
            "User is {}",
            user.status.as_str().to_lowercase()
        )));
    }

    jwt::issue_token(
        user.id,
        &user.email,
        user.role,
        &settings.secret,
        settings.ttl_secs,
    )
    .map_err(ServiceError::Internal)
}

pub async fn find_user(db: &DatabaseConnection, id: Uuid) -> Result<users::Model, ServiceError> {
    user_db::get_user_by_id(db, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("User"))
}

pub async fn get_profile(db: &DatabaseConnection, id: Uuid) -> Result<UserResponse, ServiceError> {
    find_user(db, id).await.map(UserResponse::from)
}

/// Update the caller's own username, email or password.
pub async fn update(
    db: &DatabaseConnection,
    caller: &Caller,
    input: UpdateUser,
) -> Result<UserResponse, ServiceError> {
    input.validate()?;
    let user = find_user(db, caller.id).await?;

    if let Some(email) = &input.email {
        ensure_email_free(db, email, Some(user.id)).await?;
    }
    if let Some(username) = &input.username {
        ensure_username_free(db, username, Some(user.id)).await?;
    }

    let mut active: users::ActiveModel = user.into();
    if let Some(username) = input.username {
        active.username = Set(username);
    }
    if let Some(email) = input.email {
        active.email = Set(email);
    }
    if let Some(password) = input.password {
        active.password_hash = Set(hash(&password)?);
    }

    let updated = user_db::save_user(db, active).await?;
    Ok(UserResponse::from(updated))
}

async fn set_status_by_email(
    db: &DatabaseConnection,
    caller: &Caller,
    email: &str,
    status: UserStatus,
) -> Result<UserResponse, ServiceError> {
    caller.require_role(&[Role::Admin])?;

    let user = user_db::get_user_by_email(db, email)
        .await?
        .ok_or_else(|| ServiceError::not_found("User"))?;

    if user.role == Role::Admin {
        return Err(ServiceError::Forbidden(
            "Admin accounts can not be blocked".into(),
        ));
    }

    let updated = user_db::set_user_status(db, user, status).await?;
    info!(user_id = %updated.id, status = status.as_str(), admin_id = %caller.id, "User status changed");
    Ok(UserResponse::from(updated))
}

pub async fn block(
    db: &DatabaseConnection,
    caller: &Caller,
    email: &str,
) -> Result<UserResponse, ServiceError> {
    set_status_by_email(db, caller, email, UserStatus::Blocked).await
}

pub async fn unblock(
    db: &DatabaseConnection,
    caller: &Caller,
    email: &str,
) -> Result<UserResponse, ServiceError> {
    set_status_by_email(db, caller, email, UserStatus::Active).await
}

/// Mark the caller's own account DELETED. Rows are kept for payment history.
pub async fn soft_delete(
    db: &DatabaseConnection,
    caller: &Caller,
) -> Result<UserResponse, ServiceError> {
    let user = find_user(db, caller.id).await?;
    let updated = user_db::set_user_status(db, user, UserStatus::Deleted).await?;
    info!(user_id = %updated.id, "User soft-deleted");
    Ok(UserResponse::from(updated))
}
