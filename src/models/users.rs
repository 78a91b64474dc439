use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::models::require_min_len;

/// The `Role` enum maps to a TEXT column stored as upper-case strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[sea_orm(string_value = "CLIENT")]
    Client,
    #[sea_orm(string_value = "FREELANCER")]
    Freelancer,
    #[sea_orm(string_value = "ADMIN")]
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "BLOCKED")]
    Blocked,
    #[sea_orm(string_value = "DELETED")]
    Deleted,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Client => "CLIENT",
            Role::Freelancer => "FREELANCER",
            Role::Admin => "ADMIN",
        }
    }
}

impl UserStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            UserStatus::Active => "ACTIVE",
            UserStatus::Blocked => "BLOCKED",
            UserStatus::Deleted => "DELETED",
        }
    }
}

/// SeaORM entity for the `users` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub status: UserStatus,
    pub profile_picture: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::wallets::Entity")]
    Wallet,
    #[sea_orm(has_many = "super::proposals::Entity")]
    Proposals,
    #[sea_orm(has_many = "super::reviews::Entity")]
    Reviews,
}

impl Related<super::wallets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wallet.def()
    }
}

impl Related<super::proposals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Proposals.def()
    }
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs (not stored in DB, used for request bodies) ──

/// Used by the `POST /api/user/register` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
}

impl RegisterUser {
    pub fn validate(&self) -> Result<(), ServiceError> {
        require_min_len(&self.username, 1, "Username")?;
        validate_email(&self.email)?;
        validate_password(&self.password)?;
        if self.password != self.confirm_password {
            return Err(ServiceError::BadRequest("Passwords do not match".into()));
        }
        if self.role == Role::Admin {
            return Err(ServiceError::Forbidden(
                "Admin accounts cannot be self-registered".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Used by `PATCH /api/user` to update the caller's own account.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UpdateUser {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if let Some(username) = &self.username {
            require_min_len(username, 3, "Username")?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(password) = &self.password {
            validate_password(password)?;
        }
        Ok(())
    }
}

/// Body of the admin block/unblock endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockUser {
    pub email: String,
}

/// A safe user representation for API responses (never leaks the password hash).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub status: UserStatus,
    pub profile_picture: Option<String>,
    pub created_at: DateTimeUtc,
}

impl From<Model> for UserResponse {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            email: m.email,
            role: m.role,
            status: m.status,
            profile_picture: m.profile_picture,
            created_at: m.created_at,
        }
    }
}

fn validate_email(email: &str) -> Result<(), ServiceError> {
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid {
        return Err(ServiceError::BadRequest("Invalid email format".into()));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ServiceError> {
    if password.chars().count() < 8 {
        return Err(ServiceError::BadRequest(
            "Password must be at least 8 characters long".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register() -> RegisterUser {
        RegisterUser {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "Password1".into(),
            confirm_password: "Password1".into(),
            role: Role::Client,
        }
    }

    #[test]
    fn valid_registration_passes() {
        assert!(register().validate().is_ok());
    }

    #[test]
    fn mismatched_confirmation_is_rejected() {
        let mut dto = register();
        dto.confirm_password = "Password2".into();
        assert!(matches!(dto.validate(), Err(ServiceError::BadRequest(_))));
    }

    #[test]
    fn admins_cannot_self_register() {
        let mut dto = register();
        dto.role = Role::Admin;
        assert!(matches!(dto.validate(), Err(ServiceError::Forbidden(_))));
    }

    #[test]
    fn short_password_and_bad_email_are_rejected() {
        let mut dto = register();
        dto.password = "short".into();
        dto.confirm_password = "short".into();
        assert!(dto.validate().is_err());

        let mut dto = register();
        dto.email = "not-an-email".into();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn role_serializes_upper_case() {
        assert_eq!(
            serde_json::to_string(&Role::Freelancer).unwrap(),
            "\"FREELANCER\""
        );
    }
}
