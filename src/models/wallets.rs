use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::models::validate_amount;

/// SeaORM entity for the `wallets` table. Exactly one row per user.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wallets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub balance: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Simulated card top-up. The card fields are only shape-checked.
#[derive(Debug, Clone, Deserialize)]
pub struct Deposit {
    pub card_number: String,
    /// MM/YY
    pub expiration_date: String,
    pub cvv: String,
    pub amount: Decimal,
}

impl Deposit {
    pub fn validate(&self) -> Result<(), ServiceError> {
        let digits = self.card_number.chars().filter(|c| !c.is_whitespace());
        let len = digits.clone().count();
        if !(12..=19).contains(&len) || !digits.clone().all(|c| c.is_ascii_digit()) {
            return Err(ServiceError::BadRequest("Invalid card number".into()));
        }
        if !is_valid_expiration(&self.expiration_date) {
            return Err(ServiceError::BadRequest(
                "Expiration date must be in MM/YY format".into(),
            ));
        }
        if self.cvv.len() != 3 || !self.cvv.chars().all(|c| c.is_ascii_digit()) {
            return Err(ServiceError::BadRequest(
                "CVV must be a 3-digit number".into(),
            ));
        }
        validate_amount(self.amount, "Amount")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Withdraw {
    pub amount: Decimal,
}

impl Withdraw {
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate_amount(self.amount, "Amount")
    }
}

fn is_valid_expiration(value: &str) -> bool {
    let Some((month, year)) = value.split_once('/') else {
        return false;
    };
    let month_ok = month.len() == 2 && matches!(month.parse::<u8>(), Ok(1..=12));
    let year_ok = year.len() == 2 && year.chars().all(|c| c.is_ascii_digit());
    month_ok && year_ok
}
