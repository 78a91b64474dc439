use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::models::require_min_len;

/// SeaORM entity for the `reviews` table. Reviews are immutable once written.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub comment: String,
    pub rating: i32,
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    #[sea_orm(unique)]
    pub project_id: Uuid,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::projects::Entity",
        from = "Column::ProjectId",
        to = "super::projects::Column::Id",
        on_delete = "Cascade"
    )]
    Project,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::RecipientId",
        to = "super::users::Column::Id"
    )]
    Recipient,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipient.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReview {
    pub comment: String,
    pub rating: i32,
}

impl CreateReview {
    pub fn validate(&self) -> Result<(), ServiceError> {
        require_min_len(&self.comment, 10, "Comment")?;
        if !(1..=10).contains(&self.rating) {
            return Err(ServiceError::BadRequest(
                "Rating must be between 1 and 10".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewTarget {
    #[serde(alias = "projectId")]
    pub project_id: Uuid,
}
