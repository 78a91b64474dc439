use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ServiceError;
use crate::models::{InvalidTransition, require_min_len, validate_amount};

/// Project lifecycle.
///
/// ```text
/// CREATED -> IN_PROGRESS <-> AWAITING_APPROVAL -> COMPLETED
///                 |
///                 +-> CANCELLED
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    #[sea_orm(string_value = "CREATED")]
    Created,
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(string_value = "AWAITING_APPROVAL")]
    AwaitingApproval,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectEvent {
    /// A proposal was accepted and a freelancer assigned.
    Assign,
    SendApproval,
    Approve,
    CancelApproval,
    Refund,
}

impl ProjectStatus {
    pub fn transition(self, event: ProjectEvent) -> Result<Self, InvalidTransition> {
        use ProjectEvent::*;
        use ProjectStatus::*;

        match (self, event) {
            (Created, Assign) => Ok(InProgress),
            (InProgress, SendApproval) => Ok(AwaitingApproval),
            (AwaitingApproval, Approve) => Ok(Completed),
            (AwaitingApproval, CancelApproval) => Ok(InProgress),
            (InProgress, Refund) => Ok(Cancelled),
            (from, event) => Err(InvalidTransition {
                entity: "project",
                from: from.as_str().to_string(),
                event: event.to_string(),
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Created => "CREATED",
            ProjectStatus::InProgress => "IN_PROGRESS",
            ProjectStatus::AwaitingApproval => "AWAITING_APPROVAL",
            ProjectStatus::Completed => "COMPLETED",
            ProjectStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ProjectStatus::Completed | ProjectStatus::Cancelled)
    }
}

impl fmt::Display for ProjectEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProjectEvent::Assign => "assign",
            ProjectEvent::SendApproval => "send for approval",
            ProjectEvent::Approve => "approve",
            ProjectEvent::CancelApproval => "cancel approval of",
            ProjectEvent::Refund => "refund",
        };
        f.write_str(s)
    }
}

/// SeaORM entity for the `projects` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    pub status: ProjectStatus,
    pub category_id: Option<Uuid>,
    pub client_id: Uuid,
    pub freelancer_id: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::proposals::Entity")]
    Proposals,
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ClientId",
        to = "super::users::Column::Id"
    )]
    Client,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::FreelancerId",
        to = "super::users::Column::Id"
    )]
    Freelancer,
}

impl Related<super::proposals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Proposals.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub category_id: Uuid,
}

impl CreateProject {
    pub fn validate(&self) -> Result<(), ServiceError> {
        require_min_len(&self.title, 3, "Title")?;
        require_min_len(&self.description, 10, "Description")?;
        validate_amount(self.price, "Price")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category_id: Option<Uuid>,
}

impl UpdateProject {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if let Some(title) = &self.title {
            require_min_len(title, 3, "Title")?;
        }
        if let Some(description) = &self.description {
            require_min_len(description, 10, "Description")?;
        }
        if let Some(price) = self.price {
            validate_amount(price, "Price")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub title: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectSort {
    #[default]
    Newest,
    Oldest,
    Cheapest,
    MostExpensive,
    Random,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterQuery {
    /// Comma-separated category ids.
    pub categories: Option<String>,
    pub sort_by: Option<ProjectSort>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl FilterQuery {
    pub fn category_ids(&self) -> Result<Vec<Uuid>, ServiceError> {
        let Some(raw) = self.categories.as_deref() else {
            return Ok(Vec::new());
        };
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                Uuid::parse_str(s)
                    .map_err(|_| ServiceError::BadRequest(format!("Invalid category id: {s}")))
            })
            .collect()
    }
}
