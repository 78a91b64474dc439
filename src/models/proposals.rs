use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::models::{InvalidTransition, require_min_len};

/// Proposal status stored as an upper-case string. ACCEPTED and REJECTED are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProposalStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "ACCEPTED")]
    Accepted,
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalEvent {
    Accept,
    Reject,
}

impl ProposalStatus {
    pub fn transition(self, event: ProposalEvent) -> Result<Self, InvalidTransition> {
        match (self, event) {
            (ProposalStatus::Pending, ProposalEvent::Accept) => Ok(ProposalStatus::Accepted),
            (ProposalStatus::Pending, ProposalEvent::Reject) => Ok(ProposalStatus::Rejected),
            (from, event) => Err(InvalidTransition {
                entity: "proposal",
                from: from.as_str().to_string(),
                event: match event {
                    ProposalEvent::Accept => "accept",
                    ProposalEvent::Reject => "reject",
                }
                .to_string(),
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProposalStatus::Pending => "PENDING",
            ProposalStatus::Accepted => "ACCEPTED",
            ProposalStatus::Rejected => "REJECTED",
        }
    }

    /// Only pending proposals may be edited or withdrawn by their author.
    pub fn is_editable(self) -> bool {
        self == ProposalStatus::Pending
    }
}

/// SeaORM entity for the `proposals` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "proposals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub status: ProposalStatus,
    pub project_id: Uuid,
    pub freelancer_id: Uuid,
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
        from = "Column::FreelancerId",
        to = "super::users::Column::Id"
    )]
    Freelancer,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Freelancer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProposal {
    pub message: String,
    #[serde(alias = "projectId")]
    pub project_id: Uuid,
}

impl CreateProposal {
    pub fn validate(&self) -> Result<(), ServiceError> {
        require_min_len(&self.message, 10, "Message")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProposal {
    pub message: String,
}

impl UpdateProposal {
    pub fn validate(&self) -> Result<(), ServiceError> {
        require_min_len(&self.message, 10, "Message")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_can_be_accepted_or_rejected() {
        assert_eq!(
            ProposalStatus::Pending.transition(ProposalEvent::Accept),
            Ok(ProposalStatus::Accepted)
        );
        assert_eq!(
            ProposalStatus::Pending.transition(ProposalEvent::Reject),
            Ok(ProposalStatus::Rejected)
        );
    }

    #[test]
    fn decided_proposals_are_terminal() {
        for from in [ProposalStatus::Accepted, ProposalStatus::Rejected] {
            assert!(from.transition(ProposalEvent::Accept).is_err());
            assert!(from.transition(ProposalEvent::Reject).is_err());
            assert!(!from.is_editable());
        }
    }

    #[test]
    fn short_messages_are_rejected() {
        let dto = UpdateProposal {
            message: "too short".into(),
        };
        assert!(dto.validate().is_err());
    }
}
