use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A notification kept in Redis, one hash per recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(user_id: Uuid, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: title.into(),
            content: content.into(),
            is_read: false,
            created_at: Utc::now(),
        }
    }

    /// Build the notification sent to `recipient` when an escrow step commits.
    pub fn for_event(recipient: Uuid, event: &EscrowEvent) -> Self {
        let (title, content) = match event {
            EscrowEvent::ProposalSubmitted { project_title } => (
                "New proposal",
                format!("A freelancer sent a proposal for \"{project_title}\""),
            ),
            EscrowEvent::ProposalAccepted { project_title } => (
                "Proposal accepted",
                format!("Your proposal for \"{project_title}\" was accepted. Work can start"),
            ),
            EscrowEvent::ProposalRejected { project_title } => (
                "Proposal rejected",
                format!("Your proposal for \"{project_title}\" was rejected"),
            ),
            EscrowEvent::ApprovalRequested { project_title } => (
                "Approval requested",
                format!("The freelancer finished \"{project_title}\" and asks for approval"),
            ),
            EscrowEvent::ProjectApproved { project_title } => (
                "Project approved",
                format!("\"{project_title}\" was approved and the payment released to your wallet"),
            ),
            EscrowEvent::ProjectRefunded { project_title } => (
                "Project refunded",
                format!("\"{project_title}\" was cancelled and the payment refunded to the client"),
            ),
        };
        Self::new(recipient, title, content)
    }
}

/// Committed escrow steps that produce a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EscrowEvent {
    ProposalSubmitted { project_title: String },
    ProposalAccepted { project_title: String },
    ProposalRejected { project_title: String },
    ApprovalRequested { project_title: String },
    ProjectApproved { project_title: String },
    ProjectRefunded { project_title: String },
}

/// Keep unread notifications only, newest first.
pub fn unread_newest_first(mut notifications: Vec<Notification>) -> Vec<Notification> {
    notifications.retain(|n| !n.is_read);
    notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    notifications
}
