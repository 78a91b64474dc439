use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;

use crate::models::InvalidTransition;

/// Error type shared by every service operation.
///
/// Each variant maps to exactly one HTTP status; handlers propagate it with `?`
/// and actix renders it as `{"error": "<message>"}`.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    /// A status precondition did not hold (wrong project/proposal/payment state).
    #[error("{0}")]
    InvalidState(String),

    #[error("Not enough money")]
    InsufficientFunds,

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found(what: &str) -> Self {
        Self::NotFound(format!("{what} not found"))
    }
}

impl From<InvalidTransition> for ServiceError {
    fn from(e: InvalidTransition) -> Self {
        Self::InvalidState(e.to_string())
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Forbidden(_)
            | ServiceError::InvalidState(_)
            | ServiceError::InsufficientFunds => StatusCode::FORBIDDEN,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Database(_) | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            tracing::error!("{self}");
        }
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_and_funds_errors_are_forbidden() {
        assert_eq!(
            ServiceError::InvalidState("x".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ServiceError::InsufficientFunds.status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn conflict_and_not_found_map_to_their_statuses() {
        assert_eq!(
            ServiceError::Conflict("dup".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::not_found("Project").to_string(),
            "Project not found"
        );
    }

    #[test]
    fn database_errors_are_internal() {
        let e = ServiceError::from(DbErr::Custom("boom".into()));
        assert_eq!(e.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
