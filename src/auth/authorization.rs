use uuid::Uuid;

use crate::error::ServiceError;
use crate::models::projects;
use crate::models::users::Role;

/// Identity of the user making a request, taken from a verified access token.
///
/// Every service operation receives the caller explicitly; authorization is a
/// pure check over this value and the loaded rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

impl Caller {
    pub fn require_role(&self, allowed: &[Role]) -> Result<(), ServiceError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(ServiceError::Forbidden(
                "You do not have permission to perform this action".into(),
            ))
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Affiliation check: only the project's client may mutate it.
pub fn ensure_project_client(
    project: &projects::Model,
    caller: &Caller,
) -> Result<(), ServiceError> {
    if project.client_id != caller.id {
        return Err(ServiceError::Forbidden(
            "You can not access this project".into(),
        ));
    }
    Ok(())
}

pub fn ensure_assigned_freelancer(
    project: &projects::Model,
    caller: &Caller,
) -> Result<(), ServiceError> {
    if project.freelancer_id != Some(caller.id) {
        return Err(ServiceError::Forbidden(
            "You are not assigned to this project".into(),
        ));
    }
    Ok(())
}
