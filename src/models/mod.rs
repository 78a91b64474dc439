pub mod categories;
pub mod notifications;
pub mod payments;
pub mod projects;
pub mod proposals;
pub mod reviews;
pub mod users;
pub mod wallets;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationQuery {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl PaginationQuery {
    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }

    pub fn offset(&self) -> u64 {
        self.offset.unwrap_or(0)
    }
}

/// A page of results together with the total number of matching rows.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

/// Returned by the status machines when an event is not allowed in the current state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Cannot {event} a {entity} that is {from}")]
pub struct InvalidTransition {
    pub entity: &'static str,
    pub from: String,
    pub event: String,
}

/// Largest value a `DECIMAL(10,2)` money column can hold.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0x540B_E3FF, 2, 0, false, 2);

/// Money amounts must be strictly positive, fit the money columns and carry
/// at most two decimal places.
pub fn validate_amount(amount: Decimal, field: &str) -> Result<(), ServiceError> {
    if amount <= Decimal::ZERO {
        return Err(ServiceError::BadRequest(format!(
            "{field} must be a positive number"
        )));
    }
    if amount > MAX_AMOUNT {
        return Err(ServiceError::BadRequest(format!(
            "{field} can not exceed {MAX_AMOUNT}"
        )));
    }
    if amount.normalize().scale() > 2 {
        return Err(ServiceError::BadRequest(format!(
            "{field} must have at most two decimal places"
        )));
    }
    Ok(())
}

pub(crate) fn require_min_len(value: &str, min: usize, field: &str) -> Result<(), ServiceError> {
    if value.trim().chars().count() < min {
        return Err(ServiceError::BadRequest(format!(
            "{field} must be at least {min} characters long"
        )));
    }
    Ok(())
}
