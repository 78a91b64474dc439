//! Business operations. Each function takes the caller explicitly and returns
//! `Result<_, ServiceError>`; handlers only translate HTTP to these calls.

pub mod categories;
pub mod notifications;
pub mod payments;
pub mod projects;
pub mod proposals;
pub mod reviews;
pub mod settlement;
pub mod users;
pub mod wallets;
