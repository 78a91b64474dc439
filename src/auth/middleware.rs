use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use std::future::{Ready, ready};

use crate::auth::{Caller, jwt};
use crate::error::ServiceError;

/// Extractor that validates the bearer token and yields the caller identity.
///
/// Handlers that take this argument are protected; no database access happens here.
pub struct AuthenticatedUser(pub Caller);

impl FromRequest for AuthenticatedUser {
    type Error = ServiceError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ServiceError> {
    // 1. Extract the Bearer token from the Authorization header.
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ServiceError::Unauthorized("Missing Authorization header".into()))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        ServiceError::Unauthorized("Authorization header must be: Bearer <token>".into())
    })?;

    // 2. Get the signing secret from app data.
    let settings = req
        .app_data::<web::Data<JwtSettings>>()
        .ok_or_else(|| ServiceError::Internal("JWT settings not configured".into()))?;

    // 3. Validate and convert the claims.
    let caller = jwt::validate_token(token, &settings.secret)
        .and_then(jwt::Claims::into_caller)
        .map_err(|e| ServiceError::Unauthorized(format!("Invalid token: {e}")))?;

    Ok(AuthenticatedUser(caller))
}

/// Wrapper type to store the JWT secret and token lifetime in Actix app data.
#[derive(Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub ttl_secs: i64,
}
