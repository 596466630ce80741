//! Caller identity extractor
//!
//! The session layer in front of this service authenticates the caller and
//! forwards the user id in the `x-forum-user` header.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use forum_core::UserId;

use crate::response::ApiError;

/// Header carrying the authenticated user id
pub const USER_HEADER: &str = "x-forum-user";

/// Authenticated user
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
}

impl AuthUser {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

/// Read the identity header; `Ok(None)` when it is absent
fn identity(parts: &Parts) -> Result<Option<AuthUser>, ApiError> {
    let Some(value) = parts.headers.get(USER_HEADER) else {
        return Ok(None);
    };

    let raw = value.to_str().map_err(|_| {
        tracing::warn!("Non-ASCII user identity header");
        ApiError::InvalidIdentity
    })?;

    let user_id = UserId::new(raw).map_err(|e| {
        tracing::warn!(error = %e, "Rejected user identity header");
        ApiError::InvalidIdentity
    })?;

    Ok(Some(AuthUser::new(user_id)))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        identity(parts)?.ok_or(ApiError::MissingAuth)
    }
}

/// Optional authenticated user
///
/// Returns None if no identity header is present,
/// or an error if the header is malformed.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    pub fn user_id(&self) -> Option<&UserId> {
        self.0.as_ref().map(|auth| &auth.user_id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        identity(parts).map(OptionalAuthUser)
    }
}
