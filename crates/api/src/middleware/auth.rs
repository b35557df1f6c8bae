//! # Actor Identity
//!
//! Authentication happens upstream of this service; the gateway forwards the
//! authenticated user's id in the `X-User-Id` header. Handlers take an
//! [`ActorId`] to learn who is acting.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderName},
};
use uuid::Uuid;

use crate::middleware::error_handling::AppError;

pub static ACTOR_HEADER: HeaderName = HeaderName::from_static("x-user-id");

/// The user performing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorId(pub Uuid);

impl ActorId {
    /// Succeeds only when the actor is `owner`.
    pub fn require(self, owner: Uuid) -> Result<Uuid, AppError> {
        if self.0 != owner {
            return Err(AppError::Forbidden(
                "You can only manage your own availability".to_string(),
            ));
        }
        Ok(owner)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ActorId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(&ACTOR_HEADER)
            .ok_or_else(|| AppError::Unauthorized("Missing X-User-Id header".to_string()))?;

        value
            .to_str()
            .ok()
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
            .map(ActorId)
            .ok_or_else(|| AppError::Unauthorized("X-User-Id must be a UUID".to_string()))
    }
}
