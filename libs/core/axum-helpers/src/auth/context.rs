use super::jwt::JwtClaims;
use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

/// Caller identity for one request.
///
/// Built from whatever [`optional_jwt_auth_middleware`](super::optional_jwt_auth_middleware)
/// attached; anonymous when no valid token was presented. Handlers pass it (or the id
/// it carries) explicitly into service calls.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub claims: Option<JwtClaims>,
}

impl RequestContext {
    /// Typed user id from the token subject, if any
    pub fn user_id<T: std::str::FromStr>(&self) -> Option<T> {
        self.claims.as_ref().and_then(|c| c.subject())
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self {
            claims: parts.extensions.get::<JwtClaims>().cloned(),
        })
    }
}
