use super::jwt::{JwtAuth, JwtClaims};
use crate::errors::{ErrorCode, error_response};
use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::Response,
};

/// Extract JWT from Authorization header or cookie
pub fn extract_token_from_request(headers: &HeaderMap) -> Option<String> {
    // Try Authorization header first: "Bearer <token>"
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            // Fallback to cookie: "access_token=<token>"
            headers
                .get(header::COOKIE)
                .and_then(|v| v.to_str().ok())
                .and_then(|cookies| {
                    cookies.split(';').find_map(|cookie| {
                        let (name, value) = cookie.trim().split_once('=')?;
                        (name == "access_token" && !value.is_empty()).then(|| value.to_string())
                    })
                })
        })
}

/// Best-effort identity attach.
///
/// Verifies a token from the Authorization header or `access_token` cookie and
/// inserts its [`JwtClaims`] into request extensions. Missing or invalid tokens
/// are not an error: the request proceeds anonymously.
pub async fn optional_jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = extract_token_from_request(&headers) {
        match auth.verify_token(&token) {
            Ok(claims) => {
                request.extensions_mut().insert(claims);
            }
            Err(e) => {
                tracing::debug!("Ignoring invalid JWT: {}", e);
            }
        }
    }

    next.run(request).await
}

/// Rejects requests that carry no attached identity with 401.
///
/// Layer this on routes that need a caller, inside
/// [`optional_jwt_auth_middleware`].
pub async fn require_auth(request: Request, next: Next) -> Response {
    if request.extensions().get::<JwtClaims>().is_none() {
        tracing::debug!("Rejecting anonymous request to {}", request.uri().path());
        return error_response(
            StatusCode::UNAUTHORIZED,
            "User is not authenticated".to_string(),
            ErrorCode::Unauthorized,
        );
    }

    next.run(request).await
}
