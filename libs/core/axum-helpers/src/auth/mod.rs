//! Authentication module.
//!
//! This module provides:
//! - HS256 JWT issuing and verification with issuer/audience checks
//! - Best-effort identity attach middleware and a require-auth gate
//! - [`RequestContext`], the per-request identity handed to services
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, optional_jwt_auth_middleware, require_auth};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! let protected = Router::new()
//!     .route("/api/protected", get(handler))
//!     .layer(axum::middleware::from_fn(require_auth));
//!
//! let app = Router::new()
//!     .merge(protected)
//!     .layer(axum::middleware::from_fn_with_state(auth, optional_jwt_auth_middleware));
//! ```

pub mod config;
pub mod context;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use context::RequestContext;
pub use jwt::{IssuedToken, JwtAuth, JwtClaims, TokenSubject};
pub use middleware::{extract_token_from_request, optional_jwt_auth_middleware, require_auth};
