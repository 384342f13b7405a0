//! # Axum Helpers
//!
//! A collection of utilities, middleware, and helpers for building Axum web applications.
//!
//! ## Modules
//!
//! - **[`auth`]**: JWT issuing/verification, identity attach and require-auth middleware
//! - **[`server`]**: Router assembly, serving with graceful shutdown, liveness/readiness
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`errors`]**: [`AppError`] and error codes rendered as the response envelope
//! - **[`response`]**: The `{success, message, data, status, error}` envelope
//! - **[`extractors`]**: Custom extractors (integer id path, validated JSON)
//!
//! ## Wiring
//!
//! ```ignore
//! let router = axum_helpers::create_router::<ApiDoc>(api_routes)?
//!     .merge(health_router(app_info!()));
//! axum_helpers::serve(router, &config.server, Duration::from_secs(30), cleanup).await?;
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod response;
pub mod server;

// Re-export auth types
pub use auth::{
    IssuedToken, JwtAuth, JwtClaims, JwtConfig, RequestContext, TokenSubject,
    optional_jwt_auth_middleware, require_auth,
};

// Re-export server types
pub use server::{
    HealthResponse, Probe, ProbeState, ReadinessReport, create_router, health_router, serve,
    shutdown_signal,
};

// Re-export HTTP middleware
pub use http::{cors_layer_from_env, create_cors_layer, security_headers};

// Re-export error and envelope types
pub use errors::{AppError, ErrorCode};
pub use response::{ApiResponse, EmptyApiResponse, ErrorDetails};

// Re-export extractors
pub use extractors::{IdPath, ValidatedJson};
