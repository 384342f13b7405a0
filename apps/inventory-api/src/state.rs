//! Application state management

use axum_helpers::JwtAuth;
use database::postgres::DatabaseConnection;

/// Shared application state.
///
/// Cloned into routers; the connection pool and signing keys are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: DatabaseConnection,
    /// Issues and verifies session tokens
    pub jwt_auth: JwtAuth,
}
