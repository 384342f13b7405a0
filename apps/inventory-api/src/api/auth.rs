//! Auth routes

use axum::Router;
use domain_users::{Argon2Hasher, AuthService, PgUserRepository, handlers};
use std::sync::Arc;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = PgUserRepository::new(state.db.clone());
    let service = AuthService::new(
        repository,
        Arc::new(Argon2Hasher),
        Arc::new(state.jwt_auth.clone()),
    );
    handlers::router(service)
}
