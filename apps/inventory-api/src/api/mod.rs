//! API routes module

pub mod auth;
pub mod health;
pub mod inventory;

use axum::{Router, middleware};
use axum_helpers::{optional_jwt_auth_middleware, require_auth};

use crate::state::AppState;

/// Versioned API routes; `create_router` adds the `/api` prefix.
///
/// Every route sees the identity attached by the JWT middleware; products,
/// inventories and reports additionally reject anonymous callers.
pub fn routes(state: &AppState) -> Router {
    let protected = Router::new()
        .nest("/products", inventory::products_router(state))
        .nest("/inventories", inventory::inventories_router(state))
        .nest("/reports", inventory::reports_router(state))
        .route_layer(middleware::from_fn(require_auth));

    let v1 = Router::new()
        .nest("/auth", auth::router(state))
        .merge(protected)
        .layer(middleware::from_fn_with_state(
            state.jwt_auth.clone(),
            optional_jwt_auth_middleware,
        ));

    Router::new().nest("/v1", v1)
}

/// `/ready`, answering 503 while the database cannot be reached
pub fn ready_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
