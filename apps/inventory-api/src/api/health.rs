//! Readiness check backed by a database ping

use axum::extract::State;
use axum_helpers::server::{Probe, ReadinessReport};

use crate::state::AppState;

pub async fn ready_handler(State(state): State<AppState>) -> ReadinessReport {
    let database: Probe<'_> = Box::pin(async {
        database::postgres::check_health(&state.db)
            .await
            .map_err(|e| e.to_string())
    });

    ReadinessReport::collect(vec![("database", database)]).await
}
