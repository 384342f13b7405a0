use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use core_config::AppInfo;
use futures::future::join_all;
use serde::Serialize;
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use utoipa::ToSchema;

/// Liveness payload served at `/health`
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

/// One readiness dependency probe; `Err` carries the reason it is down
pub type Probe<'a> = Pin<Box<dyn Future<Output = Result<(), String>> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeState {
    Up,
    Down,
}

/// Aggregated probe results; 200 when every probe is up, 503 otherwise
#[derive(Debug, Serialize)]
pub struct ReadinessReport {
    pub ready: bool,
    pub checks: BTreeMap<&'static str, ProbeState>,
}

impl ReadinessReport {
    /// Run every probe concurrently.
    pub async fn collect(probes: Vec<(&'static str, Probe<'_>)>) -> Self {
        let (names, futures): (Vec<_>, Vec<_>) = probes.into_iter().unzip();
        let outcomes = join_all(futures).await;

        let checks: BTreeMap<_, _> = names
            .into_iter()
            .zip(outcomes)
            .map(|(name, outcome)| match outcome {
                Ok(()) => (name, ProbeState::Up),
                Err(reason) => {
                    tracing::warn!(probe = name, %reason, "Readiness probe failed");
                    (name, ProbeState::Down)
                }
            })
            .collect();

        Self {
            ready: checks.values().all(|state| *state == ProbeState::Up),
            checks,
        }
    }
}

impl IntoResponse for ReadinessReport {
    fn into_response(self) -> Response {
        let status = if self.ready {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };
        (status, Json(self)).into_response()
    }
}

async fn health_handler(State(app): State<AppInfo>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        name: app.name,
        version: app.version,
    })
}

/// `/health` liveness route; answers 200 whenever the process is serving
pub fn health_router(app_info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app_info)
}
