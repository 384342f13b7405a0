use super::shutdown::shutdown_signal;
use crate::errors::handlers::not_found;
use crate::http::{cors_layer_from_env, security_headers};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable as _};
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// Wrap the versioned API routes with docs, the `/api` prefix and the
/// cross-cutting layers.
///
/// `apis` must already carry its state. Docs are served at
/// [`OPENAPI_JSON`], `/swagger-ui`, `/redoc`, `/rapidoc` and `/scalar`.
/// Unknown paths get the `ROUTE_NOT_FOUND` envelope.
///
/// Fails when `CORS_ALLOWED_ORIGIN` is missing or malformed.
pub fn create_router<T>(apis: Router) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let doc = T::openapi();
    let cors = cors_layer_from_env()?;

    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Ok(Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url(OPENAPI_JSON, doc.clone()))
        .merge(Redoc::with_url("/redoc", doc.clone()))
        .merge(RapiDoc::new(OPENAPI_JSON).path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", doc))
        .nest("/api", apis)
        .fallback(not_found)
        .layer(trace)
        .layer(middleware::from_fn(security_headers))
        .layer(cors)
        .layer(CompressionLayer::new()))
}

/// Serve `router` until SIGINT/SIGTERM, then run `cleanup` for at most
/// `cleanup_timeout`.
///
/// In-flight requests are drained before `cleanup` starts, so it is the
/// place to close the database pool.
pub async fn serve<F>(
    router: Router,
    server_config: &ServerConfig,
    cleanup_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!(address = %listener.local_addr()?, "Listening");

    let served = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await;
    if let Err(e) = &served {
        tracing::error!(error = %e, "Server stopped with an error");
    }

    if tokio::time::timeout(cleanup_timeout, cleanup).await.is_err() {
        warn!(timeout = ?cleanup_timeout, "Cleanup did not finish in time");
    }

    served
}
