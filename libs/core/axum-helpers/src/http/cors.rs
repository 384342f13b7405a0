use axum::http::{HeaderName, HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

const ORIGINS_VAR: &str = "CORS_ALLOWED_ORIGIN";

/// CORS for browser clients of the API.
///
/// Credentials are allowed so the `access_token` cookie can be sent;
/// preflight results are cached for an hour.
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::COOKIE,
            HeaderName::from_static("x-csrf-token"),
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(60 * 60))
}

fn invalid(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, msg)
}

/// Comma-separated origins; blank entries are skipped, at least one is required
pub fn parse_allowed_origins(raw: &str) -> io::Result<Vec<HeaderValue>> {
    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|e| invalid(format!("{}: bad origin {:?}: {}", ORIGINS_VAR, origin, e)))
        })
        .collect::<io::Result<Vec<_>>>()?;

    if origins.is_empty() {
        return Err(invalid(format!("{} lists no origins", ORIGINS_VAR)));
    }
    Ok(origins)
}

/// Build the layer from `CORS_ALLOWED_ORIGIN`, which must be set
pub fn cors_layer_from_env() -> io::Result<CorsLayer> {
    let raw = std::env::var(ORIGINS_VAR).map_err(|_| {
        invalid(format!(
            "{} is required, e.g. http://localhost:5173,https://inventory.example.com",
            ORIGINS_VAR
        ))
    })?;

    let origins = parse_allowed_origins(&raw)?;
    tracing::info!(origins = %raw, "CORS origins configured");
    Ok(create_cors_layer(origins))
}
