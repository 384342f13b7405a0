//! JWT configuration loaded through `core_config::FromEnv`.

use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or, env_required};

const MIN_SECRET_LEN: usize = 32;
const DEFAULT_ISSUER: &str = "inventory-api";
const DEFAULT_AUDIENCE: &str = "inventory-api";
const DEFAULT_TTL_SECS: i64 = 3600;

/// JWT authentication configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required) - Must be at least 32 characters
/// - `JWT_ISSUER` (default: "inventory-api")
/// - `JWT_AUDIENCE` (default: "inventory-api")
/// - `JWT_TTL_SECS` (default: 3600)
///
/// # Example
///
/// ```ignore
/// use axum_helpers::JwtConfig;
/// use core_config::FromEnv;
///
/// let config = JwtConfig::from_env()?;
///
/// // Manual construction (for testing)
/// let config = JwtConfig::new("my-super-secret-key-that-is-at-least-32-chars")?;
/// ```
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// JWT signing secret (minimum 32 characters)
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    /// Token lifetime in seconds
    pub ttl_secs: i64,
}

impl JwtConfig {
    /// Create a config with default issuer, audience and lifetime.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = validate_secret(secret.into())?;
        Ok(Self {
            secret,
            issuer: DEFAULT_ISSUER.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
            ttl_secs: DEFAULT_TTL_SECS,
        })
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    pub fn with_ttl_secs(mut self, ttl_secs: i64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }
}

fn validate_secret(secret: String) -> Result<String, ConfigError> {
    if secret.len() < MIN_SECRET_LEN {
        return Err(ConfigError::ParseError {
            key: "JWT_SECRET".to_string(),
            details: format!(
                "must be at least {} characters for security (got {}). Generate one with: openssl rand -base64 32",
                MIN_SECRET_LEN,
                secret.len()
            ),
        });
    }
    Ok(secret)
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = validate_secret(env_required("JWT_SECRET")?)?;
        let ttl_secs = env_parse_or("JWT_TTL_SECS", DEFAULT_TTL_SECS)?;

        if ttl_secs <= 0 {
            return Err(ConfigError::ParseError {
                key: "JWT_TTL_SECS".to_string(),
                details: "must be positive".to_string(),
            });
        }

        Ok(Self {
            secret,
            issuer: env_or_default("JWT_ISSUER", DEFAULT_ISSUER),
            audience: env_or_default("JWT_AUDIENCE", DEFAULT_AUDIENCE),
            ttl_secs,
        })
    }
}
