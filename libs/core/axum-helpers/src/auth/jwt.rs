use super::config::JwtConfig;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,      // Subject (user ID)
    pub username: String, // User name
    pub email: String,    // User email
    pub role: String,     // User role
    pub iss: String,      // Issuer
    pub aud: String,      // Audience
    pub exp: i64,         // Expiration time
    pub iat: i64,         // Issued at
    pub jti: String,      // JWT ID
}

impl JwtClaims {
    /// Parse the subject into a typed user id.
    pub fn subject<T: std::str::FromStr>(&self) -> Option<T> {
        self.sub.parse().ok()
    }
}

/// Identity a token is issued for
#[derive(Debug, Clone)]
pub struct TokenSubject<'a> {
    pub user_id: String,
    pub username: &'a str,
    pub email: &'a str,
    pub role: &'a str,
}

/// Signed token and the instant it stops being valid
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Stateless HS256 JWT issuer and verifier
#[derive(Clone)]
pub struct JwtAuth {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    ttl: Duration,
}

impl JwtAuth {
    /// # Example
    /// ```ignore
    /// use axum_helpers::{JwtAuth, JwtConfig};
    /// use core_config::FromEnv;
    ///
    /// let jwt_auth = JwtAuth::new(&JwtConfig::from_env()?);
    /// ```
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);

        tracing::info!(issuer = %config.issuer, "JWT auth initialized");
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            ttl: Duration::seconds(config.ttl_secs),
        }
    }

    /// Sign a token for `subject` valid for the configured lifetime
    pub fn issue_token(&self, subject: &TokenSubject<'_>) -> eyre::Result<IssuedToken> {
        let now = Utc::now();
        let expires_at = now + self.ttl;

        let claims = JwtClaims {
            sub: subject.user_id.clone(),
            username: subject.username.to_string(),
            email: subject.email.to_string(),
            role: subject.role.to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify JWT signature, expiry, issuer and audience, then decode claims
    pub fn verify_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        let token_data = decode::<JwtClaims>(token, &self.decoding, &self.validation)?;
        Ok(token_data.claims)
    }
}
