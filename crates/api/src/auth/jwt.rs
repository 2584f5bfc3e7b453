//! Verification of identity-provider session tokens.
//!
//! The provider signs its access tokens with HS256 using a project secret
//! shared with this service. `sub` carries the user's UUID and `aud` the
//! audience the token was issued for (`authenticated` for signed-in users).

use async_trait::async_trait;
use fitplan_core::error::CoreError;
use fitplan_core::types::UserId;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::{Identity, SessionVerifier};

/// Default audience for signed-in users.
const DEFAULT_AUDIENCE: &str = "authenticated";
/// Default name of the cookie carrying the access token.
const DEFAULT_COOKIE_NAME: &str = "sb-access-token";

/// Claims read from a session token. Unknown claims are ignored.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// Subject -- the identity provider's user id.
    pub sub: UserId,
    pub aud: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Configuration for session token verification.
#[derive(Debug, Clone)]
pub struct SessionJwtConfig {
    /// HMAC-SHA256 secret shared with the identity provider.
    pub secret: String,
    /// Required `aud` claim.
    pub audience: String,
    /// Cookie consulted when no `Authorization` header is present.
    pub cookie_name: String,
}

impl SessionJwtConfig {
    /// Load session configuration from environment variables.
    ///
    /// | Env Var                | Required | Default           |
    /// |------------------------|----------|-------------------|
    /// | `SESSION_JWT_SECRET`   | **yes**  | --                |
    /// | `SESSION_JWT_AUDIENCE` | no       | `authenticated`   |
    /// | `SESSION_COOKIE_NAME`  | no       | `sb-access-token` |
    ///
    /// # Panics
    ///
    /// Panics if `SESSION_JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret = std::env::var("SESSION_JWT_SECRET")
            .expect("SESSION_JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "SESSION_JWT_SECRET must not be empty");

        let audience =
            std::env::var("SESSION_JWT_AUDIENCE").unwrap_or_else(|_| DEFAULT_AUDIENCE.into());
        let cookie_name =
            std::env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| DEFAULT_COOKIE_NAME.into());

        Self {
            secret,
            audience,
            cookie_name,
        }
    }
}

/// Validate and decode a session token, returning the embedded claims.
///
/// Checks the signature, `exp`, and `aud`.
pub fn validate_session_token(
    token: &str,
    config: &SessionJwtConfig,
) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[config.audience.as_str()]);

    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

/// Sign a session token the way the identity provider does.
///
/// Used by local tooling and tests; production tokens come from the provider.
pub fn generate_session_token(
    user_id: UserId,
    email: Option<&str>,
    ttl_secs: i64,
    config: &SessionJwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = SessionClaims {
        sub: user_id,
        aud: config.audience.clone(),
        exp: now + ttl_secs,
        iat: now,
        email: email.map(str::to_string),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// [`SessionVerifier`] that checks tokens locally with the shared secret.
pub struct JwtSessionVerifier {
    config: SessionJwtConfig,
}

impl JwtSessionVerifier {
    pub fn new(config: SessionJwtConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SessionVerifier for JwtSessionVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, CoreError> {
        let claims = validate_session_token(token, &self.config).map_err(|e| {
            tracing::debug!(error = %e, "Session token rejected");
            CoreError::Unauthorized("Invalid or expired session".into())
        })?;

        Ok(Identity {
            user_id: claims.sub,
            email: claims.email,
        })
    }
}
