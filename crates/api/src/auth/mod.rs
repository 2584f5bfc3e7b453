//! Session verification against the external identity provider.
//!
//! The service never issues sessions itself. Handlers receive an
//! [`Identity`] through the [`AuthUser`](crate::middleware::auth::AuthUser)
//! extractor, which delegates to whatever [`SessionVerifier`] is installed
//! in the application state.
//!
//! - [`jwt`] -- verifier for provider-signed HS256 session tokens.

pub mod jwt;

use async_trait::async_trait;
use fitplan_core::error::CoreError;
use fitplan_core::types::UserId;

/// The authenticated user behind a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub email: Option<String>,
}

/// Capability to turn a session token into an [`Identity`].
///
/// Implementations return [`CoreError::Unauthorized`] for any token that
/// does not represent a valid, current session.
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Identity, CoreError>;
}
