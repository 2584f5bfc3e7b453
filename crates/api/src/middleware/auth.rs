//! Session-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use fitplan_core::error::CoreError;
use fitplan_core::types::UserId;

use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved from the request's session token.
///
/// The token is taken from `Authorization: Bearer <token>` when present,
/// otherwise from the configured session cookie. Put this extractor before
/// any body extractor so unauthenticated requests are rejected before the
/// handler does any work:
///
/// ```ignore
/// async fn my_handler(user: AuthUser, AppJson(body): AppJson<Value>) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    pub email: Option<String>,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(parts, &state.config.session.cookie_name)?;

        let identity = state.session_verifier.verify(&token).await?;

        Ok(AuthUser {
            user_id: identity.user_id,
            email: identity.email,
        })
    }
}

/// Locate the session token in the header or, failing that, the cookie.
fn session_token(parts: &Parts, cookie_name: &str) -> Result<String, AppError> {
    if let Some(header) = parts.headers.get(AUTHORIZATION) {
        let value = header.to_str().ok().and_then(|v| v.strip_prefix("Bearer "));
        return value.map(str::to_string).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        });
    }

    CookieJar::from_headers(&parts.headers)
        .get(cookie_name)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Missing session".into())))
}
