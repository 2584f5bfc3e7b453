use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fitplan_core::error::CoreError;
use fitplan_llm::GenerationError;
use serde_json::json;

/// Generic message for every server-side failure. Details go to the log only.
const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `fitplan_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Plan generation failed (completion service, empty answer, bad schema).
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// The request body could not be read as the expected JSON.
    #[error(transparent)]
    JsonBody(#[from] JsonRejection),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("No {entity} found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Plan generation ---
            AppError::Generation(err) => classify_generation_error(err),

            // --- HTTP-specific errors ---
            AppError::JsonBody(rejection) => classify_json_rejection(rejection),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal(code: &'static str) -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        code,
        INTERNAL_MESSAGE.to_string(),
    )
}

/// Bodies that are not JSON, or JSON of the wrong shape, are 400. A missing
/// `Content-Type: application/json` keeps its 415.
fn classify_json_rejection(rejection: &JsonRejection) -> (StatusCode, &'static str, String) {
    let status = match rejection {
        JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
            StatusCode::BAD_REQUEST
        }
        other => other.status(),
    };
    (status, "INVALID_BODY", rejection.body_text())
}

/// Every generation failure is a 500; the code tells them apart.
fn classify_generation_error(err: &GenerationError) -> (StatusCode, &'static str, String) {
    tracing::error!(error = %err, "Workout plan generation failed");
    let code = match err {
        GenerationError::Upstream(_) => "UPSTREAM_FAILURE",
        GenerationError::EmptyResponse => "EMPTY_RESPONSE",
        GenerationError::InvalidPlan(_) | GenerationError::RestDayViolation { .. } => {
            "PLAN_VALIDATION_FAILED"
        }
    };
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        code,
        "Failed to generate workout plan".to_string(),
    )
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            internal("INTERNAL_ERROR")
        }
    }
}

#[cfg(test)]
mod tests {
    use fitplan_llm::CompletionError;
    use http_body_util::BodyExt;

    use super::*;

    async fn status_and_body(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn unauthorized_maps_to_401() {
        let (status, body) =
            status_and_body(CoreError::Unauthorized("Missing session".into()).into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");
        assert_eq!(body["error"], "Missing session");
    }

    #[tokio::test]
    async fn generation_failures_hide_details() {
        let cases = [
            (
                GenerationError::Upstream(CompletionError::ApiError {
                    status: 401,
                    body: "invalid api key sk-live-123".into(),
                }),
                "UPSTREAM_FAILURE",
            ),
            (GenerationError::EmptyResponse, "EMPTY_RESPONSE"),
            (
                GenerationError::InvalidPlan(serde_json::from_str::<u8>("x").unwrap_err()),
                "PLAN_VALIDATION_FAILED",
            ),
        ];

        for (err, code) in cases {
            let (status, body) = status_and_body(err.into()).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body["code"], code);
            assert_eq!(body["error"], "Failed to generate workout plan");
            assert!(!body.to_string().contains("sk-live"));
        }
    }

    #[tokio::test]
    async fn database_errors_are_sanitized() {
        let (status, body) = status_and_body(sqlx::Error::PoolTimedOut.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], INTERNAL_MESSAGE);
    }

    #[tokio::test]
    async fn every_core_error_is_a_client_error() {
        let cases = [
            CoreError::NotFound { entity: "workout plan" },
            CoreError::Validation("Profile fields out of range: age".into()),
            CoreError::Unauthorized("Missing session".into()),
        ];

        for err in cases {
            let (status, body) = status_and_body(err.into()).await;
            assert!(status.is_client_error());
            assert_ne!(body["error"], INTERNAL_MESSAGE);
        }
    }

    #[tokio::test]
    async fn not_found_names_entity() {
        let (status, body) =
            status_and_body(CoreError::NotFound { entity: "workout plan" }.into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "No workout plan found");
    }
}
