#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use fitplan_api::auth::jwt::{generate_session_token, JwtSessionVerifier, SessionJwtConfig};
use fitplan_api::config::ServerConfig;
use fitplan_api::router::build_app_router;
use fitplan_api::state::AppState;
use fitplan_llm::{
    CompletionConfig, CompletionError, CompletionProvider, CompletionRequest, WorkoutPlanGenerator,
};

pub const COOKIE_NAME: &str = "sb-access-token";

pub fn session_config() -> SessionJwtConfig {
    SessionJwtConfig {
        secret: "integration-test-secret-long-enough".to_string(),
        audience: "authenticated".to_string(),
        cookie_name: COOKIE_NAME.to_string(),
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        enforce_rest_days: false,
        session: session_config(),
        completion: CompletionConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            api_key: "unused".to_string(),
            model: "test/model".to_string(),
            timeout_secs: 5,
        },
    }
}

/// A signed session token for `user_id`, valid for an hour.
pub fn session_token(user_id: Uuid) -> String {
    generate_session_token(user_id, Some("athlete@example.com"), 3600, &session_config())
        .expect("token generation should succeed")
}

/// [`CompletionProvider`] that answers every request with the same content
/// and counts how often it was asked.
pub struct FakeCompletion {
    content: Option<String>,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeCompletion {
    pub fn answering(content: Option<&str>) -> Arc<Self> {
        Arc::new(Self {
            content: content.map(str::to_string),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionProvider for FakeCompletion {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<Option<String>, CompletionError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.content.clone())
    }
}

/// Build the full application router around the given pool and completion
/// provider, using the same builder as `main.rs`.
pub fn build_test_app(pool: PgPool, completion: Arc<FakeCompletion>) -> Router {
    build_test_app_with_config(pool, completion, test_config())
}

/// Same as [`build_test_app`] with a caller-supplied configuration.
pub fn build_test_app_with_config(
    pool: PgPool,
    completion: Arc<FakeCompletion>,
    config: ServerConfig,
) -> Router {
    let plan_generator = WorkoutPlanGenerator::new(completion, config.completion.model.clone())
        .enforce_rest_days(config.enforce_rest_days);

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        session_verifier: Arc::new(JwtSessionVerifier::new(config.session.clone())),
        plan_generator,
    };

    build_app_router(state, &config)
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_cookie(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, format!("theme=dark; {COOKIE_NAME}={token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_raw_auth(app: Router, uri: &str, body: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_text_auth(app: Router, uri: &str, body: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "text/plain")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}
