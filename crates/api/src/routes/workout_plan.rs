//! Route definitions for the `/workout-plans` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::workout_plan;
use crate::state::AppState;

/// Routes mounted at `/workout-plans`. All require a session.
///
/// ```text
/// POST /           -> save
/// POST /generate   -> generate
/// GET  /latest     -> latest
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(workout_plan::save))
        .route("/generate", post(workout_plan::generate))
        .route("/latest", get(workout_plan::latest))
}
