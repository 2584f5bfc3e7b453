pub mod health;
pub mod workout_plan;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /workout-plans                   save (POST)
/// /workout-plans/generate          generate (POST)
/// /workout-plans/latest            most recent saved plan (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/workout-plans", workout_plan::router())
}
