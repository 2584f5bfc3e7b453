//! Handlers for the `/workout-plans` resource (generate, save, latest).
//!
//! Every handler takes [`AuthUser`] first, so a request without a valid
//! session is rejected before the body is read and before any call to the
//! completion service or the database.

use axum::extract::State;
use axum::Json;
use fitplan_core::error::CoreError;
use fitplan_core::plan::WeeklyWorkoutPlan;
use fitplan_core::profile::ProfileRecord;
use fitplan_core::types::Timestamp;
use fitplan_db::models::workout_plan::{CreateWorkoutPlan, WorkoutPlan};
use fitplan_db::repositories::WorkoutPlanRepo;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /workout-plans`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveWorkoutPlanRequest {
    #[serde(default)]
    pub profile_form_data: ProfileRecord,
    pub workout_plan: WeeklyWorkoutPlan,
}

/// Response for `POST /workout-plans`, echoing the inserted row.
#[derive(Debug, Serialize)]
pub struct SaveWorkoutPlanResponse {
    pub message: &'static str,
    pub data: WorkoutPlan,
}

/// The user's most recent profile and plan.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestWorkoutPlan {
    pub profile_data: ProfileRecord,
    pub workout_plan: WeeklyWorkoutPlan,
    pub created_at: Timestamp,
}

impl From<WorkoutPlan> for LatestWorkoutPlan {
    fn from(row: WorkoutPlan) -> Self {
        Self {
            profile_data: row.profile_form_data,
            workout_plan: row.generated_workout_plan,
            created_at: row.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/workout-plans/generate
///
/// Forward the profile payload to the completion service and return the
/// validated plan. Nothing is persisted.
pub async fn generate(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<Value>,
) -> AppResult<Json<WeeklyWorkoutPlan>> {
    tracing::info!(user_id = %user.user_id, model = %state.plan_generator.model(), "Generating workout plan");

    let plan = state.plan_generator.generate(&payload).await?;

    Ok(Json(plan))
}

/// POST /api/v1/workout-plans
///
/// Persist a profile together with the plan generated from it.
pub async fn save(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<SaveWorkoutPlanRequest>,
) -> AppResult<Json<SaveWorkoutPlanResponse>> {
    input.profile_form_data.check_ranges()?;

    let create = CreateWorkoutPlan {
        user_id: user.user_id,
        profile_form_data: input.profile_form_data,
        generated_workout_plan: input.workout_plan,
    };
    let row = WorkoutPlanRepo::create(&state.pool, &create).await?;

    tracing::info!(
        user_id = %user.user_id,
        plan_id = row.id,
        plan = %row.generated_workout_plan.workout_plan_name,
        "Workout plan saved",
    );

    Ok(Json(SaveWorkoutPlanResponse {
        message: "Workout Plan saved",
        data: row,
    }))
}

/// GET /api/v1/workout-plans/latest
///
/// Return the most recently saved profile and plan. 404 if none exists.
pub async fn latest(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<LatestWorkoutPlan>>> {
    let row = WorkoutPlanRepo::find_latest_for_user(&state.pool, user.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "workout plan",
        })?;

    Ok(Json(DataResponse { data: row.into() }))
}
