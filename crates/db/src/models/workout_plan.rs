//! Saved workout plan model and DTOs.

use fitplan_core::plan::WeeklyWorkoutPlan;
use fitplan_core::profile::ProfileRecord;
use fitplan_core::types::{DbId, Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `workout_plans` table.
///
/// Both JSONB columns are decoded straight into their domain types.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkoutPlan {
    pub id: DbId,
    pub user_id: UserId,
    #[sqlx(json)]
    pub profile_form_data: ProfileRecord,
    #[sqlx(json)]
    pub generated_workout_plan: WeeklyWorkoutPlan,
    pub created_at: Timestamp,
}

/// DTO for inserting a new saved plan.
#[derive(Debug, Clone)]
pub struct CreateWorkoutPlan {
    pub user_id: UserId,
    pub profile_form_data: ProfileRecord,
    pub generated_workout_plan: WeeklyWorkoutPlan,
}
