//! Repository for the `workout_plans` table.
//!
//! Rows are append-only: there is no update or delete path.

use fitplan_core::types::UserId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::workout_plan::{CreateWorkoutPlan, WorkoutPlan};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, profile_form_data, generated_workout_plan, created_at";

/// Provides data access for saved workout plans.
pub struct WorkoutPlanRepo;

impl WorkoutPlanRepo {
    /// Insert a new plan, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateWorkoutPlan,
    ) -> Result<WorkoutPlan, sqlx::Error> {
        let query = format!(
            "INSERT INTO workout_plans (user_id, profile_form_data, generated_workout_plan)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkoutPlan>(&query)
            .bind(input.user_id)
            .bind(Json(&input.profile_form_data))
            .bind(Json(&input.generated_workout_plan))
            .fetch_one(pool)
            .await
    }

    /// Find the most recently created plan for a user.
    ///
    /// Ties on `created_at` (same transaction timestamp) resolve to the
    /// higher id. Returns `None` if the user has never saved a plan.
    pub async fn find_latest_for_user(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Option<WorkoutPlan>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM workout_plans
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, WorkoutPlan>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Number of plans a user has saved.
    pub async fn count_for_user(pool: &PgPool, user_id: UserId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM workout_plans WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
