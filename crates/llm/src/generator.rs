//! Workout plan generation: prompt, one completion call, schema validation.

use std::sync::Arc;

use fitplan_core::plan::WeeklyWorkoutPlan;
use fitplan_core::profile::{ProfileRecord, SessionDuration};
use fitplan_core::weekday::Weekday;
use serde_json::Value;

use crate::prompt::workout_plan_request;
use crate::provider::{CompletionError, CompletionProvider};

/// Ways a generation attempt can fail. All are terminal for the request.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The completion call itself failed.
    #[error("Completion service failure: {0}")]
    Upstream(#[from] CompletionError),

    /// The service answered without any content.
    #[error("Completion response content is empty")]
    EmptyResponse,

    /// The content is not JSON matching the plan schema.
    #[error("Completion content does not match the plan schema: {0}")]
    InvalidPlan(#[source] serde_json::Error),

    /// Sessions were scheduled on days the user did not mark available.
    #[error("Plan schedules sessions on rest days: {days:?}")]
    RestDayViolation { days: Vec<Weekday> },
}

/// Generates validated plans through an injected [`CompletionProvider`].
#[derive(Clone)]
pub struct WorkoutPlanGenerator {
    provider: Arc<dyn CompletionProvider>,
    model: String,
    enforce_rest_days: bool,
}

impl WorkoutPlanGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            enforce_rest_days: false,
        }
    }

    /// Reject plans that schedule sessions outside the profile's
    /// `availableDays` instead of only logging them.
    pub fn enforce_rest_days(mut self, enforce: bool) -> Self {
        self.enforce_rest_days = enforce;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate a plan for an arbitrary profile payload.
    ///
    /// The payload is forwarded as-is. It is additionally read as a
    /// [`ProfileRecord`] when it fits, to check the plan against the
    /// user's available days.
    pub async fn generate(&self, payload: &Value) -> Result<WeeklyWorkoutPlan, GenerationError> {
        let request = workout_plan_request(&self.model, payload);

        let content = self
            .provider
            .complete(&request)
            .await?
            .filter(|content| !content.trim().is_empty())
            .ok_or(GenerationError::EmptyResponse)?;

        let plan =
            WeeklyWorkoutPlan::from_json_str(&content).map_err(GenerationError::InvalidPlan)?;

        let profile = ProfileRecord::from_payload(payload);
        if let Some(profile) = &profile {
            let violations = plan.rest_day_violations(profile);
            if !violations.is_empty() {
                let days: Vec<Weekday> = violations.iter().map(|v| v.day).collect();
                tracing::warn!(?days, enforce = self.enforce_rest_days, "Generated plan uses rest days");
                if self.enforce_rest_days {
                    return Err(GenerationError::RestDayViolation { days });
                }
            }
        }

        let session_minutes = profile
            .as_ref()
            .and_then(|p| p.session_duration)
            .map(SessionDuration::minutes);
        tracing::info!(
            plan = %plan.workout_plan_name,
            sessions = plan.sessions.len(),
            exercises = plan.exercise_count(),
            session_minutes,
            "Workout plan generated"
        );

        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::provider::CompletionRequest;

    /// Replays a canned answer and keeps every request it saw.
    struct CannedProvider {
        answer: Mutex<Option<Result<Option<String>, CompletionError>>>,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    impl CannedProvider {
        fn new(answer: Result<Option<String>, CompletionError>) -> Arc<Self> {
            Arc::new(Self {
                answer: Mutex::new(Some(answer)),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CompletionProvider for CannedProvider {
        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<Option<String>, CompletionError> {
            self.seen.lock().unwrap().push(request.clone());
            self.answer
                .lock()
                .unwrap()
                .take()
                .expect("provider called more than once")
        }
    }

    fn two_day_plan() -> String {
        json!({
            "workoutPlanName": "Starter",
            "sessions": [
                { "day": "Monday", "dayName": "Full Body", "exercises": [
                    { "name": "Goblet Squat", "description": null, "sets": 3, "repetitions": 12 }
                ]},
                { "day": "Wednesday", "dayName": "Cardio", "exercises": [
                    { "name": "Rowing", "description": "Steady pace", "sets": 1, "repetitions": 1 }
                ]}
            ],
            "notes": null
        })
        .to_string()
    }

    fn beginner_payload() -> Value {
        json!({
            "experience": "beginner",
            "goal": "Weight Loss",
            "availableDays": ["Monday", "Wednesday"],
            "sessionDuration": "45"
        })
    }

    #[tokio::test]
    async fn valid_content_becomes_a_plan() {
        let provider = CannedProvider::new(Ok(Some(two_day_plan())));
        let generator = WorkoutPlanGenerator::new(provider.clone(), "test-model");

        let plan = generator.generate(&beginner_payload()).await.unwrap();

        assert_eq!(plan.workout_plan_name, "Starter");
        assert_eq!(plan.sessions.len(), 2);
        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].model, "test-model");
    }

    #[tokio::test]
    async fn missing_content_is_empty_response() {
        for answer in [None, Some(String::new()), Some("  \n".to_string())] {
            let generator = WorkoutPlanGenerator::new(CannedProvider::new(Ok(answer)), "m");
            let err = generator.generate(&json!({})).await.unwrap_err();
            assert_matches!(err, GenerationError::EmptyResponse);
        }
    }

    #[tokio::test]
    async fn non_json_content_is_invalid_plan() {
        let provider = CannedProvider::new(Ok(Some("Here is your plan: ...".to_string())));
        let generator = WorkoutPlanGenerator::new(provider, "m");

        let err = generator.generate(&json!({})).await.unwrap_err();
        assert_matches!(err, GenerationError::InvalidPlan(_));
    }

    #[tokio::test]
    async fn schema_mismatch_is_invalid_plan() {
        let content = json!({ "workoutPlanName": "x", "sessions": [{ "day": "Someday" }] });
        let provider = CannedProvider::new(Ok(Some(content.to_string())));
        let generator = WorkoutPlanGenerator::new(provider, "m");

        let err = generator.generate(&json!({})).await.unwrap_err();
        assert_matches!(err, GenerationError::InvalidPlan(_));
    }

    #[tokio::test]
    async fn upstream_error_is_propagated() {
        let provider = CannedProvider::new(Err(CompletionError::ApiError {
            status: 502,
            body: "bad gateway".to_string(),
        }));
        let generator = WorkoutPlanGenerator::new(provider, "m");

        let err = generator.generate(&json!({})).await.unwrap_err();
        assert_matches!(
            err,
            GenerationError::Upstream(CompletionError::ApiError { status: 502, .. })
        );
    }

    #[tokio::test]
    async fn rest_day_sessions_are_tolerated_by_default() {
        let payload = json!({ "availableDays": ["Monday"] });
        let generator =
            WorkoutPlanGenerator::new(CannedProvider::new(Ok(Some(two_day_plan()))), "m");

        let plan = generator.generate(&payload).await.unwrap();
        assert_eq!(plan.sessions.len(), 2);
    }

    #[tokio::test]
    async fn rest_day_sessions_are_rejected_when_enforced() {
        let payload = json!({ "availableDays": ["Monday"] });
        let generator =
            WorkoutPlanGenerator::new(CannedProvider::new(Ok(Some(two_day_plan()))), "m")
                .enforce_rest_days(true);

        let err = generator.generate(&payload).await.unwrap_err();
        assert_matches!(err, GenerationError::RestDayViolation { ref days } if days == &vec![Weekday::Wednesday]);
    }

    #[tokio::test]
    async fn enforcement_skips_payloads_that_do_not_fit_the_profile() {
        let payload = json!({ "availableDays": "weekends" });
        let generator =
            WorkoutPlanGenerator::new(CannedProvider::new(Ok(Some(two_day_plan()))), "m")
                .enforce_rest_days(true);

        assert!(generator.generate(&payload).await.is_ok());
    }
}
