//! Weekly workout plan structure returned by the completion service.

use serde::{Deserialize, Serialize};

use crate::profile::ProfileRecord;
use crate::weekday::Weekday;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyWorkoutPlan {
    pub workout_plan_name: String,
    pub sessions: Vec<DaySession>,
    pub notes: Option<String>,
}

/// One training day. Several sessions may share the same `day`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySession {
    pub day: Weekday,
    /// Free-text label such as "Pull Day".
    pub day_name: String,
    pub exercises: Vec<Exercise>,
}

/// `sets` and `repetitions` carry no range constraint; zero and negative
/// values pass through as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub description: Option<String>,
    pub sets: i64,
    pub repetitions: i64,
}

/// A session scheduled on a day the user did not mark as available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestDayViolation {
    pub day: Weekday,
    pub day_name: String,
}

impl WeeklyWorkoutPlan {
    /// Parse raw completion content and check it against the plan schema.
    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Sessions that fall outside the profile's available days.
    ///
    /// A profile without any available days places no restriction, so the
    /// result is empty in that case.
    pub fn rest_day_violations(&self, profile: &ProfileRecord) -> Vec<RestDayViolation> {
        let available = profile.available_days();
        if available.is_empty() {
            return Vec::new();
        }

        self.sessions
            .iter()
            .filter(|session| !available.contains(&session.day))
            .map(|session| RestDayViolation {
                day: session.day,
                day_name: session.day_name.clone(),
            })
            .collect()
    }

    pub fn exercise_count(&self) -> usize {
        self.sessions.iter().map(|s| s.exercises.len()).sum()
    }
}
