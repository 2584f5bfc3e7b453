//! User profile submitted through the intake form.
//!
//! Every field is optional: the form can be submitted partially filled in.
//! Single-field ranges mirror the form's own constraints and are checked
//! with [`validator`] when a profile is persisted.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::weekday::Weekday;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Experience {
    Beginner,
    Intermediate,
    Advanced,
}

/// Session length bucket in minutes. Serialized as a string (`"45"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionDuration {
    #[serde(rename = "30")]
    Minutes30,
    #[serde(rename = "45")]
    Minutes45,
    #[serde(rename = "60")]
    Minutes60,
    #[serde(rename = "75")]
    Minutes75,
    #[serde(rename = "90")]
    Minutes90,
}

impl SessionDuration {
    pub fn minutes(self) -> u32 {
        match self {
            SessionDuration::Minutes30 => 30,
            SessionDuration::Minutes45 => 45,
            SessionDuration::Minutes60 => 60,
            SessionDuration::Minutes75 => 75,
            SessionDuration::Minutes90 => 90,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    Strength,
    Cardio,
    Hiit,
    Flexibility,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementUnits {
    Metric,
    Imperial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

/// Fitness preferences and constraints for one user.
///
/// Field names follow the intake form's camelCase keys. Unknown keys are
/// ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub experience: Option<Experience>,
    /// Free text; the form offers a fixed list but any string is accepted.
    pub goal: Option<String>,
    pub available_days: Option<Vec<Weekday>>,
    pub session_duration: Option<SessionDuration>,
    pub exercise_type: Option<ExerciseType>,
    pub equipment: Option<Vec<String>>,
    pub injuries_and_notes: Option<String>,

    #[validate(range(min = 1))]
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub measurement_units: Option<MeasurementUnits>,
    #[validate(range(min = 1.0))]
    pub height: Option<f64>,
    #[validate(range(min = 1.0))]
    pub weight: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub body_fat: Option<f64>,
    #[validate(range(min = 1))]
    pub max_sessions_per_week: Option<u32>,
    pub time_of_day: Option<TimeOfDay>,
    pub injuries: Option<String>,
    pub notes: Option<String>,
}

impl ProfileRecord {
    /// Best-effort typed view of an arbitrary generation payload.
    ///
    /// Returns `None` when the payload does not fit the record's types; the
    /// payload itself is still forwarded untouched in that case.
    pub fn from_payload(payload: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(payload.clone()).ok()
    }

    /// Check the single-field ranges, flattening all violations into one
    /// [`CoreError::Validation`] message.
    pub fn check_ranges(&self) -> Result<(), CoreError> {
        self.validate().map_err(|errors| {
            let mut fields: Vec<String> = errors
                .field_errors()
                .keys()
                .map(|field| wire_name(field))
                .collect();
            fields.sort();
            CoreError::Validation(format!(
                "Profile fields out of range: {}",
                fields.join(", ")
            ))
        })
    }

    /// The days the user marked as available, or an empty slice.
    pub fn available_days(&self) -> &[Weekday] {
        self.available_days.as_deref().unwrap_or(&[])
    }
}

/// Field name as the client sent it (`body_fat` -> `bodyFat`).
fn wire_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            name.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            name.push(c);
        }
    }
    name
}
