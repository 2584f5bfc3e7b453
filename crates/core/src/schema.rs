//! JSON Schema for [`WeeklyWorkoutPlan`](crate::plan::WeeklyWorkoutPlan),
//! sent to the completion service as a structured-output constraint.
//!
//! Strict structured output requires every property to be listed in
//! `required` and `additionalProperties: false`; optional fields are
//! expressed as nullable instead.

use serde_json::{json, Value};

use crate::weekday::Weekday;

/// Name under which the schema is registered in the response format.
pub const PLAN_SCHEMA_NAME: &str = "workoutPlan";

pub fn weekly_workout_plan_schema() -> Value {
    let days: Vec<&str> = Weekday::ALL.iter().map(|d| d.as_str()).collect();

    json!({
        "type": "object",
        "properties": {
            "workoutPlanName": { "type": "string" },
            "sessions": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "day": { "type": "string", "enum": days },
                        "dayName": { "type": "string" },
                        "exercises": {
                            "type": "array",
                            "items": exercise_schema()
                        }
                    },
                    "required": ["day", "dayName", "exercises"],
                    "additionalProperties": false
                }
            },
            "notes": { "type": ["string", "null"] }
        },
        "required": ["workoutPlanName", "sessions", "notes"],
        "additionalProperties": false
    })
}

fn exercise_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "description": { "type": ["string", "null"] },
            "sets": { "type": "integer" },
            "repetitions": { "type": "integer" }
        },
        "required": ["name", "description", "sets", "repetitions"],
        "additionalProperties": false
    })
}
