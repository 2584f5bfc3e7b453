//! Prompt construction for plan generation.

use fitplan_core::schema::{weekly_workout_plan_schema, PLAN_SCHEMA_NAME};
use serde_json::Value;

use crate::provider::{ChatMessage, CompletionRequest, JsonSchemaFormat, ResponseFormat};

/// Fixed system instruction sent ahead of every profile. The dashes are U+2014.
pub const SYSTEM_INSTRUCTION: &str = "Using the provided user data\u{2014}including fitness \
level, goals, available equipment, and desired workout frequency\u{2014}create a detailed \
weekly workout plan. The plan should outline daily exercise routines with specific sets, reps, \
and rest intervals, include modifications for different fitness levels, and do not create any \
sessions on designated rest days.";

/// Build the two-message request: the fixed instruction, then the profile
/// payload serialized as compact JSON, exactly as received.
pub fn workout_plan_request(model: &str, profile_payload: &Value) -> CompletionRequest {
    CompletionRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(SYSTEM_INSTRUCTION),
            ChatMessage::user(profile_payload.to_string()),
        ],
        response_format: Some(ResponseFormat::JsonSchema {
            json_schema: JsonSchemaFormat {
                name: PLAN_SCHEMA_NAME.to_string(),
                strict: true,
                schema: weekly_workout_plan_schema(),
            },
        }),
    }
}
