//! Request handlers.
//!
//! Handlers delegate to the plan generator or the corresponding repository
//! in `fitplan_db` and map errors via [`AppError`](crate::error::AppError).

pub mod workout_plan;
