//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod workout_plan_repo;

pub use workout_plan_repo::WorkoutPlanRepo;
