//! Domain types for the workout planning service.
//!
//! Pure data and logic only: no database or HTTP dependencies live here.

pub mod error;
pub mod plan;
pub mod profile;
pub mod schema;
pub mod types;
pub mod weekday;
