//! Completion-service integration for workout plan generation.
//!
//! - [`provider`] -- the [`CompletionProvider`] seam and chat request types.
//! - [`client`] -- HTTP client for an OpenAI-compatible chat completion API.
//! - [`prompt`] -- the fixed instruction and message construction.
//! - [`generator`] -- turns a profile payload into a validated plan.

pub mod client;
pub mod generator;
pub mod prompt;
pub mod provider;

pub use client::{ChatCompletionClient, CompletionConfig};
pub use generator::{GenerationError, WorkoutPlanGenerator};
pub use provider::{CompletionError, CompletionProvider, CompletionRequest};
