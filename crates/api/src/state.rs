use std::sync::Arc;

use fitplan_llm::WorkoutPlanGenerator;

use crate::auth::SessionVerifier;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// External capabilities (session verification, plan generation) are
/// injected here rather than constructed per request.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: fitplan_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Identity provider session verification.
    pub session_verifier: Arc<dyn SessionVerifier>,
    /// Plan generation through the completion service.
    pub plan_generator: WorkoutPlanGenerator,
}
