use fitplan_llm::CompletionConfig;

use crate::auth::jwt::SessionJwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except secrets have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `90`). Must exceed the
    /// completion timeout, since generation waits on the model.
    pub request_timeout_secs: u64,
    /// Reject generated plans that schedule sessions on rest days
    /// (default: `false`, violations are only logged).
    pub enforce_rest_days: bool,
    /// Identity provider session token settings.
    pub session: SessionJwtConfig,
    /// Completion service settings.
    pub completion: CompletionConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `90`                       |
    /// | `ENFORCE_REST_DAYS`    | `false`                    |
    ///
    /// See [`SessionJwtConfig::from_env`] and [`CompletionConfig::from_env`]
    /// for the remaining variables.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "90".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let enforce_rest_days: bool = std::env::var("ENFORCE_REST_DAYS")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("ENFORCE_REST_DAYS must be `true` or `false`");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            enforce_rest_days,
            session: SessionJwtConfig::from_env(),
            completion: CompletionConfig::from_env(),
        }
    }
}
