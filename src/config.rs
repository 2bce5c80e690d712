//! Application configuration loaded from environment variables.
//!
//! The configuration is built once in `main` and passed down explicitly.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL, including the `/api` prefix
    pub api_url: String,
    /// User id sent in the `X-User-Id` header
    pub user_id: String,
    /// Identity stamped on migrated records
    pub owner_marker: String,
    /// Path of the exported local records (JSON array)
    pub local_records_path: String,
    /// Per-request timeout for backend calls
    pub http_timeout_secs: u64,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080/api".to_string(),
            user_id: "test_user".to_string(),
            owner_marker: "test_user".to_string(),
            local_records_path: "data/hiking_records.json".to_string(),
            http_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let user_id = env::var("HIKING_USER_ID")
            .map(|v| v.trim().to_string())
            .map_err(|_| ConfigError::Missing("HIKING_USER_ID"))?;
        if user_id.is_empty() {
            return Err(ConfigError::Missing("HIKING_USER_ID"));
        }

        let http_timeout_secs = match env::var("HIKING_HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid("HIKING_HTTP_TIMEOUT_SECS", raw))?,
            Err(_) => 30,
        };

        Ok(Self {
            api_url: env::var("HIKING_API_URL")
                .unwrap_or_else(|_| "http://localhost:8080/api".to_string()),
            owner_marker: env::var("HIKING_OWNER_MARKER")
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|_| user_id.clone()),
            local_records_path: env::var("HIKING_LOCAL_RECORDS")
                .unwrap_or_else(|_| "data/hiking_records.json".to_string()),
            http_timeout_secs,
            user_id,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
