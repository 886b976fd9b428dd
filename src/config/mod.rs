//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `INTERVIEW_ANALYST` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use interview_analyst::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Analysis API at {}", config.api.base_url);
//! ```

mod api;
mod editor;
mod error;
mod logging;

pub use api::{ApiConfig, MAX_TIMEOUT_SECS};
pub use editor::EditorConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;

use serde::Deserialize;

/// Settings for the CLI and the HTTP client.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Remote analysis service
    pub api: ApiConfig,

    /// Tracing output
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Defaults for items added from the editor
    #[serde(default)]
    pub editor: EditorConfig,
}

impl AppConfig {
    /// Reads `.env` (if present) and then `INTERVIEW_ANALYST__*` variables.
    ///
    /// `__` separates nesting levels, so `INTERVIEW_ANALYST__API__BASE_URL`
    /// sets `api.base_url` and `INTERVIEW_ANALYST__LOGGING__JSON=true` sets
    /// `logging.json`. Missing sections fall back to their defaults; a missing
    /// `api.base_url` is a load error.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("INTERVIEW_ANALYST")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Checks every section; loading alone only checks types.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.api.validate()?;
        self.logging.validate()?;
        self.editor.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 5] = [
        "INTERVIEW_ANALYST__API__BASE_URL",
        "INTERVIEW_ANALYST__API__TIMEOUT_SECS",
        "INTERVIEW_ANALYST__LOGGING__JSON",
        "INTERVIEW_ANALYST__EDITOR__STRENGTH_PREFIX",
        "INTERVIEW_ANALYST__EDITOR__USE_COUNTER",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("INTERVIEW_ANALYST__API__BASE_URL", "https://analysis.example.com");
        env::set_var("INTERVIEW_ANALYST__API__TIMEOUT_SECS", "30");
        env::set_var("INTERVIEW_ANALYST__LOGGING__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.api.base_url, "https://analysis.example.com");
        assert_eq!(config.api.timeout_secs, 30);
        assert!(config.logging.json);
        assert_eq!(config.editor.strength_prefix, "New Strength");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_editor_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("INTERVIEW_ANALYST__API__BASE_URL", "http://localhost:8000");
        env::set_var("INTERVIEW_ANALYST__EDITOR__STRENGTH_PREFIX", "Strength");
        env::set_var("INTERVIEW_ANALYST__EDITOR__USE_COUNTER", "false");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.editor.strength_prefix, "Strength");
        assert!(!config.editor.use_counter);
    }

    #[test]
    fn test_missing_base_url_fails() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_err());
    }

    #[test]
    fn test_validate_catches_bad_url() {
        let config = AppConfig {
            api: ApiConfig::new("analysis.example.com"),
            logging: LoggingConfig::default(),
            editor: EditorConfig::default(),
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidApiUrl)));
    }
}
