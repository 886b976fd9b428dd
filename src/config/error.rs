//! Configuration errors

use thiserror::Error;

/// Failure to build `AppConfig`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// A loaded value that fails its checks
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("INTERVIEW_ANALYST__{0} is required")]
    MissingRequired(&'static str),

    #[error("Invalid API base URL: must start with http:// or https://")]
    InvalidApiUrl,

    #[error("Invalid request timeout: must be between 1 and 600 seconds")]
    InvalidTimeout,

    #[error("Invalid log filter '{0}'")]
    InvalidLogFilter(String),

    #[error("Editor prefix '{0}' cannot be empty")]
    EmptyEditorPrefix(&'static str),
}
