//! Analysis API configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Maximum accepted request timeout.
pub const MAX_TIMEOUT_SECS: u64 = 600;

/// Remote analysis service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the service (e.g. `https://analysis.example.com/api`)
    pub base_url: String,

    /// Bearer token, if the service requires one
    #[serde(default)]
    pub api_key: Option<Secret<String>>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retries on transient failures
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate API configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("API__BASE_URL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidApiUrl);
        }
        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_timeout() -> u64 {
    120
}

fn default_retries() -> u32 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_config_defaults() {
        let config = ApiConfig::new("https://api.example.com");
        assert_eq!(config.timeout(), Duration::from_secs(120));
        assert_eq!(config.max_retries, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_http_url() {
        let config = ApiConfig::new("ftp://api.example.com");
        assert!(matches!(config.validate(), Err(ValidationError::InvalidApiUrl)));
    }

    #[test]
    fn test_rejects_empty_url() {
        let config = ApiConfig::new("  ");
        assert!(matches!(config.validate(), Err(ValidationError::MissingRequired(_))));
    }

    #[test]
    fn test_timeout_bounds() {
        let zero = ApiConfig {
            timeout_secs: 0,
            ..ApiConfig::new("http://localhost:8000")
        };
        let too_long = ApiConfig {
            timeout_secs: MAX_TIMEOUT_SECS + 1,
            ..ApiConfig::new("http://localhost:8000")
        };
        assert!(matches!(zero.validate(), Err(ValidationError::InvalidTimeout)));
        assert!(matches!(too_long.validate(), Err(ValidationError::InvalidTimeout)));
    }
}
