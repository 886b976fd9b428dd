//! Errors surfaced by the remote analysis API and the snapshot service.

use serde_json::Value;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Fallback shown when nothing more specific can be extracted.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Failure of a call to the analysis API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Connection could not be established or was dropped.
    #[error("network error: {0}")]
    Transport(String),

    /// No response within the configured timeout.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Non-success HTTP status. `body` is the raw response text.
    #[error("API returned status {status}")]
    Status { status: u16, body: String },

    /// Response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Response decoded but violates the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Requested resource does not exist.
    #[error("{0} not found")]
    NotFound(String),
}

impl ApiError {
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport(reason.into())
    }

    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode(reason.into())
    }

    pub fn invalid_response(reason: impl Into<String>) -> Self {
        Self::InvalidResponse(reason.into())
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Whether retrying the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport(_) | ApiError::Timeout { .. } => true,
            ApiError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Human-readable message for display.
    ///
    /// Structured bodies are searched for `message`, then `error`, then
    /// `detail`. A `detail` list of validation entries is joined by their
    /// `msg` fields.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(_) => {
                "Unable to reach the analysis service. Check your connection and try again."
                    .to_string()
            }
            ApiError::Timeout { .. } => {
                "The analysis service took too long to respond. Please try again.".to_string()
            }
            ApiError::Status { status, body } => extract_body_message(body)
                .unwrap_or_else(|| match status {
                    401 | 403 => "You are not authorized to perform this action.".to_string(),
                    404 => "The requested resource was not found.".to_string(),
                    _ => GENERIC_ERROR_MESSAGE.to_string(),
                }),
            ApiError::Decode(_) | ApiError::InvalidResponse(_) => {
                "The analysis service returned an unexpected response.".to_string()
            }
            ApiError::NotFound(what) => format!("{} not found.", what),
        }
    }
}

fn extract_body_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error", "detail"]
        .iter()
        .find_map(|key| value.get(key).and_then(message_from_value))
}

fn message_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Object(map) => ["message", "msg"]
            .iter()
            .find_map(|key| map.get(*key).and_then(message_from_value)),
        Value::Array(entries) => {
            let parts: Vec<String> = entries.iter().filter_map(message_from_value).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("; "))
            }
        }
        _ => None,
    }
}

impl From<ApiError> for DomainError {
    fn from(err: ApiError) -> Self {
        let code = match &err {
            ApiError::NotFound(_) => ErrorCode::SnapshotNotFound,
            _ => ErrorCode::ApiError,
        };
        let mut domain = DomainError::new(code, err.user_message());
        if let ApiError::Status { status, .. } = &err {
            domain = domain.with_detail("status", status.to_string());
        }
        domain
    }
}
