//! Errors returned by application handlers.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::domain::store::StoreError;
use crate::ports::{ApiError, ExportError};

/// Failure of an application handler.
///
/// Handlers also record the failure in the store's `error` field; the typed
/// value lets a caller such as the CLI choose an exit status.
#[derive(Debug, Clone, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl HandlerError {
    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            HandlerError::Api(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

impl From<HandlerError> for DomainError {
    fn from(err: HandlerError) -> Self {
        match err {
            HandlerError::Api(inner) => inner.into(),
            HandlerError::Store(inner) => inner.into(),
            HandlerError::Export(inner) => DomainError::new(ErrorCode::ExportFailed, inner.to_string()),
            HandlerError::Validation(inner) => inner.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_use_extracted_message() {
        let err = HandlerError::from(ApiError::status(400, r#"{"detail":"Bad transcript"}"#));
        assert_eq!(err.user_message(), "Bad transcript");
    }

    #[test]
    fn export_errors_map_to_export_code() {
        let err: DomainError = HandlerError::from(ExportError::io_error("disk full")).into();
        assert_eq!(err.code, ErrorCode::ExportFailed);
    }
}
