//! Analysis store errors.

use thiserror::Error;

use crate::domain::analysis::AnalysisError;
use crate::domain::foundation::{DomainError, ErrorCode, TemplateId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Template '{0}' not found")]
    TemplateNotFound(TemplateId),

    #[error("Template '{0}' already exists")]
    TemplateExists(TemplateId),

    #[error("No active template")]
    NoActiveTemplate,

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::TemplateNotFound(id) => {
                DomainError::new(ErrorCode::TemplateNotFound, format!("Template '{}' not found", id))
                    .with_detail("template_id", id.as_str())
            }
            StoreError::TemplateExists(id) => DomainError::new(
                ErrorCode::TemplateExists,
                format!("Template '{}' already exists", id),
            )
            .with_detail("template_id", id.as_str()),
            StoreError::NoActiveTemplate => {
                DomainError::new(ErrorCode::NoActiveTemplate, "No active template")
            }
            StoreError::Analysis(inner) => inner.into(),
        }
    }
}
