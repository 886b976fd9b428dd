//! Errors raised by analysis edit operations.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ItemId};

use super::SectionKind;

/// Contract errors for section and next-step edits.
///
/// Every edit that targets something absent fails with one of these instead of
/// silently doing nothing; the store decides how to surface it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("No item {id} in {section}")]
    ItemNotFound { section: SectionKind, id: ItemId },

    #[error("No item headed '{heading}' in {section}")]
    HeadingNotFound { section: SectionKind, heading: String },

    #[error("Next step {index} is out of range (have {len})")]
    StepIndexOutOfRange { index: usize, len: usize },

    #[error("Sub-point {index} of next step {step} is out of range (have {len})")]
    SubPointIndexOutOfRange { step: usize, index: usize, len: usize },

    #[error("Next step {index} is plain text, not a point list")]
    NotAPointStep { index: usize },

    #[error("Invalid section: {0}")]
    InvalidSection(String),
}

impl AnalysisError {
    pub fn heading_not_found(section: SectionKind, heading: impl Into<String>) -> Self {
        Self::HeadingNotFound {
            section,
            heading: heading.into(),
        }
    }

    pub fn invalid_section(reason: impl Into<String>) -> Self {
        Self::InvalidSection(reason.into())
    }
}

impl From<AnalysisError> for DomainError {
    fn from(err: AnalysisError) -> Self {
        let code = match &err {
            AnalysisError::ItemNotFound { .. } | AnalysisError::HeadingNotFound { .. } => {
                ErrorCode::ItemNotFound
            }
            AnalysisError::StepIndexOutOfRange { .. }
            | AnalysisError::SubPointIndexOutOfRange { .. }
            | AnalysisError::NotAPointStep { .. } => ErrorCode::IndexOutOfRange,
            AnalysisError::InvalidSection(_) => ErrorCode::ValidationFailed,
        };
        DomainError::new(code, err.to_string())
    }
}
