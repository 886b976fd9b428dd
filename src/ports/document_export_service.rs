//! Document Export Service Port - renders a report as Word or PDF.
//!
//! The domain depends on this trait, while adapters (the HTTP client, or the
//! mock used in tests) turn an `UnorderedReport` into a downloadable file.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::domain::analysis::UnorderedReport;

/// Port for exporting an analysis report to a document format.
///
/// # Contract
///
/// Implementations must:
/// - Render every heading and content of both sections, in order
/// - Render next steps after the sections
/// - Name the failing format in conversion errors
#[async_trait]
pub trait DocumentExportService: Send + Sync {
    /// Renders `report` as a `format` document.
    async fn export(
        &self,
        report: &UnorderedReport,
        format: ExportFormat,
    ) -> Result<ExportedDocument, ExportError>;

    /// Whether the backend can take export requests right now.
    async fn is_available(&self) -> bool;
}

/// Document formats the export backend produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Word document (.docx).
    Word,
    /// PDF document.
    Pdf,
}

impl ExportFormat {
    /// MIME type of the rendered bytes.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Word => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Pdf => "application/pdf",
        }
    }

    /// Extension used for the suggested filename.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Word => "docx",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// Path segment of the export endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Word => "word",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    /// Accepts `word`, `docx` and `pdf`, case-insensitively.
    fn from_str(value: &str) -> Result<Self, ExportError> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "word" | "docx" => Ok(ExportFormat::Word),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(ExportError::UnsupportedFormat(value.to_string())),
        }
    }
}

/// Rendered document ready to be written or served.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub content: Vec<u8>,
    pub content_type: String,
    /// `{base}.{extension}`, used when writing into a directory.
    pub filename: String,
    pub format: ExportFormat,
}

impl ExportedDocument {
    pub fn new(content: Vec<u8>, format: ExportFormat, base_filename: &str) -> Self {
        Self {
            content,
            content_type: format.content_type().to_string(),
            filename: format!("{}.{}", base_filename, format.extension()),
            format,
        }
    }

    /// Writes the document to `target`.
    ///
    /// A directory target receives the suggested filename. Returns the path
    /// written.
    pub async fn write_to(&self, target: &Path) -> Result<PathBuf, ExportError> {
        let path = if target.is_dir() {
            target.join(&self.filename)
        } else {
            target.to_path_buf()
        };
        tokio::fs::write(&path, &self.content)
            .await
            .map_err(|e| ExportError::io_error(format!("{}: {}", path.display(), e)))?;
        Ok(path)
    }
}

/// Base filename for a report: candidate name and date, lowercased, with
/// anything outside `[a-z0-9]` collapsed to `-`.
pub fn report_filename(report: &UnorderedReport) -> String {
    let raw = format!("{} {}", report.name, report.date);
    let slug = raw
        .to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "interview-analysis".to_string()
    } else {
        slug
    }
}

/// Export failure.
#[derive(Debug, Clone, Error)]
pub enum ExportError {
    #[error("Unknown export format '{0}' (expected word or pdf)")]
    UnsupportedFormat(String),

    /// Backend unreachable or timed out.
    #[error("Export backend unavailable: {0}")]
    ServiceUnavailable(String),

    /// Conversion failed on the backend.
    #[error("{format} conversion failed: {reason}")]
    ConversionFailed { format: ExportFormat, reason: String },

    /// Writing the document to disk failed.
    #[error("Could not write document: {0}")]
    IoError(String),
}

impl ExportError {
    pub fn service_unavailable(reason: impl Into<String>) -> Self {
        Self::ServiceUnavailable(reason.into())
    }

    pub fn conversion_failed(format: ExportFormat, reason: impl Into<String>) -> Self {
        Self::ConversionFailed {
            format,
            reason: reason.into(),
        }
    }

    pub fn io_error(reason: impl Into<String>) -> Self {
        Self::IoError(reason.into())
    }
}
