//! Analysis API Port - the remote service that reads transcripts.
//!
//! The service accepts an uploaded transcript, then generates reports, single
//! item texts, next steps and sorted evidence for it. Responses cross this
//! boundary as typed records and are validated before reaching the domain.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::analysis::{Evidence, NextStep, SectionKind, UnorderedReport};
use crate::domain::foundation::{FileId, ValidationError};

use super::ApiError;

/// Port for the transcript analysis service.
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    /// Uploads a transcript and returns the id the service assigned to it.
    async fn upload_transcript(&self, upload: TranscriptUpload) -> Result<FileId, ApiError>;

    /// Generates the full report for an uploaded transcript.
    async fn generate_report(&self, file_id: &FileId) -> Result<UnorderedReport, ApiError>;

    /// Generates content for a single item heading.
    async fn generate_item_content(
        &self,
        file_id: &FileId,
        section: SectionKind,
        heading: &str,
    ) -> Result<String, ApiError>;

    /// Generates next steps for the given areas to target.
    async fn generate_next_steps(
        &self,
        file_id: &FileId,
        areas: &[String],
    ) -> Result<Vec<NextStep>, ApiError>;

    /// Groups transcript evidence under the given headings.
    async fn sort_evidence(
        &self,
        file_id: &FileId,
        section: SectionKind,
        headings: &[String],
    ) -> Result<Vec<EvidenceGroup>, ApiError>;
}

/// Transcript file to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl TranscriptUpload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Result<Self, ValidationError> {
        let filename = filename.into();
        if filename.trim().is_empty() {
            return Err(ValidationError::empty_field("filename"));
        }
        if bytes.is_empty() {
            return Err(ValidationError::empty_field("transcript"));
        }
        Ok(Self { filename, bytes })
    }

    /// MIME type guessed from the file extension.
    pub fn content_type(&self) -> &'static str {
        let ext = self
            .filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());
        match ext.as_deref() {
            Some("pdf") => "application/pdf",
            Some("docx") => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Some("json") => "application/json",
            _ => "text/plain",
        }
    }
}

/// Evidence the service sorted under one heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceGroup {
    pub heading: String,
    #[serde(default)]
    pub evidence: Vec<Evidence>,
}

impl EvidenceGroup {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.heading.trim().is_empty() {
            return Err(ValidationError::empty_field("heading"));
        }
        self.evidence.iter().try_for_each(Evidence::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_rejects_empty_transcript() {
        assert!(TranscriptUpload::new("interview.txt", Vec::new()).is_err());
        assert!(TranscriptUpload::new(" ", b"hello".to_vec()).is_err());
    }

    #[test]
    fn upload_guesses_content_type() {
        let pdf = TranscriptUpload::new("Interview.PDF", b"%PDF".to_vec()).unwrap();
        let txt = TranscriptUpload::new("notes", b"hi".to_vec()).unwrap();
        assert_eq!(pdf.content_type(), "application/pdf");
        assert_eq!(txt.content_type(), "text/plain");
    }

    #[test]
    fn evidence_group_validation_checks_quotes() {
        let good = EvidenceGroup {
            heading: "Focus".to_string(),
            evidence: vec![Evidence::new("I planned ahead", "Candidate")],
        };
        let bad = EvidenceGroup {
            heading: "Focus".to_string(),
            evidence: vec![Evidence::new("", "Candidate")],
        };
        assert!(good.validate().is_ok());
        assert!(bad.validate().is_err());
    }

    #[test]
    fn evidence_group_deserializes_without_evidence() {
        let group: EvidenceGroup = serde_json::from_str(r#"{"heading":"Focus"}"#).unwrap();
        assert!(group.evidence.is_empty());
    }

    #[test]
    fn analysis_api_is_object_safe() {
        fn check<T: AnalysisApi + ?Sized>() {}
        check::<dyn AnalysisApi>();
    }
}
