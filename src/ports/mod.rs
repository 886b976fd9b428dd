//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AnalysisApi` - transcript upload and report generation
//! - `SnapshotRepository` - saved copies of a session's templates
//! - `DocumentExportService` - Word/PDF rendering of a report
//! - `ApiError` - failures of the remote service, with user-facing messages

mod analysis_api;
mod api_error;
mod document_export_service;
mod snapshot_repository;

pub use analysis_api::{AnalysisApi, EvidenceGroup, TranscriptUpload};
pub use api_error::{ApiError, GENERIC_ERROR_MESSAGE};
pub use document_export_service::{
    report_filename, DocumentExportService, ExportError, ExportFormat, ExportedDocument,
};
pub use snapshot_repository::SnapshotRepository;
