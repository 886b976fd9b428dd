//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates the remote ports and the analysis store.

mod errors;
pub mod handlers;

pub use errors::HandlerError;
pub use handlers::{
    ExportDocumentCommand, ExportDocumentHandler, GenerateItemContentCommand,
    GenerateItemContentHandler, GenerateNextStepsCommand, GenerateNextStepsHandler,
    GenerateReportCommand, GenerateReportHandler, GenerateReportResult, ListSnapshotsHandler,
    ListSnapshotsQuery, RestoreSnapshotCommand, RestoreSnapshotHandler, SaveSnapshotCommand,
    SaveSnapshotHandler, SortEvidenceCommand, SortEvidenceHandler, SortEvidenceResult,
    UploadTranscriptCommand, UploadTranscriptHandler,
};
