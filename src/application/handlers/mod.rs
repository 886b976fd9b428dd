//! Application handlers.
//!
//! Each handler owns the ports it calls and a handle to the shared store.
//! Network calls run without holding the store lock; results are applied
//! under a short write lock afterwards.

pub mod analysis;
pub mod export;
pub mod snapshot;

pub use analysis::{
    GenerateItemContentCommand, GenerateItemContentHandler, GenerateNextStepsCommand,
    GenerateNextStepsHandler, GenerateReportCommand, GenerateReportHandler, GenerateReportResult,
    SortEvidenceCommand, SortEvidenceHandler, SortEvidenceResult, UploadTranscriptCommand,
    UploadTranscriptHandler,
};
pub use export::{ExportDocumentCommand, ExportDocumentHandler};
pub use snapshot::{
    ListSnapshotsHandler, ListSnapshotsQuery, RestoreSnapshotCommand, RestoreSnapshotHandler,
    SaveSnapshotCommand, SaveSnapshotHandler,
};

use crate::domain::store::SharedAnalysisStore;

use super::HandlerError;

/// Records `err` in the store and returns it.
///
/// Store errors are recorded by the store itself and pass straight through.
pub(crate) async fn fail<T>(
    store: &SharedAnalysisStore,
    err: impl Into<HandlerError>,
) -> Result<T, HandlerError> {
    let err = err.into();
    if !matches!(err, HandlerError::Store(_)) {
        store.write().await.record_error(err.clone());
    }
    Err(err)
}
