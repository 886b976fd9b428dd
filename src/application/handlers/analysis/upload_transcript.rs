//! UploadTranscriptHandler - sends a transcript to the analysis service.

use std::sync::Arc;

use crate::application::handlers::fail;
use crate::application::HandlerError;
use crate::domain::foundation::FileId;
use crate::domain::store::SharedAnalysisStore;
use crate::ports::{AnalysisApi, TranscriptUpload};

/// Command to upload a transcript file.
#[derive(Debug, Clone)]
pub struct UploadTranscriptCommand {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Handler for transcript uploads.
pub struct UploadTranscriptHandler {
    api: Arc<dyn AnalysisApi>,
    store: SharedAnalysisStore,
}

impl UploadTranscriptHandler {
    pub fn new(api: Arc<dyn AnalysisApi>, store: SharedAnalysisStore) -> Self {
        Self { api, store }
    }

    pub async fn handle(&self, cmd: UploadTranscriptCommand) -> Result<FileId, HandlerError> {
        let upload = match TranscriptUpload::new(cmd.filename, cmd.bytes) {
            Ok(upload) => upload,
            Err(err) => return fail(&self.store, err).await,
        };

        match self.api.upload_transcript(upload).await {
            Ok(file_id) => {
                tracing::info!(file_id = %file_id, "Transcript uploaded");
                Ok(file_id)
            }
            Err(err) => fail(&self.store, err).await,
        }
    }
}
