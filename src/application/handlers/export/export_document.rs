//! ExportDocumentHandler - renders a template as a Word or PDF document.

use std::sync::Arc;

use crate::application::handlers::fail;
use crate::application::HandlerError;
use crate::domain::analysis::templated_to_report;
use crate::domain::foundation::TemplateId;
use crate::domain::store::{SharedAnalysisStore, StoreError};
use crate::ports::{DocumentExportService, ExportFormat, ExportedDocument};

/// Command to export a template.
#[derive(Debug, Clone)]
pub struct ExportDocumentCommand {
    pub format: ExportFormat,
    /// Template to export; the active one when `None`.
    pub template_id: Option<TemplateId>,
}

/// Handler for document export.
pub struct ExportDocumentHandler {
    exporter: Arc<dyn DocumentExportService>,
    store: SharedAnalysisStore,
}

impl ExportDocumentHandler {
    pub fn new(exporter: Arc<dyn DocumentExportService>, store: SharedAnalysisStore) -> Self {
        Self { exporter, store }
    }

    pub async fn handle(&self, cmd: ExportDocumentCommand) -> Result<ExportedDocument, HandlerError> {
        let report = {
            let mut store = self.store.write().await;
            let analysis = match &cmd.template_id {
                Some(id) => match store.template(id) {
                    Some(analysis) => analysis.clone(),
                    None => {
                        let err = StoreError::TemplateNotFound(id.clone());
                        store.record_error(err.clone());
                        return Err(err.into());
                    }
                },
                None => store.active_entry()?.1,
            };
            templated_to_report(&analysis)
        };

        match self.exporter.export(&report, cmd.format).await {
            Ok(document) => {
                tracing::info!(filename = %document.filename, bytes = document.content.len(), "Document exported");
                Ok(document)
            }
            Err(err) => fail(&self.store, err).await,
        }
    }
}
