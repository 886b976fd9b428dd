//! GenerateReportHandler - fetches a report and loads it into the store.

use std::sync::Arc;

use crate::application::handlers::fail;
use crate::application::HandlerError;
use crate::domain::analysis::{to_templated, UnorderedReport};
use crate::domain::foundation::{FileId, TemplateId};
use crate::domain::store::{SharedAnalysisStore, StoreError, TemplateKind};
use crate::ports::AnalysisApi;

/// Command to generate a report and add it as one or more templates.
#[derive(Debug, Clone)]
pub struct GenerateReportCommand {
    pub file_id: FileId,
    /// Template kinds that receive a copy of the report, in order.
    pub kinds: Vec<TemplateKind>,
    /// Kind to activate once added.
    pub activate: Option<TemplateKind>,
}

impl GenerateReportCommand {
    /// Full report kept as delivered, plus an editable manual copy that
    /// becomes active.
    pub fn new(file_id: FileId) -> Self {
        Self {
            file_id,
            kinds: vec![TemplateKind::FullReport, TemplateKind::ManualReport],
            activate: Some(TemplateKind::ManualReport),
        }
    }
}

/// Result of report generation.
#[derive(Debug, Clone)]
pub struct GenerateReportResult {
    pub report: UnorderedReport,
    pub added: Vec<TemplateId>,
}

/// Handler for report generation.
pub struct GenerateReportHandler {
    api: Arc<dyn AnalysisApi>,
    store: SharedAnalysisStore,
}

impl GenerateReportHandler {
    pub fn new(api: Arc<dyn AnalysisApi>, store: SharedAnalysisStore) -> Self {
        Self { api, store }
    }

    pub async fn handle(&self, cmd: GenerateReportCommand) -> Result<GenerateReportResult, HandlerError> {
        // 1. Fetch without holding the store
        let report = match self.api.generate_report(&cmd.file_id).await {
            Ok(report) => report,
            Err(err) => return fail(&self.store, err).await,
        };
        tracing::info!(
            file_id = %cmd.file_id,
            strengths = report.strengths.len(),
            areas = report.areas_to_target.len(),
            "Report generated"
        );

        // 2. Reject the whole batch before inserting anything
        let mut store = self.store.write().await;
        let clash = cmd.kinds.iter().enumerate().find(|(i, kind)| {
            store.has_template(&kind.template_id()) || cmd.kinds[..*i].contains(*kind)
        });
        if let Some((_, kind)) = clash {
            let err = StoreError::TemplateExists(kind.template_id());
            store.record_error(err.clone());
            return Err(err.into());
        }

        // 3. Each template gets its own freshly converted copy
        let mut added = Vec::with_capacity(cmd.kinds.len());
        for kind in &cmd.kinds {
            let id = kind.template_id();
            store.add_template(id.clone(), to_templated(&report), cmd.activate == Some(*kind))?;
            added.push(id);
        }
        store.clear_error();

        Ok(GenerateReportResult { report, added })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MockAnalysisApi, MockCall};
    use crate::domain::foundation::ErrorCode;
    use crate::domain::store::AnalysisStore;
    use crate::ports::ApiError;

    fn report() -> UnorderedReport {
        UnorderedReport::new("Jane", "2024-05-01")
            .with_strength("Communication", "Clear")
            .with_strength("Ownership", "Drives outcomes")
            .with_area("Delegation", "Late")
    }

    fn file() -> FileId {
        FileId::new("file-1").unwrap()
    }

    #[tokio::test]
    async fn adds_full_and_manual_templates_activating_manual() {
        let api = Arc::new(MockAnalysisApi::new().with_report(report()));
        let store = AnalysisStore::shared();
        let handler = GenerateReportHandler::new(api, store.clone());

        let result = handler.handle(GenerateReportCommand::new(file())).await.unwrap();

        let store = store.read().await;
        assert_eq!(result.added.len(), 2);
        assert_eq!(store.active_template_id(), Some(&TemplateKind::ManualReport.template_id()));
        assert_eq!(
            store.active_template().unwrap().strengths.headings(),
            vec!["Communication", "Ownership"]
        );
    }

    #[tokio::test]
    async fn templates_get_independent_item_ids() {
        let api = Arc::new(MockAnalysisApi::new().with_report(report()));
        let store = AnalysisStore::shared();
        GenerateReportHandler::new(api, store.clone())
            .handle(GenerateReportCommand::new(file()))
            .await
            .unwrap();

        let store = store.read().await;
        let full = store.template(&TemplateKind::FullReport.template_id()).unwrap();
        let manual = store.template(&TemplateKind::ManualReport.template_id()).unwrap();
        assert_ne!(full.strengths.order(), manual.strengths.order());
    }

    #[tokio::test]
    async fn second_generation_is_rejected_and_keeps_first() {
        let api = Arc::new(
            MockAnalysisApi::new()
                .with_report(report())
                .with_report(UnorderedReport::new("Other", "2024-06-01")),
        );
        let store = AnalysisStore::shared();
        let handler = GenerateReportHandler::new(api, store.clone());
        handler.handle(GenerateReportCommand::new(file())).await.unwrap();

        let result = handler.handle(GenerateReportCommand::new(file())).await;

        assert!(matches!(result, Err(HandlerError::Store(StoreError::TemplateExists(_)))));
        assert_eq!(store.read().await.active_template().unwrap().name, "Jane");
    }

    #[tokio::test]
    async fn existing_manual_report_rejects_whole_batch() {
        let api = Arc::new(MockAnalysisApi::new().with_report(UnorderedReport::new("New", "2024-06-01")));
        let store = AnalysisStore::shared();
        store
            .write()
            .await
            .add_template(TemplateKind::ManualReport.template_id(), to_templated(&report()), true)
            .unwrap();
        let handler = GenerateReportHandler::new(api, store.clone());

        let result = handler.handle(GenerateReportCommand::new(file())).await;

        match result {
            Err(HandlerError::Store(StoreError::TemplateExists(id))) => {
                assert_eq!(id, TemplateKind::ManualReport.template_id())
            }
            other => panic!("Expected TemplateExists error, got {:?}", other),
        }
        let store = store.read().await;
        assert!(store.template(&TemplateKind::FullReport.template_id()).is_none());
        assert_eq!(store.template_ids(), &[TemplateKind::ManualReport.template_id()]);
        assert_eq!(store.active_template().unwrap().name, "Jane");
        assert_eq!(store.error().unwrap().code, ErrorCode::TemplateExists);
    }

    #[tokio::test]
    async fn repeated_kind_in_command_adds_nothing() {
        let api = Arc::new(MockAnalysisApi::new().with_report(report()));
        let store = AnalysisStore::shared();
        let handler = GenerateReportHandler::new(api, store.clone());

        let result = handler
            .handle(GenerateReportCommand {
                file_id: file(),
                kinds: vec![TemplateKind::FullReport, TemplateKind::FullReport],
                activate: None,
            })
            .await;

        assert!(matches!(result, Err(HandlerError::Store(StoreError::TemplateExists(_)))));
        assert!(store.read().await.is_empty());
    }

    #[tokio::test]
    async fn api_failure_leaves_store_empty() {
        let api = Arc::new(
            MockAnalysisApi::new().with_error(MockCall::GenerateReport, ApiError::Timeout { timeout_secs: 120 }),
        );
        let store = AnalysisStore::shared();
        let handler = GenerateReportHandler::new(api, store.clone());

        let result = handler.handle(GenerateReportCommand::new(file())).await;

        assert!(matches!(result, Err(HandlerError::Api(ApiError::Timeout { .. }))));
        let store = store.read().await;
        assert!(store.is_empty());
        assert!(store.error().unwrap().message.contains("took too long"));
    }
}
