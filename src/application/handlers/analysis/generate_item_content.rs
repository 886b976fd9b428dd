//! GenerateItemContentHandler - regenerates the text of one item.

use std::sync::Arc;

use crate::application::handlers::fail;
use crate::application::HandlerError;
use crate::domain::analysis::{
    update_item_content, AnalysisError, SectionEntry, SectionKind, SectionedAnalysis,
};
use crate::domain::foundation::{FileId, ItemId};
use crate::domain::store::{SharedAnalysisStore, StoreError};
use crate::ports::AnalysisApi;

/// Command to regenerate the content of an item in the active template.
#[derive(Debug, Clone)]
pub struct GenerateItemContentCommand {
    pub file_id: FileId,
    pub section: SectionKind,
    pub item_id: ItemId,
}

/// Handler for single-item generation.
pub struct GenerateItemContentHandler {
    api: Arc<dyn AnalysisApi>,
    store: SharedAnalysisStore,
}

impl GenerateItemContentHandler {
    pub fn new(api: Arc<dyn AnalysisApi>, store: SharedAnalysisStore) -> Self {
        Self { api, store }
    }

    /// Returns the generated content, which is also written to the item.
    pub async fn handle(&self, cmd: GenerateItemContentCommand) -> Result<String, HandlerError> {
        // 1. Resolve the heading under a short lock
        let (template_id, heading) = {
            let mut store = self.store.write().await;
            let (template_id, analysis) = store.active_entry()?;
            match analysis.section(cmd.section).get(&cmd.item_id) {
                Some(item) => (template_id, item.heading().to_string()),
                None => {
                    let err = StoreError::from(AnalysisError::ItemNotFound {
                        section: cmd.section,
                        id: cmd.item_id,
                    });
                    store.record_error(err.clone());
                    return Err(err.into());
                }
            }
        };

        // 2. Generate
        let content = match self
            .api
            .generate_item_content(&cmd.file_id, cmd.section, &heading)
            .await
        {
            Ok(content) => content,
            Err(err) => return fail(&self.store, err).await,
        };

        // 3. Apply to the template that asked; the item may be gone by now
        self.store
            .write()
            .await
            .handle_template_update(&template_id, |analysis| {
                update_item_content(analysis, cmd.section, &cmd.item_id, &content)
            })?;

        tracing::debug!(template_id = %template_id, heading = %heading, "Item content generated");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MockAnalysisApi, MockCall};
    use crate::domain::analysis::{to_templated, UnorderedReport};
    use crate::domain::store::{AnalysisStore, TemplateKind};

    async fn seeded_store() -> (SharedAnalysisStore, ItemId) {
        let store = AnalysisStore::shared();
        let analysis = to_templated(
            &UnorderedReport::new("Jane", "2024-05-01")
                .with_area("Delegation", "Old text")
                .with_area("Pacing", "Rushes"),
        );
        let id = analysis.areas_to_target.id_for_heading("Delegation").unwrap();
        store
            .write()
            .await
            .add_template(TemplateKind::ManualReport.template_id(), analysis, true)
            .unwrap();
        (store, id)
    }

    fn file() -> FileId {
        FileId::new("file-1").unwrap()
    }

    #[tokio::test]
    async fn writes_generated_content_to_item() {
        let (store, id) = seeded_store().await;
        let api = Arc::new(MockAnalysisApi::new().with_item_content("Hands off work late"));
        let handler = GenerateItemContentHandler::new(api.clone(), store.clone());

        let content = handler
            .handle(GenerateItemContentCommand {
                file_id: file(),
                section: SectionKind::AreasToTarget,
                item_id: id,
            })
            .await
            .unwrap();

        assert_eq!(content, "Hands off work late");
        let store = store.read().await;
        let item = store.active_template().unwrap().areas_to_target.get(&id).unwrap();
        assert_eq!(item.content(), "Hands off work late");
        assert_eq!(
            api.calls_of(MockCall::GenerateItemContent)[0].argument,
            "areas_to_target:Delegation"
        );
    }

    #[tokio::test]
    async fn unknown_item_fails_without_calling_service() {
        let (store, _) = seeded_store().await;
        let api = Arc::new(MockAnalysisApi::new());
        let handler = GenerateItemContentHandler::new(api.clone(), store.clone());

        let result = handler
            .handle(GenerateItemContentCommand {
                file_id: file(),
                section: SectionKind::Strengths,
                item_id: ItemId::new(),
            })
            .await;

        assert!(matches!(
            result,
            Err(HandlerError::Store(StoreError::Analysis(AnalysisError::ItemNotFound { .. })))
        ));
        assert_eq!(api.call_count(), 0);
        assert!(store.read().await.error().is_some());
    }

    #[tokio::test]
    async fn no_active_template_is_an_error() {
        let api = Arc::new(MockAnalysisApi::new());
        let handler = GenerateItemContentHandler::new(api, AnalysisStore::shared());

        let result = handler
            .handle(GenerateItemContentCommand {
                file_id: file(),
                section: SectionKind::Strengths,
                item_id: ItemId::new(),
            })
            .await;

        assert!(matches!(result, Err(HandlerError::Store(StoreError::NoActiveTemplate))));
    }
}
