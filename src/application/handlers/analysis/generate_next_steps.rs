//! GenerateNextStepsHandler - asks for next steps covering the areas to target.

use std::sync::Arc;

use crate::application::handlers::fail;
use crate::application::HandlerError;
use crate::domain::analysis::{replace_next_steps, NextStep};
use crate::domain::foundation::FileId;
use crate::domain::store::SharedAnalysisStore;
use crate::ports::AnalysisApi;

/// Command to regenerate next steps of the active template.
#[derive(Debug, Clone)]
pub struct GenerateNextStepsCommand {
    pub file_id: FileId,
}

/// Handler for next-step generation.
pub struct GenerateNextStepsHandler {
    api: Arc<dyn AnalysisApi>,
    store: SharedAnalysisStore,
}

impl GenerateNextStepsHandler {
    pub fn new(api: Arc<dyn AnalysisApi>, store: SharedAnalysisStore) -> Self {
        Self { api, store }
    }

    pub async fn handle(&self, cmd: GenerateNextStepsCommand) -> Result<Vec<NextStep>, HandlerError> {
        let (template_id, areas) = {
            let mut store = self.store.write().await;
            let (template_id, analysis) = store.active_entry()?;
            (template_id, analysis.areas_to_target.headings())
        };

        let steps = match self.api.generate_next_steps(&cmd.file_id, &areas).await {
            Ok(steps) => steps,
            Err(err) => return fail(&self.store, err).await,
        };

        self.store
            .write()
            .await
            .handle_template_update(&template_id, |analysis| {
                Ok(replace_next_steps(analysis, steps.clone()))
            })?;

        tracing::debug!(template_id = %template_id, steps = steps.len(), "Next steps generated");
        Ok(steps)
    }
}
