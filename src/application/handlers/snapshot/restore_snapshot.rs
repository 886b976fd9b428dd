//! RestoreSnapshotHandler - loads a saved snapshot back into the store.

use std::sync::Arc;

use crate::application::handlers::fail;
use crate::application::HandlerError;
use crate::domain::foundation::SnapshotId;
use crate::domain::snapshot::{Snapshot, TriggerType};
use crate::domain::store::{SharedAnalysisStore, TemplateKind};
use crate::ports::SnapshotRepository;

/// Command to restore a snapshot.
#[derive(Debug, Clone)]
pub struct RestoreSnapshotCommand {
    pub snapshot_id: SnapshotId,
    /// Save the current templates first, as a `restore` snapshot whose parent
    /// is the one being restored.
    pub backup_current: bool,
}

/// Handler for restoring snapshots.
pub struct RestoreSnapshotHandler {
    repository: Arc<dyn SnapshotRepository>,
    store: SharedAnalysisStore,
}

impl RestoreSnapshotHandler {
    pub fn new(repository: Arc<dyn SnapshotRepository>, store: SharedAnalysisStore) -> Self {
        Self { repository, store }
    }

    pub async fn handle(&self, cmd: RestoreSnapshotCommand) -> Result<Snapshot, HandlerError> {
        let snapshot = match self.repository.load(&cmd.snapshot_id).await {
            Ok(snapshot) => snapshot,
            Err(err) => return fail(&self.store, err).await,
        };

        if cmd.backup_current {
            let backup = {
                let store = self.store.read().await;
                Snapshot::capture(
                    snapshot.task_id.clone(),
                    &store,
                    TriggerType::Restore,
                    Some(snapshot.id),
                )
            };
            if !backup.is_empty() {
                if let Err(err) = self.repository.save(&backup).await {
                    return fail(&self.store, err).await;
                }
                tracing::debug!(backup_id = %backup.id, "Saved backup before restore");
            }
        }

        // Only snapshot-backed templates are replaced; ai_paragraph and other
        // kinds stay as they are.
        self.store.write().await.replace_templates(
            &Snapshot::scope(),
            snapshot.templates(),
            Some(&TemplateKind::ManualReport.template_id()),
        );

        tracing::info!(snapshot_id = %snapshot.id, "Snapshot restored");
        Ok(snapshot)
    }
}
