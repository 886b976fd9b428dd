//! SaveSnapshotHandler - persists the current templates.

use std::sync::Arc;

use crate::application::handlers::fail;
use crate::application::HandlerError;
use crate::domain::foundation::{FileId, SnapshotId, ValidationError};
use crate::domain::snapshot::{Snapshot, TriggerType};
use crate::domain::store::SharedAnalysisStore;
use crate::ports::SnapshotRepository;

/// Command to snapshot the store for a task.
#[derive(Debug, Clone)]
pub struct SaveSnapshotCommand {
    pub task_id: FileId,
    pub trigger_type: TriggerType,
    pub parent_id: Option<SnapshotId>,
}

/// Handler for saving snapshots.
pub struct SaveSnapshotHandler {
    repository: Arc<dyn SnapshotRepository>,
    store: SharedAnalysisStore,
}

impl SaveSnapshotHandler {
    pub fn new(repository: Arc<dyn SnapshotRepository>, store: SharedAnalysisStore) -> Self {
        Self { repository, store }
    }

    pub async fn handle(&self, cmd: SaveSnapshotCommand) -> Result<Snapshot, HandlerError> {
        let snapshot = {
            let store = self.store.read().await;
            Snapshot::capture(cmd.task_id, &store, cmd.trigger_type, cmd.parent_id)
        };
        if snapshot.is_empty() {
            return fail(&self.store, ValidationError::empty_field("templates")).await;
        }

        if let Err(err) = self.repository.save(&snapshot).await {
            return fail(&self.store, err).await;
        }

        tracing::info!(
            snapshot_id = %snapshot.id,
            task_id = %snapshot.task_id,
            trigger = %snapshot.trigger_type,
            "Snapshot saved"
        );
        Ok(snapshot)
    }
}
