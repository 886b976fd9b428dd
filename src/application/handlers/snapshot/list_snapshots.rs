//! ListSnapshotsHandler - query handler for a task's snapshots.

use std::sync::Arc;

use crate::application::handlers::fail;
use crate::application::HandlerError;
use crate::domain::foundation::FileId;
use crate::domain::snapshot::Snapshot;
use crate::domain::store::SharedAnalysisStore;
use crate::ports::SnapshotRepository;

/// Query for the snapshots of one task.
#[derive(Debug, Clone)]
pub struct ListSnapshotsQuery {
    pub task_id: FileId,
}

pub struct ListSnapshotsHandler {
    repository: Arc<dyn SnapshotRepository>,
    store: SharedAnalysisStore,
}

impl ListSnapshotsHandler {
    pub fn new(repository: Arc<dyn SnapshotRepository>, store: SharedAnalysisStore) -> Self {
        Self { repository, store }
    }

    /// Snapshots newest first.
    pub async fn handle(&self, query: ListSnapshotsQuery) -> Result<Vec<Snapshot>, HandlerError> {
        match self.repository.list(&query.task_id).await {
            Ok(snapshots) => Ok(snapshots),
            Err(err) => fail(&self.store, err).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemorySnapshotRepository;
    use crate::domain::foundation::{SnapshotId, Timestamp};
    use crate::domain::snapshot::TriggerType;
    use crate::domain::store::AnalysisStore;

    #[tokio::test]
    async fn lists_only_the_requested_task() {
        let repo = Arc::new(InMemorySnapshotRepository::new());
        for task in ["file-1", "file-1", "file-2"] {
            repo.save(&Snapshot {
                id: SnapshotId::new(),
                created_at: Timestamp::now(),
                task_id: FileId::new(task).unwrap(),
                manual_report: None,
                full_report: None,
                ai_competencies: None,
                trigger_type: TriggerType::Auto,
                parent_id: None,
            })
            .await
            .unwrap();
        }
        let handler = ListSnapshotsHandler::new(repo, AnalysisStore::shared());

        let listed = handler
            .handle(ListSnapshotsQuery {
                task_id: FileId::new("file-1").unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(listed.len(), 2);
    }
}
