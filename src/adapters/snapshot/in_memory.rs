//! In-Memory Snapshot Repository
//!
//! Keeps snapshots in a map. Useful for testing and offline use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{FileId, SnapshotId};
use crate::domain::snapshot::Snapshot;
use crate::ports::{ApiError, SnapshotRepository};

/// In-memory storage for snapshots.
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotRepository {
    snapshots: Arc<RwLock<HashMap<SnapshotId, Snapshot>>>,
}

impl InMemorySnapshotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored snapshots (useful for tests)
    pub async fn clear(&self) {
        self.snapshots.write().await.clear();
    }

    pub async fn count(&self) -> usize {
        self.snapshots.read().await.len()
    }
}

#[async_trait]
impl SnapshotRepository for InMemorySnapshotRepository {
    async fn save(&self, snapshot: &Snapshot) -> Result<(), ApiError> {
        let mut snapshots = self.snapshots.write().await;
        snapshots.insert(snapshot.id, snapshot.clone());
        Ok(())
    }

    async fn load(&self, id: &SnapshotId) -> Result<Snapshot, ApiError> {
        let snapshots = self.snapshots.read().await;
        snapshots
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Snapshot {}", id)))
    }

    async fn list(&self, task_id: &FileId) -> Result<Vec<Snapshot>, ApiError> {
        let snapshots = self.snapshots.read().await;
        let mut found: Vec<Snapshot> = snapshots
            .values()
            .filter(|s| &s.task_id == task_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn delete(&self, id: &SnapshotId) -> Result<(), ApiError> {
        self.snapshots
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ApiError::NotFound(format!("Snapshot {}", id)))
    }
}
