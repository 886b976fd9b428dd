//! Snapshot repository port.
//!
//! Snapshots are stored by the same remote service that analyses transcripts,
//! keyed by the task (uploaded file) they belong to.

use async_trait::async_trait;

use crate::domain::foundation::{FileId, SnapshotId};
use crate::domain::snapshot::Snapshot;

use super::ApiError;

/// Repository port for snapshot persistence.
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Save a snapshot. Saving an existing id replaces it.
    async fn save(&self, snapshot: &Snapshot) -> Result<(), ApiError>;

    /// Load a snapshot by id.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no snapshot has this id
    async fn load(&self, id: &SnapshotId) -> Result<Snapshot, ApiError>;

    /// All snapshots of a task, newest first.
    async fn list(&self, task_id: &FileId) -> Result<Vec<Snapshot>, ApiError>;

    /// Delete a snapshot.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no snapshot has this id
    async fn delete(&self, id: &SnapshotId) -> Result<(), ApiError>;
}
