//! Snapshot handlers - save, restore and list saved sessions.

mod list_snapshots;
mod restore_snapshot;
mod save_snapshot;

pub use list_snapshots::{ListSnapshotsHandler, ListSnapshotsQuery};
pub use restore_snapshot::{RestoreSnapshotCommand, RestoreSnapshotHandler};
pub use save_snapshot::{SaveSnapshotCommand, SaveSnapshotHandler};
