//! Snapshot module - saved copies of a session's templates.

mod aggregate;

pub use aggregate::{Snapshot, TriggerType};
