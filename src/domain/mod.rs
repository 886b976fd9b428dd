//! Domain layer containing the analysis model and its editing rules.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, errors)
//! - `analysis` - Ordered analysis model, conversions and pure edits
//! - `store` - Session store holding templates and their pristine copies
//! - `snapshot` - Persisted copies of the store's templates

pub mod analysis;
pub mod foundation;
pub mod snapshot;
pub mod store;
