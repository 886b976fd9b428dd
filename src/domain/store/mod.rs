//! Store module - session-scoped holder of every analysis template.
//!
//! # Components
//!
//! - `AnalysisStore` - live templates, pristine copies, active id, dirty flag
//! - `TemplateKind` - the known template variants and their ids
//! - `StoreError` - failures recorded by the store

mod analysis_store;
mod errors;
mod template_kind;

pub use analysis_store::{AnalysisStore, SharedAnalysisStore};
pub use errors::StoreError;
pub use template_kind::TemplateKind;
