//! Export handlers.

mod export_document;

pub use export_document::{ExportDocumentCommand, ExportDocumentHandler};
