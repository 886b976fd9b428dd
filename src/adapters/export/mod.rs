//! Document Export Adapters.

mod mock_exporter;

pub use mock_exporter::{render_plain_text, MockDocumentExporter};
