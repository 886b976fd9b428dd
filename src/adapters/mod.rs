//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `analysis_api` - HTTP client for the analysis service, plus its mock
//! - `snapshot` - In-memory snapshot repository
//! - `export` - Mock document exporter

pub mod analysis_api;
pub mod export;
pub mod snapshot;

pub use analysis_api::{HttpAnalysisClient, HttpClientConfig, MockAnalysisApi, MockCall};
pub use export::MockDocumentExporter;
pub use snapshot::InMemorySnapshotRepository;
