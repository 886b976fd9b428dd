//! Analysis API Adapters.
//!
//! - `HttpAnalysisClient` - reqwest client for the remote service; also serves
//!   snapshots and document export
//! - `MockAnalysisApi` - queued responses and call tracking for tests

mod dto;
mod http_client;
mod mock_api;

pub use http_client::{HttpAnalysisClient, HttpClientConfig};
pub use mock_api::{MockAnalysisApi, MockCall, RecordedCall};
