//! Analysis handlers - transcript upload and AI generation.

mod generate_item_content;
mod generate_next_steps;
mod generate_report;
mod sort_evidence;
mod upload_transcript;

pub use generate_item_content::{GenerateItemContentCommand, GenerateItemContentHandler};
pub use generate_next_steps::{GenerateNextStepsCommand, GenerateNextStepsHandler};
pub use generate_report::{GenerateReportCommand, GenerateReportHandler, GenerateReportResult};
pub use sort_evidence::{SortEvidenceCommand, SortEvidenceHandler, SortEvidenceResult};
pub use upload_transcript::{UploadTranscriptCommand, UploadTranscriptHandler};
