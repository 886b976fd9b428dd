//! Mock analysis API for testing.
//!
//! Responses are queued per operation and consumed in order. Every call is
//! recorded so tests can assert on what was sent.
//!
//! # Example
//!
//! ```ignore
//! let api = MockAnalysisApi::new()
//!     .with_file_id("file-1")
//!     .with_report(report)
//!     .with_error(MockCall::GenerateNextSteps, ApiError::status(500, ""));
//! ```

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::analysis::{NextStep, SectionKind, UnorderedReport};
use crate::domain::foundation::FileId;
use crate::ports::{AnalysisApi, ApiError, EvidenceGroup, TranscriptUpload};

/// Operations the mock records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockCall {
    UploadTranscript,
    GenerateReport,
    GenerateItemContent,
    GenerateNextSteps,
    SortEvidence,
}

#[derive(Debug, Clone)]
enum Queued {
    FileId(String),
    Report(UnorderedReport),
    Content(String),
    NextSteps(Vec<NextStep>),
    Evidence(Vec<EvidenceGroup>),
    Error(ApiError),
}

/// A recorded call with its main argument rendered as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub call: MockCall,
    pub file_id: Option<String>,
    pub argument: String,
}

/// Configurable in-process stand-in for the analysis service.
#[derive(Debug, Clone, Default)]
pub struct MockAnalysisApi {
    queues: Arc<Mutex<HashMap<MockCall, VecDeque<Queued>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    delay: Duration,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockAnalysisApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn enqueue(self, call: MockCall, item: Queued) -> Self {
        lock(&self.queues).entry(call).or_default().push_back(item);
        self
    }

    pub fn with_file_id(self, file_id: impl Into<String>) -> Self {
        self.enqueue(MockCall::UploadTranscript, Queued::FileId(file_id.into()))
    }

    pub fn with_report(self, report: UnorderedReport) -> Self {
        self.enqueue(MockCall::GenerateReport, Queued::Report(report))
    }

    pub fn with_item_content(self, content: impl Into<String>) -> Self {
        self.enqueue(MockCall::GenerateItemContent, Queued::Content(content.into()))
    }

    pub fn with_next_steps(self, steps: Vec<NextStep>) -> Self {
        self.enqueue(MockCall::GenerateNextSteps, Queued::NextSteps(steps))
    }

    pub fn with_evidence(self, groups: Vec<EvidenceGroup>) -> Self {
        self.enqueue(MockCall::SortEvidence, Queued::Evidence(groups))
    }

    /// Queues an error for the given operation.
    pub fn with_error(self, call: MockCall, error: ApiError) -> Self {
        self.enqueue(call, Queued::Error(error))
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn calls_of(&self, call: MockCall) -> Vec<RecordedCall> {
        lock(&self.calls)
            .iter()
            .filter(|recorded| recorded.call == call)
            .cloned()
            .collect()
    }

    pub fn get_calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    async fn respond(
        &self,
        call: MockCall,
        file_id: Option<&FileId>,
        argument: String,
    ) -> Result<Option<Queued>, ApiError> {
        lock(&self.calls).push(RecordedCall {
            call,
            file_id: file_id.map(|id| id.as_str().to_string()),
            argument,
        });

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let next = lock(&self.queues)
            .get_mut(&call)
            .and_then(VecDeque::pop_front);
        match next {
            Some(Queued::Error(err)) => Err(err),
            other => Ok(other),
        }
    }
}

fn unexpected(call: MockCall) -> ApiError {
    ApiError::invalid_response(format!("mock queued the wrong response kind for {:?}", call))
}

#[async_trait]
impl AnalysisApi for MockAnalysisApi {
    async fn upload_transcript(&self, upload: TranscriptUpload) -> Result<FileId, ApiError> {
        let call = MockCall::UploadTranscript;
        let raw = match self.respond(call, None, upload.filename.clone()).await? {
            Some(Queued::FileId(id)) => id,
            None => "mock-file".to_string(),
            Some(_) => return Err(unexpected(call)),
        };
        FileId::new(raw).map_err(|e| ApiError::invalid_response(e.to_string()))
    }

    async fn generate_report(&self, file_id: &FileId) -> Result<UnorderedReport, ApiError> {
        let call = MockCall::GenerateReport;
        match self.respond(call, Some(file_id), String::new()).await? {
            Some(Queued::Report(report)) => Ok(report),
            None => Ok(UnorderedReport::default()),
            Some(_) => Err(unexpected(call)),
        }
    }

    async fn generate_item_content(
        &self,
        file_id: &FileId,
        section: SectionKind,
        heading: &str,
    ) -> Result<String, ApiError> {
        let call = MockCall::GenerateItemContent;
        let argument = format!("{}:{}", section, heading);
        match self.respond(call, Some(file_id), argument).await? {
            Some(Queued::Content(content)) => Ok(content),
            None => Ok(format!("Generated content for {}", heading)),
            Some(_) => Err(unexpected(call)),
        }
    }

    async fn generate_next_steps(
        &self,
        file_id: &FileId,
        areas: &[String],
    ) -> Result<Vec<NextStep>, ApiError> {
        let call = MockCall::GenerateNextSteps;
        match self.respond(call, Some(file_id), areas.join("|")).await? {
            Some(Queued::NextSteps(steps)) => Ok(steps),
            None => Ok(Vec::new()),
            Some(_) => Err(unexpected(call)),
        }
    }

    async fn sort_evidence(
        &self,
        file_id: &FileId,
        section: SectionKind,
        headings: &[String],
    ) -> Result<Vec<EvidenceGroup>, ApiError> {
        let call = MockCall::SortEvidence;
        let argument = format!("{}:{}", section, headings.join("|"));
        match self.respond(call, Some(file_id), argument).await? {
            Some(Queued::Evidence(groups)) => Ok(groups),
            None => Ok(Vec::new()),
            Some(_) => Err(unexpected(call)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_queued_responses_in_order() {
        let api = MockAnalysisApi::new()
            .with_item_content("first")
            .with_item_content("second");
        let file = FileId::new("f1").unwrap();

        let a = api
            .generate_item_content(&file, SectionKind::Strengths, "A")
            .await
            .unwrap();
        let b = api
            .generate_item_content(&file, SectionKind::Strengths, "B")
            .await
            .unwrap();

        assert_eq!((a.as_str(), b.as_str()), ("first", "second"));
        assert_eq!(api.call_count(), 2);
    }

    #[tokio::test]
    async fn queued_error_is_returned_once() {
        let api = MockAnalysisApi::new()
            .with_error(MockCall::GenerateReport, ApiError::status(500, r#"{"error":"down"}"#));
        let file = FileId::new("f1").unwrap();

        assert!(api.generate_report(&file).await.is_err());
        assert!(api.generate_report(&file).await.is_ok());
    }

    #[tokio::test]
    async fn records_call_arguments() {
        let api = MockAnalysisApi::new();
        let file = FileId::new("f1").unwrap();

        api.generate_next_steps(&file, &["Focus".to_string(), "Pacing".to_string()])
            .await
            .unwrap();

        let calls = api.calls_of(MockCall::GenerateNextSteps);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].argument, "Focus|Pacing");
        assert_eq!(calls[0].file_id.as_deref(), Some("f1"));
    }

    #[tokio::test]
    async fn upload_defaults_to_mock_file_id() {
        let api = MockAnalysisApi::new();
        let upload = TranscriptUpload::new("t.txt", b"hello".to_vec()).unwrap();
        assert_eq!(api.upload_transcript(upload).await.unwrap().as_str(), "mock-file");
    }
}
