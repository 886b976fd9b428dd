//! HTTP client for the transcript analysis service.
//!
//! One client covers every remote port: analysis, snapshots and document
//! export all live behind the same base URL.
//!
//! # Endpoints
//!
//! | Operation           | Request                               |
//! |---------------------|---------------------------------------|
//! | upload transcript   | `POST /upload` (multipart `file`)     |
//! | generate report     | `POST /report`                        |
//! | item content        | `POST /generate-item`                 |
//! | next steps          | `POST /next-steps`                    |
//! | sort evidence       | `POST /sort-evidence`                 |
//! | save snapshot       | `POST /snapshots`                     |
//! | load/delete         | `GET`/`DELETE /snapshots/{id}`        |
//! | list snapshots      | `GET /snapshots?task_id=...`          |
//! | export document     | `POST /export/{word,pdf}`             |

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::analysis::{NextStep, SectionKind, UnorderedReport};
use crate::domain::foundation::{FileId, SnapshotId};
use crate::domain::snapshot::Snapshot;
use crate::ports::{
    report_filename, AnalysisApi, ApiError, DocumentExportService, EvidenceGroup, ExportError,
    ExportFormat, ExportedDocument, SnapshotRepository, TranscriptUpload,
};

use super::dto::{
    FileRequest, ItemContentRequest, ItemContentResponse, NextStepsRequest, NextStepsResponse,
    SnapshotListResponse, SortEvidenceRequest, SortEvidenceResponse, UploadResponse,
};

/// Configuration for the HTTP analysis client.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL of the service, without trailing slash.
    pub base_url: String,
    /// Bearer token, when the service requires one.
    api_key: Option<Secret<String>>,
    /// Request timeout. Report generation can take minutes.
    pub timeout: Duration,
    /// Retries on transient failures.
    pub max_retries: u32,
}

impl HttpClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
            timeout: Duration::from_secs(120),
            max_retries: 2,
        }
    }

    pub fn with_api_key(mut self, api_key: Secret<String>) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// reqwest-backed implementation of the remote ports.
pub struct HttpAnalysisClient {
    config: HttpClientConfig,
    client: Client,
}

impl HttpAnalysisClient {
    pub fn new(config: HttpClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.bearer_auth(key.expose_secret()),
            None => request,
        }
    }

    fn map_transport(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if err.is_decode() {
            ApiError::decode(err.to_string())
        } else if err.is_connect() {
            ApiError::transport(format!("Connection failed: {}", err))
        } else {
            ApiError::transport(err.to_string())
        }
    }

    /// Sends the request built by `build`, retrying transient failures with
    /// exponential backoff. Non-success statuses become `ApiError::Status`.
    async fn execute<F>(&self, build: F) -> Result<Response, ApiError>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut attempt = 0;
        loop {
            let result = match self.authorize(build()).send().await {
                Ok(response) => check_status(response).await,
                Err(err) => Err(self.map_transport(err)),
            };

            match result {
                Ok(response) => return Ok(response),
                Err(err) if err.is_retryable() && attempt < self.config.max_retries => {
                    tracing::warn!(attempt, error = %err, "Analysis API request failed, retrying");
                    sleep(Duration::from_millis(500 << attempt.min(6))).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: serde::Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let response = self.execute(|| self.client.post(&url).json(body)).await?;
        self.decode(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self.execute(|| self.client.get(url)).await?;
        self.decode(response).await
    }

    async fn decode<T: DeserializeOwned>(&self, response: Response) -> Result<T, ApiError> {
        response.json::<T>().await.map_err(|e| self.map_transport(e))
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::debug!(status = status.as_u16(), %body, "Analysis API returned error status");
    Err(ApiError::status(status.as_u16(), body))
}

fn not_found_as(err: ApiError, what: impl FnOnce() -> String) -> ApiError {
    match err {
        ApiError::Status { status, .. } if status == StatusCode::NOT_FOUND.as_u16() => {
            ApiError::NotFound(what())
        }
        other => other,
    }
}

#[async_trait]
impl AnalysisApi for HttpAnalysisClient {
    async fn upload_transcript(&self, upload: TranscriptUpload) -> Result<FileId, ApiError> {
        let url = self.url("upload");
        let content_type = upload.content_type();
        tracing::info!(filename = %upload.filename, bytes = upload.bytes.len(), "Uploading transcript");

        let response = self
            .execute(|| {
                let part = Part::bytes(upload.bytes.clone())
                    .file_name(upload.filename.clone())
                    .mime_str(content_type)
                    .unwrap_or_else(|_| Part::bytes(upload.bytes.clone()).file_name(upload.filename.clone()));
                self.client.post(&url).multipart(Form::new().part("file", part))
            })
            .await?;
        let body: UploadResponse = self.decode(response).await?;

        FileId::new(body.file_id)
            .map_err(|e| ApiError::invalid_response(format!("upload returned no file id: {}", e)))
    }

    async fn generate_report(&self, file_id: &FileId) -> Result<UnorderedReport, ApiError> {
        tracing::info!(file_id = %file_id, "Generating report");
        self.post_json(
            "report",
            &FileRequest {
                file_id: file_id.as_str(),
            },
        )
        .await
    }

    async fn generate_item_content(
        &self,
        file_id: &FileId,
        section: SectionKind,
        heading: &str,
    ) -> Result<String, ApiError> {
        tracing::debug!(file_id = %file_id, %section, heading, "Generating item content");
        let body: ItemContentResponse = self
            .post_json(
                "generate-item",
                &ItemContentRequest {
                    file_id: file_id.as_str(),
                    section,
                    heading,
                },
            )
            .await?;
        Ok(body.content)
    }

    async fn generate_next_steps(
        &self,
        file_id: &FileId,
        areas: &[String],
    ) -> Result<Vec<NextStep>, ApiError> {
        tracing::debug!(file_id = %file_id, areas = areas.len(), "Generating next steps");
        let body: NextStepsResponse = self
            .post_json(
                "next-steps",
                &NextStepsRequest {
                    file_id: file_id.as_str(),
                    areas,
                },
            )
            .await?;
        Ok(body.next_steps)
    }

    async fn sort_evidence(
        &self,
        file_id: &FileId,
        section: SectionKind,
        headings: &[String],
    ) -> Result<Vec<EvidenceGroup>, ApiError> {
        tracing::debug!(file_id = %file_id, %section, headings = headings.len(), "Sorting evidence");
        let body: SortEvidenceResponse = self
            .post_json(
                "sort-evidence",
                &SortEvidenceRequest {
                    file_id: file_id.as_str(),
                    section,
                    headings,
                },
            )
            .await?;

        for group in &body.groups {
            group
                .validate()
                .map_err(|e| ApiError::invalid_response(format!("evidence group: {}", e)))?;
        }
        Ok(body.groups)
    }
}

#[async_trait]
impl SnapshotRepository for HttpAnalysisClient {
    async fn save(&self, snapshot: &Snapshot) -> Result<(), ApiError> {
        let url = self.url("snapshots");
        tracing::info!(snapshot_id = %snapshot.id, task_id = %snapshot.task_id, "Saving snapshot");
        self.execute(|| self.client.post(&url).json(snapshot)).await?;
        Ok(())
    }

    async fn load(&self, id: &SnapshotId) -> Result<Snapshot, ApiError> {
        self.get_json(&self.url(&format!("snapshots/{}", id)))
            .await
            .map_err(|e| not_found_as(e, || format!("Snapshot {}", id)))
    }

    async fn list(&self, task_id: &FileId) -> Result<Vec<Snapshot>, ApiError> {
        let url = self.url("snapshots");
        let response = self
            .execute(|| self.client.get(&url).query(&[("task_id", task_id.as_str())]))
            .await?;
        let body: SnapshotListResponse = self.decode(response).await?;

        let mut snapshots = body.snapshots;
        snapshots.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(snapshots)
    }

    async fn delete(&self, id: &SnapshotId) -> Result<(), ApiError> {
        let url = self.url(&format!("snapshots/{}", id));
        self.execute(|| self.client.delete(&url))
            .await
            .map_err(|e| not_found_as(e, || format!("Snapshot {}", id)))?;
        Ok(())
    }
}

#[async_trait]
impl DocumentExportService for HttpAnalysisClient {
    async fn export(
        &self,
        report: &UnorderedReport,
        format: ExportFormat,
    ) -> Result<ExportedDocument, ExportError> {
        let url = self.url(&format!("export/{}", format));
        tracing::info!(%format, name = %report.name, "Exporting document");

        let response = self
            .execute(|| self.client.post(&url).json(report))
            .await
            .map_err(|e| match &e {
                ApiError::Transport(_) | ApiError::Timeout { .. } => {
                    ExportError::service_unavailable(e.user_message())
                }
                _ => ExportError::conversion_failed(format, e.user_message()),
            })?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ExportError::conversion_failed(format, e.to_string()))?;
        if bytes.is_empty() {
            return Err(ExportError::conversion_failed(format, "empty document"));
        }

        Ok(ExportedDocument::new(bytes.to_vec(), format, &report_filename(report)))
    }

    async fn is_available(&self) -> bool {
        let url = self.url("health");
        match self.authorize(self.client.get(&url)).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
