//! Mock document exporter.
//!
//! Renders the report as plain text instead of a real Word/PDF file, so tests
//! can inspect what would have been exported.

use async_trait::async_trait;
use std::fmt::Write as _;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::analysis::{NextStep, UnorderedReport};
use crate::ports::{
    report_filename, DocumentExportService, ExportError, ExportFormat, ExportedDocument,
};

/// Renders a report the way the exported document lays it out.
pub fn render_plain_text(report: &UnorderedReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", report.name);
    let _ = writeln!(out, "{}", report.date);

    for (title, section) in [
        ("Strengths", &report.strengths),
        ("Areas to target", &report.areas_to_target),
    ] {
        let _ = writeln!(out, "\n{}", title);
        for (heading, content) in section {
            let _ = writeln!(out, "## {}\n{}", heading, content);
        }
    }

    if !report.next_steps.is_empty() {
        let _ = writeln!(out, "\nNext steps");
        for (i, step) in report.next_steps.iter().enumerate() {
            match step {
                NextStep::Text(text) => {
                    let _ = writeln!(out, "{}. {}", i + 1, text);
                }
                NextStep::Points(points) => {
                    let _ = writeln!(out, "{}. {}", i + 1, points.main);
                    for sub in &points.sub_points {
                        let _ = writeln!(out, "   - {}", sub);
                    }
                }
            }
        }
    }
    out
}

/// Exporter that never leaves the process.
#[derive(Debug, Clone, Default)]
pub struct MockDocumentExporter {
    exports: Arc<Mutex<Vec<(ExportFormat, UnorderedReport)>>>,
    fail_with: Option<ExportError>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockDocumentExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every export call fails with `error`.
    pub fn failing(error: ExportError) -> Self {
        Self {
            fail_with: Some(error),
            ..Self::default()
        }
    }

    pub fn export_count(&self) -> usize {
        lock(&self.exports).len()
    }

    /// Reports passed to `export`, in call order.
    pub fn exported(&self) -> Vec<(ExportFormat, UnorderedReport)> {
        lock(&self.exports).clone()
    }
}

#[async_trait]
impl DocumentExportService for MockDocumentExporter {
    async fn export(
        &self,
        report: &UnorderedReport,
        format: ExportFormat,
    ) -> Result<ExportedDocument, ExportError> {
        lock(&self.exports).push((format, report.clone()));
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        Ok(ExportedDocument::new(
            render_plain_text(report).into_bytes(),
            format,
            &report_filename(report),
        ))
    }

    async fn is_available(&self) -> bool {
        self.fail_with.is_none()
    }
}
