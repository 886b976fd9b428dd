//! Snapshot aggregate.
//!
//! A snapshot freezes the manual, full and competency templates of one task so
//! the session can be restored later. Snapshots form a chain through
//! `parent_id`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::analysis::TemplatedAnalysis;
use crate::domain::foundation::{FileId, SnapshotId, TemplateId, Timestamp};
use crate::domain::store::{AnalysisStore, TemplateKind};

/// What caused a snapshot to be taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerType {
    Manual,
    Auto,
    Restore,
}

impl fmt::Display for TriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TriggerType::Manual => "manual",
            TriggerType::Auto => "auto",
            TriggerType::Restore => "restore",
        };
        f.write_str(s)
    }
}

/// Saved copy of a task's templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: SnapshotId,
    pub created_at: Timestamp,
    pub task_id: FileId,
    #[serde(default)]
    pub manual_report: Option<TemplatedAnalysis>,
    #[serde(default)]
    pub full_report: Option<TemplatedAnalysis>,
    #[serde(rename = "ai_Competencies", default)]
    pub ai_competencies: Option<TemplatedAnalysis>,
    pub trigger_type: TriggerType,
    #[serde(default)]
    pub parent_id: Option<SnapshotId>,
}

impl Snapshot {
    /// Template kinds a snapshot holds, in restore order.
    pub const KINDS: [TemplateKind; 3] = [
        TemplateKind::ManualReport,
        TemplateKind::FullReport,
        TemplateKind::AiCompetencies,
    ];

    /// Template ids a restore replaces.
    pub fn scope() -> Vec<TemplateId> {
        Self::KINDS.iter().map(TemplateKind::template_id).collect()
    }

    /// Captures the snapshotted templates currently held by `store`.
    pub fn capture(
        task_id: FileId,
        store: &AnalysisStore,
        trigger_type: TriggerType,
        parent_id: Option<SnapshotId>,
    ) -> Self {
        let take = |kind: TemplateKind| store.template(&kind.template_id()).cloned();
        Self {
            id: SnapshotId::new(),
            created_at: Timestamp::now(),
            task_id,
            manual_report: take(TemplateKind::ManualReport),
            full_report: take(TemplateKind::FullReport),
            ai_competencies: take(TemplateKind::AiCompetencies),
            trigger_type,
            parent_id,
        }
    }

    /// True when no template was captured.
    pub fn is_empty(&self) -> bool {
        self.manual_report.is_none() && self.full_report.is_none() && self.ai_competencies.is_none()
    }

    /// Templates to load back into a store, keyed by their template ids.
    pub fn templates(&self) -> Vec<(TemplateId, TemplatedAnalysis)> {
        Self::KINDS
            .into_iter()
            .zip([&self.manual_report, &self.full_report, &self.ai_competencies])
            .filter_map(|(kind, data)| data.clone().map(|data| (kind.template_id(), data)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{to_templated, UnorderedReport};

    fn analysis(name: &str) -> TemplatedAnalysis {
        to_templated(&UnorderedReport::new(name, "2024-05-01").with_strength("Focus", "Stays on task"))
    }

    fn task() -> FileId {
        FileId::new("task-1").unwrap()
    }

    #[test]
    fn capture_takes_known_templates_only() {
        let mut store = AnalysisStore::new();
        store
            .add_template(TemplateKind::ManualReport.template_id(), analysis("Manual"), true)
            .unwrap();
        store
            .add_template(TemplateKind::AiParagraph.template_id(), analysis("Paragraph"), false)
            .unwrap();

        let snapshot = Snapshot::capture(task(), &store, TriggerType::Manual, None);

        assert_eq!(snapshot.manual_report.as_ref().unwrap().name, "Manual");
        assert!(snapshot.full_report.is_none());
        assert!(snapshot.ai_competencies.is_none());
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn templates_lists_captured_entries_with_manual_first() {
        let mut store = AnalysisStore::new();
        store
            .add_template(TemplateKind::FullReport.template_id(), analysis("Full"), true)
            .unwrap();
        store
            .add_template(TemplateKind::ManualReport.template_id(), analysis("Manual"), false)
            .unwrap();

        let snapshot = Snapshot::capture(task(), &store, TriggerType::Auto, None);
        let ids: Vec<_> = snapshot
            .templates()
            .into_iter()
            .map(|(id, _)| id.as_str().to_string())
            .collect();

        assert_eq!(ids, vec!["manual_report", "full_report"]);
    }

    #[test]
    fn scope_leaves_out_paragraph_template() {
        let scope = Snapshot::scope();
        assert_eq!(scope.len(), 3);
        assert!(!scope.contains(&TemplateKind::AiParagraph.template_id()));
    }

    #[test]
    fn serializes_competencies_under_wire_name() {
        let mut store = AnalysisStore::new();
        store
            .add_template(TemplateKind::AiCompetencies.template_id(), analysis("Comp"), true)
            .unwrap();
        let snapshot = Snapshot::capture(task(), &store, TriggerType::Restore, Some(SnapshotId::new()));

        let json = serde_json::to_value(&snapshot).unwrap();

        assert!(json.get("ai_Competencies").unwrap().is_object());
        assert_eq!(json["trigger_type"], "restore");
        assert_eq!(json["task_id"], "task-1");
    }

    #[test]
    fn deserializes_with_missing_templates() {
        let json = serde_json::json!({
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "created_at": "2024-05-01T10:00:00Z",
            "task_id": "task-9",
            "trigger_type": "auto"
        });

        let snapshot: Snapshot = serde_json::from_value(json).unwrap();

        assert!(snapshot.is_empty());
        assert!(snapshot.parent_id.is_none());
        assert_eq!(snapshot.trigger_type, TriggerType::Auto);
    }
}
