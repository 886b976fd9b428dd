//! Request and response bodies of the analysis service.

use serde::{Deserialize, Serialize};

use crate::domain::analysis::{NextStep, SectionKind};
use crate::domain::snapshot::Snapshot;
use crate::ports::EvidenceGroup;

#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    #[serde(alias = "id", alias = "fileId")]
    pub file_id: String,
}

#[derive(Debug, Serialize)]
pub struct FileRequest<'a> {
    pub file_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ItemContentRequest<'a> {
    pub file_id: &'a str,
    pub section: SectionKind,
    pub heading: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ItemContentResponse {
    #[serde(alias = "text")]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct NextStepsRequest<'a> {
    pub file_id: &'a str,
    pub areas: &'a [String],
}

#[derive(Debug, Deserialize)]
pub struct NextStepsResponse {
    #[serde(default)]
    pub next_steps: Vec<NextStep>,
}

#[derive(Debug, Serialize)]
pub struct SortEvidenceRequest<'a> {
    pub file_id: &'a str,
    pub section: SectionKind,
    pub headings: &'a [String],
}

#[derive(Debug, Deserialize)]
pub struct SortEvidenceResponse {
    #[serde(default)]
    pub groups: Vec<EvidenceGroup>,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotListResponse {
    #[serde(default)]
    pub snapshots: Vec<Snapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_response_accepts_id_aliases() {
        let a: UploadResponse = serde_json::from_str(r#"{"file_id":"f1"}"#).unwrap();
        let b: UploadResponse = serde_json::from_str(r#"{"fileId":"f2"}"#).unwrap();
        assert_eq!(a.file_id, "f1");
        assert_eq!(b.file_id, "f2");
    }

    #[test]
    fn next_steps_response_reads_mixed_shapes() {
        let json = r#"{"next_steps":["Practice pacing",{"main":"Delegate","sub_points":["Weekly 1:1s"]}]}"#;
        let resp: NextStepsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.next_steps.len(), 2);
        assert_eq!(resp.next_steps[0], NextStep::text("Practice pacing"));
        assert_eq!(resp.next_steps[1].as_points().unwrap().main, "Delegate");
    }

    #[test]
    fn item_request_serializes_section_tag() {
        let req = ItemContentRequest {
            file_id: "f1",
            section: SectionKind::AreasToTarget,
            heading: "Focus",
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["section"], "areas_to_target");
    }
}
