//! Section item variants and the evidence they carry.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ItemId, ValidationError};

use super::SectionEntry;

/// Plain item of an ordered analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisItem {
    id: ItemId,
    heading: String,
    content: String,
}

impl SectionEntry for AnalysisItem {
    fn create(id: ItemId, heading: String, content: String) -> Self {
        Self { id, heading, content }
    }

    fn id(&self) -> ItemId {
        self.id
    }

    fn heading(&self) -> &str {
        &self.heading
    }

    fn set_heading(&mut self, heading: String) {
        self.heading = heading;
    }

    fn content(&self) -> &str {
        &self.content
    }

    fn set_content(&mut self, content: String) {
        self.content = content;
    }
}

/// Item of a templated analysis, with supporting evidence.
///
/// `competency_alignment` is only populated for areas to target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplatedItem {
    id: ItemId,
    heading: String,
    content: String,
    #[serde(default)]
    evidence: Vec<Evidence>,
    #[serde(default)]
    competency_alignment: Vec<CompetencyTag>,
}

impl TemplatedItem {
    pub fn evidence(&self) -> &[Evidence] {
        &self.evidence
    }

    pub fn competency_alignment(&self) -> &[CompetencyTag] {
        &self.competency_alignment
    }

    pub fn set_evidence(&mut self, evidence: Vec<Evidence>) {
        self.evidence = evidence;
    }

    pub fn set_competency_alignment(&mut self, tags: Vec<CompetencyTag>) {
        self.competency_alignment = tags;
    }
}

impl SectionEntry for TemplatedItem {
    fn create(id: ItemId, heading: String, content: String) -> Self {
        Self {
            id,
            heading,
            content,
            evidence: Vec::new(),
            competency_alignment: Vec::new(),
        }
    }

    fn id(&self) -> ItemId {
        self.id
    }

    fn heading(&self) -> &str {
        &self.heading
    }

    fn set_heading(&mut self, heading: String) {
        self.heading = heading;
    }

    fn content(&self) -> &str {
        &self.content
    }

    fn set_content(&mut self, content: String) {
        self.content = content;
    }
}

/// A quoted transcript excerpt substantiating a claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    pub quote: String,
    /// Speaker or document the quote comes from.
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Evidence {
    pub fn new(quote: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            quote: quote.into(),
            source: source.into(),
            role: None,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Rejects evidence without a quote.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.quote.trim().is_empty() {
            return Err(ValidationError::empty_field("evidence.quote"));
        }
        Ok(())
    }
}

/// Competency framework label an area to target is aligned with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompetencyTag(String);

impl CompetencyTag {
    pub fn new(tag: impl Into<String>) -> Result<Self, ValidationError> {
        let tag = tag.into();
        if tag.trim().is_empty() {
            return Err(ValidationError::empty_field("competency_tag"));
        }
        Ok(Self(tag))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templated_item_starts_without_evidence() {
        let item = TemplatedItem::create(ItemId::new(), "Focus".into(), "text".into());
        assert!(item.evidence().is_empty());
        assert!(item.competency_alignment().is_empty());
    }

    #[test]
    fn templated_item_deserializes_without_optional_fields() {
        let id = ItemId::new();
        let json = serde_json::json!({ "id": id, "heading": "H", "content": "C" });

        let item: TemplatedItem = serde_json::from_value(json).unwrap();
        assert_eq!(item.heading(), "H");
        assert!(item.evidence().is_empty());
    }

    #[test]
    fn evidence_requires_quote() {
        assert!(Evidence::new("  ", "Candidate").validate().is_err());
        assert!(Evidence::new("I led the rollout", "Candidate").validate().is_ok());
    }

    #[test]
    fn evidence_role_is_omitted_when_absent() {
        let json = serde_json::to_value(Evidence::new("q", "s")).unwrap();
        assert!(json.get("role").is_none());
    }

    #[test]
    fn competency_tag_rejects_blank() {
        assert!(CompetencyTag::new("").is_err());
        assert_eq!(CompetencyTag::new("Leadership").unwrap().as_str(), "Leadership");
    }
}
