//! The analysis variants a session keeps side by side.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{TemplateId, ValidationError};

/// Known template variants of an interview analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    /// Hand-edited copy of the generated report.
    ManualReport,
    /// AI-written paragraph summary.
    AiParagraph,
    /// AI analysis aligned to a competency framework.
    AiCompetencies,
    /// Full generated report, as delivered.
    FullReport,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 4] = [
        TemplateKind::ManualReport,
        TemplateKind::AiParagraph,
        TemplateKind::AiCompetencies,
        TemplateKind::FullReport,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::ManualReport => "manual_report",
            TemplateKind::AiParagraph => "ai_paragraph",
            TemplateKind::AiCompetencies => "ai_competencies",
            TemplateKind::FullReport => "full_report",
        }
    }

    /// Store key used for this variant.
    pub fn template_id(&self) -> TemplateId {
        TemplateId::from_static(self.as_str())
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_format("template_kind", format!("unknown kind '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_kind_from_its_tag() {
        for kind in TemplateKind::ALL {
            assert_eq!(kind.as_str().parse::<TemplateKind>().unwrap(), kind);
        }
    }

    #[test]
    fn rejects_unknown_tag() {
        assert!("manual".parse::<TemplateKind>().is_err());
    }

    #[test]
    fn template_id_matches_tag() {
        assert_eq!(TemplateKind::FullReport.template_id().as_str(), "full_report");
    }
}
