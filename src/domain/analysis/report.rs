//! Unordered report - the wire shape produced by report generation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::NextStep;

/// Plain report as exchanged with the analysis API.
///
/// Sections are heading → content mappings. Enumeration order is the order the
/// entries arrived in, but the API attaches no meaning to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnorderedReport {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub strengths: IndexMap<String, String>,
    #[serde(default)]
    pub areas_to_target: IndexMap<String, String>,
    #[serde(default)]
    pub next_steps: Vec<NextStep>,
}

impl UnorderedReport {
    pub fn new(name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            ..Default::default()
        }
    }

    pub fn with_strength(mut self, heading: impl Into<String>, content: impl Into<String>) -> Self {
        self.strengths.insert(heading.into(), content.into());
        self
    }

    pub fn with_area(mut self, heading: impl Into<String>, content: impl Into<String>) -> Self {
        self.areas_to_target.insert(heading.into(), content.into());
        self
    }

    pub fn with_next_step(mut self, step: NextStep) -> Self {
        self.next_steps.push(step);
        self
    }
}
