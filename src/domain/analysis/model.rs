//! Ordered analysis aggregates.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{AnalysisItem, NextStep, OrderedSection, SectionEntry, TemplatedItem};

/// Which ordered section of an analysis an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Strengths,
    AreasToTarget,
}

impl SectionKind {
    /// Wire name used by the analysis API.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Strengths => "strengths",
            SectionKind::AreasToTarget => "areas_to_target",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interviewer guidance attached to a templated analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advice {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub advice: Vec<String>,
}

/// Analysis with stable item identities and explicit order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderedAnalysis {
    pub name: String,
    pub date: String,
    pub strengths: OrderedSection<AnalysisItem>,
    pub areas_to_target: OrderedSection<AnalysisItem>,
    #[serde(default)]
    pub next_steps: Vec<NextStep>,
}

/// Ordered analysis as held by the store for one template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplatedAnalysis {
    pub name: String,
    pub date: String,
    pub strengths: OrderedSection<TemplatedItem>,
    pub areas_to_target: OrderedSection<TemplatedItem>,
    #[serde(default)]
    pub next_steps: Vec<NextStep>,
    #[serde(default)]
    pub advices: Vec<Advice>,
}

/// Common view over analyses that have two ordered sections and next steps.
///
/// Edit operations are written once against this trait.
pub trait SectionedAnalysis: Clone {
    type Item: SectionEntry;

    fn section(&self, kind: SectionKind) -> &OrderedSection<Self::Item>;

    fn section_mut(&mut self, kind: SectionKind) -> &mut OrderedSection<Self::Item>;

    fn next_steps(&self) -> &[NextStep];

    fn next_steps_mut(&mut self) -> &mut Vec<NextStep>;
}

impl SectionedAnalysis for OrderedAnalysis {
    type Item = AnalysisItem;

    fn section(&self, kind: SectionKind) -> &OrderedSection<AnalysisItem> {
        match kind {
            SectionKind::Strengths => &self.strengths,
            SectionKind::AreasToTarget => &self.areas_to_target,
        }
    }

    fn section_mut(&mut self, kind: SectionKind) -> &mut OrderedSection<AnalysisItem> {
        match kind {
            SectionKind::Strengths => &mut self.strengths,
            SectionKind::AreasToTarget => &mut self.areas_to_target,
        }
    }

    fn next_steps(&self) -> &[NextStep] {
        &self.next_steps
    }

    fn next_steps_mut(&mut self) -> &mut Vec<NextStep> {
        &mut self.next_steps
    }
}

impl SectionedAnalysis for TemplatedAnalysis {
    type Item = TemplatedItem;

    fn section(&self, kind: SectionKind) -> &OrderedSection<TemplatedItem> {
        match kind {
            SectionKind::Strengths => &self.strengths,
            SectionKind::AreasToTarget => &self.areas_to_target,
        }
    }

    fn section_mut(&mut self, kind: SectionKind) -> &mut OrderedSection<TemplatedItem> {
        match kind {
            SectionKind::Strengths => &mut self.strengths,
            SectionKind::AreasToTarget => &mut self.areas_to_target,
        }
    }

    fn next_steps(&self) -> &[NextStep] {
        &self.next_steps
    }

    fn next_steps_mut(&mut self) -> &mut Vec<NextStep> {
        &mut self.next_steps
    }
}
