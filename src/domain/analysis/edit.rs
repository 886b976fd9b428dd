//! Edit operations over ordered analyses.
//!
//! Every operation borrows the previous value and returns a new one; the
//! input is never mutated. Section edits resolve headings to ids once, at the
//! boundary, and then work on ids.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ItemId;

use super::{
    AnalysisError, CompetencyTag, Evidence, NextStep, PointStep, SectionEntry, SectionKind,
    SectionedAnalysis, TemplatedAnalysis,
};

// ════════════════════════════════════════════════════════════════════════════════
// Section edits
// ════════════════════════════════════════════════════════════════════════════════

/// Adds an empty item at the top of a section.
///
/// With `use_counter` the heading is `"{prefix} {n + 1}"` where `n` is the
/// current item count; otherwise it is the bare prefix.
pub fn add_item<A: SectionedAnalysis>(
    analysis: &A,
    section: SectionKind,
    prefix: &str,
    use_counter: bool,
) -> A {
    let mut next = analysis.clone();
    let target = next.section_mut(section);
    let heading = if use_counter {
        format!("{} {}", prefix, target.len() + 1)
    } else {
        prefix.to_string()
    };
    target.push_front(heading, String::new());
    next
}

/// Renames the first item headed `old_heading`.
pub fn rename_heading<A: SectionedAnalysis>(
    analysis: &A,
    section: SectionKind,
    old_heading: &str,
    new_heading: &str,
) -> Result<A, AnalysisError> {
    let id = resolve(analysis, section, old_heading)?;
    rename_item(analysis, section, &id, new_heading)
}

pub fn rename_item<A: SectionedAnalysis>(
    analysis: &A,
    section: SectionKind,
    id: &ItemId,
    new_heading: &str,
) -> Result<A, AnalysisError> {
    let mut next = analysis.clone();
    next.section_mut(section)
        .update(section, id, |item| item.set_heading(new_heading.to_string()))?;
    Ok(next)
}

/// Deletes the first item headed `heading`.
pub fn delete_item<A: SectionedAnalysis>(
    analysis: &A,
    section: SectionKind,
    heading: &str,
) -> Result<A, AnalysisError> {
    let id = resolve(analysis, section, heading)?;
    remove_item(analysis, section, &id)
}

pub fn remove_item<A: SectionedAnalysis>(
    analysis: &A,
    section: SectionKind,
    id: &ItemId,
) -> Result<A, AnalysisError> {
    let mut next = analysis.clone();
    next.section_mut(section).remove(section, id)?;
    Ok(next)
}

/// Replaces the content of the first item headed `heading`.
pub fn update_content<A: SectionedAnalysis>(
    analysis: &A,
    section: SectionKind,
    heading: &str,
    content: &str,
) -> Result<A, AnalysisError> {
    let id = resolve(analysis, section, heading)?;
    update_item_content(analysis, section, &id, content)
}

pub fn update_item_content<A: SectionedAnalysis>(
    analysis: &A,
    section: SectionKind,
    id: &ItemId,
    content: &str,
) -> Result<A, AnalysisError> {
    let mut next = analysis.clone();
    next.section_mut(section)
        .update(section, id, |item| item.set_content(content.to_string()))?;
    Ok(next)
}

/// Moves an item to a new position (drag and drop).
pub fn move_item<A: SectionedAnalysis>(
    analysis: &A,
    section: SectionKind,
    id: &ItemId,
    to_index: usize,
) -> Result<A, AnalysisError> {
    let mut next = analysis.clone();
    next.section_mut(section).move_to(section, id, to_index)?;
    Ok(next)
}

pub fn set_evidence(
    analysis: &TemplatedAnalysis,
    section: SectionKind,
    id: &ItemId,
    evidence: Vec<Evidence>,
) -> Result<TemplatedAnalysis, AnalysisError> {
    let mut next = analysis.clone();
    next.section_mut(section)
        .update(section, id, |item| item.set_evidence(evidence))?;
    Ok(next)
}

/// Sets competency tags on an area to target.
pub fn set_competency_alignment(
    analysis: &TemplatedAnalysis,
    id: &ItemId,
    tags: Vec<CompetencyTag>,
) -> Result<TemplatedAnalysis, AnalysisError> {
    let section = SectionKind::AreasToTarget;
    let mut next = analysis.clone();
    next.areas_to_target
        .update(section, id, |item| item.set_competency_alignment(tags))?;
    Ok(next)
}

fn resolve<A: SectionedAnalysis>(
    analysis: &A,
    section: SectionKind,
    heading: &str,
) -> Result<ItemId, AnalysisError> {
    analysis
        .section(section)
        .id_for_heading(heading)
        .ok_or_else(|| AnalysisError::heading_not_found(section, heading))
}

// ════════════════════════════════════════════════════════════════════════════════
// Next-step edits
// ════════════════════════════════════════════════════════════════════════════════

/// Appends an empty text step.
pub fn add_text_step<A: SectionedAnalysis>(analysis: &A) -> A {
    let mut next = analysis.clone();
    next.next_steps_mut().push(NextStep::text(""));
    next
}

/// Appends a blank structured step.
///
/// Steps are appended, unlike section items which are prepended.
pub fn add_point_step<A: SectionedAnalysis>(analysis: &A) -> A {
    let mut next = analysis.clone();
    next.next_steps_mut().push(NextStep::blank_points());
    next
}

pub fn update_step<A: SectionedAnalysis>(
    analysis: &A,
    index: usize,
    step: NextStep,
) -> Result<A, AnalysisError> {
    let mut next = analysis.clone();
    *step_mut(&mut next, index)? = step;
    Ok(next)
}

pub fn delete_step<A: SectionedAnalysis>(analysis: &A, index: usize) -> Result<A, AnalysisError> {
    let mut next = analysis.clone();
    step_mut(&mut next, index)?;
    next.next_steps_mut().remove(index);
    Ok(next)
}

pub fn update_main_point<A: SectionedAnalysis>(
    analysis: &A,
    index: usize,
    main: &str,
) -> Result<A, AnalysisError> {
    let mut next = analysis.clone();
    points_mut(&mut next, index)?.main = main.to_string();
    Ok(next)
}

pub fn update_sub_point<A: SectionedAnalysis>(
    analysis: &A,
    step: usize,
    point: usize,
    value: &str,
) -> Result<A, AnalysisError> {
    let mut next = analysis.clone();
    let sub_points = &mut points_mut(&mut next, step)?.sub_points;
    let len = sub_points.len();
    let slot = sub_points
        .get_mut(point)
        .ok_or(AnalysisError::SubPointIndexOutOfRange { step, index: point, len })?;
    *slot = value.to_string();
    Ok(next)
}

pub fn delete_sub_point<A: SectionedAnalysis>(
    analysis: &A,
    step: usize,
    point: usize,
) -> Result<A, AnalysisError> {
    let mut next = analysis.clone();
    let sub_points = &mut points_mut(&mut next, step)?.sub_points;
    if point >= sub_points.len() {
        return Err(AnalysisError::SubPointIndexOutOfRange {
            step,
            index: point,
            len: sub_points.len(),
        });
    }
    sub_points.remove(point);
    Ok(next)
}

/// Appends an empty sub-point to a structured step.
pub fn add_sub_point<A: SectionedAnalysis>(analysis: &A, step: usize) -> Result<A, AnalysisError> {
    let mut next = analysis.clone();
    points_mut(&mut next, step)?.sub_points.push(String::new());
    Ok(next)
}

/// Replaces every next step, e.g. with freshly generated ones.
pub fn replace_next_steps<A: SectionedAnalysis>(analysis: &A, steps: Vec<NextStep>) -> A {
    let mut next = analysis.clone();
    *next.next_steps_mut() = steps;
    next
}

fn step_mut<A: SectionedAnalysis>(analysis: &mut A, index: usize) -> Result<&mut NextStep, AnalysisError> {
    let steps = analysis.next_steps_mut();
    let len = steps.len();
    steps
        .get_mut(index)
        .ok_or(AnalysisError::StepIndexOutOfRange { index, len })
}

fn points_mut<A: SectionedAnalysis>(
    analysis: &mut A,
    index: usize,
) -> Result<&mut PointStep, AnalysisError> {
    step_mut(analysis, index)?
        .as_points_mut()
        .ok_or(AnalysisError::NotAPointStep { index })
}

// ════════════════════════════════════════════════════════════════════════════════
// Edit commands
// ════════════════════════════════════════════════════════════════════════════════

/// A single edit against the active template, as dispatched by the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisEdit {
    AddItem {
        section: SectionKind,
        prefix: String,
        use_counter: bool,
    },
    RenameHeading {
        section: SectionKind,
        old_heading: String,
        new_heading: String,
    },
    RenameItem {
        section: SectionKind,
        id: ItemId,
        heading: String,
    },
    DeleteItem {
        section: SectionKind,
        heading: String,
    },
    RemoveItem {
        section: SectionKind,
        id: ItemId,
    },
    UpdateContent {
        section: SectionKind,
        heading: String,
        content: String,
    },
    UpdateItemContent {
        section: SectionKind,
        id: ItemId,
        content: String,
    },
    MoveItem {
        section: SectionKind,
        id: ItemId,
        to_index: usize,
    },
    SetEvidence {
        section: SectionKind,
        id: ItemId,
        evidence: Vec<Evidence>,
    },
    SetCompetencyAlignment {
        id: ItemId,
        tags: Vec<CompetencyTag>,
    },
    AddTextStep,
    AddPointStep,
    UpdateStep {
        index: usize,
        step: NextStep,
    },
    DeleteStep {
        index: usize,
    },
    UpdateMainPoint {
        index: usize,
        main: String,
    },
    UpdateSubPoint {
        step: usize,
        point: usize,
        value: String,
    },
    DeleteSubPoint {
        step: usize,
        point: usize,
    },
    AddSubPoint {
        step: usize,
    },
    ReplaceNextSteps {
        steps: Vec<NextStep>,
    },
}

impl AnalysisEdit {
    /// Applies the edit, returning the new analysis.
    pub fn apply(&self, analysis: &TemplatedAnalysis) -> Result<TemplatedAnalysis, AnalysisError> {
        match self {
            AnalysisEdit::AddItem {
                section,
                prefix,
                use_counter,
            } => Ok(add_item(analysis, *section, prefix, *use_counter)),
            AnalysisEdit::RenameHeading {
                section,
                old_heading,
                new_heading,
            } => rename_heading(analysis, *section, old_heading, new_heading),
            AnalysisEdit::RenameItem { section, id, heading } => {
                rename_item(analysis, *section, id, heading)
            }
            AnalysisEdit::DeleteItem { section, heading } => delete_item(analysis, *section, heading),
            AnalysisEdit::RemoveItem { section, id } => remove_item(analysis, *section, id),
            AnalysisEdit::UpdateContent {
                section,
                heading,
                content,
            } => update_content(analysis, *section, heading, content),
            AnalysisEdit::UpdateItemContent { section, id, content } => {
                update_item_content(analysis, *section, id, content)
            }
            AnalysisEdit::MoveItem {
                section,
                id,
                to_index,
            } => move_item(analysis, *section, id, *to_index),
            AnalysisEdit::SetEvidence {
                section,
                id,
                evidence,
            } => set_evidence(analysis, *section, id, evidence.clone()),
            AnalysisEdit::SetCompetencyAlignment { id, tags } => {
                set_competency_alignment(analysis, id, tags.clone())
            }
            AnalysisEdit::AddTextStep => Ok(add_text_step(analysis)),
            AnalysisEdit::AddPointStep => Ok(add_point_step(analysis)),
            AnalysisEdit::UpdateStep { index, step } => update_step(analysis, *index, step.clone()),
            AnalysisEdit::DeleteStep { index } => delete_step(analysis, *index),
            AnalysisEdit::UpdateMainPoint { index, main } => update_main_point(analysis, *index, main),
            AnalysisEdit::UpdateSubPoint { step, point, value } => {
                update_sub_point(analysis, *step, *point, value)
            }
            AnalysisEdit::DeleteSubPoint { step, point } => delete_sub_point(analysis, *step, *point),
            AnalysisEdit::AddSubPoint { step } => add_sub_point(analysis, *step),
            AnalysisEdit::ReplaceNextSteps { steps } => Ok(replace_next_steps(analysis, steps.clone())),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
