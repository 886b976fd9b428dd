//! Analysis module - ordered interview analysis and its edit operations.
//!
//! # Components
//!
//! - `OrderedSection` - keyed collection with explicit order and stable ids
//! - `OrderedAnalysis` / `TemplatedAnalysis` - the editable aggregates
//! - `UnorderedReport` - the wire shape exchanged with the analysis API
//! - `converter` - pure conversions between the two shapes
//! - `edit` - pure edit operations and the `AnalysisEdit` command enum

mod converter;
mod edit;
mod errors;
mod item;
mod model;
mod next_step;
mod report;
mod section;

pub use converter::{
    from_ordered, from_templated, templated_to_report, to_ordered, to_templated, REPORT_SHAPE_TAG,
};
pub use edit::{
    add_item, add_point_step, add_sub_point, add_text_step, delete_item, delete_step,
    delete_sub_point, move_item, remove_item, rename_heading, rename_item, replace_next_steps,
    set_competency_alignment, set_evidence, update_content, update_item_content,
    update_main_point, update_step, update_sub_point, AnalysisEdit,
};
pub use errors::AnalysisError;
pub use item::{AnalysisItem, CompetencyTag, Evidence, TemplatedItem};
pub use model::{Advice, OrderedAnalysis, SectionKind, SectionedAnalysis, TemplatedAnalysis};
pub use next_step::{NextStep, PointStep};
pub use report::UnorderedReport;
pub use section::{OrderedSection, SectionEntry};
