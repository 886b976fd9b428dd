//! Editor defaults

use serde::Deserialize;

use crate::domain::analysis::{AnalysisEdit, SectionKind};

use super::error::ValidationError;

/// Defaults used when adding items from the editor
#[derive(Debug, Clone, Deserialize)]
pub struct EditorConfig {
    /// Heading prefix for new strengths
    #[serde(default = "default_strength_prefix")]
    pub strength_prefix: String,

    /// Heading prefix for new areas to target
    #[serde(default = "default_area_prefix")]
    pub area_prefix: String,

    /// Append the item count to new headings (`"New Strength 3"`)
    #[serde(default = "default_use_counter")]
    pub use_counter: bool,
}

impl EditorConfig {
    /// Prefix for new items in `section`.
    pub fn prefix_for(&self, section: SectionKind) -> &str {
        match section {
            SectionKind::Strengths => &self.strength_prefix,
            SectionKind::AreasToTarget => &self.area_prefix,
        }
    }

    /// Edit that adds a blank item to `section` with the configured heading.
    pub fn add_item_edit(&self, section: SectionKind) -> AnalysisEdit {
        AnalysisEdit::AddItem {
            section,
            prefix: self.prefix_for(section).to_string(),
            use_counter: self.use_counter,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.strength_prefix.trim().is_empty() {
            return Err(ValidationError::EmptyEditorPrefix("strength_prefix"));
        }
        if self.area_prefix.trim().is_empty() {
            return Err(ValidationError::EmptyEditorPrefix("area_prefix"));
        }
        Ok(())
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            strength_prefix: default_strength_prefix(),
            area_prefix: default_area_prefix(),
            use_counter: default_use_counter(),
        }
    }
}

fn default_strength_prefix() -> String {
    "New Strength".to_string()
}

fn default_area_prefix() -> String {
    "New Area".to_string()
}

fn default_use_counter() -> bool {
    true
}
