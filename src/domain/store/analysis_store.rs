//! Analysis store - the templates a session edits, plus their pristine copies.
//!
//! The store is the only place templates are mutated. Every operation returns a
//! `Result` so callers can branch on failure, and also records the failure in
//! `error` so a view can show it without threading the error through.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::analysis::{AnalysisEdit, AnalysisError, TemplatedAnalysis};
use crate::domain::foundation::{DomainError, TemplateId};

use super::StoreError;

/// Store handle shared by application handlers.
pub type SharedAnalysisStore = Arc<RwLock<AnalysisStore>>;

/// Holds every template of the current session.
#[derive(Debug, Default)]
pub struct AnalysisStore {
    templates: HashMap<TemplateId, TemplatedAnalysis>,
    originals: HashMap<TemplateId, TemplatedAnalysis>,
    insertion_order: Vec<TemplateId>,
    active_template_id: Option<TemplateId>,
    is_editing: bool,
    error: Option<DomainError>,
}

impl AnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a fresh store for sharing between handlers.
    pub fn shared() -> SharedAnalysisStore {
        Arc::new(RwLock::new(Self::new()))
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn template(&self, id: &TemplateId) -> Option<&TemplatedAnalysis> {
        self.templates.get(id)
    }

    /// Pristine copy taken when the template was added.
    pub fn original(&self, id: &TemplateId) -> Option<&TemplatedAnalysis> {
        self.originals.get(id)
    }

    /// True when `id` is held live or as a pristine copy.
    pub fn has_template(&self, id: &TemplateId) -> bool {
        self.templates.contains_key(id) || self.originals.contains_key(id)
    }

    pub fn active_template_id(&self) -> Option<&TemplateId> {
        self.active_template_id.as_ref()
    }

    pub fn active_template(&self) -> Option<&TemplatedAnalysis> {
        self.active_template_id
            .as_ref()
            .and_then(|id| self.templates.get(id))
    }

    /// Template ids in the order they were added.
    pub fn template_ids(&self) -> &[TemplateId] {
        &self.insertion_order
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    pub fn error(&self) -> Option<&DomainError> {
        self.error.as_ref()
    }

    pub fn record_error(&mut self, error: impl Into<DomainError>) {
        let error = error.into();
        tracing::warn!(code = %error.code, message = %error.message, "Analysis store error");
        self.error = Some(error);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    // ───────────────────────────────────────────────────────────────
    // Template lifecycle
    // ───────────────────────────────────────────────────────────────

    /// Switches the active template. Unknown ids leave the active id unchanged.
    pub fn set_active_template(&mut self, id: &TemplateId) -> Result<(), StoreError> {
        if !self.templates.contains_key(id) {
            return self.fail(StoreError::TemplateNotFound(id.clone()));
        }
        tracing::debug!(template_id = %id, "Active template changed");
        self.active_template_id = Some(id.clone());
        Ok(())
    }

    /// Adds a template and records its pristine copy.
    ///
    /// Never overwrites: an id already present in either map is rejected.
    pub fn add_template(
        &mut self,
        id: TemplateId,
        data: TemplatedAnalysis,
        activate: bool,
    ) -> Result<(), StoreError> {
        if self.has_template(&id) {
            return self.fail(StoreError::TemplateExists(id));
        }

        tracing::info!(template_id = %id, activate, "Template added");
        self.originals.insert(id.clone(), data.clone());
        self.templates.insert(id.clone(), data);
        self.insertion_order.push(id.clone());
        if activate {
            self.active_template_id = Some(id);
        }
        Ok(())
    }

    /// Replaces the active template with the result of `updater`.
    ///
    /// With no active template nothing changes. A failing updater leaves the
    /// template untouched.
    pub fn handle_analysis_update<F>(&mut self, updater: F) -> Result<(), StoreError>
    where
        F: FnOnce(&TemplatedAnalysis) -> Result<TemplatedAnalysis, AnalysisError>,
    {
        let Some(id) = self.active_template_id.clone() else {
            return self.fail(StoreError::NoActiveTemplate);
        };
        self.handle_template_update(&id, updater)
    }

    /// Replaces the template `id` with the result of `updater`.
    ///
    /// Network results use this so they land on the template that issued the
    /// request, even if another template became active meanwhile.
    pub fn handle_template_update<F>(&mut self, id: &TemplateId, updater: F) -> Result<(), StoreError>
    where
        F: FnOnce(&TemplatedAnalysis) -> Result<TemplatedAnalysis, AnalysisError>,
    {
        let Some(current) = self.templates.get(id) else {
            return self.fail(StoreError::TemplateNotFound(id.clone()));
        };

        match updater(current) {
            Ok(updated) => {
                self.templates.insert(id.clone(), updated);
                self.is_editing = true;
                Ok(())
            }
            Err(err) => self.fail(err.into()),
        }
    }

    /// Applies a named edit to the active template.
    pub fn apply_edit(&mut self, edit: &AnalysisEdit) -> Result<(), StoreError> {
        self.handle_analysis_update(|analysis| edit.apply(analysis))
    }

    /// Id and copy of the active template, for work done outside the lock.
    pub fn active_entry(&mut self) -> Result<(TemplateId, TemplatedAnalysis), StoreError> {
        let entry = self
            .active_template_id
            .as_ref()
            .and_then(|id| self.templates.get(id).map(|data| (id.clone(), data.clone())));
        match entry {
            Some(entry) => Ok(entry),
            None => {
                let err = StoreError::NoActiveTemplate;
                self.record_error(err.clone());
                Err(err)
            }
        }
    }

    /// Restores the active template from its pristine copy.
    pub fn reset_analysis_to_original(&mut self) -> Result<(), StoreError> {
        let Some(id) = self.active_template_id.clone() else {
            return self.fail(StoreError::NoActiveTemplate);
        };
        let Some(original) = self.originals.get(&id).cloned() else {
            return self.fail(StoreError::TemplateNotFound(id));
        };

        tracing::info!(template_id = %id, "Template reset to original");
        self.templates.insert(id, original);
        self.is_editing = false;
        Ok(())
    }

    /// Removes a template and its pristine copy.
    ///
    /// Removing the active template activates the most recently added
    /// remaining template, or none.
    pub fn remove_template(&mut self, id: &TemplateId) -> Result<(), StoreError> {
        if self.templates.remove(id).is_none() {
            return self.fail(StoreError::TemplateNotFound(id.clone()));
        }
        self.originals.remove(id);
        self.insertion_order.retain(|existing| existing != id);

        if self.active_template_id.as_ref() == Some(id) {
            self.active_template_id = self.insertion_order.last().cloned();
            tracing::debug!(
                removed = %id,
                fallback = ?self.active_template_id.as_ref().map(TemplateId::as_str),
                "Active template removed"
            );
        }
        Ok(())
    }

    /// Replaces the templates named in `scope`, e.g. when restoring a snapshot.
    ///
    /// Every id in `scope` is dropped, then each entry of `templates` becomes
    /// both live value and pristine copy. Templates outside `scope` keep their
    /// edits and position. `active` is activated when present, otherwise the
    /// first restored entry, otherwise the previously active template if it
    /// survived. `is_editing` stays set only while a kept template has edits.
    pub fn replace_templates(
        &mut self,
        scope: &[TemplateId],
        templates: Vec<(TemplateId, TemplatedAnalysis)>,
        active: Option<&TemplateId>,
    ) {
        for id in scope {
            self.templates.remove(id);
            self.originals.remove(id);
        }
        self.insertion_order.retain(|id| !scope.contains(id));

        let mut restored = Vec::with_capacity(templates.len());
        for (id, data) in templates {
            if !scope.contains(&id) || self.templates.contains_key(&id) {
                tracing::warn!(template_id = %id, "Template ignored: outside replacement scope or repeated");
                continue;
            }
            self.originals.insert(id.clone(), data.clone());
            self.templates.insert(id.clone(), data);
            self.insertion_order.push(id.clone());
            restored.push(id);
        }

        let previous = self.active_template_id.take();
        self.active_template_id = active
            .filter(|id| self.templates.contains_key(*id))
            .cloned()
            .or_else(|| restored.first().cloned())
            .or_else(|| previous.filter(|id| self.templates.contains_key(id)))
            .or_else(|| self.insertion_order.last().cloned());
        self.is_editing = self
            .templates
            .iter()
            .any(|(id, data)| self.originals.get(id) != Some(data));
        self.error = None;
    }

    /// Drops all state. Lets tests and long-lived hosts start clean.
    pub fn dispose(&mut self) {
        *self = Self::default();
    }

    fn fail(&mut self, err: StoreError) -> Result<(), StoreError> {
        self.record_error(err.clone());
        Err(err)
    }
}
