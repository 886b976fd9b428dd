//! SortEvidenceHandler - attaches transcript evidence to section items.

use std::sync::Arc;

use crate::application::handlers::fail;
use crate::application::HandlerError;
use crate::domain::analysis::{set_evidence, SectionKind, SectionedAnalysis};
use crate::domain::foundation::FileId;
use crate::domain::store::SharedAnalysisStore;
use crate::ports::AnalysisApi;

/// Command to sort evidence for one section of the active template.
#[derive(Debug, Clone)]
pub struct SortEvidenceCommand {
    pub file_id: FileId,
    pub section: SectionKind,
}

/// Outcome of evidence sorting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortEvidenceResult {
    /// Items that received evidence. A group whose heading is shared by
    /// several items counts once per item.
    pub attached: usize,
    /// Headings returned by the service that match no item.
    pub unmatched: Vec<String>,
}

/// Handler for evidence sorting.
pub struct SortEvidenceHandler {
    api: Arc<dyn AnalysisApi>,
    store: SharedAnalysisStore,
}

impl SortEvidenceHandler {
    pub fn new(api: Arc<dyn AnalysisApi>, store: SharedAnalysisStore) -> Self {
        Self { api, store }
    }

    pub async fn handle(&self, cmd: SortEvidenceCommand) -> Result<SortEvidenceResult, HandlerError> {
        let (template_id, headings) = {
            let mut store = self.store.write().await;
            let (template_id, analysis) = store.active_entry()?;
            (template_id, analysis.section(cmd.section).unique_headings())
        };

        let groups = match self
            .api
            .sort_evidence(&cmd.file_id, cmd.section, &headings)
            .await
        {
            Ok(groups) => groups,
            Err(err) => return fail(&self.store, err).await,
        };

        let mut result = SortEvidenceResult {
            attached: 0,
            unmatched: Vec::new(),
        };
        self.store
            .write()
            .await
            .handle_template_update(&template_id, |analysis| {
                let mut next = analysis.clone();
                for group in groups {
                    let ids = next.section(cmd.section).ids_for_heading(&group.heading);
                    if ids.is_empty() {
                        result.unmatched.push(group.heading);
                        continue;
                    }
                    if ids.len() > 1 {
                        tracing::debug!(heading = %group.heading, items = ids.len(), "Evidence shared by duplicate headings");
                    }
                    for id in &ids {
                        next = set_evidence(&next, cmd.section, id, group.evidence.clone())?;
                    }
                    result.attached += ids.len();
                }
                Ok(next)
            })?;

        if !result.unmatched.is_empty() {
            tracing::warn!(unmatched = ?result.unmatched, "Evidence returned for unknown headings");
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MockAnalysisApi, MockCall};
    use crate::domain::analysis::{to_templated, Evidence, UnorderedReport};
    use crate::domain::store::{AnalysisStore, TemplateKind};
    use crate::ports::EvidenceGroup;

    #[tokio::test]
    async fn attaches_groups_by_heading_and_reports_unmatched() {
        let store = AnalysisStore::shared();
        let analysis = to_templated(
            &UnorderedReport::new("Jane", "2024-05-01")
                .with_strength("Communication", "Clear")
                .with_strength("Ownership", "Drives"),
        );
        store
            .write()
            .await
            .add_template(TemplateKind::ManualReport.template_id(), analysis, true)
            .unwrap();

        let quote = Evidence::new("I wrote the weekly update", "Candidate");
        let api = Arc::new(MockAnalysisApi::new().with_evidence(vec![
            EvidenceGroup {
                heading: "Communication".to_string(),
                evidence: vec![quote.clone()],
            },
            EvidenceGroup {
                heading: "Humour".to_string(),
                evidence: Vec::new(),
            },
        ]));
        let handler = SortEvidenceHandler::new(api, store.clone());

        let result = handler
            .handle(SortEvidenceCommand {
                file_id: FileId::new("file-1").unwrap(),
                section: SectionKind::Strengths,
            })
            .await
            .unwrap();

        assert_eq!(result.attached, 1);
        assert_eq!(result.unmatched, vec!["Humour".to_string()]);

        let store = store.read().await;
        let strengths = &store.active_template().unwrap().strengths;
        let id = strengths.id_for_heading("Communication").unwrap();
        assert_eq!(strengths.get(&id).unwrap().evidence(), &[quote]);
    }

    #[tokio::test]
    async fn duplicate_headings_all_receive_evidence() {
        let store = AnalysisStore::shared();
        let mut analysis = to_templated(
            &UnorderedReport::new("Jane", "2024-05-01")
                .with_strength("Communication", "Clear")
                .with_strength("Ownership", "Drives"),
        );
        analysis.strengths.push_back("Communication", "Also clear");
        store
            .write()
            .await
            .add_template(TemplateKind::ManualReport.template_id(), analysis, true)
            .unwrap();

        let quote = Evidence::new("I ran the retro", "Candidate");
        let api = Arc::new(MockAnalysisApi::new().with_evidence(vec![EvidenceGroup {
            heading: "Communication".to_string(),
            evidence: vec![quote.clone()],
        }]));
        let handler = SortEvidenceHandler::new(api.clone(), store.clone());

        let result = handler
            .handle(SortEvidenceCommand {
                file_id: FileId::new("file-1").unwrap(),
                section: SectionKind::Strengths,
            })
            .await
            .unwrap();

        assert_eq!(result.attached, 2);
        assert!(result.unmatched.is_empty());
        assert_eq!(
            api.calls_of(MockCall::SortEvidence)[0].argument,
            "strengths:Communication|Ownership"
        );

        let store = store.read().await;
        let strengths = &store.active_template().unwrap().strengths;
        for id in strengths.ids_for_heading("Communication") {
            assert_eq!(strengths.get(&id).unwrap().evidence(), &[quote.clone()]);
        }
        let ownership = strengths.id_for_heading("Ownership").unwrap();
        assert!(strengths.get(&ownership).unwrap().evidence().is_empty());
    }
}
