//! Conversions between the wire report and ordered analyses.
//!
//! Forward conversion mints fresh item ids on every call; converting the same
//! report twice yields different ids. Reverse conversion drops ids and keys
//! each section by the item's current heading, so items that share a heading
//! collapse into one entry holding the content of the last one in order.

use indexmap::IndexMap;

use crate::domain::store::TemplateKind;

use super::{OrderedAnalysis, OrderedSection, SectionEntry, TemplatedAnalysis, UnorderedReport};

/// Tag accepted by [`from_templated`] for the plain report shape.
pub const REPORT_SHAPE_TAG: &str = "report";

/// Builds an ordered analysis from a wire report.
pub fn to_ordered(report: &UnorderedReport) -> OrderedAnalysis {
    OrderedAnalysis {
        name: report.name.clone(),
        date: report.date.clone(),
        strengths: section_from_entries(&report.strengths),
        areas_to_target: section_from_entries(&report.areas_to_target),
        next_steps: report.next_steps.clone(),
    }
}

/// Builds a templated analysis from a wire report, with no evidence or advices.
pub fn to_templated(report: &UnorderedReport) -> TemplatedAnalysis {
    TemplatedAnalysis {
        name: report.name.clone(),
        date: report.date.clone(),
        strengths: section_from_entries(&report.strengths),
        areas_to_target: section_from_entries(&report.areas_to_target),
        next_steps: report.next_steps.clone(),
        advices: Vec::new(),
    }
}

/// Flattens an ordered analysis back into the wire report.
pub fn from_ordered(ordered: &OrderedAnalysis) -> UnorderedReport {
    UnorderedReport {
        name: ordered.name.clone(),
        date: ordered.date.clone(),
        strengths: entries_from_section(&ordered.strengths),
        areas_to_target: entries_from_section(&ordered.areas_to_target),
        next_steps: ordered.next_steps.clone(),
    }
}

/// Flattens a templated analysis into the wire report for `target`.
///
/// `target` is [`REPORT_SHAPE_TAG`] or a template kind tag such as
/// `"full_report"`. Returns `None` for any other tag. Evidence, competency
/// alignment and advices have no place in the wire shape and are dropped.
pub fn from_templated(templated: &TemplatedAnalysis, target: &str) -> Option<UnorderedReport> {
    if target != REPORT_SHAPE_TAG && target.parse::<TemplateKind>().is_err() {
        return None;
    }
    Some(templated_to_report(templated))
}

/// Flattens a templated analysis into the [`REPORT_SHAPE_TAG`] wire report.
pub fn templated_to_report(templated: &TemplatedAnalysis) -> UnorderedReport {
    UnorderedReport {
        name: templated.name.clone(),
        date: templated.date.clone(),
        strengths: entries_from_section(&templated.strengths),
        areas_to_target: entries_from_section(&templated.areas_to_target),
        next_steps: templated.next_steps.clone(),
    }
}

fn section_from_entries<T: SectionEntry>(entries: &IndexMap<String, String>) -> OrderedSection<T> {
    let mut section = OrderedSection::new();
    for (heading, content) in entries {
        section.push_back(heading.clone(), content.clone());
    }
    section
}

fn entries_from_section<T: SectionEntry>(section: &OrderedSection<T>) -> IndexMap<String, String> {
    let mut entries = IndexMap::with_capacity(section.len());
    for item in section.iter() {
        entries.insert(item.heading().to_string(), item.content().to_string());
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{set_evidence, Evidence, NextStep, SectionKind, SectionedAnalysis};
    use proptest::prelude::*;

    fn sample_report() -> UnorderedReport {
        UnorderedReport::new("Jordan Lee", "2024-03-02")
            .with_strength("Communication", "text A")
            .with_strength("Ownership", "text B")
            .with_area("Delegation", "text C")
            .with_next_step(NextStep::text("Find a mentor"))
    }

    #[test]
    fn single_strength_becomes_single_ordered_item() {
        let report = UnorderedReport::default().with_strength("Communication", "text A");

        let ordered = to_ordered(&report);

        assert_eq!(ordered.strengths.len(), 1);
        let id = ordered.strengths.order()[0];
        let item = ordered.strengths.get(&id).unwrap();
        assert_eq!(item.heading(), "Communication");
        assert_eq!(item.content(), "text A");
        assert!(ordered.areas_to_target.is_empty());
        assert!(ordered.next_steps.is_empty());
    }

    #[test]
    fn to_ordered_preserves_enumeration_order() {
        let ordered = to_ordered(&sample_report());
        assert_eq!(ordered.strengths.headings(), vec!["Communication", "Ownership"]);
        assert_eq!(ordered.name, "Jordan Lee");
        assert_eq!(ordered.next_steps, vec![NextStep::text("Find a mentor")]);
    }

    #[test]
    fn converting_twice_mints_different_ids() {
        let report = sample_report();
        let first = to_ordered(&report);
        let second = to_ordered(&report);

        assert_ne!(first.strengths.order(), second.strengths.order());
    }

    #[test]
    fn to_templated_starts_without_evidence_or_advices() {
        let templated = to_templated(&sample_report());

        assert!(templated.advices.is_empty());
        assert!(templated
            .areas_to_target
            .iter()
            .all(|item| item.evidence().is_empty() && item.competency_alignment().is_empty()));
    }

    #[test]
    fn from_ordered_follows_current_order_and_headings() {
        let mut ordered = to_ordered(&sample_report());
        let ownership = ordered.strengths.id_for_heading("Ownership").unwrap();
        ordered
            .section_mut(SectionKind::Strengths)
            .move_to(SectionKind::Strengths, &ownership, 0)
            .unwrap();

        let report = from_ordered(&ordered);

        let headings: Vec<_> = report.strengths.keys().cloned().collect();
        assert_eq!(headings, vec!["Ownership", "Communication"]);
    }

    #[test]
    fn duplicate_headings_collapse_last_in_order_wins() {
        let mut ordered = to_ordered(&sample_report());
        let ownership = ordered.strengths.id_for_heading("Ownership").unwrap();
        ordered
            .strengths
            .update(SectionKind::Strengths, &ownership, |item| {
                item.set_heading("Communication".into())
            })
            .unwrap();

        let report = from_ordered(&ordered);

        assert_eq!(report.strengths.len(), 1);
        assert_eq!(report.strengths["Communication"], "text B");
    }

    #[test]
    fn from_templated_accepts_known_tags() {
        let templated = to_templated(&sample_report());

        assert!(from_templated(&templated, "report").is_some());
        assert!(from_templated(&templated, "full_report").is_some());
        assert!(from_templated(&templated, "ai_competencies").is_some());
    }

    #[test]
    fn templated_to_report_matches_report_tag() {
        let templated = to_templated(&sample_report());
        let first = templated.strengths.order()[0];
        let templated = set_evidence(
            &templated,
            SectionKind::Strengths,
            &first,
            vec![Evidence::new("I owned the rollout", "Transcript")],
        )
        .unwrap();

        let report = templated_to_report(&templated);

        assert_eq!(Some(report.clone()), from_templated(&templated, REPORT_SHAPE_TAG));
        assert_eq!(report.strengths.len(), templated.strengths.len());
    }

    #[test]
    fn from_templated_rejects_unknown_tag() {
        let templated = to_templated(&sample_report());
        assert!(from_templated(&templated, "spreadsheet").is_none());
    }

    fn report_strategy() -> impl Strategy<Value = UnorderedReport> {
        let section = proptest::collection::vec(("[A-Za-z ]{1,12}", ".{0,24}"), 0..8);
        (section.clone(), section).prop_map(|(strengths, areas)| {
            let mut report = UnorderedReport::new("Candidate", "2024-01-01");
            for (heading, content) in strengths {
                report.strengths.insert(heading, content);
            }
            for (heading, content) in areas {
                report.areas_to_target.insert(heading, content);
            }
            report
        })
    }

    proptest! {
        #[test]
        fn round_trip_reproduces_headings_and_content(report in report_strategy()) {
            let restored = from_ordered(&to_ordered(&report));
            prop_assert_eq!(restored, report);
        }

        #[test]
        fn forward_conversion_keeps_entry_counts(report in report_strategy()) {
            let ordered = to_ordered(&report);
            prop_assert_eq!(ordered.strengths.len(), report.strengths.len());
            prop_assert_eq!(ordered.areas_to_target.len(), report.areas_to_target.len());
        }
    }
}
