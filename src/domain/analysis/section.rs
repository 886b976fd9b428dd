//! OrderedSection - keyed collection with an explicit, mutable order.
//!
//! Items are addressed by [`ItemId`], never by heading. Headings are display
//! labels that may collide after editing; [`OrderedSection::id_for_heading`]
//! is the only heading lookup and is meant for the edit boundary.
//!
//! Ids are minted inside the section on insert, so no caller can introduce a
//! duplicate or orphan. Deserialized sections are re-checked against the
//! invariant before they are accepted.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::domain::foundation::ItemId;

use super::{AnalysisError, SectionKind};

/// An item that can live inside an [`OrderedSection`].
pub trait SectionEntry: Clone {
    /// Builds an item with the given identity.
    fn create(id: ItemId, heading: String, content: String) -> Self;

    fn id(&self) -> ItemId;

    fn heading(&self) -> &str;

    fn set_heading(&mut self, heading: String);

    fn content(&self) -> &str;

    fn set_content(&mut self, content: String);
}

/// Keyed, ordered collection of section items.
///
/// Invariant: every id in `order` has an entry in `items`, and every key in
/// `items` appears exactly once in `order`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOrderedSection<T>")]
#[serde(bound(deserialize = "T: SectionEntry + Deserialize<'de>"))]
pub struct OrderedSection<T> {
    order: Vec<ItemId>,
    items: HashMap<ItemId, T>,
}

/// Unchecked wire form, validated by `TryFrom`.
#[derive(Deserialize)]
struct RawOrderedSection<T> {
    order: Vec<ItemId>,
    items: HashMap<ItemId, T>,
}

impl<T: SectionEntry> TryFrom<RawOrderedSection<T>> for OrderedSection<T> {
    type Error = AnalysisError;

    fn try_from(raw: RawOrderedSection<T>) -> Result<Self, Self::Error> {
        let section = Self {
            order: raw.order,
            items: raw.items,
        };
        section.check_invariants()?;
        Ok(section)
    }
}

impl<T> Default for OrderedSection<T> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            items: HashMap::new(),
        }
    }
}

impl<T: SectionEntry> OrderedSection<T> {
    // ════════════════════════════════════════════════════════════════════════════════
    // Construction
    // ════════════════════════════════════════════════════════════════════════════════

    /// Creates an empty section.
    pub fn new() -> Self {
        Self::default()
    }

    // ════════════════════════════════════════════════════════════════════════════════
    // Accessors
    // ════════════════════════════════════════════════════════════════════════════════

    /// Number of items.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Item ids in display order.
    pub fn order(&self) -> &[ItemId] {
        &self.order
    }

    /// Looks up an item by id.
    pub fn get(&self, id: &ItemId) -> Option<&T> {
        self.items.get(id)
    }

    /// Returns true if the section holds an item with this id.
    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.contains_key(id)
    }

    /// Position of an item in the display order.
    pub fn position(&self, id: &ItemId) -> Option<usize> {
        self.order.iter().position(|candidate| candidate == id)
    }

    /// Iterates items in display order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    /// Returns the first item (in order) whose heading equals `heading`.
    pub fn id_for_heading(&self, heading: &str) -> Option<ItemId> {
        self.iter()
            .find(|item| item.heading() == heading)
            .map(|item| item.id())
    }

    /// Every item whose heading equals `heading`, in order.
    pub fn ids_for_heading(&self, heading: &str) -> Vec<ItemId> {
        self.iter()
            .filter(|item| item.heading() == heading)
            .map(|item| item.id())
            .collect()
    }

    /// Headings in display order.
    pub fn headings(&self) -> Vec<String> {
        self.iter().map(|item| item.heading().to_string()).collect()
    }

    /// Headings in display order, each listed once.
    pub fn unique_headings(&self) -> Vec<String> {
        let mut headings = self.headings();
        let mut seen = std::collections::HashSet::new();
        headings.retain(|heading| seen.insert(heading.clone()));
        headings
    }

    // ════════════════════════════════════════════════════════════════════════════════
    // Mutations
    // ════════════════════════════════════════════════════════════════════════════════

    /// Appends a new item and returns its freshly minted id.
    pub fn push_back(&mut self, heading: impl Into<String>, content: impl Into<String>) -> ItemId {
        let id = self.mint(heading.into(), content.into());
        self.order.push(id);
        id
    }

    /// Prepends a new item and returns its freshly minted id.
    pub fn push_front(&mut self, heading: impl Into<String>, content: impl Into<String>) -> ItemId {
        let id = self.mint(heading.into(), content.into());
        self.order.insert(0, id);
        id
    }

    fn mint(&mut self, heading: String, content: String) -> ItemId {
        let mut id = ItemId::new();
        while self.items.contains_key(&id) {
            id = ItemId::new();
        }
        self.items.insert(id, T::create(id, heading, content));
        id
    }

    /// Removes an item from both the order and the item map.
    pub fn remove(&mut self, section: SectionKind, id: &ItemId) -> Result<T, AnalysisError> {
        let item = self
            .items
            .remove(id)
            .ok_or(AnalysisError::ItemNotFound { section, id: *id })?;
        self.order.retain(|candidate| candidate != id);
        Ok(item)
    }

    /// Applies `f` to the item with the given id.
    ///
    /// `f` cannot change the item's id: [`SectionEntry`] exposes no setter for it.
    pub fn update<F>(&mut self, section: SectionKind, id: &ItemId, f: F) -> Result<(), AnalysisError>
    where
        F: FnOnce(&mut T),
    {
        let item = self
            .items
            .get_mut(id)
            .ok_or(AnalysisError::ItemNotFound { section, id: *id })?;
        f(item);
        Ok(())
    }

    /// Moves an item to `to_index`, clamped to the last position.
    pub fn move_to(
        &mut self,
        section: SectionKind,
        id: &ItemId,
        to_index: usize,
    ) -> Result<(), AnalysisError> {
        let from = self
            .position(id)
            .ok_or(AnalysisError::ItemNotFound { section, id: *id })?;
        let moved = self.order.remove(from);
        let to = to_index.min(self.order.len());
        self.order.insert(to, moved);
        Ok(())
    }

    /// Verifies the order/items invariant.
    pub fn check_invariants(&self) -> Result<(), AnalysisError> {
        let mut seen = HashSet::with_capacity(self.order.len());
        for id in &self.order {
            if !seen.insert(*id) {
                return Err(AnalysisError::invalid_section(format!(
                    "item {} appears more than once in order",
                    id
                )));
            }
            match self.items.get(id) {
                None => {
                    return Err(AnalysisError::invalid_section(format!(
                        "item {} is ordered but missing",
                        id
                    )))
                }
                Some(item) if item.id() != *id => {
                    return Err(AnalysisError::invalid_section(format!(
                        "item keyed {} carries id {}",
                        id,
                        item.id()
                    )))
                }
                Some(_) => {}
            }
        }
        if self.items.len() != self.order.len() {
            return Err(AnalysisError::invalid_section(format!(
                "{} items but {} ordered ids",
                self.items.len(),
                self.order.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::AnalysisItem;
    use proptest::prelude::*;

    type Section = OrderedSection<AnalysisItem>;

    const KIND: SectionKind = SectionKind::Strengths;

    fn section_of(headings: &[&str]) -> Section {
        let mut section = Section::new();
        for heading in headings {
            section.push_back(*heading, format!("{} content", heading));
        }
        section
    }

    #[test]
    fn push_back_appends_in_order() {
        let section = section_of(&["A", "B", "C"]);

        assert_eq!(section.headings(), vec!["A", "B", "C"]);
        assert!(section.check_invariants().is_ok());
    }

    #[test]
    fn push_front_prepends() {
        let mut section = section_of(&["A"]);
        let id = section.push_front("Z", "");

        assert_eq!(section.order()[0], id);
        assert_eq!(section.headings(), vec!["Z", "A"]);
    }

    #[test]
    fn id_for_heading_returns_first_match() {
        let section = section_of(&["Dup", "Other", "Dup"]);

        let id = section.id_for_heading("Dup").unwrap();
        assert_eq!(section.position(&id), Some(0));
        assert!(section.id_for_heading("Missing").is_none());
    }

    #[test]
    fn ids_for_heading_returns_every_match() {
        let section = section_of(&["Dup", "Other", "Dup"]);

        let ids = section.ids_for_heading("Dup");

        assert_eq!(ids.len(), 2);
        assert_eq!(section.position(&ids[1]), Some(2));
        assert_eq!(section.unique_headings(), vec!["Dup", "Other"]);
    }

    #[test]
    fn remove_unknown_id_is_item_not_found() {
        let mut section = section_of(&["A"]);
        let stray = ItemId::new();

        let err = section.remove(KIND, &stray).unwrap_err();
        assert!(matches!(err, AnalysisError::ItemNotFound { .. }));
        assert_eq!(section.len(), 1);
    }

    #[test]
    fn move_to_clamps_to_end() {
        let mut section = section_of(&["A", "B", "C"]);
        let a = section.id_for_heading("A").unwrap();

        section.move_to(KIND, &a, 99).unwrap();

        assert_eq!(section.headings(), vec!["B", "C", "A"]);
        assert!(section.check_invariants().is_ok());
    }

    #[test]
    fn move_to_front() {
        let mut section = section_of(&["A", "B", "C"]);
        let c = section.id_for_heading("C").unwrap();

        section.move_to(KIND, &c, 0).unwrap();

        assert_eq!(section.headings(), vec!["C", "A", "B"]);
    }

    #[test]
    fn deserialize_accepts_consistent_section() {
        let section = section_of(&["A", "B"]);
        let json = serde_json::to_string(&section).unwrap();

        let restored: Section = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, section);
    }

    #[test]
    fn deserialize_rejects_orphaned_item() {
        let id = ItemId::new();
        let json = serde_json::json!({
            "order": [],
            "items": { id.to_string(): { "id": id, "heading": "A", "content": "" } }
        });

        let result: Result<Section, _> = serde_json::from_value(json);
        assert!(result.is_err());
    }

    #[test]
    fn deserialize_rejects_duplicate_order_entry() {
        let id = ItemId::new();
        let json = serde_json::json!({
            "order": [id, id],
            "items": { id.to_string(): { "id": id, "heading": "A", "content": "" } }
        });

        let result: Result<Section, _> = serde_json::from_value(json);
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn mutations_preserve_invariants(
            headings in proptest::collection::vec("[a-z]{1,6}", 0..12),
            moves in proptest::collection::vec((0usize..12, 0usize..12), 0..8),
        ) {
            let mut section = Section::new();
            for heading in &headings {
                section.push_back(heading.clone(), "");
            }
            for (from, to) in moves {
                if let Some(id) = section.order().get(from).copied() {
                    section.move_to(KIND, &id, to).unwrap();
                }
            }
            prop_assert!(section.check_invariants().is_ok());
            prop_assert_eq!(section.len(), headings.len());
        }
    }
}
