//! # Document
//!
//! The tracked state slice of the editor: the id-to-section map plus the
//! display order. This is exactly what history snapshots and what the
//! export file serializes; selection and filter live outside it.
//!
//! Invariants, upheld after every mutation:
//! - `section_order` and the key set of `sections` are a bijection.
//! - `order` fields read in `section_order` sequence are `0, 1, ..., n-1`.

use pagecraft_model::Section;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ordered collection of sections. Cheap to clone for snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    pub sections: HashMap<String, Section>,
    #[serde(rename = "sectionOrder")]
    pub section_order: Vec<String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.section_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.section_order.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sections.contains_key(id)
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.get(id)
    }

    /// Sections in display order.
    pub fn ordered_sections(&self) -> Vec<&Section> {
        self.section_order
            .iter()
            .filter_map(|id| self.sections.get(id))
            .collect()
    }

    /// Position of a section in the display order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.section_order.iter().position(|s| s == id)
    }

    /// Append a section at the end of the order.
    pub(crate) fn push_section(&mut self, mut section: Section) {
        section.order = self.section_order.len();
        self.section_order.push(section.id.clone());
        self.sections.insert(section.id.clone(), section);
    }

    /// Remove a section and its order entry. Returns it if present.
    pub(crate) fn remove_section(&mut self, id: &str) -> Option<Section> {
        let removed = self.sections.remove(id)?;
        self.section_order.retain(|s| s != id);
        self.renumber();
        Some(removed)
    }

    /// Rewrite every section's `order` field from its position in
    /// `section_order`.
    pub(crate) fn renumber(&mut self) {
        for (index, id) in self.section_order.iter().enumerate() {
            if let Some(section) = self.sections.get_mut(id) {
                section.order = index;
            }
        }
    }
}
