//! # Document Store
//!
//! Sole owner of section data. Every mutation runs synchronously to
//! completion, either fully applies or fully no-ops, and leaves the
//! document invariants intact. Structural operations on a missing id are
//! no-ops, tolerant of stale references from a UI that has not yet
//! observed a deletion.
//!
//! The store composes two explicitly separate state slices:
//! - tracked: the [`Document`] (sections + order), snapshotted by
//!   [`History`] on every committed change;
//! - untracked: selection and filter, plain presentation state that
//!   undo/redo never touches.
//!
//! Consumers observe committed state through [`DocumentStore::subscribe`];
//! listeners fire once per committed mutation, after invariants are
//! restored.

use crate::{Document, History};
use pagecraft_model::{
    generate_id, PropsPatch, Section, SectionFilter, SectionProps, SectionType,
};
use pagecraft_security::{sanitize_patch, sanitize_props, validate_section, ValidationError};
use serde_json::Value;
use std::collections::HashSet;

/// Callback observing committed document state.
pub type Listener = Box<dyn Fn(&Document)>;

/// What to do with individually invalid entries during a bulk import.
///
/// The original product behavior silently dropped invalid entries; the
/// policy is explicit here so callers can opt into strictness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportPolicy {
    /// Drop invalid entries with a warning; import whatever validates.
    #[default]
    SkipInvalid,
    /// Any invalid entry fails the whole import, leaving state untouched.
    AllOrNothing,
}

/// Outcome of a bulk import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// Sections committed to the document.
    pub imported: usize,
    /// Entries dropped under [`ImportPolicy::SkipInvalid`].
    pub skipped: usize,
}

/// Mutable editing state: tracked document, untracked selection/filter,
/// snapshot history, and change listeners.
pub struct DocumentStore {
    doc: Document,
    selected_section_id: Option<String>,
    section_filter: SectionFilter,
    history: History,
    listeners: Vec<Listener>,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore {
    pub fn new() -> Self {
        Self {
            doc: Document::new(),
            selected_section_id: None,
            section_filter: SectionFilter::All,
            history: History::new(),
            listeners: Vec::new(),
        }
    }

    /// Run a mutation against the tracked document. If it changed
    /// anything, the pre-mutation snapshot is pushed to history and
    /// listeners are notified. No-op mutations leave history untouched.
    fn commit<R>(&mut self, label: &str, mutate: impl FnOnce(&mut Document) -> R) -> R {
        let before = self.doc.clone();
        let out = mutate(&mut self.doc);
        if self.doc != before {
            tracing::debug!(mutation = label, sections = self.doc.len(), "committed");
            self.history.push(before);
            self.notify();
        }
        out
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener(&self.doc);
        }
    }

    /// Clear selection if it points at a section that no longer exists.
    fn reconcile_selection(&mut self) {
        if let Some(id) = &self.selected_section_id {
            if !self.doc.contains(id) {
                self.selected_section_id = None;
            }
        }
    }

    // ----- mutations ------------------------------------------------------

    /// Create a section of the given type: fresh id, type defaults merged
    /// with the caller's (sanitized) props, appended at the end of the
    /// order, and selected. Always succeeds; bad input degrades rather
    /// than rejects.
    pub fn add_section(&mut self, section_type: SectionType, mut patch: PropsPatch) -> String {
        let id = generate_id();

        let mut props = SectionProps::new(&id);
        props.apply_patch(&section_type.default_props());
        sanitize_patch(&mut patch);
        props.apply_patch(&patch);
        sanitize_props(&mut props);

        let section = Section {
            id: id.clone(),
            section_type,
            order: 0,
            props,
        };
        self.commit("add_section", |doc| doc.push_section(section));
        self.selected_section_id = Some(id.clone());
        id
    }

    /// Merge a partial property edit into an existing section. Omitted
    /// fields keep their prior value. No-op if the id is absent.
    ///
    /// Callers driving this from live text input are expected to debounce
    /// before committing; every call that changes state is one undo step.
    pub fn update_section(&mut self, id: &str, mut patch: PropsPatch) {
        if !self.doc.contains(id) {
            return;
        }
        sanitize_patch(&mut patch);
        self.commit("update_section", |doc| {
            if let Some(section) = doc.sections.get_mut(id) {
                section.props.apply_patch(&patch);
            }
        });
    }

    /// Delete a section, clearing selection if it was selected. No-op if
    /// the id is absent.
    pub fn remove_section(&mut self, id: &str) {
        if !self.doc.contains(id) {
            return;
        }
        self.commit("remove_section", |doc| {
            doc.remove_section(id);
        });
        self.reconcile_selection();
    }

    /// Copy a section under a fresh id, appended at the end of the order
    /// and selected. Returns the new id, or `None` if the source id is
    /// absent.
    pub fn duplicate_section(&mut self, id: &str) -> Option<String> {
        let mut copy = self.doc.section(id)?.clone();
        let new_id = generate_id();
        copy.id = new_id.clone();
        copy.props.id = new_id.clone();

        self.commit("duplicate_section", |doc| doc.push_section(copy));
        self.selected_section_id = Some(new_id.clone());
        Some(new_id)
    }

    /// Set selection. Existence is not validated here; callers pass a
    /// known id or `None`.
    pub fn select_section(&mut self, id: Option<String>) {
        self.selected_section_id = id;
    }

    /// Replace the display order wholesale and renumber to match. Ids not
    /// present in the document are skipped; present ids missing from the
    /// new order are kept at the end in their prior relative order, so
    /// the order/section bijection survives defective callers.
    pub fn reorder_sections(&mut self, new_order: Vec<String>) {
        self.commit("reorder_sections", |doc| {
            let mut order = Vec::with_capacity(doc.len());
            let mut seen = HashSet::new();
            for id in new_order {
                if doc.contains(&id) && seen.insert(id.clone()) {
                    order.push(id);
                }
            }
            for id in &doc.section_order {
                if !seen.contains(id) {
                    order.push(id.clone());
                }
            }
            doc.section_order = order;
            doc.renumber();
        });
    }

    /// Splice the section at `from` out of the order and reinsert it at
    /// `to`. This is the primitive behind interactive drag reordering and
    /// is called on every hover-position change, not just on drop.
    pub fn move_section(&mut self, from: usize, to: usize) {
        self.commit("move_section", |doc| {
            if from == to || from >= doc.section_order.len() {
                return;
            }
            let id = doc.section_order.remove(from);
            let to = to.min(doc.section_order.len());
            doc.section_order.insert(to, id);
            doc.renumber();
        });
    }

    /// Swap a section with its previous neighbor. No-op at the top.
    pub fn move_section_up(&mut self, id: &str) {
        if let Some(index) = self.doc.position(id) {
            if index > 0 {
                self.commit("move_section_up", |doc| {
                    doc.section_order.swap(index - 1, index);
                    doc.renumber();
                });
            }
        }
    }

    /// Swap a section with its next neighbor. No-op at the bottom.
    pub fn move_section_down(&mut self, id: &str) {
        if let Some(index) = self.doc.position(id) {
            if index + 1 < self.doc.len() {
                self.commit("move_section_down", |doc| {
                    doc.section_order.swap(index, index + 1);
                    doc.renumber();
                });
            }
        }
    }

    /// Reset to the empty document and clear selection.
    pub fn clear_all_sections(&mut self) {
        self.commit("clear_all_sections", |doc| {
            *doc = Document::new();
        });
        self.selected_section_id = None;
    }

    /// Wholesale replace the document from a sequence of raw section
    /// values. Every entry is independently validated and sanitized;
    /// surviving sections get sequential order values in input sequence
    /// order. Selection is cleared.
    ///
    /// Under [`ImportPolicy::SkipInvalid`] a malformed entry is dropped
    /// with a warning and never fails the call. If no entry survives, the
    /// document is left untouched and the summary reports zero imported;
    /// surfacing that as a user-facing error is the import pipeline's
    /// call. Under [`ImportPolicy::AllOrNothing`] any invalid entry fails
    /// the import with the aggregated errors and the document is left
    /// untouched.
    pub fn import_sections(
        &mut self,
        entries: &[Value],
        policy: ImportPolicy,
    ) -> Result<ImportSummary, ValidationError> {
        let mut valid: Vec<Section> = Vec::new();
        let mut seen_ids = HashSet::new();
        let mut skipped = 0usize;
        let mut errors = Vec::new();

        for (index, entry) in entries.iter().enumerate() {
            let outcome = validate_section(entry).and_then(|section| {
                if seen_ids.insert(section.id.clone()) {
                    Ok(section)
                } else {
                    Err(ValidationError::new(format!(
                        "duplicate section id `{}`",
                        section.id
                    )))
                }
            });

            match outcome {
                Ok(mut section) => {
                    sanitize_props(&mut section.props);
                    valid.push(section);
                }
                Err(e) => match policy {
                    ImportPolicy::SkipInvalid => {
                        tracing::warn!(index, error = %e, "skipping invalid section during import");
                        skipped += 1;
                    }
                    ImportPolicy::AllOrNothing => {
                        errors.extend(e.errors.into_iter().map(|m| format!("entry {index}: {m}")));
                    }
                },
            }
        }

        if !errors.is_empty() {
            return Err(ValidationError { errors });
        }

        let imported = valid.len();
        if imported > 0 {
            self.commit("import_sections", |doc| {
                *doc = Document::new();
                for section in valid {
                    doc.push_section(section);
                }
            });
            self.selected_section_id = None;
        }

        Ok(ImportSummary { imported, skipped })
    }

    /// Set the list filter. Pure view state: no history entry, no
    /// listener notification.
    pub fn set_section_filter(&mut self, filter: SectionFilter) {
        self.section_filter = filter;
    }

    // ----- history --------------------------------------------------------

    /// Restore the previous snapshot. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(self.doc.clone()) {
            Some(restored) => {
                self.doc = restored;
                self.reconcile_selection();
                self.notify();
                true
            }
            None => false,
        }
    }

    /// Reapply the most recently undone snapshot. Returns whether
    /// anything changed.
    pub fn redo(&mut self) -> bool {
        match self.history.redo(self.doc.clone()) {
            Some(restored) => {
                self.doc = restored;
                self.reconcile_selection();
                self.notify();
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ----- reads ----------------------------------------------------------

    /// The committed document.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.doc.section(id)
    }

    pub fn section_count(&self) -> usize {
        self.doc.len()
    }

    /// Sections in display order.
    pub fn ordered_sections(&self) -> Vec<&Section> {
        self.doc.ordered_sections()
    }

    /// Sections in display order, restricted to the current filter.
    pub fn filtered_sections(&self) -> Vec<&Section> {
        self.doc
            .ordered_sections()
            .into_iter()
            .filter(|s| self.section_filter.matches(s.section_type))
            .collect()
    }

    pub fn selected_section_id(&self) -> Option<&str> {
        self.selected_section_id.as_deref()
    }

    pub fn selected_section(&self) -> Option<&Section> {
        self.selected_section_id
            .as_deref()
            .and_then(|id| self.doc.section(id))
    }

    pub fn section_filter(&self) -> SectionFilter {
        self.section_filter
    }

    /// Register a listener fired after every committed document change.
    pub fn subscribe(&mut self, listener: impl Fn(&Document) + 'static) {
        self.listeners.push(Box::new(listener));
    }
}
