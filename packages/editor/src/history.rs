//! # Undo/Redo History
//!
//! Linear snapshot history over the tracked [`Document`] slice. Selection
//! and filter are presentation state and are deliberately outside the
//! snapshot, so undo/redo never perturbs them.
//!
//! ## Design
//!
//! - Every committed structural mutation pushes the pre-mutation snapshot
//!   onto the past stack and clears the future stack.
//! - Undo moves the current document to the future stack and restores the
//!   most recent past snapshot; redo is the inverse.
//! - Snapshots are owned clones. Later mutations of the live document can
//!   never retroactively alter a stored snapshot.
//!
//! Granularity is one snapshot per logical mutation call. High-frequency
//! edits (live typing in a property field) must be coalesced by the caller
//! before committing, or history degrades to one undo per keystroke.

use crate::Document;

/// Default cap on retained undo levels.
pub const DEFAULT_MAX_LEVELS: usize = 100;

/// Two-stack snapshot history.
#[derive(Debug)]
pub struct History {
    past: Vec<Document>,
    future: Vec<Document>,
    max_levels: usize,
}

impl History {
    /// Create a history with the default level cap.
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_MAX_LEVELS)
    }

    /// Create a history with a custom level cap (0 = unlimited).
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            max_levels,
        }
    }

    /// Record the pre-mutation snapshot of a committed change. Clears any
    /// redoable future.
    pub fn push(&mut self, snapshot: Document) {
        self.past.push(snapshot);
        if self.max_levels > 0 && self.past.len() > self.max_levels {
            self.past.remove(0);
        }
        self.future.clear();
    }

    /// Swap the current document for the most recent past snapshot.
    /// Returns `None` (leaving `current` unused) if there is nothing to
    /// undo.
    pub fn undo(&mut self, current: Document) -> Option<Document> {
        let restored = self.past.pop()?;
        self.future.push(current);
        Some(restored)
    }

    /// Swap the current document for the most recently undone snapshot.
    pub fn redo(&mut self, current: Document) -> Option<Document> {
        let restored = self.future.pop()?;
        self.past.push(current);
        Some(restored)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.past.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.future.len()
    }

    /// Drop all retained snapshots.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::{Section, SectionProps, SectionType};

    fn doc_with(ids: &[&str]) -> Document {
        let mut doc = Document::new();
        for id in ids {
            doc.push_section(Section {
                id: id.to_string(),
                section_type: SectionType::Cta,
                order: 0,
                props: SectionProps::new(*id),
            });
        }
        doc
    }

    #[test]
    fn fresh_history_has_nothing_to_undo() {
        let mut history = History::new();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.undo(Document::new()).is_none());
        assert!(history.redo(Document::new()).is_none());
    }

    #[test]
    fn undo_restores_snapshot_and_enables_redo() {
        let mut history = History::new();
        let before = doc_with(&["a"]);
        let after = doc_with(&["a", "b"]);

        history.push(before.clone());
        let restored = history.undo(after.clone()).unwrap();
        assert_eq!(restored, before);
        assert!(history.can_redo());

        let redone = history.redo(restored).unwrap();
        assert_eq!(redone, after);
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn new_push_clears_future() {
        let mut history = History::new();
        history.push(doc_with(&["a"]));
        let _ = history.undo(doc_with(&["a", "b"]));
        assert_eq!(history.redo_levels(), 1);

        history.push(doc_with(&["a"]));
        assert_eq!(history.redo_levels(), 0);
    }

    #[test]
    fn max_levels_enforced() {
        let mut history = History::with_max_levels(2);
        history.push(doc_with(&["a"]));
        history.push(doc_with(&["b"]));
        history.push(doc_with(&["c"]));
        assert_eq!(history.undo_levels(), 2);

        // Oldest snapshot was dropped; the two newest survive.
        let restored = history.undo(Document::new()).unwrap();
        assert_eq!(restored, doc_with(&["c"]));
    }

    #[test]
    fn snapshots_are_isolated_from_later_mutations() {
        let mut history = History::new();
        let mut live = doc_with(&["a"]);
        history.push(live.clone());

        // Mutate the live document after the snapshot was taken.
        live.remove_section("a");

        let restored = history.undo(live).unwrap();
        assert!(restored.contains("a"));
    }
}
