//! # Pagecraft Editor
//!
//! Client-side editing core for the page builder: an undo/redo-capable
//! document store over an ordered collection of typed sections, plus the
//! validated import/export boundary.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ security: sanitize + validate untrusted     │
//! │ input before it reaches the store           │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: DocumentStore                       │
//! │  - structural mutations (add/remove/move)   │
//! │  - property edits (sanitized merges)        │
//! │  - snapshot history (undo/redo)             │
//! │  - import/export pipeline                   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ rendering layer: reads sections, never      │
//! │ mutates (external collaborator)             │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core principles
//!
//! 1. **The store owns all mutable state**: every other component is a
//!    pure function or receives copies.
//! 2. **Mutations are total**: missing-id operations no-op instead of
//!    erroring; only the import pipeline surfaces user-facing failures.
//! 3. **Defense in depth**: imports are parsed, pollution-guarded,
//!    schema-validated, and sanitized, in that order.
//! 4. **History tracks content, not presentation**: selection and filter
//!    are outside the snapshot.
//!
//! ## Usage
//!
//! ```rust
//! use pagecraft_editor::DocumentStore;
//! use pagecraft_model::{PropsPatch, SectionType};
//!
//! let mut store = DocumentStore::new();
//! let id = store.add_section(SectionType::Hero, PropsPatch::default());
//!
//! store.update_section(&id, PropsPatch {
//!     title: Some("Launch day".to_string()),
//!     ..Default::default()
//! });
//!
//! store.undo();
//! assert_eq!(store.section(&id).unwrap().props.title.as_deref(),
//!            Some("Welcome to Our Website"));
//! ```

mod document;
mod history;
mod pipeline;
mod store;

pub use document::Document;
pub use history::{History, DEFAULT_MAX_LEVELS};
pub use pipeline::{
    export, import, ExportFile, FileSource, ImportError, EXPORT_FILE_NAME, IMPORT_MIME_TYPES,
    MAX_IMPORT_BYTES,
};
pub use store::{DocumentStore, ImportPolicy, ImportSummary, Listener};

// Re-export the model and boundary error type for convenience.
pub use pagecraft_model::{
    Alignment, PropsPatch, Section, SectionFilter, SectionProps, SectionType,
};
pub use pagecraft_security::ValidationError;
