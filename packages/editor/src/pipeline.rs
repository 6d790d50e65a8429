//! # Import/Export Pipeline
//!
//! Orchestrates the boundary crossing between opaque file bytes and the
//! trusted in-memory document.
//!
//! Import runs a strict gauntlet: file metadata gates (type, size), then
//! JSON parse, then the prototype-pollution key guard, then schema
//! validation, then order resolution, then the bulk load. Each rejection
//! surfaces one specific, human-readable reason, and a rejected import
//! never partially applies.
//!
//! Export is pure and cannot fail under normal operation: it serializes
//! the committed `{ sections, sectionOrder }` pair and hands the UTF-8
//! bytes to an external sink.

use crate::{DocumentStore, ImportPolicy, ImportSummary};
use pagecraft_security::{reject_unsafe_keys, validate_import, ValidationError};
use serde_json::Value;
use thiserror::Error;

/// Size ceiling for import payloads, checked before any content is read.
pub const MAX_IMPORT_BYTES: u64 = 10 * 1024 * 1024;

/// Accepted MIME types for import files.
pub const IMPORT_MIME_TYPES: [&str; 2] = ["application/json", "text/json"];

/// File name used for exports.
pub const EXPORT_FILE_NAME: &str = "website-builder-export.json";

/// A file handed to the importer by an external byte source. The core
/// never initiates reads itself.
#[derive(Debug, Clone)]
pub struct FileSource {
    pub name: String,
    pub mime_type: String,
    /// Declared size in bytes, available before the content is read.
    pub size: u64,
    pub text: String,
}

/// Bytes handed to an external sink for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: String,
}

/// One distinct, user-presentable reason per rejection cause.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("invalid file type: expected a .json file, got `{0}`")]
    InvalidFileType(String),

    #[error("file too large: {size} bytes exceeds the {limit} byte limit")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("malicious content detected: {0}")]
    UnsafeContent(ValidationError),

    #[error("import validation failed: {0}")]
    Validation(ValidationError),

    #[error("import contained no resolvable sections")]
    Empty,

    #[error("no sections survived validation")]
    NothingImported,
}

/// Serialize the committed document for an external file sink.
pub fn export(store: &DocumentStore) -> ExportFile {
    let doc = store.document();
    let payload = serde_json::json!({
        "sections": doc.sections,
        "sectionOrder": doc.section_order,
    });
    // Serializing an in-memory document cannot produce invalid JSON.
    let text = serde_json::to_string_pretty(&payload).unwrap_or_default();

    ExportFile {
        bytes: text.into_bytes(),
        file_name: EXPORT_FILE_NAME.to_string(),
        mime_type: "application/json".to_string(),
    }
}

/// Validate and load an imported file into the store.
///
/// On success the document is replaced wholesale; on any error the store
/// is left exactly as it was.
pub fn import(
    store: &mut DocumentStore,
    file: &FileSource,
    policy: ImportPolicy,
) -> Result<ImportSummary, ImportError> {
    // 1. Metadata gates, before any content is read.
    if !is_json_file(file) {
        return Err(ImportError::InvalidFileType(format!(
            "{} ({})",
            file.name, file.mime_type
        )));
    }
    if file.size > MAX_IMPORT_BYTES {
        return Err(ImportError::FileTooLarge {
            size: file.size,
            limit: MAX_IMPORT_BYTES,
        });
    }

    // 2. Parse.
    let parsed: Value = serde_json::from_str(&file.text)?;

    // 3. Pollution guard runs before structural validation.
    reject_unsafe_keys(&parsed).map_err(ImportError::UnsafeContent)?;

    // 4. Structural validation with aggregated field errors.
    let data = validate_import(&parsed).map_err(ImportError::Validation)?;

    // 5. Resolve the order through the sections map, dropping dangling ids.
    let mut entries = Vec::with_capacity(data.section_order.len());
    for id in &data.section_order {
        match data.sections.get(id) {
            Some(entry) => entries.push(entry.clone()),
            None => tracing::warn!(id = %id, "sectionOrder id not present in sections, dropping"),
        }
    }
    if entries.is_empty() {
        return Err(ImportError::Empty);
    }

    // 6. Bulk load. The store skips the commit when nothing validates,
    // so rejecting here leaves the document exactly as it was.
    let summary = store
        .import_sections(&entries, policy)
        .map_err(ImportError::Validation)?;

    if summary.imported == 0 {
        return Err(ImportError::NothingImported);
    }
    Ok(summary)
}

fn is_json_file(file: &FileSource) -> bool {
    let extension_ok = file.name.to_lowercase().ends_with(".json");
    let mime_ok = IMPORT_MIME_TYPES.contains(&file.mime_type.as_str());
    extension_ok && mime_ok
}
