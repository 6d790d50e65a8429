//! # Pagecraft Security
//!
//! Defenses for untrusted input at the editing boundary:
//!
//! - [`sanitize`]: total, idempotent rewriting of text/color/URL values
//!   to a safe subset. Never fails; degrades bad input instead.
//! - [`validate`]: structural acceptance/rejection against the section
//!   schema, with every failing field aggregated into one message.
//! - [`guard`]: prototype-pollution key scan over parsed JSON, run
//!   before structural validation.
//!
//! The two layers are deliberately redundant: validation fast-rejects
//! obvious injection signatures on import, and sanitization scrubs
//! whatever is ultimately stored.

pub mod guard;
pub mod sanitize;
pub mod validate;

pub use guard::reject_unsafe_keys;
pub use sanitize::{
    sanitize_color, sanitize_patch, sanitize_props, sanitize_text, sanitize_url, DEFAULT_COLOR,
    NAMED_COLORS,
};
pub use validate::{
    validate_import, validate_section, validate_section_props, ImportData, ValidationError,
    MAX_SECTIONS, MAX_TEXT_LENGTH,
};
