//! # Schema Validator
//!
//! Gate-keeps untrusted structured data at the system boundary before it
//! reaches the document store. Validation walks raw `serde_json::Value`s
//! rather than deserializing directly, so that every failing field can be
//! reported in one aggregated message instead of bailing on the first.
//!
//! Validation is a fast-reject guard layered in front of the sanitizer,
//! not a replacement for it: imported values still pass through
//! [`crate::sanitize`] before they are stored.

use pagecraft_model::{Alignment, Section, SectionProps, SectionType};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use thiserror::Error;

/// Maximum length, in characters, of any free-text property. DoS guard
/// against oversized strings.
pub const MAX_TEXT_LENGTH: usize = 1000;

/// Maximum number of entries in an imported section order. DoS guard
/// against unbounded import size.
pub const MAX_SECTIONS: usize = 100;

/// Aggregated validation failure: one entry per failing field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", .errors.join(", "))]
pub struct ValidationError {
    pub errors: Vec<String>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
        }
    }
}

/// An import payload whose top-level shape validated.
///
/// Section values are kept raw here: they are validated independently,
/// entry by entry, during the bulk load, so that one malformed section
/// can be skipped (or, under a strict policy, aggregated into the
/// failure) without rejecting its siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportData {
    pub sections: serde_json::Map<String, Value>,
    pub section_order: Vec<String>,
}

fn injection_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<script|javascript:|data:|vbscript:|on\w+\s*=").unwrap())
}

fn color_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})|black|white|red|green|blue|yellow|orange|purple|pink|brown|gray|grey|transparent)$",
        )
        .unwrap()
    })
}

const PROPS_FIELDS: [&str; 10] = [
    "id",
    "title",
    "subtitle",
    "content",
    "buttonText",
    "buttonLink",
    "backgroundColor",
    "textColor",
    "image",
    "alignment",
];

const SECTION_FIELDS: [&str; 4] = ["id", "type", "order", "props"];

const IMPORT_FIELDS: [&str; 2] = ["sections", "sectionOrder"];

/// Pull an optional text field, recording errors for wrong type, excess
/// length, or an obvious injection signature.
fn take_text(map: &serde_json::Map<String, Value>, field: &str, errors: &mut Vec<String>) -> Option<String> {
    let value = map.get(field)?;
    let Some(text) = value.as_str() else {
        errors.push(format!("`{field}` must be a string"));
        return None;
    };
    if text.chars().count() > MAX_TEXT_LENGTH {
        errors.push(format!("`{field}`: text too long (max {MAX_TEXT_LENGTH} characters)"));
        return None;
    }
    if injection_re().is_match(text) {
        errors.push(format!("`{field}`: invalid characters detected"));
        return None;
    }
    Some(text.to_string())
}

fn take_color(map: &serde_json::Map<String, Value>, field: &str, errors: &mut Vec<String>) -> Option<String> {
    let value = map.get(field)?;
    let Some(color) = value.as_str() else {
        errors.push(format!("`{field}` must be a string"));
        return None;
    };
    if !color_re().is_match(color) {
        errors.push(format!("`{field}`: invalid color format"));
        return None;
    }
    Some(color.to_string())
}

fn take_alignment(map: &serde_json::Map<String, Value>, errors: &mut Vec<String>) -> Option<Alignment> {
    let value = map.get("alignment")?;
    match value.as_str() {
        Some("left") => Some(Alignment::Left),
        Some("center") => Some(Alignment::Center),
        Some("right") => Some(Alignment::Right),
        _ => {
            errors.push("`alignment` must be one of left, center, right".to_string());
            None
        }
    }
}

/// Validate a section-properties object into a typed [`SectionProps`].
pub fn validate_section_props(value: &Value) -> Result<SectionProps, ValidationError> {
    let Some(map) = value.as_object() else {
        return Err(ValidationError::new("props must be an object"));
    };

    let mut errors = Vec::new();

    for key in map.keys() {
        if !PROPS_FIELDS.contains(&key.as_str()) {
            errors.push(format!("unknown props field `{key}`"));
        }
    }

    let id = match map.get("id").and_then(Value::as_str) {
        Some(id) => id.to_string(),
        None => {
            errors.push("`id` is required and must be a string".to_string());
            String::new()
        }
    };

    let mut props = SectionProps::new(id);
    props.title = take_text(map, "title", &mut errors);
    props.subtitle = take_text(map, "subtitle", &mut errors);
    props.content = take_text(map, "content", &mut errors);
    props.button_text = take_text(map, "buttonText", &mut errors);
    props.button_link = take_text(map, "buttonLink", &mut errors);
    props.image = take_text(map, "image", &mut errors);
    props.background_color = take_color(map, "backgroundColor", &mut errors);
    props.text_color = take_color(map, "textColor", &mut errors);
    props.alignment = take_alignment(map, &mut errors);

    if errors.is_empty() {
        Ok(props)
    } else {
        Err(ValidationError { errors })
    }
}

/// Validate a full section object into a typed [`Section`].
pub fn validate_section(value: &Value) -> Result<Section, ValidationError> {
    let Some(map) = value.as_object() else {
        return Err(ValidationError::new("section must be an object"));
    };

    let mut errors = Vec::new();

    for key in map.keys() {
        if !SECTION_FIELDS.contains(&key.as_str()) {
            errors.push(format!("unknown section field `{key}`"));
        }
    }

    let id = match map.get("id").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            errors.push("section ID required".to_string());
            String::new()
        }
    };

    let section_type = match map.get("type").and_then(Value::as_str) {
        Some("hero") => Some(SectionType::Hero),
        Some("cta") => Some(SectionType::Cta),
        Some("footer") => Some(SectionType::Footer),
        _ => {
            errors.push("invalid section type".to_string());
            None
        }
    };

    let order = match map.get("order").and_then(Value::as_u64) {
        Some(order) => order as usize,
        None => {
            errors.push("`order` must be a non-negative integer".to_string());
            0
        }
    };

    let props = match map.get("props") {
        Some(props_value) => match validate_section_props(props_value) {
            Ok(props) => Some(props),
            Err(e) => {
                errors.extend(e.errors.into_iter().map(|m| format!("props: {m}")));
                None
            }
        },
        None => {
            errors.push("`props` is required".to_string());
            None
        }
    };

    match (section_type, props) {
        (Some(section_type), Some(props)) if errors.is_empty() => Ok(Section {
            id,
            section_type,
            order,
            props,
        }),
        _ => Err(ValidationError { errors }),
    }
}

/// Validate the top-level shape of a parsed import payload: a `sections`
/// object plus a bounded `sectionOrder` array of strings, with unknown
/// keys as hard failures.
///
/// Individual section values are deliberately not validated here; see
/// [`ImportData`].
pub fn validate_import(value: &Value) -> Result<ImportData, ValidationError> {
    let Some(map) = value.as_object() else {
        return Err(ValidationError::new("import payload must be an object"));
    };

    let mut errors = Vec::new();

    for key in map.keys() {
        if !IMPORT_FIELDS.contains(&key.as_str()) {
            errors.push(format!("unknown import field `{key}`"));
        }
    }

    let mut sections = serde_json::Map::new();
    match map.get("sections") {
        Some(Value::Object(entries)) => sections = entries.clone(),
        _ => errors.push("`sections` must be an object".to_string()),
    }

    let mut section_order = Vec::new();
    match map.get("sectionOrder") {
        Some(Value::Array(entries)) => {
            if entries.len() > MAX_SECTIONS {
                errors.push(format!(
                    "too many sections ({} > {MAX_SECTIONS})",
                    entries.len()
                ));
            } else {
                for entry in entries {
                    match entry.as_str() {
                        Some(id) => section_order.push(id.to_string()),
                        None => errors.push("`sectionOrder` entries must be strings".to_string()),
                    }
                }
            }
        }
        _ => errors.push("`sectionOrder` must be an array".to_string()),
    }

    if errors.is_empty() {
        Ok(ImportData {
            sections,
            section_order,
        })
    } else {
        Err(ValidationError { errors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_section_value() -> Value {
        json!({
            "id": "section_1",
            "type": "hero",
            "order": 0,
            "props": {
                "id": "section_1",
                "title": "Welcome",
                "backgroundColor": "#000000",
                "alignment": "center"
            }
        })
    }

    #[test]
    fn accepts_valid_section() {
        let section = validate_section(&valid_section_value()).unwrap();
        assert_eq!(section.id, "section_1");
        assert_eq!(section.section_type, SectionType::Hero);
        assert_eq!(section.props.title.as_deref(), Some("Welcome"));
    }

    #[test]
    fn rejects_unknown_fields_at_every_level() {
        let mut value = valid_section_value();
        value["extra"] = json!(1);
        value["props"]["onload"] = json!("x");

        let err = validate_section(&value).unwrap_err();
        assert!(err.errors.iter().any(|e| e.contains("unknown section field `extra`")));
        assert!(err.errors.iter().any(|e| e.contains("unknown props field `onload`")));
    }

    #[test]
    fn rejects_injection_signatures_in_text() {
        let value = json!({
            "id": "s",
            "title": "<script>alert(1)</script>",
            "subtitle": "javascript:void(0)"
        });
        let err = validate_section_props(&value).unwrap_err();
        assert_eq!(err.errors.len(), 2);
    }

    #[test]
    fn rejects_oversized_text() {
        let value = json!({ "id": "s", "title": "x".repeat(MAX_TEXT_LENGTH + 1) });
        let err = validate_section_props(&value).unwrap_err();
        assert!(err.to_string().contains("text too long"));
    }

    #[test]
    fn text_length_counts_characters_not_bytes() {
        // Three bytes per character in UTF-8; exactly at the limit.
        let value = json!({ "id": "s", "title": "界".repeat(MAX_TEXT_LENGTH) });
        let props = validate_section_props(&value).unwrap();
        assert_eq!(props.title.map(|t| t.chars().count()), Some(MAX_TEXT_LENGTH));

        let value = json!({ "id": "s", "title": "界".repeat(MAX_TEXT_LENGTH + 1) });
        let err = validate_section_props(&value).unwrap_err();
        assert!(err.to_string().contains("text too long"));
    }

    #[test]
    fn rejects_bad_colors_and_alignment() {
        let value = json!({
            "id": "s",
            "backgroundColor": "url(evil)",
            "textColor": "#12345",
            "alignment": "diagonal"
        });
        let err = validate_section_props(&value).unwrap_err();
        assert_eq!(err.errors.len(), 3);
    }

    #[test]
    fn aggregates_all_field_errors_into_one_message() {
        let value = json!({
            "id": "",
            "type": "sidebar",
            "order": -1,
            "props": { "id": "s", "backgroundColor": "nope" }
        });
        let err = validate_section(&value).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("section ID required"));
        assert!(message.contains("invalid section type"));
        assert!(message.contains("non-negative integer"));
        assert!(message.contains("invalid color format"));
    }

    #[test]
    fn import_rejects_over_limit_order() {
        let ids: Vec<String> = (0..=MAX_SECTIONS).map(|i| format!("s{i}")).collect();
        let value = json!({ "sections": {}, "sectionOrder": ids });
        let err = validate_import(&value).unwrap_err();
        assert!(err.to_string().contains("too many sections"));
    }

    #[test]
    fn import_accepts_exact_limit() {
        let ids: Vec<String> = (0..MAX_SECTIONS).map(|i| format!("s{i}")).collect();
        let value = json!({ "sections": {}, "sectionOrder": ids });
        let data = validate_import(&value).unwrap();
        assert_eq!(data.section_order.len(), MAX_SECTIONS);
    }

    #[test]
    fn import_rejects_unknown_top_level_keys() {
        let value = json!({ "sections": {}, "sectionOrder": [], "theme": "dark" });
        let err = validate_import(&value).unwrap_err();
        assert!(err.to_string().contains("unknown import field `theme`"));
    }

    #[test]
    fn import_keeps_section_values_raw() {
        let mut bad = valid_section_value();
        bad["type"] = json!("banner");
        let value = json!({
            "sections": { "section_1": bad },
            "sectionOrder": ["section_1"]
        });
        // Top-level shape is fine; the bad section is the bulk loader's
        // problem, entry by entry.
        let data = validate_import(&value).unwrap();
        assert_eq!(data.sections.len(), 1);
        assert_eq!(data.section_order, vec!["section_1"]);
    }
}
