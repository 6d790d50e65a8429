//! # Sanitizer
//!
//! Neutralizes injection vectors in values that will be rendered as text,
//! used as a CSS color, or used as a hyperlink/image URL.
//!
//! Every function here is pure and total: bad input degrades to a safe
//! value, it never errors. All transforms are idempotent. Stripping runs
//! to a fixed point so overlapping matches cannot reassemble a dangerous
//! token (e.g. `javajavascript:script:`).
//!
//! Length limiting is not done here; that is a validation concern.

use pagecraft_model::{PropsPatch, SectionProps};
use regex::Regex;
use std::sync::OnceLock;

/// Fallback for any color value that fails the safe-color grammar.
pub const DEFAULT_COLOR: &str = "#000000";

/// Named colors accepted alongside hex values.
pub const NAMED_COLORS: [&str; 13] = [
    "black", "white", "red", "green", "blue", "yellow", "orange", "purple", "pink", "brown",
    "gray", "grey", "transparent",
];

fn script_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Script/style element content is dropped wholly, not kept as text.
    RE.get_or_init(|| Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>").unwrap())
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").unwrap())
}

fn scheme_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)javascript:|data:|vbscript:").unwrap())
}

fn handler_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)on\w+\s*=").unwrap())
}

fn hex_color_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#([0-9a-f]{6}|[0-9a-f]{3})$").unwrap())
}

/// Remove every match of `re`, repeating until nothing changes.
fn strip_to_fixpoint(re: &Regex, input: &str) -> String {
    let mut current = input.to_string();
    loop {
        let next = re.replace_all(&current, "").into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Strip markup and script-bearing fragments from free text.
///
/// Absent input becomes the empty string. Tags are removed keeping inner
/// text, except script/style elements whose content is dropped entirely.
/// As defense in depth beyond tag stripping, `javascript:`, `data:`,
/// `vbscript:` and `on<word>=` substrings are removed anywhere they occur.
pub fn sanitize_text(input: Option<&str>) -> String {
    let Some(raw) = input else {
        return String::new();
    };

    let cleaned = strip_to_fixpoint(script_block_re(), raw);
    let cleaned = strip_to_fixpoint(tag_re(), &cleaned);
    let cleaned = strip_to_fixpoint(scheme_re(), &cleaned);
    strip_to_fixpoint(handler_re(), &cleaned)
}

/// Constrain a color to the safe value space: 3- or 6-digit hex, or one of
/// the named colors. Everything else collapses to [`DEFAULT_COLOR`].
pub fn sanitize_color(input: Option<&str>) -> String {
    let Some(raw) = input else {
        return DEFAULT_COLOR.to_string();
    };

    let clean = raw.trim().to_lowercase();
    if hex_color_re().is_match(&clean) || NAMED_COLORS.contains(&clean.as_str()) {
        clean
    } else {
        DEFAULT_COLOR.to_string()
    }
}

/// Constrain a URL to the allow-listed prefixes `http://`, `https://`,
/// `/`, `./`, `#`. Anything else is rejected wholesale (empty string).
/// Dangerous scheme substrings are additionally stripped from accepted
/// values.
pub fn sanitize_url(input: Option<&str>) -> String {
    let Some(raw) = input else {
        return String::new();
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let lower = trimmed.to_lowercase();
    let allowed = lower.starts_with("http://")
        || lower.starts_with("https://")
        || trimmed.starts_with('/')
        || trimmed.starts_with("./")
        || trimmed.starts_with('#');

    if !allowed {
        return String::new();
    }

    strip_to_fixpoint(scheme_re(), trimmed)
}

/// Sanitize a full property set field by field. Absent fields stay absent.
/// Alignment needs no rewriting: the typed enum cannot carry an
/// out-of-range value.
pub fn sanitize_props(props: &mut SectionProps) {
    if let Some(v) = &props.title {
        props.title = Some(sanitize_text(Some(v)));
    }
    if let Some(v) = &props.subtitle {
        props.subtitle = Some(sanitize_text(Some(v)));
    }
    if let Some(v) = &props.content {
        props.content = Some(sanitize_text(Some(v)));
    }
    if let Some(v) = &props.button_text {
        props.button_text = Some(sanitize_text(Some(v)));
    }
    if let Some(v) = &props.button_link {
        props.button_link = Some(sanitize_url(Some(v)));
    }
    if let Some(v) = &props.image {
        props.image = Some(sanitize_url(Some(v)));
    }
    if let Some(v) = &props.background_color {
        props.background_color = Some(sanitize_color(Some(v)));
    }
    if let Some(v) = &props.text_color {
        props.text_color = Some(sanitize_color(Some(v)));
    }
}

/// Sanitize a partial property edit, only touching fields that are present.
pub fn sanitize_patch(patch: &mut PropsPatch) {
    if let Some(v) = &patch.title {
        patch.title = Some(sanitize_text(Some(v)));
    }
    if let Some(v) = &patch.subtitle {
        patch.subtitle = Some(sanitize_text(Some(v)));
    }
    if let Some(v) = &patch.content {
        patch.content = Some(sanitize_text(Some(v)));
    }
    if let Some(v) = &patch.button_text {
        patch.button_text = Some(sanitize_text(Some(v)));
    }
    if let Some(v) = &patch.button_link {
        patch.button_link = Some(sanitize_url(Some(v)));
    }
    if let Some(v) = &patch.image {
        patch.image = Some(sanitize_url(Some(v)));
    }
    if let Some(v) = &patch.background_color {
        patch.background_color = Some(sanitize_color(Some(v)));
    }
    if let Some(v) = &patch.text_color {
        patch.text_color = Some(sanitize_color(Some(v)));
    }
}
