//! # Section Data Model
//!
//! A page is an ordered collection of typed sections. Each section carries
//! a closed `SectionType`, a stable id assigned at creation, an `order`
//! position, and a bag of display properties.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The closed set of section kinds a page can contain.
///
/// Adding a variant here is the single point of change for a new section
/// type: every dispatch over `SectionType` is an exhaustive match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Hero,
    Cta,
    Footer,
}

impl SectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Hero => "hero",
            SectionType::Cta => "cta",
            SectionType::Footer => "footer",
        }
    }
}

/// Horizontal alignment of section content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// View facet for the section list. Not part of the document itself and
/// never persisted or tracked by history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionFilter {
    #[default]
    All,
    Hero,
    Cta,
    Footer,
}

impl SectionFilter {
    /// Whether a section of the given type is visible under this filter.
    pub fn matches(&self, section_type: SectionType) -> bool {
        match self {
            SectionFilter::All => true,
            SectionFilter::Hero => section_type == SectionType::Hero,
            SectionFilter::Cta => section_type == SectionType::Cta,
            SectionFilter::Footer => section_type == SectionType::Footer,
        }
    }
}

/// Display properties of a section.
///
/// Every field besides `id` is optional; absent means "not set", which the
/// rendering layer resolves to its own fallback. Unknown fields are a hard
/// deserialization failure, never silently carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SectionProps {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
}

impl SectionProps {
    /// Empty property set for a section with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            subtitle: None,
            content: None,
            button_text: None,
            button_link: None,
            background_color: None,
            text_color: None,
            image: None,
            alignment: None,
        }
    }

    /// Merge a partial edit into these props. Fields absent from the patch
    /// keep their current value.
    pub fn apply_patch(&mut self, patch: &PropsPatch) {
        if let Some(v) = &patch.title {
            self.title = Some(v.clone());
        }
        if let Some(v) = &patch.subtitle {
            self.subtitle = Some(v.clone());
        }
        if let Some(v) = &patch.content {
            self.content = Some(v.clone());
        }
        if let Some(v) = &patch.button_text {
            self.button_text = Some(v.clone());
        }
        if let Some(v) = &patch.button_link {
            self.button_link = Some(v.clone());
        }
        if let Some(v) = &patch.background_color {
            self.background_color = Some(v.clone());
        }
        if let Some(v) = &patch.text_color {
            self.text_color = Some(v.clone());
        }
        if let Some(v) = &patch.image {
            self.image = Some(v.clone());
        }
        if let Some(v) = patch.alignment {
            self.alignment = Some(v);
        }
    }
}

/// A partial property edit: the payload of an update operation.
///
/// Same field set as [`SectionProps`] minus the id (ids are immutable).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct PropsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
}

impl PropsPatch {
    pub fn is_empty(&self) -> bool {
        *self == PropsPatch::default()
    }
}

/// One content block of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Section {
    pub id: String,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    pub order: usize,
    pub props: SectionProps,
}

/// Generate a fresh section id. Ids are opaque, unique, and never reused.
pub fn generate_id() -> String {
    format!("section_{}", Uuid::new_v4().simple())
}
