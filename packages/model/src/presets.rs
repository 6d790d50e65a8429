//! Pre-made section presets: the default property set a freshly added
//! section starts from, keyed by section type.

use crate::{Alignment, PropsPatch, SectionType};

/// Catalog entry for one pre-made section, as shown in the section picker.
#[derive(Debug, Clone)]
pub struct SectionPreset {
    pub section_type: SectionType,
    pub name: &'static str,
    pub description: &'static str,
    pub default_props: PropsPatch,
}

/// The full preset catalog, in picker display order.
pub fn presets() -> Vec<SectionPreset> {
    vec![
        SectionPreset {
            section_type: SectionType::Hero,
            name: "Hero Section",
            description: "Eye-catching hero section with title, subtitle, and CTA",
            default_props: SectionType::Hero.default_props(),
        },
        SectionPreset {
            section_type: SectionType::Cta,
            name: "Call to Action",
            description: "Conversion-focused section with compelling CTA buttons",
            default_props: SectionType::Cta.default_props(),
        },
        SectionPreset {
            section_type: SectionType::Footer,
            name: "Footer",
            description: "Complete footer with links, company info, and social media",
            default_props: SectionType::Footer.default_props(),
        },
    ]
}

impl SectionType {
    /// Default properties a new section of this type starts with.
    pub fn default_props(&self) -> PropsPatch {
        match self {
            SectionType::Hero => PropsPatch {
                title: Some("Welcome to Our Website".to_string()),
                subtitle: Some("Create amazing experiences with our platform".to_string()),
                button_text: Some("Get Started".to_string()),
                background_color: Some("#000000".to_string()),
                text_color: Some("#ffffff".to_string()),
                alignment: Some(Alignment::Center),
                ..Default::default()
            },
            SectionType::Cta => PropsPatch {
                title: Some("Ready to Get Started?".to_string()),
                subtitle: Some("Join thousands of satisfied customers today".to_string()),
                button_text: Some("Start Free Trial".to_string()),
                background_color: Some("#3b82f6".to_string()),
                text_color: Some("#ffffff".to_string()),
                alignment: Some(Alignment::Center),
                ..Default::default()
            },
            SectionType::Footer => PropsPatch {
                title: Some("Your Company".to_string()),
                content: Some("Building amazing experiences since 2024".to_string()),
                background_color: Some("#1f2937".to_string()),
                text_color: Some("#ffffff".to_string()),
                ..Default::default()
            },
        }
    }
}
