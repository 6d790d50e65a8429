//! # Pagecraft Model
//!
//! Shared data model for the page builder: section types, properties,
//! filters, and the pre-made section catalog. Pure data, no state.

mod presets;
mod section;

pub use presets::{presets, SectionPreset};
pub use section::{
    generate_id, Alignment, PropsPatch, Section, SectionFilter, SectionProps, SectionType,
};
