//! Presets module - named sets of material property values
//!
//! Presets live in a plain-text file next to the shader. The store loads and
//! edits that file; `apply` writes presets onto materials and captures new
//! ones from a material's non-default values.

mod apply;
mod database;
mod format;
mod types;

pub use apply::{
    ApplyIssue, ApplyReport, IssueReason, apply_named, apply_preset, capture_preset, format_value,
    parse_color, parse_float, parse_vector,
};
pub use database::PresetStore;
pub use format::{PresetTable, parse, serialize, validate_binding, validate_name};
pub use types::{Preset, PropertyBinding};
