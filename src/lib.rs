//! Shader presets - named material property sets stored in a text file
//!
//! A preset file sits next to a shader and holds blocks of `property = value`
//! lines. This crate loads and edits those files, applies a preset to one or
//! more materials, and captures new presets from a material's non-default
//! values. Drawing the selector is left to the editor host.

pub mod assets;
pub mod constants;
pub mod error;
pub mod material;
pub mod menu;
pub mod presets;
pub mod settings;

// Re-export commonly used types for convenience
pub use assets::{
    AssetDirectory, AssetKind, AssetSearch, AssetServerLoader, TextureLoader, resolve_preset_path,
};
pub use error::{PresetError, Result};
pub use material::{
    MaterialSheet, MaterialTarget, PropertyDecl, PropertyDefaults, PropertyKind, PropertyValue,
    ShaderDefinition, TargetProperty, TextureRef, find_property,
};
pub use menu::{MenuAction, PresetMenu};
pub use presets::{
    ApplyIssue, ApplyReport, IssueReason, Preset, PresetStore, PropertyBinding, apply_named,
    apply_preset, capture_preset,
};
pub use settings::{PresetSettings, SETTINGS_FILE};
