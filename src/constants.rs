//! Shared constants for the preset file format and editor integration

// =============================================================================
// FILE FORMAT
// =============================================================================

/// Lines starting with this are comments
pub const COMMENT_PREFIX: &str = "//";

/// Separates property name from value on a binding line
pub const BINDING_SEPARATOR: &str = " = ";

/// Separates components of vector and color values
pub const COMPONENT_SEPARATOR: char = ',';

// =============================================================================
// RESERVED PROPERTY NAMES
// =============================================================================

/// Marker property whose display name identifies the preset file
pub const PRESETS_PROPERTY: &str = "shader_presets";

/// Pseudo-property that sets the material render queue
pub const RENDER_QUEUE_PROPERTY: &str = "render_queue";

// =============================================================================
// MENU LABELS
// =============================================================================

pub const MENU_TITLE: &str = "Presets";
pub const MENU_MANAGE: &str = " - Manage Presets -";
pub const MENU_NEW: &str = "+ New +";

/// Placeholder shown in the new-preset name field
pub const DEFAULT_NEW_PRESET_NAME: &str = "Preset Name";

// =============================================================================
// ASSETS
// =============================================================================

/// File extensions treated as textures by directory asset search
pub const TEXTURE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "tga", "bmp", "dds", "ktx2", "exr", "hdr", "tif", "tiff", "gif", "webp",
];
