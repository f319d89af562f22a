//! Preset tool settings
//!
//! Loaded from config/preset_settings.json, falling back to defaults when
//! the file is missing or invalid.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::{DEFAULT_NEW_PRESET_NAME, PRESETS_PROPERTY};
use crate::error::{PresetError, Result};

/// Path to the settings file
pub const SETTINGS_FILE: &str = "config/preset_settings.json";

fn default_assets_root() -> String {
    "assets".to_string()
}
fn default_presets_property() -> String {
    PRESETS_PROPERTY.to_string()
}
fn default_new_preset_name() -> String {
    DEFAULT_NEW_PRESET_NAME.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
pub struct PresetSettings {
    /// Directory searched for preset files and textures
    #[serde(default = "default_assets_root")]
    pub assets_root: String,
    /// Name of the marker property whose display name names the preset file
    #[serde(default = "default_presets_property")]
    pub presets_property: String,
    /// Initial text of the new-preset name field
    #[serde(default = "default_new_preset_name")]
    pub new_preset_name: String,
}

impl Default for PresetSettings {
    fn default() -> Self {
        Self {
            assets_root: default_assets_root(),
            presets_property: default_presets_property(),
            new_preset_name: default_new_preset_name(),
        }
    }
}

impl PresetSettings {
    /// Load settings, or return defaults if the file is missing or invalid
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No {} found, using default preset settings", path.display());
            return Self::default();
        }
        match Self::read(path) {
            Ok(settings) => {
                info!("Loaded preset settings from {}", path.display());
                settings
            }
            Err(e) => {
                warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load settings, failing on a missing or invalid file
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| PresetError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| {
            PresetError::Settings(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// Save settings, creating the parent directory if needed
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PresetError::Settings(e.to_string()))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| PresetError::io(parent, e))?;
        }
        fs::write(path, json).map_err(|e| PresetError::io(path, e))?;
        info!("Saved preset settings to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = PresetSettings::load(dir.path().join("none.json"));
        assert_eq!(settings, PresetSettings::default());
        assert_eq!(settings.presets_property, "shader_presets");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "assets_root": "content" }"#).unwrap();

        let settings = PresetSettings::load(&path);
        assert_eq!(settings.assets_root, "content");
        assert_eq!(settings.presets_property, "shader_presets");
        assert_eq!(settings.new_preset_name, "Preset Name");
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(PresetSettings::read(&path), Err(PresetError::Settings(_))));
        assert_eq!(PresetSettings::load(&path), PresetSettings::default());
    }

    #[test]
    fn test_save_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config/preset_settings.json");
        let settings = PresetSettings {
            assets_root: "content".to_string(),
            ..Default::default()
        };

        settings.save(&path).unwrap();
        assert_eq!(PresetSettings::read(&path).unwrap(), settings);
    }
}
