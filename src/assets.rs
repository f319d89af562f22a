//! Asset lookup collaborators
//!
//! Presets reference textures by name and the preset file itself is named
//! by the display name of a marker property. Both are resolved through
//! `AssetSearch`; textures are then loaded through `TextureLoader`.

use bevy::asset::{AssetServer, Handle};
use bevy::image::Image;
use bevy::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::constants::TEXTURE_EXTENSIONS;
use crate::error::{PresetError, Result};
use crate::material::{TargetProperty, find_property};

/// Filter applied to asset search results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Any,
    Texture,
}

impl AssetKind {
    fn accepts(self, path: &Path) -> bool {
        match self {
            AssetKind::Any => true,
            AssetKind::Texture => path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| TEXTURE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str())),
        }
    }
}

/// Find an asset path from a human-readable name
pub trait AssetSearch {
    /// `Ok(None)` when nothing matches, `Err` only when the search itself
    /// cannot run
    fn find_asset(&self, query: &str, kind: AssetKind) -> Result<Option<PathBuf>>;
}

/// Turn a found asset path into a texture handle
pub trait TextureLoader {
    fn load_texture(&self, path: &Path) -> Handle<Image>;
}

/// Searches files under an assets root by file stem.
///
/// An exact stem match wins; otherwise the first stem containing the query
/// (case-insensitive) in file-name order.
#[derive(Debug, Clone)]
pub struct AssetDirectory {
    root: PathBuf,
}

impl AssetDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSearch for AssetDirectory {
    fn find_asset(&self, query: &str, kind: AssetKind) -> Result<Option<PathBuf>> {
        if !self.root.is_dir() {
            return Err(PresetError::AssetSearch(format!(
                "asset root {} is not a directory",
                self.root.display()
            )));
        }
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }
        let needle = query.to_lowercase();

        let mut partial = None;
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(|e| PresetError::AssetSearch(e.to_string()))?;
            if !entry.file_type().is_file() || !kind.accepts(entry.path()) {
                continue;
            }
            let Some(stem) = entry.path().file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if stem == query {
                return Ok(Some(entry.into_path()));
            }
            if partial.is_none() && stem.to_lowercase().contains(&needle) {
                partial = Some(entry.path().to_path_buf());
            }
        }

        if partial.is_none() {
            debug!("No {:?} asset matches '{}' under {}", kind, query, self.root.display());
        }
        Ok(partial)
    }
}

/// Loads textures through Bevy's asset server. Paths found under `root`
/// are made relative to it first.
#[derive(Clone)]
pub struct AssetServerLoader {
    server: AssetServer,
    root: PathBuf,
}

impl AssetServerLoader {
    pub fn new(server: AssetServer, root: impl Into<PathBuf>) -> Self {
        Self {
            server,
            root: root.into(),
        }
    }
}

impl TextureLoader for AssetServerLoader {
    fn load_texture(&self, path: &Path) -> Handle<Image> {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.server.load(relative.to_path_buf())
    }
}

/// Locate the preset file for a material.
///
/// The `marker` property's display name is the identifier to search for.
/// Materials without the marker have no presets.
pub fn resolve_preset_path(
    properties: &[TargetProperty],
    marker: &str,
    search: &impl AssetSearch,
) -> Result<Option<PathBuf>> {
    let Some(property) = find_property(properties, marker) else {
        return Ok(None);
    };
    search.find_asset(&property.display_name, AssetKind::Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PRESETS_PROPERTY;
    use crate::material::{PropertyKind, PropertyValue};
    use std::fs;

    fn assets() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("textures/metal")).unwrap();
        fs::write(dir.path().join("textures/metal/brushed_steel.png"), b"").unwrap();
        fs::write(dir.path().join("textures/steel.png"), b"").unwrap();
        fs::write(dir.path().join("textures/steel.txt"), b"").unwrap();
        fs::write(dir.path().join("toon_presets.txt"), b"").unwrap();
        dir
    }

    #[test]
    fn test_exact_match_beats_partial() {
        let dir = assets();
        let search = AssetDirectory::new(dir.path());
        let found = search.find_asset("steel", AssetKind::Texture).unwrap();
        assert_eq!(found, Some(dir.path().join("textures/steel.png")));
    }

    #[test]
    fn test_partial_match_case_insensitive() {
        let dir = assets();
        let search = AssetDirectory::new(dir.path());
        let found = search.find_asset("Brushed", AssetKind::Texture).unwrap();
        assert_eq!(found, Some(dir.path().join("textures/metal/brushed_steel.png")));
    }

    #[test]
    fn test_texture_kind_filters_extensions() {
        let dir = assets();
        let search = AssetDirectory::new(dir.path());
        assert_eq!(search.find_asset("toon_presets", AssetKind::Texture).unwrap(), None);
        assert!(search.find_asset("toon_presets", AssetKind::Any).unwrap().is_some());
        assert_eq!(search.find_asset("  ", AssetKind::Any).unwrap(), None);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = assets();
        let search = AssetDirectory::new(dir.path().join("nope"));
        assert!(matches!(
            search.find_asset("steel", AssetKind::Any),
            Err(PresetError::AssetSearch(_))
        ));
    }

    #[test]
    fn test_resolve_preset_path_from_marker() {
        let dir = assets();
        let search = AssetDirectory::new(dir.path());
        let marker = TargetProperty {
            name: PRESETS_PROPERTY.to_string(),
            display_name: "toon_presets".to_string(),
            kind: PropertyKind::Float,
            value: PropertyValue::Float(0.0),
            hidden: true,
        };

        let resolved = resolve_preset_path(&[marker], PRESETS_PROPERTY, &search).unwrap();
        assert_eq!(resolved, Some(dir.path().join("toon_presets.txt")));
        assert_eq!(resolve_preset_path(&[], PRESETS_PROPERTY, &search).unwrap(), None);
    }
}
