//! Preset store - loading, saving and editing a preset file

use bevy::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PresetError, Result};
use crate::presets::format::{self, PresetTable};
use crate::presets::types::{Preset, PropertyBinding};

/// Presets of one shader context, backed by a text file.
///
/// Every mutation rewrites the whole file before returning. If the write
/// fails the in-memory table is restored to what it was before the call.
#[derive(Resource, Debug, Default)]
pub struct PresetStore {
    path: Option<PathBuf>,
    presets: PresetTable,
}

impl PresetStore {
    /// Empty store with no backing file
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store bound to `path` without reading it (for a new file)
    pub fn create(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            presets: PresetTable::new(),
        }
    }

    /// Load a store from an existing file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut store = Self::new();
        store.load(path)?;
        Ok(store)
    }

    /// Backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether a preset file has been resolved for this context
    pub fn has_file(&self) -> bool {
        self.path.is_some()
    }

    /// React to a (re)resolved preset file location.
    ///
    /// Reloads when the path differs from the current one, clears the table
    /// when no file was found. Returns whether the path changed.
    pub fn refresh_path(&mut self, resolved: Option<PathBuf>) -> Result<bool> {
        if resolved == self.path {
            return Ok(false);
        }
        match resolved {
            Some(path) => self.load(path)?,
            None => {
                debug!("Preset file no longer resolves, clearing presets");
                self.path = None;
                self.presets.clear();
            }
        }
        Ok(true)
    }

    /// Replace the table with the contents of `path` and bind to it.
    /// On read failure nothing changes.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| PresetError::io(path, e))?;

        self.presets = format::parse(&content);
        self.path = Some(path.to_path_buf());
        info!("Loaded {} presets from {}", self.presets.len(), path.display());
        Ok(())
    }

    /// Rewrite the backing file from the table
    pub fn save(&self) -> Result<()> {
        let path = self.path.as_deref().ok_or(PresetError::NoPath)?;
        fs::write(path, format::serialize(&self.presets))
            .map_err(|e| PresetError::io(path, e))?;
        debug!("Saved {} presets to {}", self.presets.len(), path.display());
        Ok(())
    }

    /// Preset names in file order
    pub fn names(&self) -> Vec<&str> {
        self.presets.keys().map(String::as_str).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.presets.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.values()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Add a new preset at the end
    pub fn add(&mut self, preset: Preset) -> Result<()> {
        format::validate_name(&preset.name)?;
        preset.bindings.iter().try_for_each(format::validate_binding)?;
        if self.presets.contains_key(&preset.name) {
            return Err(PresetError::DuplicatePreset(preset.name));
        }
        self.mutate(|presets| {
            info!("Added preset '{}' ({} bindings)", preset.name, preset.bindings.len());
            presets.insert(preset.name.clone(), preset);
            Ok(())
        })
    }

    /// Remove a preset, returning it
    pub fn remove(&mut self, name: &str) -> Result<Preset> {
        self.mutate(|presets| {
            presets
                .shift_remove(name)
                .ok_or_else(|| PresetError::PresetNotFound(name.to_string()))
        })
    }

    /// Replace all bindings of a preset, creating it at the end if missing
    pub fn set_bindings(&mut self, name: &str, bindings: Vec<PropertyBinding>) -> Result<()> {
        format::validate_name(name)?;
        bindings.iter().try_for_each(format::validate_binding)?;
        self.mutate(|presets| {
            match presets.get_mut(name) {
                Some(preset) => preset.bindings = bindings,
                None => {
                    presets.insert(name.to_string(), Preset::with_bindings(name, bindings));
                }
            }
            Ok(())
        })
    }

    /// Change the first binding of `property` in preset `name`.
    /// Returns whether a binding was found.
    pub fn update_binding(&mut self, name: &str, property: &str, value: &str) -> Result<bool> {
        format::validate_binding(&PropertyBinding::new(property, value))?;
        self.mutate(|presets| {
            let preset = presets
                .get_mut(name)
                .ok_or_else(|| PresetError::PresetNotFound(name.to_string()))?;
            Ok(preset.update_binding(property, value))
        })
    }

    /// Remove the first binding of `property` in preset `name`.
    /// Returns whether a binding was found.
    pub fn remove_binding(&mut self, name: &str, property: &str) -> Result<bool> {
        self.mutate(|presets| {
            let preset = presets
                .get_mut(name)
                .ok_or_else(|| PresetError::PresetNotFound(name.to_string()))?;
            Ok(preset.remove_binding(property))
        })
    }

    /// Run an edit against the table, then save. The table is rolled back if
    /// either the edit or the save fails.
    fn mutate<T>(&mut self, edit: impl FnOnce(&mut PresetTable) -> Result<T>) -> Result<T> {
        if self.path.is_none() {
            return Err(PresetError::NoPath);
        }
        let snapshot = self.presets.clone();

        let outcome = edit(&mut self.presets).and_then(|value| self.save().map(|()| value));
        if outcome.is_err() {
            self.presets = snapshot;
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const EXAMPLE: &str =
        "Metal\n_Metallic = 1\n_Color = 0.8,0.8,0.8,1\n\nPlastic\n_Metallic = 0\n";

    fn store_with(content: &str) -> (TempDir, PresetStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("presets.txt");
        fs::write(&path, content).unwrap();
        let store = PresetStore::open(&path).unwrap();
        (dir, store)
    }

    fn file_content(store: &PresetStore) -> String {
        fs::read_to_string(store.path().unwrap()).unwrap()
    }

    #[test]
    fn test_load_example() {
        let (_dir, store) = store_with(EXAMPLE);
        assert_eq!(store.names(), vec!["Metal", "Plastic"]);
        assert_eq!(store.get("Metal").unwrap().bindings.len(), 2);
        assert_eq!(store.get("Plastic").unwrap().bindings.len(), 1);
        assert!(store.get("Rubber").is_none());
    }

    #[test]
    fn test_failed_load_keeps_state() {
        let (dir, mut store) = store_with(EXAMPLE);
        let original = store.path().unwrap().to_path_buf();

        let err = store.load(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, PresetError::Io { .. }));
        assert_eq!(store.names(), vec!["Metal", "Plastic"]);
        assert_eq!(store.path(), Some(original.as_path()));
    }

    #[test]
    fn test_save_is_idempotent() {
        let (_dir, store) = store_with("// comment\nMetal\n_Metallic = 1\n\n\n\nPlastic\n");
        store.save().unwrap();
        let first = file_content(&store);
        store.save().unwrap();
        assert_eq!(first, file_content(&store));
        assert_eq!(first, "Metal\n_Metallic = 1\n\nPlastic\n\n");
    }

    #[test]
    fn test_mutations_round_trip() {
        let (_dir, mut store) = store_with(EXAMPLE);
        store
            .add(Preset::with_bindings(
                "Rubber",
                vec![
                    PropertyBinding::new("_Glossiness", "0.2"),
                    PropertyBinding::new("_MainTex", "rubber_albedo"),
                ],
            ))
            .unwrap();
        assert!(store.update_binding("Metal", "_Metallic", "0.9").unwrap());
        assert!(store.remove_binding("Metal", "_Color").unwrap());
        store
            .set_bindings("Plastic", vec![PropertyBinding::new("_Cutoff", "0.5")])
            .unwrap();

        let reloaded = PresetStore::open(store.path().unwrap()).unwrap();
        assert_eq!(reloaded.names(), vec!["Metal", "Plastic", "Rubber"]);
        for preset in store.iter() {
            assert_eq!(reloaded.get(&preset.name), Some(preset));
        }
    }

    #[test]
    fn test_duplicate_binding_policy_persists() {
        let (_dir, mut store) = store_with("Dup\n_X = 1\n_X = 2\n");
        store.update_binding("Dup", "_X", "3").unwrap();
        assert_eq!(file_content(&store), "Dup\n_X = 3\n_X = 2\n\n");
        store.remove_binding("Dup", "_X").unwrap();
        assert_eq!(file_content(&store), "Dup\n_X = 2\n\n");
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let (_dir, mut store) = store_with(EXAMPLE);
        let err = store.add(Preset::new("Metal")).unwrap_err();
        assert!(matches!(err, PresetError::DuplicatePreset(name) if name == "Metal"));
        assert_eq!(store.get("Metal").unwrap().bindings.len(), 2);
    }

    #[test]
    fn test_remove_preset() {
        let (_dir, mut store) = store_with(EXAMPLE);
        let removed = store.remove("Metal").unwrap();
        assert_eq!(removed.name, "Metal");
        assert_eq!(store.names(), vec!["Plastic"]);
        assert_eq!(file_content(&store), "Plastic\n_Metallic = 0\n\n");
        assert!(matches!(store.remove("Metal"), Err(PresetError::PresetNotFound(_))));
    }

    #[test]
    fn test_set_bindings_keeps_position() {
        let (_dir, mut store) = store_with(EXAMPLE);
        store.set_bindings("Metal", Vec::new()).unwrap();
        assert_eq!(store.names(), vec!["Metal", "Plastic"]);
        store.set_bindings("Glass", Vec::new()).unwrap();
        assert_eq!(store.names(), vec!["Metal", "Plastic", "Glass"]);
    }

    #[test]
    fn test_binding_edit_on_unknown_preset() {
        let (_dir, mut store) = store_with(EXAMPLE);
        assert!(matches!(
            store.update_binding("Rubber", "_X", "1"),
            Err(PresetError::PresetNotFound(_))
        ));
        assert!(!store.update_binding("Metal", "_Missing", "1").unwrap());
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be written as a file
        let mut store = PresetStore::create(dir.path());

        let err = store.add(Preset::new("Metal")).unwrap_err();
        assert!(matches!(err, PresetError::Io { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_mutation_without_file() {
        let mut store = PresetStore::new();
        assert!(matches!(store.add(Preset::new("A")), Err(PresetError::NoPath)));
        assert!(matches!(store.save(), Err(PresetError::NoPath)));
    }

    #[test]
    fn test_refresh_path() {
        let (dir, mut store) = store_with(EXAMPLE);
        let current = store.path().map(Path::to_path_buf);
        assert!(!store.refresh_path(current).unwrap());

        let other = dir.path().join("other.txt");
        fs::write(&other, "Glass\n_Alpha = 0.3\n").unwrap();
        assert!(store.refresh_path(Some(other.clone())).unwrap());
        assert_eq!(store.names(), vec!["Glass"]);
        assert_eq!(store.path(), Some(other.as_path()));

        assert!(store.refresh_path(None).unwrap());
        assert!(store.is_empty());
        assert!(!store.has_file());
    }

    #[test]
    fn test_unreadable_names_rejected() {
        let (_dir, mut store) = store_with(EXAMPLE);
        let before = file_content(&store);

        for name in ["", "  ", "Metal ", "Metal = Shiny", "// Metal", "Two\nLines"] {
            let err = store.add(Preset::new(name)).unwrap_err();
            assert!(matches!(err, PresetError::InvalidName { .. }), "{:?}", name);
            let err = store.set_bindings(name, Vec::new()).unwrap_err();
            assert!(matches!(err, PresetError::InvalidName { .. }), "{:?}", name);
        }
        assert_eq!(store.names(), vec!["Metal", "Plastic"]);
        assert_eq!(file_content(&store), before);
    }

    #[test]
    fn test_unreadable_bindings_rejected() {
        let (_dir, mut store) = store_with(EXAMPLE);
        let before = file_content(&store);

        let err = store
            .set_bindings("Plastic", vec![PropertyBinding::new("a = b", "c")])
            .unwrap_err();
        assert!(matches!(err, PresetError::InvalidBinding { .. }));
        let err = store
            .add(Preset::with_bindings(
                "Rubber",
                vec![PropertyBinding::new("//_X", "1")],
            ))
            .unwrap_err();
        assert!(matches!(err, PresetError::InvalidBinding { .. }));
        let err = store.update_binding("Metal", "_Metallic", "1\nGhost").unwrap_err();
        assert!(matches!(err, PresetError::InvalidBinding { .. }));
        let err = store.update_binding("Metal", "", "1").unwrap_err();
        assert!(matches!(err, PresetError::InvalidBinding { .. }));

        assert_eq!(store.names(), vec!["Metal", "Plastic"]);
        assert_eq!(store.get("Metal").unwrap().value_of("_Metallic"), Some("1"));
        assert_eq!(file_content(&store), before);
    }

    #[test]
    fn test_accepted_edits_reload_unchanged() {
        let (_dir, mut store) = store_with(EXAMPLE);
        store
            .set_bindings(
                "  Indented",
                vec![
                    PropertyBinding::new("_Note", "a = b"),
                    PropertyBinding::new("_MainTex", ""),
                ],
            )
            .unwrap();
        store.update_binding("Metal", "_Metallic", " 0.5 ").unwrap();

        let reloaded = PresetStore::open(store.path().unwrap()).unwrap();
        assert_eq!(reloaded.names(), store.names());
        for preset in store.iter() {
            assert_eq!(reloaded.get(&preset.name), Some(preset));
        }
    }
}
