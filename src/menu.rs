//! Preset selector state for an inspector dropdown
//!
//! The host draws the dropdown; this tracks which entry is selected and
//! turns a new selection into an action. Entries are the title, every
//! preset name, then the "manage" and "new" actions.

use bevy::prelude::*;

use crate::constants::{MENU_MANAGE, MENU_NEW, MENU_TITLE};
use crate::error::Result;
use crate::material::{PropertyDefaults, TargetProperty};
use crate::presets::{PresetStore, capture_preset};
use crate::settings::PresetSettings;

/// What the host should do after the selection changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    None,
    Apply(String),
    /// Open the preset manager
    Manage,
    /// Show the new-preset name field
    New,
}

/// Selected entry by identity, not by row
#[derive(Debug, Clone, PartialEq, Eq)]
enum Selection {
    Title,
    Preset(String),
    Manage,
    New,
}

#[derive(Debug, Clone, Resource)]
pub struct PresetMenu {
    selected: Selection,
    /// Text of the new-preset name field
    pub new_name: String,
    default_name: String,
}

impl PresetMenu {
    pub fn new(default_name: impl Into<String>) -> Self {
        let default_name = default_name.into();
        Self {
            selected: Selection::Title,
            new_name: default_name.clone(),
            default_name,
        }
    }

    pub fn from_settings(settings: &PresetSettings) -> Self {
        Self::new(settings.new_preset_name.clone())
    }

    /// Dropdown entries for the current store
    pub fn options(store: &PresetStore) -> Vec<String> {
        let mut options = Vec::with_capacity(store.len() + 3);
        options.push(MENU_TITLE.to_string());
        options.extend(store.names().into_iter().map(str::to_string));
        options.push(MENU_MANAGE.to_string());
        options.push(MENU_NEW.to_string());
        options
    }

    /// Index of the selected entry in `options(store)`. A selected preset
    /// that is no longer in the store falls back to the title.
    pub fn selected(&self, store: &PresetStore) -> usize {
        match &self.selected {
            Selection::Title => 0,
            Selection::Preset(name) => store
                .names()
                .iter()
                .position(|n| *n == name.as_str())
                .map_or(0, |i| i + 1),
            Selection::Manage => store.len() + 1,
            Selection::New => store.len() + 2,
        }
    }

    /// Whether the "new" entry is selected and the name field should show
    pub fn is_creating(&self) -> bool {
        self.selected == Selection::New
    }

    /// Record a dropdown selection. Re-selecting the current entry does
    /// nothing.
    pub fn select(&mut self, store: &PresetStore, index: usize) -> MenuAction {
        if index == self.selected(store) || index > store.len() + 2 {
            return MenuAction::None;
        }

        let names = store.names();
        let (selection, action) = match index {
            0 => (Selection::Title, MenuAction::None),
            i if i <= names.len() => {
                let name = names[i - 1].to_string();
                (Selection::Preset(name.clone()), MenuAction::Apply(name))
            }
            i if i == names.len() + 1 => (Selection::Manage, MenuAction::Manage),
            _ => (Selection::New, MenuAction::New),
        };
        self.selected = selection;
        action
    }

    /// Capture the edited material into a preset named after the name field,
    /// add it to the store and select it
    pub fn commit_new(
        &mut self,
        store: &mut PresetStore,
        properties: &[TargetProperty],
        defaults: &impl PropertyDefaults,
    ) -> Result<()> {
        let preset = capture_preset(&self.new_name, properties, defaults);
        let name = preset.name.clone();
        store.add(preset)?;

        self.selected = Selection::Preset(name);
        self.new_name = self.default_name.clone();
        Ok(())
    }
}

impl Default for PresetMenu {
    fn default() -> Self {
        Self::from_settings(&PresetSettings::default())
    }
}
