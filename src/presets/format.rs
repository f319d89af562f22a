//! Preset file format - line-oriented parsing and serialization
//!
//! ```text
//! // comment
//! Metal
//! _Metallic = 1
//! _Color = 0.8,0.8,0.8,1
//!
//! Plastic
//! _Metallic = 0
//! ```
//!
//! A line containing ` = ` binds a property in the open preset, any other
//! non-blank, non-comment line opens a new preset. No escaping exists, so
//! `validate_name` and `validate_binding` reject text that would not read
//! back as written.

use bevy::prelude::*;
use indexmap::IndexMap;

use crate::constants::{BINDING_SEPARATOR, COMMENT_PREFIX};
use crate::error::{PresetError, Result};
use crate::presets::types::{Preset, PropertyBinding};

/// Presets keyed by name, in file order
pub type PresetTable = IndexMap<String, Preset>;

/// Parser state between lines
enum ParseState {
    NoOpenPreset,
    InPreset(Preset),
}

/// What a single line contributes
enum Line<'a> {
    Skip,
    Binding { property: &'a str, value: &'a str },
    Name(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    if line.trim().is_empty() || line.starts_with(COMMENT_PREFIX) {
        return Line::Skip;
    }
    match line.split_once(BINDING_SEPARATOR) {
        Some((property, value)) => Line::Binding { property, value },
        None => Line::Name(line.trim_end()),
    }
}

fn has_line_break(text: &str) -> bool {
    text.contains(['\n', '\r'])
}

/// Check that `name` reads back as the same preset name line
pub fn validate_name(name: &str) -> Result<()> {
    let reason = if name.trim().is_empty() {
        "name is blank"
    } else if has_line_break(name) {
        "name contains a line break"
    } else if name.starts_with(COMMENT_PREFIX) {
        "name starts with the comment prefix"
    } else if name.contains(BINDING_SEPARATOR) {
        "name contains the binding separator"
    } else if name != name.trim_end() {
        "name ends with whitespace"
    } else {
        return Ok(());
    };
    Err(PresetError::InvalidName {
        name: name.to_string(),
        reason,
    })
}

/// Check that a binding reads back as the same property and value
pub fn validate_binding(binding: &PropertyBinding) -> Result<()> {
    let (property, value) = (binding.property.as_str(), binding.value.as_str());
    let reason = if property.trim().is_empty() {
        "property is blank"
    } else if has_line_break(property) || has_line_break(value) {
        "binding contains a line break"
    } else if property.starts_with(COMMENT_PREFIX) {
        "property starts with the comment prefix"
    } else {
        let line = format!("{}{}{}", property, BINDING_SEPARATOR, value);
        match classify(&line) {
            Line::Binding {
                property: p,
                value: v,
            } if p == property && v == value => return Ok(()),
            _ => "property contains the binding separator",
        }
    };
    Err(PresetError::InvalidBinding {
        property: property.to_string(),
        value: value.to_string(),
        reason,
    })
}

/// Parse preset file content into a table.
///
/// Bindings before the first preset name are logged and dropped. A name that
/// appears twice keeps its first position and takes the later block.
pub fn parse(content: &str) -> PresetTable {
    let mut table = PresetTable::new();
    let mut state = ParseState::NoOpenPreset;

    for (index, line) in content.lines().enumerate() {
        match classify(line) {
            Line::Skip => {}
            Line::Binding { property, value } => match &mut state {
                ParseState::InPreset(preset) => {
                    preset.bindings.push(PropertyBinding::new(property, value));
                }
                ParseState::NoOpenPreset => {
                    error!(
                        "Preset binding '{}' on line {} has no preset name above it, ignored",
                        property,
                        index + 1
                    );
                }
            },
            Line::Name(name) => {
                let finished =
                    std::mem::replace(&mut state, ParseState::InPreset(Preset::new(name)));
                close(finished, &mut table);
            }
        }
    }

    // Last preset ends at EOF
    close(state, &mut table);
    table
}

fn close(state: ParseState, table: &mut PresetTable) {
    if let ParseState::InPreset(preset) = state {
        if table.contains_key(&preset.name) {
            warn!("Preset '{}' defined twice, keeping the later block", preset.name);
        }
        table.insert(preset.name.clone(), preset);
    }
}

/// Serialize a table: name line, one line per binding, blank separator
pub fn serialize(table: &PresetTable) -> String {
    let mut content = String::new();
    for preset in table.values() {
        content.push_str(&preset.name);
        content.push('\n');
        for binding in &preset.bindings {
            content.push_str(&binding.property);
            content.push_str(BINDING_SEPARATOR);
            content.push_str(&binding.value);
            content.push('\n');
        }
        content.push('\n');
    }
    content
}
