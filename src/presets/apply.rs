//! Preset application and capture
//!
//! Converts stored binding text to typed property values and writes them
//! onto materials, and turns a material's non-default values into bindings.

use bevy::color::Color;
use bevy::math::Vec4;
use bevy::prelude::*;
use std::fmt;
use std::path::Path;

use crate::assets::{AssetKind, AssetSearch, TextureLoader};
use crate::constants::{COMPONENT_SEPARATOR, RENDER_QUEUE_PROPERTY};
use crate::error::{PresetError, Result};
use crate::material::{
    MaterialTarget, PropertyDefaults, PropertyKind, PropertyValue, TargetProperty, TextureRef,
    find_property,
};
use crate::presets::database::PresetStore;
use crate::presets::types::{Preset, PropertyBinding};

/// Why a binding was skipped
#[derive(Debug, Clone, PartialEq)]
pub enum IssueReason {
    /// Stored text does not parse as the property's kind
    MalformedValue { expected: &'static str, value: String },
    /// No texture asset matches the stored name
    TextureNotFound(String),
}

impl fmt::Display for IssueReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueReason::MalformedValue { expected, value } => {
                write!(f, "'{}' is not a valid {}", value, expected)
            }
            IssueReason::TextureNotFound(name) => write!(f, "couldn't find texture: {}", name),
        }
    }
}

/// A skipped binding
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyIssue {
    pub property: String,
    pub reason: IssueReason,
}

/// Outcome of applying one preset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplyReport {
    /// Bindings written onto every target
    pub applied: usize,
    /// Bindings naming a property the material does not have
    pub unmatched: usize,
    pub issues: Vec<ApplyIssue>,
}

impl ApplyReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    fn skip(&mut self, property: &str, reason: IssueReason) {
        warn!("Preset property '{}' skipped: {}", property, reason);
        self.issues.push(ApplyIssue {
            property: property.to_string(),
            reason,
        });
    }
}

/// A binding converted to its typed value
enum TypedValue {
    Float(f32),
    Vector(Vec4),
    Color(Color),
    Texture(TextureRef),
    RenderQueue(i32),
}

impl TypedValue {
    fn write_to(&self, target: &mut impl MaterialTarget, property: &str) {
        match self {
            TypedValue::Float(v) => target.set_float(property, *v),
            TypedValue::Vector(v) => target.set_vector(property, *v),
            TypedValue::Color(c) => target.set_color(property, *c),
            TypedValue::Texture(t) => target.set_texture(property, t.clone()),
            TypedValue::RenderQueue(q) => target.set_render_queue(*q),
        }
    }
}

/// Conversion result for one binding
enum Converted {
    Value(TypedValue),
    Skipped(IssueReason),
    Unmatched,
}

/// Apply `preset` to every material in `targets`.
///
/// `properties` describes the edited material's shader. Bindings that fail
/// to convert are reported and skipped; only a failing asset search aborts.
pub fn apply_preset<T: MaterialTarget>(
    preset: &Preset,
    properties: &[TargetProperty],
    targets: &mut [T],
    search: &impl AssetSearch,
    loader: &impl TextureLoader,
) -> Result<ApplyReport> {
    let mut report = ApplyReport::default();

    for binding in &preset.bindings {
        let typed = match convert(binding, properties, search, loader)? {
            Converted::Value(typed) => typed,
            Converted::Skipped(reason) => {
                report.skip(&binding.property, reason);
                continue;
            }
            Converted::Unmatched => {
                debug!("Preset property '{}' not on this shader", binding.property);
                report.unmatched += 1;
                continue;
            }
        };
        for target in targets.iter_mut() {
            typed.write_to(target, &binding.property);
        }
        report.applied += 1;
    }

    info!(
        "Applied preset '{}' to {} material(s): {} set, {} skipped, {} unmatched",
        preset.name,
        targets.len(),
        report.applied,
        report.issues.len(),
        report.unmatched
    );
    Ok(report)
}

/// Apply a preset from the store by name
pub fn apply_named<T: MaterialTarget>(
    store: &PresetStore,
    name: &str,
    properties: &[TargetProperty],
    targets: &mut [T],
    search: &impl AssetSearch,
    loader: &impl TextureLoader,
) -> Result<ApplyReport> {
    let preset = store
        .get(name)
        .ok_or_else(|| PresetError::PresetNotFound(name.to_string()))?;
    apply_preset(preset, properties, targets, search, loader)
}

fn convert(
    binding: &PropertyBinding,
    properties: &[TargetProperty],
    search: &impl AssetSearch,
    loader: &impl TextureLoader,
) -> Result<Converted> {
    let value = binding.value.as_str();
    let malformed = |expected| {
        Converted::Skipped(IssueReason::MalformedValue {
            expected,
            value: value.to_string(),
        })
    };

    let Some(property) = find_property(properties, &binding.property) else {
        if binding.property != RENDER_QUEUE_PROPERTY {
            return Ok(Converted::Unmatched);
        }
        debug!("{} = {}", RENDER_QUEUE_PROPERTY, value);
        return Ok(match value.trim().parse::<i32>() {
            Ok(queue) => Converted::Value(TypedValue::RenderQueue(queue)),
            Err(_) => malformed("render queue"),
        });
    };

    let converted = match property.kind {
        PropertyKind::Float | PropertyKind::Range => match parse_float(value) {
            Some(v) => Converted::Value(TypedValue::Float(v)),
            None => malformed("float"),
        },
        PropertyKind::Vector => match parse_vector(value) {
            Some(v) => Converted::Value(TypedValue::Vector(v)),
            None => malformed("vector"),
        },
        PropertyKind::Color => Converted::Value(TypedValue::Color(parse_color(value))),
        PropertyKind::Texture => match search.find_asset(value, AssetKind::Texture)? {
            Some(path) => {
                let handle = loader.load_texture(&path);
                let texture = TextureRef::new(texture_name(&path, value), handle);
                Converted::Value(TypedValue::Texture(texture))
            }
            None => {
                error!("Couldn't find texture: {}", value);
                Converted::Skipped(IssueReason::TextureNotFound(value.to_string()))
            }
        },
    };
    Ok(converted)
}

fn texture_name(path: &Path, fallback: &str) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(fallback)
        .to_string()
}

/// Parse a float, ignoring surrounding whitespace
pub fn parse_float(s: &str) -> Option<f32> {
    s.trim().parse().ok()
}

/// Parse `x,y,z,w`; anything but exactly four valid components fails
pub fn parse_vector(s: &str) -> Option<Vec4> {
    let parts: Vec<&str> = s.split(COMPONENT_SEPARATOR).collect();
    if parts.len() != 4 {
        return None;
    }
    Some(Vec4::new(
        parse_float(parts[0])?,
        parse_float(parts[1])?,
        parse_float(parts[2])?,
        parse_float(parts[3])?,
    ))
}

/// Parse `r,g,b[,a]` leniently: a bad or missing channel reads as 0,
/// a missing alpha reads as 1
pub fn parse_color(s: &str) -> Color {
    let parts: Vec<&str> = s.split(COMPONENT_SEPARATOR).collect();
    let channel = |i: usize| parts.get(i).and_then(|p| parse_float(p)).unwrap_or(0.0);
    let alpha = if parts.len() > 3 { channel(3) } else { 1.0 };
    Color::srgba(channel(0), channel(1), channel(2), alpha)
}

/// Format a value the way it is stored in a preset file
pub fn format_value(value: &PropertyValue) -> String {
    match value {
        PropertyValue::Float(v) => v.to_string(),
        PropertyValue::Texture(texture) => texture
            .as_ref()
            .map(|t| t.name.clone())
            .unwrap_or_default(),
        PropertyValue::Vector(v) => format!("{},{},{},{}", v.x, v.y, v.z, v.w),
        PropertyValue::Color(c) => {
            let c = c.to_srgba();
            format!("{},{},{},{}", c.red, c.green, c.blue, c.alpha)
        }
    }
}

/// Build a preset from every visible property that differs from its default.
///
/// Textures are captured whenever one is set. Comparison is exact.
pub fn capture_preset(
    name: &str,
    properties: &[TargetProperty],
    defaults: &impl PropertyDefaults,
) -> Preset {
    let bindings = properties
        .iter()
        .filter(|p| !p.hidden)
        .filter(|p| is_captured(p, defaults))
        .map(|p| PropertyBinding::new(p.name.clone(), format_value(&p.value)))
        .collect();
    Preset::with_bindings(name, bindings)
}

fn is_captured(property: &TargetProperty, defaults: &impl PropertyDefaults) -> bool {
    if let PropertyValue::Texture(texture) = &property.value {
        return texture.is_some();
    }
    defaults.default_value(property.kind, &property.name).as_ref() != Some(&property.value)
}
