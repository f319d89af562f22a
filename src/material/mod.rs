//! Material property surface - what the editor host exposes to presets
//!
//! The host lists the typed properties of the edited material(s) as
//! `TargetProperty` values and accepts writes through `MaterialTarget`.
//! `MaterialSheet` is an in-memory implementation of both sides.

mod sheet;

pub use sheet::{MaterialSheet, PropertyDecl, ShaderDefinition};

use bevy::asset::Handle;
use bevy::color::Color;
use bevy::image::Image;
use bevy::math::Vec4;

/// Declared type of a shader property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Float,
    /// Float with slider bounds in the inspector
    Range,
    Texture,
    Vector,
    Color,
}

impl PropertyKind {
    /// Whether two kinds hold the same value type (Float and Range do)
    pub fn stores_as(self, other: PropertyKind) -> bool {
        let numeric = |k| matches!(k, PropertyKind::Float | PropertyKind::Range);
        self == other || (numeric(self) && numeric(other))
    }
}

/// A texture asset together with its display name
#[derive(Debug, Clone, PartialEq)]
pub struct TextureRef {
    pub name: String,
    pub handle: Handle<Image>,
}

impl TextureRef {
    pub fn new(name: impl Into<String>, handle: Handle<Image>) -> Self {
        Self {
            name: name.into(),
            handle,
        }
    }
}

/// Current value of a shader property
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Float and Range properties
    Float(f32),
    Texture(Option<TextureRef>),
    Vector(Vec4),
    Color(Color),
}

impl PropertyValue {
    /// Zero value for a kind, used when a shader declares no default
    pub fn zero(kind: PropertyKind) -> Self {
        match kind {
            PropertyKind::Float | PropertyKind::Range => Self::Float(0.0),
            PropertyKind::Texture => Self::Texture(None),
            PropertyKind::Vector => Self::Vector(Vec4::ZERO),
            PropertyKind::Color => Self::Color(Color::srgba(0.0, 0.0, 0.0, 0.0)),
        }
    }
}

/// Read-only view of one property of the edited material
#[derive(Debug, Clone, PartialEq)]
pub struct TargetProperty {
    pub name: String,
    /// Inspector label; for the presets marker this names the preset file
    pub display_name: String,
    pub kind: PropertyKind,
    pub value: PropertyValue,
    /// Hidden from the inspector and never captured into presets
    pub hidden: bool,
}

/// Find a property by name in a host-supplied list
pub fn find_property<'a>(
    properties: &'a [TargetProperty],
    name: &str,
) -> Option<&'a TargetProperty> {
    properties.iter().find(|p| p.name == name)
}

/// Write surface of an edited material
pub trait MaterialTarget {
    fn set_float(&mut self, property: &str, value: f32);
    fn set_vector(&mut self, property: &str, value: Vec4);
    fn set_color(&mut self, property: &str, value: Color);
    fn set_texture(&mut self, property: &str, value: TextureRef);
    fn set_render_queue(&mut self, queue: i32);
}

/// Values a freshly created material of the same shader would hold
pub trait PropertyDefaults {
    /// `None` when the default is unknown; such properties are always captured
    fn default_value(&self, kind: PropertyKind, property: &str) -> Option<PropertyValue>;
}

impl<F> PropertyDefaults for F
where
    F: Fn(PropertyKind, &str) -> Option<PropertyValue>,
{
    fn default_value(&self, kind: PropertyKind, property: &str) -> Option<PropertyValue> {
        self(kind, property)
    }
}
