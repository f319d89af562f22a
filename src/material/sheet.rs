//! In-memory shader definitions and material instances

use bevy::color::Color;
use bevy::math::Vec4;
use bevy::prelude::*;
use indexmap::IndexMap;

use crate::material::{
    MaterialTarget, PropertyDefaults, PropertyKind, PropertyValue, TargetProperty, TextureRef,
};

/// Declaration of one shader property
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDecl {
    pub name: String,
    pub display_name: String,
    pub kind: PropertyKind,
    pub default: PropertyValue,
    pub hidden: bool,
}

impl PropertyDecl {
    pub fn new(name: impl Into<String>, kind: PropertyKind, default: PropertyValue) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            kind,
            default,
            hidden: false,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// A shader: its property declarations and default render queue
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderDefinition {
    pub name: String,
    pub properties: Vec<PropertyDecl>,
    pub render_queue: i32,
}

impl ShaderDefinition {
    pub fn new(name: impl Into<String>, render_queue: i32) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            render_queue,
        }
    }

    pub fn with_property(mut self, decl: PropertyDecl) -> Self {
        self.properties.push(decl);
        self
    }

    pub fn declaration(&self, property: &str) -> Option<&PropertyDecl> {
        self.properties.iter().find(|d| d.name == property)
    }

    /// A fresh material holding every default
    pub fn instantiate(&self) -> MaterialSheet {
        MaterialSheet {
            shader: self.clone(),
            values: self
                .properties
                .iter()
                .map(|d| (d.name.clone(), d.default.clone()))
                .collect(),
            render_queue: self.render_queue,
        }
    }
}

impl PropertyDefaults for ShaderDefinition {
    fn default_value(&self, kind: PropertyKind, property: &str) -> Option<PropertyValue> {
        self.declaration(property)
            .filter(|d| d.kind.stores_as(kind))
            .map(|d| d.default.clone())
    }
}

/// A material instance: current values for every declared property
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialSheet {
    shader: ShaderDefinition,
    values: IndexMap<String, PropertyValue>,
    render_queue: i32,
}

impl MaterialSheet {
    pub fn shader(&self) -> &ShaderDefinition {
        &self.shader
    }

    pub fn value(&self, property: &str) -> Option<&PropertyValue> {
        self.values.get(property)
    }

    pub fn render_queue(&self) -> i32 {
        self.render_queue
    }

    /// Current properties in declaration order
    pub fn properties(&self) -> Vec<TargetProperty> {
        self.shader
            .properties
            .iter()
            .map(|decl| TargetProperty {
                name: decl.name.clone(),
                display_name: decl.display_name.clone(),
                kind: decl.kind,
                value: self
                    .values
                    .get(&decl.name)
                    .cloned()
                    .unwrap_or_else(|| decl.default.clone()),
                hidden: decl.hidden,
            })
            .collect()
    }

    fn slot(&mut self, property: &str) -> Option<&mut PropertyValue> {
        let slot = self.values.get_mut(property);
        if slot.is_none() {
            warn!("Shader '{}' has no property '{}'", self.shader.name, property);
        }
        slot
    }
}

impl MaterialTarget for MaterialSheet {
    fn set_float(&mut self, property: &str, value: f32) {
        if let Some(PropertyValue::Float(current)) = self.slot(property) {
            *current = value;
        }
    }

    fn set_vector(&mut self, property: &str, value: Vec4) {
        if let Some(PropertyValue::Vector(current)) = self.slot(property) {
            *current = value;
        }
    }

    fn set_color(&mut self, property: &str, value: Color) {
        if let Some(PropertyValue::Color(current)) = self.slot(property) {
            *current = value;
        }
    }

    fn set_texture(&mut self, property: &str, value: TextureRef) {
        if let Some(PropertyValue::Texture(current)) = self.slot(property) {
            *current = Some(value);
        }
    }

    fn set_render_queue(&mut self, queue: i32) {
        self.render_queue = queue;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shader() -> ShaderDefinition {
        ShaderDefinition::new("Standard", 2000)
            .with_property(PropertyDecl::new(
                "_Metallic",
                PropertyKind::Range,
                PropertyValue::Float(0.0),
            ))
            .with_property(PropertyDecl::new(
                "_Color",
                PropertyKind::Color,
                PropertyValue::Color(Color::WHITE),
            ))
    }

    #[test]
    fn test_instantiate_uses_defaults() {
        let material = shader().instantiate();
        assert_eq!(material.value("_Metallic"), Some(&PropertyValue::Float(0.0)));
        assert_eq!(material.render_queue(), 2000);
        assert_eq!(material.properties().len(), 2);
    }

    #[test]
    fn test_setters_ignore_kind_mismatch() {
        let mut material = shader().instantiate();
        material.set_float("_Metallic", 0.7);
        material.set_float("_Color", 0.7);
        material.set_float("_Unknown", 0.7);
        assert_eq!(material.value("_Metallic"), Some(&PropertyValue::Float(0.7)));
        assert_eq!(material.value("_Color"), Some(&PropertyValue::Color(Color::WHITE)));
    }

    #[test]
    fn test_defaults_match_storage_kind() {
        let shader = shader();
        assert_eq!(
            shader.default_value(PropertyKind::Float, "_Metallic"),
            Some(PropertyValue::Float(0.0))
        );
        assert_eq!(shader.default_value(PropertyKind::Vector, "_Metallic"), None);
        assert_eq!(shader.default_value(PropertyKind::Float, "_Missing"), None);
    }
}
