//! Preset data structures

/// One `property = value` line of a preset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyBinding {
    pub property: String,
    /// Stored text, interpreted by the target property's kind at apply time
    pub value: String,
}

impl PropertyBinding {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// A named, ordered set of property bindings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    pub name: String,
    pub bindings: Vec<PropertyBinding>,
}

impl Preset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bindings: Vec::new(),
        }
    }

    pub fn with_bindings(name: impl Into<String>, bindings: Vec<PropertyBinding>) -> Self {
        Self {
            name: name.into(),
            bindings,
        }
    }

    /// Stored value for a property (first match wins)
    pub fn value_of(&self, property: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|b| b.property == property)
            .map(|b| b.value.as_str())
    }

    /// Replace the value of the first binding for `property`.
    /// Returns false if the property is not bound.
    pub fn update_binding(&mut self, property: &str, value: impl Into<String>) -> bool {
        match self.bindings.iter_mut().find(|b| b.property == property) {
            Some(binding) => {
                binding.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Remove the first binding for `property`.
    /// Returns false if the property is not bound.
    pub fn remove_binding(&mut self, property: &str) -> bool {
        match self.bindings.iter().position(|b| b.property == property) {
            Some(index) => {
                self.bindings.remove(index);
                true
            }
            None => false,
        }
    }
}
