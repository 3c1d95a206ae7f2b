//! Element particles and their descriptors
//!
//! The descriptor is opaque to the automaton pipeline: it is registered
//! under the element's name and handed back unchanged with the compiled
//! record, for the code generator to consume.

use serde::{Deserialize, Serialize};

use super::occurs::Occurs;

/// Leaf element descriptor carried through to the automaton record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDescriptor {
    /// Element name; also the automaton input symbol
    pub name: String,
    /// Target namespace of the declaration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Name of the element's type, if declared
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Whether xsi:nil is allowed
    #[serde(default)]
    pub nillable: bool,
    /// Default value constraint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl ElementDescriptor {
    /// Create a descriptor with only a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            type_name: None,
            nillable: false,
            default: None,
        }
    }

    /// Set the namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the type name
    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Set nillable
    pub fn with_nillable(mut self, nillable: bool) -> Self {
        self.nillable = nillable;
        self
    }

    /// Set the default value
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Element particle in a model group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementParticle {
    /// Declaration of the element
    pub descriptor: ElementDescriptor,
    /// Occurrence constraints
    pub occurs: Occurs,
}

impl ElementParticle {
    /// Create a new element particle
    pub fn new(descriptor: ElementDescriptor, occurs: Occurs) -> Self {
        Self { descriptor, occurs }
    }

    /// The element name, used as the transition symbol
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_builder() {
        let desc = ElementDescriptor::new("title")
            .with_namespace("http://example.com/book")
            .with_type("xs:string")
            .with_nillable(true)
            .with_default("Untitled");

        assert_eq!(desc.name, "title");
        assert_eq!(desc.namespace.as_deref(), Some("http://example.com/book"));
        assert_eq!(desc.type_name.as_deref(), Some("xs:string"));
        assert!(desc.nillable);
        assert_eq!(desc.default.as_deref(), Some("Untitled"));
    }

    #[test]
    fn test_descriptor_json_shape() {
        let desc = ElementDescriptor::new("price").with_type("xs:decimal");
        let json = serde_json::to_value(&desc).unwrap();
        assert_eq!(json["name"], "price");
        assert_eq!(json["type"], "xs:decimal");
        assert!(json.get("namespace").is_none());

        let back: ElementDescriptor = serde_json::from_value(json).unwrap();
        assert_eq!(back, desc);
    }

    #[test]
    fn test_particle_name() {
        let particle = ElementParticle::new(ElementDescriptor::new("a"), Occurs::optional());
        assert_eq!(particle.name(), "a");
        assert_eq!(particle.occurs, Occurs::optional());
    }
}
