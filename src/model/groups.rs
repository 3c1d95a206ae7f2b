//! XSD Model Groups and content model trees
//!
//! This module implements model groups for XSD content models:
//! - xs:sequence - ordered content
//! - xs:choice - alternative content
//! - xs:all - unordered content, each particle exactly once
//!
//! Reference: https://www.w3.org/TR/xmlschema11-1/#Model_Groups

use crate::error::{Error, Result};

use super::elements::{ElementDescriptor, ElementParticle};
use super::occurs::Occurs;

/// Model group compositor type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModelType {
    /// Ordered sequence of particles
    #[default]
    Sequence,
    /// One of multiple alternatives
    Choice,
    /// Unordered set of particles
    All,
}

impl ModelType {
    /// Parse from element tag name
    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag {
            "sequence" | "{http://www.w3.org/2001/XMLSchema}sequence" => Ok(Self::Sequence),
            "choice" | "{http://www.w3.org/2001/XMLSchema}choice" => Ok(Self::Choice),
            "all" | "{http://www.w3.org/2001/XMLSchema}all" => Ok(Self::All),
            _ => Err(Error::UnsupportedGroupKind(tag.to_string())),
        }
    }

    /// Tag name used in the JSON model format
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sequence => "sequence",
            Self::Choice => "choice",
            Self::All => "all",
        }
    }
}

impl std::fmt::Display for ModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// XSD Model Group (sequence, choice, all)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelGroup {
    /// Model type (sequence, choice, all)
    pub model: ModelType,
    /// Particles in this group
    pub particles: Vec<ContentNode>,
    /// Occurrence constraints
    pub occurs: Occurs,
}

impl ModelGroup {
    /// Create a new model group occurring once
    pub fn new(model: ModelType, particles: Vec<ContentNode>) -> Self {
        Self {
            model,
            particles,
            occurs: Occurs::once(),
        }
    }

    /// Number of particles
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Check if the group has no particles
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

/// A node of a content model tree: an element leaf or a nested group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentNode {
    /// Element particle
    Element(ElementParticle),
    /// Nested model group
    Group(ModelGroup),
}

impl ContentNode {
    /// Element leaf with the given name, occurring once
    pub fn element(name: impl Into<String>) -> Self {
        Self::Element(ElementParticle::new(
            ElementDescriptor::new(name),
            Occurs::once(),
        ))
    }

    /// Element leaf from a full descriptor, occurring once
    pub fn from_descriptor(descriptor: ElementDescriptor) -> Self {
        Self::Element(ElementParticle::new(descriptor, Occurs::once()))
    }

    /// xs:sequence over the given particles
    pub fn sequence(particles: Vec<ContentNode>) -> Self {
        Self::Group(ModelGroup::new(ModelType::Sequence, particles))
    }

    /// xs:choice over the given particles
    pub fn choice(particles: Vec<ContentNode>) -> Self {
        Self::Group(ModelGroup::new(ModelType::Choice, particles))
    }

    /// xs:all over the given particles
    pub fn all(particles: Vec<ContentNode>) -> Self {
        Self::Group(ModelGroup::new(ModelType::All, particles))
    }

    /// Replace the occurrence constraints
    pub fn with_occurs(mut self, occurs: Occurs) -> Self {
        match &mut self {
            Self::Element(e) => e.occurs = occurs,
            Self::Group(g) => g.occurs = occurs,
        }
        self
    }

    /// Get the occurrence constraints
    pub fn occurs(&self) -> Occurs {
        match self {
            Self::Element(e) => e.occurs,
            Self::Group(g) => g.occurs,
        }
    }

    /// Check whether this node admits the empty sequence of elements
    pub fn is_emptiable(&self) -> bool {
        if self.occurs().is_emptiable() {
            return true;
        }
        match self {
            Self::Element(_) => false,
            Self::Group(g) => match g.model {
                ModelType::Sequence | ModelType::All => {
                    g.particles.iter().all(ContentNode::is_emptiable)
                }
                ModelType::Choice => g.particles.iter().any(ContentNode::is_emptiable),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_type_from_tag() {
        assert_eq!(ModelType::from_tag("sequence").unwrap(), ModelType::Sequence);
        assert_eq!(ModelType::from_tag("choice").unwrap(), ModelType::Choice);
        assert_eq!(
            ModelType::from_tag("{http://www.w3.org/2001/XMLSchema}all").unwrap(),
            ModelType::All
        );
        assert!(matches!(
            ModelType::from_tag("any"),
            Err(Error::UnsupportedGroupKind(kind)) if kind == "any"
        ));
    }

    #[test]
    fn test_with_occurs() {
        let node = ContentNode::element("a").with_occurs(Occurs::zero_or_more());
        assert_eq!(node.occurs(), Occurs::zero_or_more());

        let group = ContentNode::choice(vec![]).with_occurs(Occurs::optional());
        assert_eq!(group.occurs(), Occurs::optional());
    }

    #[test]
    fn test_is_emptiable() {
        let a = ContentNode::element("a");
        let b_opt = ContentNode::element("b").with_occurs(Occurs::optional());

        assert!(!a.is_emptiable());
        assert!(b_opt.is_emptiable());
        assert!(!ContentNode::sequence(vec![a.clone(), b_opt.clone()]).is_emptiable());
        assert!(ContentNode::choice(vec![a.clone(), b_opt.clone()]).is_emptiable());
        assert!(ContentNode::all(vec![b_opt.clone()]).is_emptiable());
        assert!(!ContentNode::choice(vec![]).is_emptiable());
        assert!(ContentNode::sequence(vec![a]).with_occurs(Occurs::optional()).is_emptiable());
    }
}
