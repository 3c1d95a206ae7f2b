//! Particle occurrence constraints
//!
//! Particles define occurrence constraints (minOccurs, maxOccurs) for
//! elements and model groups. Only four shapes can be compiled into an
//! automaton; [`OccursShape`] names them.
//!
//! Reference: https://www.w3.org/TR/xmlschema11-1/#p

use std::fmt;

use crate::error::{Error, Result};

/// Occurrence bounds for a particle (minOccurs, maxOccurs)
/// None for max means unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occurs {
    /// Minimum number of occurrences (default 1)
    pub min: u32,
    /// Maximum number of occurrences (None = unbounded, default 1)
    pub max: Option<u32>,
}

impl Occurs {
    /// Create new occurrence bounds
    pub fn new(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }

    /// Default occurrence (1, 1)
    pub fn once() -> Self {
        Self { min: 1, max: Some(1) }
    }

    /// Optional occurrence (0, 1)
    pub fn optional() -> Self {
        Self { min: 0, max: Some(1) }
    }

    /// Zero or more (0, unbounded)
    pub fn zero_or_more() -> Self {
        Self { min: 0, max: None }
    }

    /// One or more (1, unbounded)
    pub fn one_or_more() -> Self {
        Self { min: 1, max: None }
    }

    /// Check if this particle can be empty (minOccurs == 0)
    pub fn is_emptiable(&self) -> bool {
        self.min == 0
    }

    /// Check if maxOccurs is unbounded
    pub fn is_unbounded(&self) -> bool {
        self.max.is_none()
    }

    /// Classify these bounds into one of the compilable shapes
    pub fn shape(&self) -> Result<OccursShape> {
        OccursShape::try_from(*self)
    }
}

impl Default for Occurs {
    fn default() -> Self {
        Self::once()
    }
}

impl fmt::Display for Occurs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "({}, {})", self.min, max),
            None => write!(f, "({}, unbounded)", self.min),
        }
    }
}

/// The occurrence shapes the fragment builder knows how to wrap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccursShape {
    /// (1, 1): exactly once
    Once,
    /// (0, 1): may be skipped
    Optional,
    /// (0, unbounded): loop with skip
    ZeroOrMore,
    /// (1, unbounded): at least once, then loop
    OneOrMore,
}

impl TryFrom<Occurs> for OccursShape {
    type Error = Error;

    fn try_from(occurs: Occurs) -> Result<Self> {
        match (occurs.min, occurs.max) {
            (1, Some(1)) => Ok(Self::Once),
            (0, Some(1)) => Ok(Self::Optional),
            (0, None) => Ok(Self::ZeroOrMore),
            (1, None) => Ok(Self::OneOrMore),
            (min, max) => Err(Error::unsupported_occurs(min, max)),
        }
    }
}
