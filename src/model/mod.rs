//! Content model trees
//!
//! Input to the automaton pipeline: element leaves and
//! sequence/choice/all groups, each with occurrence bounds.

pub mod elements;
pub mod groups;
pub mod json;
pub mod occurs;

pub use elements::{ElementDescriptor, ElementParticle};
pub use groups::{ContentNode, ModelGroup, ModelType};
pub use occurs::{Occurs, OccursShape};
