//! Finite automata for content models.
//!
//! The pipeline runs strictly forward:
//! - [`FragmentBuilder`] turns a content model into an ε-NFA
//! - [`subset_construction`] determinizes it
//! - [`Dfa::minimize`] partition-refines it and identifies the trap class
//! - [`canonicalize`] renumbers it into a trap-free [`AutomatonRecord`]

mod builder;
mod canonical;
mod dfa;
mod minimize;
mod nfa;
mod state;
mod subset;
mod symbol;

pub use builder::{Fragment, FragmentBuilder, NfaBuild, Target};
pub use canonical::{canonicalize, AutomatonRecord};
pub use dfa::Dfa;
pub use minimize::MinimalDfa;
pub use nfa::EpsilonNfa;
pub use state::{StateId, StateSet};
pub use subset::subset_construction;
pub use symbol::{is_epsilon, Alphabet, SymbolId, EPSILON};
