//! # xsd-automata
//!
//! Compiles XML Schema content models into minimal deterministic finite
//! automata, ready to be emitted as table-driven validators.
//!
//! A content model is a tree of element leaves under xs:sequence, xs:choice
//! and xs:all groups, each with (minOccurs, maxOccurs) bounds. Compilation
//! runs four stages:
//!
//! - ε-NFA construction from the tree
//! - subset construction into a DFA
//! - partition-refinement minimization
//! - canonical renumbering into a dense, trap-free transition table
//!
//! ## Example
//!
//! ```rust
//! use xsd_automata::{build_dfa, ContentNode, Occurs};
//!
//! let model = ContentNode::sequence(vec![
//!     ContentNode::element("title"),
//!     ContentNode::element("author").with_occurs(Occurs::one_or_more()),
//! ]);
//!
//! let record = build_dfa(&model)?;
//! assert!(record.accepts(["title", "author", "author"]));
//! assert!(!record.accepts(["author"]));
//! # Ok::<(), xsd_automata::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod automata;
pub mod error;
pub mod exports;
pub mod limits;
pub mod model;
pub mod pipeline;

// Re-exports for convenience
pub use automata::AutomatonRecord;
pub use error::{Error, Result};
pub use exports::{write_record, ExportFormat};
pub use limits::Limits;
pub use model::{ContentNode, ElementDescriptor, ModelGroup, ModelType, Occurs};
pub use pipeline::{build_dfa, build_dfa_with_limits, compile, BuildStats, Compilation};

/// Version of the xsd-automata library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
