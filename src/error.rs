//! Error types for xsd-automata
//!
//! This module defines all error types used throughout the library.
//! Every error is an input-validation or invariant failure: the pipeline
//! either returns a complete automaton record or one of these.

use thiserror::Error;

use crate::model::ModelType;

/// Result type alias using xsd-automata Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for content model compilation
#[derive(Error, Debug)]
pub enum Error {
    /// A model group kind is not one of element, sequence, choice or all
    #[error("unsupported model group kind '{0}'")]
    UnsupportedGroupKind(String),

    /// An occurrence pair outside the four supported shapes
    #[error("(minOccurs, maxOccurs) pair ({min}, {}) is not supported", fmt_max(.max))]
    UnsupportedOccurs {
        /// Minimum occurrences
        min: u32,
        /// Maximum occurrences (None = unbounded)
        max: Option<u32>,
    },

    /// An xs:all group has more children than the permutation guard allows
    #[error("all group with {size} particles exceeds the limit of {limit}")]
    AllGroupTooLarge {
        /// Number of particles in the group
        size: usize,
        /// Configured maximum
        limit: usize,
    },

    /// A sequence or all group without particles
    #[error("{0} group must contain at least one particle")]
    EmptyGroup(ModelType),

    /// Malformed content model description
    #[error("invalid content model: {0}")]
    InvalidModel(String),

    /// Unknown record export format
    #[error("unsupported export format '{0}', expected json, pretty-json or dot")]
    UnsupportedFormat(String),

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// Internal automaton invariant violated during construction
    #[error("construction error: {0}")]
    Construction(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn fmt_max(max: &Option<u32>) -> String {
    match max {
        Some(max) => max.to_string(),
        None => "unbounded".to_string(),
    }
}

impl Error {
    /// Create an unsupported occurs error from a (min, max) pair
    pub fn unsupported_occurs(min: u32, max: Option<u32>) -> Self {
        Self::UnsupportedOccurs { min, max }
    }
}
