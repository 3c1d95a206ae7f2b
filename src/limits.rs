//! Limits and constraints for content model compilation
//!
//! xs:all groups are compiled by enumerating every ordering of their
//! particles, so the automaton grows factorially with the group size.
//! These limits reject such models before the blow-up happens.

use crate::error::{Error, Result};

/// Compilation limits configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of particles in a single xs:all group
    pub max_all_group_size: usize,

    /// Maximum number of NFA states allocated for one content model
    pub max_nfa_states: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_all_group_size: 8,
            max_nfa_states: 1_000_000,
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_all_group_size: 5,
            max_nfa_states: 100_000,
        }
    }

    /// Create permissive limits (less restrictive, use with caution)
    pub fn permissive() -> Self {
        Self {
            max_all_group_size: 10,
            max_nfa_states: 50_000_000,
        }
    }

    /// Set the maximum xs:all group size
    pub fn with_max_all_group_size(mut self, size: usize) -> Self {
        self.max_all_group_size = size;
        self
    }

    /// Set the maximum number of NFA states
    pub fn with_max_nfa_states(mut self, states: usize) -> Self {
        self.max_nfa_states = states;
        self
    }

    /// Check if an xs:all group size is within limits
    pub fn check_all_group_size(&self, size: usize) -> Result<()> {
        if size > self.max_all_group_size {
            Err(Error::AllGroupTooLarge {
                size,
                limit: self.max_all_group_size,
            })
        } else {
            Ok(())
        }
    }

    /// Check if the number of NFA states is within limits
    pub fn check_nfa_states(&self, count: usize) -> Result<()> {
        if count > self.max_nfa_states {
            Err(Error::LimitExceeded(format!(
                "NFA state count {} exceeds maximum {}",
                count, self.max_nfa_states
            )))
        } else {
            Ok(())
        }
    }
}
