//! Content model to ε-NFA construction
//!
//! Each content model node is turned into a [`Fragment`]: a start state
//! plus the set of "vacant" states that still own transitions whose
//! target is [`Target::Pending`]. Fragments are wired together by
//! [`FragmentBuilder::patch`], which rewrites every pending target of a
//! state to a concrete one.
//!
//! ```text
//! element      start --a-->
//! sequence     start --a--> O --b--> O --c-->
//! choice       start --ε--> O --a-->
//!                    --ε--> O --b-->
//! all          choice over every ordering of the particles as a sequence
//! optional     entry --ε--> fragment -->
//!                    --ε-->
//! zero-or-more entry --ε--> fragment --> entry
//!                    --ε-->
//! one-or-more  fragment --> gate --ε--> fragment
//!                                --ε-->
//! ```
//!
//! xs:all grows factorially with the number of particles; the group size is
//! checked against [`Limits::max_all_group_size`] before any ordering is built.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use tracing::{trace, warn};

use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::model::{ContentNode, ElementDescriptor, ElementParticle, ModelType, OccursShape};

use super::nfa::EpsilonNfa;
use super::state::StateId;
use super::symbol::{Alphabet, SymbolId, EPSILON};

/// All-groups larger than this get a warning about the permutation count.
const ALL_GROUP_WARN_SIZE: usize = 5;

/// Target of a transition under construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// Wired to a concrete state
    Resolved(StateId),
    /// Not yet connected; filled in by a later patch
    Pending,
}

/// Partially built automaton for one content model node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Entry state of the fragment
    pub start: StateId,
    /// States holding at least one pending transition
    pub vacant: BTreeSet<StateId>,
}

impl Fragment {
    fn single(state: StateId) -> Self {
        Self {
            start: state,
            vacant: BTreeSet::from([state]),
        }
    }
}

/// Result of building and finalizing one content model
#[derive(Debug, Clone)]
pub struct NfaBuild {
    /// The finished ε-NFA, with a single accepting state
    pub nfa: EpsilonNfa,
    /// Element descriptors keyed by element name
    pub elements: IndexMap<String, ElementDescriptor>,
    /// Number of sequence fragments built for xs:all orderings
    pub permutations: usize,
}

/// Builds ε-NFA fragments from content model nodes.
///
/// A builder is used for exactly one content model root.
#[derive(Debug)]
pub struct FragmentBuilder<'a> {
    limits: &'a Limits,
    /// Outgoing transitions per state, in insertion order
    edges: Vec<Vec<(SymbolId, Target)>>,
    alphabet: Alphabet,
    elements: IndexMap<String, ElementDescriptor>,
    permutations: usize,
}

impl<'a> FragmentBuilder<'a> {
    /// Create a builder bound by the given limits
    pub fn new(limits: &'a Limits) -> Self {
        Self {
            limits,
            edges: Vec::new(),
            alphabet: Alphabet::new(),
            elements: IndexMap::new(),
            permutations: 0,
        }
    }

    /// Build the ε-NFA for a whole content model
    pub fn build(root: &ContentNode, limits: &'a Limits) -> Result<NfaBuild> {
        let mut builder = Self::new(limits);
        let fragment = builder.build_fragment(root)?;
        builder.finalize(fragment)
    }

    /// Number of states allocated so far
    pub fn num_states(&self) -> usize {
        self.edges.len()
    }

    /// Allocate a fresh state
    pub fn new_state(&mut self) -> Result<StateId> {
        self.limits.check_nfa_states(self.edges.len() + 1)?;
        let id = self.edges.len() as StateId;
        self.edges.push(Vec::new());
        Ok(id)
    }

    /// Record a transition; duplicates are ignored
    pub(crate) fn add_transition(&mut self, state: StateId, symbol: SymbolId, target: Target) {
        let edges = &mut self.edges[state as usize];
        if !edges.contains(&(symbol, target)) {
            edges.push((symbol, target));
        }
    }

    /// Rewrite every pending transition out of `state` to `target`.
    ///
    /// A vacant state is patched exactly once; patching a state without
    /// pending transitions is an error.
    pub(crate) fn patch(&mut self, state: StateId, target: StateId) -> Result<()> {
        let edges = &mut self.edges[state as usize];
        if !edges.iter().any(|(_, t)| *t == Target::Pending) {
            return Err(Error::Construction(format!(
                "state {} has no pending transition to patch",
                state
            )));
        }

        let mut patched: Vec<(SymbolId, Target)> = Vec::with_capacity(edges.len());
        for (symbol, t) in edges.drain(..) {
            let t = match t {
                Target::Pending => Target::Resolved(target),
                resolved => resolved,
            };
            if !patched.contains(&(symbol, t)) {
                patched.push((symbol, t));
            }
        }
        *edges = patched;
        Ok(())
    }

    /// Build the fragment for a node, occurrence wrapping included
    pub fn build_fragment(&mut self, node: &ContentNode) -> Result<Fragment> {
        let shape = node.occurs().shape()?;
        let base = match node {
            ContentNode::Element(e) => self.build_element(e)?,
            ContentNode::Group(g) => match g.model {
                ModelType::Sequence => {
                    let particles: Vec<&ContentNode> = g.particles.iter().collect();
                    self.build_sequence(&particles)?
                }
                ModelType::Choice => self.build_choice(&g.particles)?,
                ModelType::All => self.build_all(&g.particles)?,
            },
        };
        self.wrap_occurs(base, shape)
    }

    fn build_element(&mut self, element: &ElementParticle) -> Result<Fragment> {
        let x = self.new_state()?;
        let symbol = self.alphabet.intern(element.name());
        self.add_transition(x, symbol, Target::Pending);
        self.elements
            .insert(element.name().to_string(), element.descriptor.clone());
        trace!(state = x, element = element.name(), "element fragment");
        Ok(Fragment::single(x))
    }

    fn build_sequence(&mut self, particles: &[&ContentNode]) -> Result<Fragment> {
        let (first, rest) = particles
            .split_first()
            .ok_or(Error::EmptyGroup(ModelType::Sequence))?;

        let mut fragment = self.build_fragment(first)?;
        for particle in rest {
            let next = self.build_fragment(particle)?;
            for &v in &fragment.vacant {
                self.patch(v, next.start)?;
            }
            fragment.vacant = next.vacant;
        }
        Ok(fragment)
    }

    fn build_choice(&mut self, particles: &[ContentNode]) -> Result<Fragment> {
        let x = self.new_state()?;
        let mut vacant = BTreeSet::new();
        for particle in particles {
            let branch = self.build_fragment(particle)?;
            self.add_transition(x, EPSILON, Target::Resolved(branch.start));
            vacant.extend(branch.vacant);
        }
        Ok(Fragment { start: x, vacant })
    }

    fn build_all(&mut self, particles: &[ContentNode]) -> Result<Fragment> {
        if particles.is_empty() {
            return Err(Error::EmptyGroup(ModelType::All));
        }
        self.limits.check_all_group_size(particles.len())?;
        if particles.len() > ALL_GROUP_WARN_SIZE {
            warn!(
                size = particles.len(),
                "xs:all group expands to one sequence per ordering of its particles"
            );
        }

        let x = self.new_state()?;
        let mut vacant = BTreeSet::new();
        let mut order: Vec<usize> = (0..particles.len()).collect();
        loop {
            let sequence: Vec<&ContentNode> = order.iter().map(|&i| &particles[i]).collect();
            let branch = self.build_sequence(&sequence)?;
            self.add_transition(x, EPSILON, Target::Resolved(branch.start));
            vacant.extend(branch.vacant);
            self.permutations += 1;

            if !next_permutation(&mut order) {
                break;
            }
        }
        Ok(Fragment { start: x, vacant })
    }

    fn wrap_occurs(&mut self, fragment: Fragment, shape: OccursShape) -> Result<Fragment> {
        let Fragment { start, mut vacant } = fragment;
        match shape {
            OccursShape::Once => Ok(Fragment { start, vacant }),
            // The skip and loop edges hang off a fresh entry state: `start`
            // may already be the target of a loop inside the fragment.
            OccursShape::Optional => {
                let entry = self.new_state()?;
                self.add_transition(entry, EPSILON, Target::Resolved(start));
                self.add_transition(entry, EPSILON, Target::Pending);
                vacant.insert(entry);
                Ok(Fragment {
                    start: entry,
                    vacant,
                })
            }
            OccursShape::ZeroOrMore => {
                let entry = self.new_state()?;
                self.add_transition(entry, EPSILON, Target::Resolved(start));
                for &v in &vacant {
                    self.patch(v, entry)?;
                }
                self.add_transition(entry, EPSILON, Target::Pending);
                Ok(Fragment::single(entry))
            }
            OccursShape::OneOrMore => {
                let gate = self.new_state()?;
                for &v in &vacant {
                    self.patch(v, gate)?;
                }
                self.add_transition(gate, EPSILON, Target::Resolved(start));
                self.add_transition(gate, EPSILON, Target::Pending);
                Ok(Fragment {
                    start,
                    vacant: BTreeSet::from([gate]),
                })
            }
        }
    }

    /// Connect the root fragment to a fresh accepting state and emit the NFA.
    pub fn finalize(mut self, root: Fragment) -> Result<NfaBuild> {
        let accept = self.new_state()?;
        for &v in &root.vacant {
            self.patch(v, accept)?;
        }

        let mut nfa = EpsilonNfa::new(self.alphabet);
        nfa.set_start_state(root.start);
        // States without transitions still take their id.
        while (nfa.num_states() as usize) < self.edges.len() {
            nfa.add_state();
        }
        for (state, edges) in self.edges.iter().enumerate() {
            for &(symbol, target) in edges {
                match target {
                    Target::Resolved(to) => nfa.add_transition(state as StateId, symbol, to),
                    Target::Pending => {
                        return Err(Error::Construction(format!(
                            "state {} still has a pending transition after finalization",
                            state
                        )))
                    }
                }
            }
        }
        nfa.add_final_state(accept);

        Ok(NfaBuild {
            nfa,
            elements: self.elements,
            permutations: self.permutations,
        })
    }
}

/// Advance `order` to the next lexicographic permutation.
/// Returns false once the last permutation has been produced.
fn next_permutation(order: &mut [usize]) -> bool {
    let Some(i) = order.windows(2).rposition(|w| w[0] < w[1]) else {
        return false;
    };
    let j = order
        .iter()
        .rposition(|&x| x > order[i])
        .unwrap_or(i + 1);
    order.swap(i, j);
    order[i + 1..].reverse();
    true
}
