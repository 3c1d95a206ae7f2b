//! Deterministic Finite Automaton (DFA).
//!
//! Transitions are stored as one dense row per state, indexed by symbol id.
//! A missing entry routes to the implicit trap state.

use std::collections::VecDeque;

use super::state::{StateId, StateSet};
use super::symbol::{Alphabet, SymbolId};

/// A Deterministic Finite Automaton over element names.
#[derive(Debug, Clone)]
pub struct Dfa {
    /// Start state
    start_state: StateId,
    /// Final (accepting) states
    final_states: StateSet,
    /// Transitions: state -> symbol -> destination, None = trap
    transitions: Vec<Vec<Option<StateId>>>,
    /// Element names, shared with the source NFA
    alphabet: Alphabet,
    /// NFA states each DFA state stands for (when built by subset construction)
    state_mapping: Vec<Vec<StateId>>,
}

impl Dfa {
    /// Create a DFA without states.
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            start_state: 0,
            final_states: StateSet::with_capacity(16),
            transitions: Vec::new(),
            alphabet,
            state_mapping: Vec::new(),
        }
    }

    /// Add a new state and return its ID.
    pub fn add_state(&mut self) -> StateId {
        let id = self.transitions.len() as StateId;
        self.transitions.push(vec![None; self.alphabet.len()]);
        id
    }

    /// Set the start state.
    pub fn set_start_state(&mut self, state: StateId) {
        self.start_state = state;
    }

    /// Add a final (accepting) state.
    pub fn add_final_state(&mut self, state: StateId) {
        self.final_states.insert(state);
    }

    /// Add a transition, replacing any previous one on the same symbol.
    pub fn add_transition(&mut self, source: StateId, symbol: SymbolId, destination: StateId) {
        self.transitions[source as usize][symbol as usize] = Some(destination);
    }

    /// Get the transition from a state on a symbol; None means the trap.
    pub fn transition(&self, source: StateId, symbol: SymbolId) -> Option<StateId> {
        self.transitions
            .get(source as usize)
            .and_then(|row| row.get(symbol as usize).copied().flatten())
    }

    /// Get the number of states.
    pub fn num_states(&self) -> StateId {
        self.transitions.len() as StateId
    }

    /// Get the start state.
    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    /// Get the final states.
    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    /// Check if a state is accepting.
    pub fn is_final(&self, state: StateId) -> bool {
        self.final_states.contains(state)
    }

    /// Get the alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Record which NFA states make up each DFA state.
    pub fn set_state_mapping(&mut self, mapping: Vec<Vec<StateId>>) {
        self.state_mapping = mapping;
    }

    /// NFA states behind a DFA state (empty if unknown).
    pub fn nfa_states(&self, state: StateId) -> &[StateId] {
        self.state_mapping
            .get(state as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether some (state, symbol) pair falls through to the implicit trap.
    pub fn is_partial(&self) -> bool {
        self.transitions.iter().flatten().any(Option::is_none)
    }

    /// States reachable from the start state, in breadth-first order.
    pub fn reachable_states(&self) -> Vec<StateId> {
        if self.transitions.is_empty() {
            return Vec::new();
        }
        let mut seen = StateSet::with_capacity(self.transitions.len());
        let mut order = Vec::new();
        let mut queue = VecDeque::from([self.start_state]);
        seen.insert(self.start_state);

        while let Some(state) = queue.pop_front() {
            order.push(state);
            for next in self.transitions[state as usize].iter().flatten() {
                if seen.insert(*next) {
                    queue.push_back(*next);
                }
            }
        }
        order
    }

    /// Check whether the DFA accepts a sequence of element names.
    pub fn accepts<I, S>(&self, word: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.transitions.is_empty() {
            return false;
        }
        let mut state = self.start_state;
        for name in word {
            let next = self
                .alphabet
                .id(name.as_ref())
                .and_then(|symbol| self.transition(state, symbol));
            match next {
                Some(next) => state = next,
                None => return false,
            }
        }
        self.is_final(state)
    }

    /// Get all explicit transitions as an iterator.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, SymbolId, StateId)> + '_ {
        self.transitions.iter().enumerate().flat_map(|(src, row)| {
            row.iter().enumerate().filter_map(move |(sym, dst)| {
                dst.map(|dst| (src as StateId, sym as SymbolId, dst))
            })
        })
    }
}
