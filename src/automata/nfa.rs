//! Epsilon Non-deterministic Finite Automaton (ε-NFA).

use std::collections::HashMap;

use super::state::{StateId, StateSet};
use super::symbol::{is_epsilon, Alphabet, SymbolId, EPSILON};

/// An Epsilon Non-deterministic Finite Automaton over element names.
#[derive(Debug, Clone)]
pub struct EpsilonNfa {
    /// Number of states (states are numbered 0..num_states)
    num_states: StateId,
    /// Start state
    start_state: StateId,
    /// Final (accepting) states
    final_states: StateSet,
    /// Transitions: (source, symbol) -> set of destination states
    /// For epsilon transitions, symbol == EPSILON
    transitions: HashMap<(StateId, SymbolId), StateSet>,
    /// Element names used on non-epsilon transitions
    alphabet: Alphabet,
}

impl EpsilonNfa {
    /// Create an NFA with a single start state and no transitions.
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            num_states: 1,
            start_state: 0,
            final_states: StateSet::with_capacity(16),
            transitions: HashMap::new(),
            alphabet,
        }
    }

    fn ensure_state(&mut self, state: StateId) {
        if state >= self.num_states {
            self.num_states = state + 1;
        }
    }

    /// Add a new state and return its ID.
    pub fn add_state(&mut self) -> StateId {
        let id = self.num_states;
        self.num_states += 1;
        id
    }

    /// Add a transition from source to destination on the given symbol.
    pub fn add_transition(&mut self, source: StateId, symbol: SymbolId, destination: StateId) {
        debug_assert!(
            is_epsilon(symbol) || (symbol as usize) < self.alphabet.len(),
            "symbol {symbol} not in alphabet"
        );
        self.ensure_state(source);
        self.ensure_state(destination);
        self.transitions
            .entry((source, symbol))
            .or_default()
            .insert(destination);
    }

    /// Add an epsilon transition from source to destination.
    pub fn add_epsilon_transition(&mut self, source: StateId, destination: StateId) {
        self.add_transition(source, EPSILON, destination);
    }

    /// Set the start state.
    pub fn set_start_state(&mut self, state: StateId) {
        self.ensure_state(state);
        self.start_state = state;
    }

    /// Add a final (accepting) state.
    pub fn add_final_state(&mut self, state: StateId) {
        self.ensure_state(state);
        self.final_states.insert(state);
    }

    /// Get the number of states.
    pub fn num_states(&self) -> StateId {
        self.num_states
    }

    /// Get the start state.
    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    /// Get the final states.
    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    /// Get the alphabet (all symbols except epsilon).
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Destinations of one state on one symbol.
    pub fn targets(&self, source: StateId, symbol: SymbolId) -> Option<&StateSet> {
        self.transitions.get(&(source, symbol))
    }

    /// Get the epsilon closure of a set of states.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = StateSet::with_capacity(self.num_states as usize);
        let mut stack: Vec<StateId> = states.iter().collect();

        while let Some(s) = stack.pop() {
            if !closure.insert(s) {
                continue;
            }
            if let Some(destinations) = self.targets(s, EPSILON) {
                stack.extend(destinations.iter().filter(|d| !closure.contains(*d)));
            }
        }

        closure
    }

    /// Get the states reachable from a set of states on a given symbol.
    /// Returns the epsilon closure of the reached states.
    pub fn move_on_symbol(&self, states: &StateSet, symbol: SymbolId) -> StateSet {
        debug_assert!(!is_epsilon(symbol), "use epsilon_closure for epsilon moves");

        let mut reached = StateSet::with_capacity(self.num_states as usize);
        for state in states.iter() {
            if let Some(destinations) = self.targets(state, symbol) {
                reached.union_with(destinations);
            }
        }

        self.epsilon_closure(&reached)
    }

    /// Check whether the NFA accepts a sequence of element names.
    pub fn accepts<I, S>(&self, word: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let start = StateSet::singleton(self.start_state, self.num_states as usize);
        let mut current = self.epsilon_closure(&start);
        for name in word {
            let Some(symbol) = self.alphabet.id(name.as_ref()) else {
                return false;
            };
            current = self.move_on_symbol(&current, symbol);
            if current.is_empty() {
                return false;
            }
        }
        current.intersects(&self.final_states)
    }

    /// Get all transitions as an iterator.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, SymbolId, StateId)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(&(src, sym), dests)| dests.iter().map(move |dst| (src, sym, dst)))
    }
}
