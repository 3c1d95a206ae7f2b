//! Canonical automaton records
//!
//! The minimal DFA is renumbered breadth-first from its start state, with
//! symbols visited in alphabet order, so the same content model always
//! yields the same record. The trap class never appears in the record: a
//! missing `(state, symbol)` entry means the input is rejected.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::ElementDescriptor;

use super::minimize::MinimalDfa;
use super::state::StateId;

/// Dense, trap-free transition table for one content model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonRecord {
    /// All state ids, `0..n`
    pub states: BTreeSet<StateId>,
    /// Start state id
    pub start: StateId,
    /// Accepting state ids
    pub accepts: BTreeSet<StateId>,
    /// state -> element name -> next state; rows without transitions are omitted
    pub transitions: BTreeMap<StateId, IndexMap<String, StateId>>,
    /// Element descriptors keyed by element name
    pub elements: IndexMap<String, ElementDescriptor>,
}

/// Renumber a minimal DFA into an [`AutomatonRecord`].
pub fn canonicalize(
    dfa: &MinimalDfa,
    elements: IndexMap<String, ElementDescriptor>,
) -> AutomatonRecord {
    let mut record = AutomatonRecord {
        states: BTreeSet::new(),
        start: 0,
        accepts: BTreeSet::new(),
        transitions: BTreeMap::new(),
        elements,
    };

    // Empty language: a single rejecting state.
    if dfa.is_trap(dfa.start_state()) {
        record.states.insert(0);
        return record;
    }

    let mut ids: BTreeMap<StateId, StateId> = BTreeMap::new();
    let mut order: Vec<StateId> = Vec::new();
    let mut queue = VecDeque::from([dfa.start_state()]);
    ids.insert(dfa.start_state(), 0);

    while let Some(state) = queue.pop_front() {
        order.push(state);
        for symbol in dfa.alphabet().ids() {
            let Some(next) = dfa.transition(state, symbol) else {
                continue;
            };
            if dfa.is_trap(next) || ids.contains_key(&next) {
                continue;
            }
            ids.insert(next, ids.len() as StateId);
            queue.push_back(next);
        }
    }

    for &state in &order {
        let id = ids[&state];
        record.states.insert(id);
        if dfa.is_final(state) {
            record.accepts.insert(id);
        }

        let mut row = IndexMap::new();
        for symbol in dfa.alphabet().ids() {
            let Some(next) = dfa.transition(state, symbol) else {
                continue;
            };
            if dfa.is_trap(next) {
                continue;
            }
            if let Some(name) = dfa.alphabet().name(symbol) {
                row.insert(name.to_string(), ids[&next]);
            }
        }
        if !row.is_empty() {
            record.transitions.insert(id, row);
        }
    }

    record
}

impl AutomatonRecord {
    /// Number of states
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Successor of a state on an element name; None means rejection
    pub fn next(&self, state: StateId, name: &str) -> Option<StateId> {
        self.transitions
            .get(&state)
            .and_then(|row| row.get(name))
            .copied()
    }

    /// Check whether the record accepts a sequence of element names.
    pub fn accepts<I, S>(&self, word: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = self.start;
        for name in word {
            match self.next(state, name.as_ref()) {
                Some(next) => state = next,
                None => return false,
            }
        }
        self.accepts.contains(&state)
    }

    /// Element names allowed from a state, in alphabet order
    pub fn expected(&self, state: StateId) -> Vec<&str> {
        self.transitions
            .get(&state)
            .map(|row| row.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}
