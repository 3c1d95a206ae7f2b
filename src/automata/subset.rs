//! Subset construction algorithm for converting ε-NFA to DFA.

use std::collections::VecDeque;

use indexmap::IndexMap;

use super::dfa::Dfa;
use super::nfa::EpsilonNfa;
use super::state::{StateId, StateSet};

/// Convert an epsilon-NFA to a DFA using the powerset construction algorithm.
///
/// DFA states are discovered breadth-first from the closure of the NFA start
/// state. An empty successor set produces no transition: the pair is routed
/// to the implicit trap.
pub fn subset_construction(nfa: &EpsilonNfa) -> Dfa {
    // Sets of NFA states keyed by their sorted members, in discovery order
    let mut state_mapping: IndexMap<Vec<StateId>, StateId> = IndexMap::new();
    let mut dfa = Dfa::new(nfa.alphabet().clone());
    let mut worklist: VecDeque<(StateId, StateSet)> = VecDeque::new();

    let start = StateSet::singleton(nfa.start_state(), nfa.num_states() as usize);
    let initial_set = nfa.epsilon_closure(&start);
    let initial_dfa_state = dfa.add_state();
    dfa.set_start_state(initial_dfa_state);
    if initial_set.intersects(nfa.final_states()) {
        dfa.add_final_state(initial_dfa_state);
    }
    state_mapping.insert(initial_set.to_vec(), initial_dfa_state);
    worklist.push_back((initial_dfa_state, initial_set));

    while let Some((current_dfa_state, current_nfa_set)) = worklist.pop_front() {
        for symbol in nfa.alphabet().ids() {
            let next_nfa_set = nfa.move_on_symbol(&current_nfa_set, symbol);
            if next_nfa_set.is_empty() {
                continue;
            }

            let next_vec = next_nfa_set.to_vec();
            let next_dfa_state = match state_mapping.get(&next_vec) {
                Some(&existing) => existing,
                None => {
                    let new_state = dfa.add_state();
                    if next_nfa_set.intersects(nfa.final_states()) {
                        dfa.add_final_state(new_state);
                    }
                    state_mapping.insert(next_vec, new_state);
                    worklist.push_back((new_state, next_nfa_set));
                    new_state
                }
            };

            dfa.add_transition(current_dfa_state, symbol, next_dfa_state);
        }
    }

    // DFA states were numbered in insertion order, so keys line up with ids.
    dfa.set_state_mapping(state_mapping.into_keys().collect());

    dfa
}
