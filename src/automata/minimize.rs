//! DFA minimization by Moore partition refinement.
//!
//! A partial input DFA is completed with an explicit trap state, then states are
//! split until every block agrees on the block of each successor. States
//! with no path to acceptance all end up in one block: the trap class.

use std::collections::{HashMap, VecDeque};

use tracing::trace;

use super::dfa::Dfa;
use super::state::StateId;
use super::symbol::{Alphabet, SymbolId};

/// The minimal DFA with a total transition function.
///
/// `trap` names the block of states that cannot reach acceptance, if any.
#[derive(Debug, Clone)]
pub struct MinimalDfa {
    start_state: StateId,
    final_states: Vec<bool>,
    /// Total transition table: state -> symbol -> destination
    transitions: Vec<Vec<StateId>>,
    trap: Option<StateId>,
    alphabet: Alphabet,
}

impl Dfa {
    /// Minimize the DFA.
    /// Returns the unique minimal automaton recognizing the same language.
    pub fn minimize(&self) -> MinimalDfa {
        let symbols = self.alphabet().len();

        // Renumber reachable states densely; index `sink` completes the table.
        let reachable = self.reachable_states();
        let mut index: HashMap<StateId, usize> = HashMap::with_capacity(reachable.len());
        for (i, &state) in reachable.iter().enumerate() {
            index.insert(state, i);
        }
        let sink = reachable.len();

        let mut needs_sink = reachable.is_empty();
        let mut delta: Vec<Vec<usize>> = Vec::with_capacity(sink + 1);
        let mut accepting: Vec<bool> = Vec::with_capacity(sink + 1);
        for &state in &reachable {
            let row = (0..symbols as SymbolId)
                .map(|sym| match self.transition(state, sym) {
                    Some(next) => index[&next],
                    None => {
                        needs_sink = true;
                        sink
                    }
                })
                .collect();
            delta.push(row);
            accepting.push(self.is_final(state));
        }
        if needs_sink {
            delta.push(vec![sink; symbols]);
            accepting.push(false);
        }

        let block = refine(&delta, &accepting);
        build_minimized(self.alphabet(), &delta, &accepting, &block)
    }
}

/// Moore's algorithm: refine the accepting/non-accepting split until a pass
/// produces no new block.
fn refine(delta: &[Vec<usize>], accepting: &[bool]) -> Vec<usize> {
    let mut block: Vec<usize> = accepting.iter().map(|&f| usize::from(!f)).collect();
    let mut count = number_blocks(&mut block);

    loop {
        let mut ids: HashMap<(usize, Vec<usize>), usize> = HashMap::new();
        let next: Vec<usize> = (0..delta.len())
            .map(|s| {
                let signature: (usize, Vec<usize>) =
                    (block[s], delta[s].iter().map(|&t| block[t]).collect());
                let fresh = ids.len();
                *ids.entry(signature).or_insert(fresh)
            })
            .collect();

        let next_count = ids.len();
        trace!(blocks = next_count, "refinement pass");
        block = next;
        if next_count == count {
            return block;
        }
        count = next_count;
    }
}

/// Renumber block ids by first occurrence; returns the number of blocks.
fn number_blocks(block: &mut [usize]) -> usize {
    let mut ids: HashMap<usize, usize> = HashMap::new();
    for b in block.iter_mut() {
        let fresh = ids.len();
        *b = *ids.entry(*b).or_insert(fresh);
    }
    ids.len()
}

fn build_minimized(
    alphabet: &Alphabet,
    delta: &[Vec<usize>],
    accepting: &[bool],
    block: &[usize],
) -> MinimalDfa {
    let count = block.iter().copied().max().map_or(0, |m| m + 1);
    let symbols = alphabet.len();

    let mut final_states = vec![false; count];
    let mut transitions = vec![vec![0; symbols]; count];
    let mut seen = vec![false; count];
    for s in 0..delta.len() {
        let b = block[s];
        if seen[b] {
            continue;
        }
        seen[b] = true;
        final_states[b] = accepting[s];
        for (sym, &t) in delta[s].iter().enumerate() {
            transitions[b][sym] = block[t] as StateId;
        }
    }

    let trap = dead_block(&transitions, &final_states);

    // Reachable states are in breadth-first order, so the start state (or the
    // lone sink of an empty DFA) sits at index 0.
    MinimalDfa {
        start_state: block[0] as StateId,
        final_states,
        transitions,
        trap,
        alphabet: alphabet.clone(),
    }
}

/// The block from which no accepting block can be reached, if any.
fn dead_block(transitions: &[Vec<StateId>], final_states: &[bool]) -> Option<StateId> {
    let count = transitions.len();
    let mut reverse: Vec<Vec<usize>> = vec![Vec::new(); count];
    for (src, row) in transitions.iter().enumerate() {
        for &dst in row {
            reverse[dst as usize].push(src);
        }
    }

    let mut live = final_states.to_vec();
    let mut queue: VecDeque<usize> = (0..count).filter(|&b| live[b]).collect();
    while let Some(b) = queue.pop_front() {
        for &pred in &reverse[b] {
            if !live[pred] {
                live[pred] = true;
                queue.push_back(pred);
            }
        }
    }

    // All dead states are equivalent, so at most one block is dead.
    live.iter()
        .position(|&l| !l)
        .map(|b| b as StateId)
}

impl MinimalDfa {
    /// Number of states, trap class included.
    pub fn num_states(&self) -> StateId {
        self.transitions.len() as StateId
    }

    /// Get the start state.
    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    /// The trap class, if the language leaves some input undefined.
    pub fn trap(&self) -> Option<StateId> {
        self.trap
    }

    /// Check if a state is the trap class.
    pub fn is_trap(&self, state: StateId) -> bool {
        self.trap == Some(state)
    }

    /// Check if a state is accepting.
    pub fn is_final(&self, state: StateId) -> bool {
        self.final_states
            .get(state as usize)
            .copied()
            .unwrap_or(false)
    }

    /// Successor of a state. Total over the automaton's own states and
    /// symbols; None only for ids outside them.
    pub fn transition(&self, source: StateId, symbol: SymbolId) -> Option<StateId> {
        self.transitions
            .get(source as usize)
            .and_then(|row| row.get(symbol as usize))
            .copied()
    }

    /// Get the alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Check whether the DFA accepts a sequence of element names.
    pub fn accepts<I, S>(&self, word: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = self.start_state;
        for name in word {
            let Some(symbol) = self.alphabet.id(name.as_ref()) else {
                return false;
            };
            match self.transition(state, symbol) {
                Some(next) if !self.is_trap(next) => state = next,
                _ => return false,
            }
        }
        self.is_final(state)
    }

    /// View as an ordinary DFA, dropping transitions into the trap class.
    pub fn to_dfa(&self) -> Dfa {
        let mut dfa = Dfa::new(self.alphabet.clone());
        for _ in 0..self.num_states() {
            dfa.add_state();
        }
        dfa.set_start_state(self.start_state);
        for (state, row) in self.transitions.iter().enumerate() {
            if self.final_states[state] {
                dfa.add_final_state(state as StateId);
            }
            for (symbol, &next) in row.iter().enumerate() {
                if !self.is_trap(next) {
                    dfa.add_transition(state as StateId, symbol as SymbolId, next);
                }
            }
        }
        dfa
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ab() -> Alphabet {
        let mut alphabet = Alphabet::new();
        alphabet.intern("a");
        alphabet.intern("b");
        alphabet
    }

    #[test]
    fn test_dfa_minimization() {
        // 0 -a-> 1 -b-> 3(final)
        // 0 -b-> 2 -b-> 4(final)
        // 1 ~ 2 and 3 ~ 4
        let mut dfa = Dfa::new(ab());
        for _ in 0..5 {
            dfa.add_state();
        }
        dfa.set_start_state(0);
        dfa.add_final_state(3);
        dfa.add_final_state(4);
        dfa.add_transition(0, 0, 1);
        dfa.add_transition(0, 1, 2);
        dfa.add_transition(1, 1, 3);
        dfa.add_transition(2, 1, 4);

        let minimized = dfa.minimize();

        // start, middle, accept, trap
        assert_eq!(minimized.num_states(), 4);
        assert!(minimized.trap().is_some());
        assert!(minimized.accepts(["a", "b"]));
        assert!(minimized.accepts(["b", "b"]));
        assert!(!minimized.accepts(["b"]));
        assert!(!minimized.accepts(["a", "b", "b"]));
    }

    #[test]
    fn test_total_dfa_has_no_trap() {
        // a* over {a}
        let mut alphabet = Alphabet::new();
        alphabet.intern("a");
        let mut dfa = Dfa::new(alphabet);
        dfa.add_state();
        dfa.add_state();
        dfa.add_final_state(0);
        dfa.add_final_state(1);
        dfa.add_transition(0, 0, 1);
        dfa.add_transition(1, 0, 0);

        let minimized = dfa.minimize();
        assert_eq!(minimized.num_states(), 1);
        assert_eq!(minimized.trap(), None);
        assert!(minimized.accepts(["a", "a", "a"]));
    }

    #[test]
    fn test_empty_language_collapses_to_trap() {
        let mut dfa = Dfa::new(ab());
        dfa.add_state();
        dfa.add_state();
        dfa.add_transition(0, 0, 1);

        let minimized = dfa.minimize();
        assert_eq!(minimized.num_states(), 1);
        assert!(minimized.is_trap(minimized.start_state()));
        assert!(!minimized.accepts(Vec::<&str>::new()));
    }

    #[test]
    fn test_unreachable_states_are_dropped() {
        let mut dfa = Dfa::new(ab());
        for _ in 0..3 {
            dfa.add_state();
        }
        dfa.add_final_state(1);
        dfa.add_final_state(2);
        dfa.add_transition(0, 0, 1);
        dfa.add_transition(2, 1, 0);

        let minimized = dfa.minimize();
        assert_eq!(minimized.num_states(), 3);
    }

    #[test]
    fn test_transition_out_of_range() {
        let mut dfa = Dfa::new(ab());
        dfa.add_state();
        dfa.add_final_state(0);
        dfa.add_transition(0, 0, 0);

        let minimized = dfa.minimize();
        let start = minimized.start_state();
        assert_eq!(minimized.transition(start, 0), Some(start));
        assert!(minimized.transition(start, 1).is_some());
        assert_eq!(minimized.transition(start, 7), None);
        assert_eq!(minimized.transition(99, 0), None);
    }

    #[test]
    fn test_minimize_is_idempotent() {
        let mut dfa = Dfa::new(ab());
        for _ in 0..4 {
            dfa.add_state();
        }
        dfa.add_final_state(2);
        dfa.add_final_state(3);
        dfa.add_transition(0, 0, 1);
        dfa.add_transition(1, 1, 2);
        dfa.add_transition(2, 0, 3);
        dfa.add_transition(3, 0, 2);

        let once = dfa.minimize();
        let twice = once.to_dfa().minimize();
        assert_eq!(once.num_states(), twice.num_states());
        assert_eq!(once.trap().is_some(), twice.trap().is_some());
    }
}
