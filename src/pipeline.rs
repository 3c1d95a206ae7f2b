//! Content model compilation entry points
//!
//! tree → ε-NFA → DFA → minimal DFA → canonical record. Every call owns a
//! fresh builder; nothing is shared between compilations.

use tracing::{debug, debug_span};

use crate::automata::{canonicalize, subset_construction, AutomatonRecord, FragmentBuilder};
use crate::error::Result;
use crate::limits::Limits;
use crate::model::ContentNode;

/// State counts of each pipeline stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// States of the ε-NFA
    pub nfa_states: usize,
    /// States found by subset construction
    pub dfa_states: usize,
    /// States of the minimal DFA, trap class included
    pub minimal_states: usize,
    /// Sequence fragments built for xs:all orderings
    pub permutations: usize,
}

/// A compiled content model with its build statistics
#[derive(Debug, Clone)]
pub struct Compilation {
    /// The canonical automaton
    pub record: AutomatonRecord,
    /// Per-stage state counts
    pub stats: BuildStats,
}

/// Compile a content model into its minimal DFA record.
pub fn build_dfa(root: &ContentNode) -> Result<AutomatonRecord> {
    build_dfa_with_limits(root, &Limits::default())
}

/// Compile a content model with explicit limits.
pub fn build_dfa_with_limits(root: &ContentNode, limits: &Limits) -> Result<AutomatonRecord> {
    compile(root, limits).map(|c| c.record)
}

/// Compile a content model, keeping per-stage statistics.
pub fn compile(root: &ContentNode, limits: &Limits) -> Result<Compilation> {
    let span = debug_span!("compile");
    let _enter = span.enter();

    let build = FragmentBuilder::build(root, limits)?;
    debug!(
        states = build.nfa.num_states(),
        symbols = build.nfa.alphabet().len(),
        permutations = build.permutations,
        "built NFA"
    );

    let dfa = subset_construction(&build.nfa);
    debug!(
        states = dfa.num_states(),
        partial = dfa.is_partial(),
        "determinized"
    );

    let minimal = dfa.minimize();
    debug!(
        states = minimal.num_states(),
        trap = minimal.trap().is_some(),
        "minimized"
    );

    let record = canonicalize(&minimal, build.elements);
    debug!(
        states = record.num_states(),
        accepts = record.accepts.len(),
        "canonicalized"
    );

    let stats = BuildStats {
        nfa_states: build.nfa.num_states() as usize,
        dfa_states: dfa.num_states() as usize,
        minimal_states: minimal.num_states() as usize,
        permutations: build.permutations,
    };
    Ok(Compilation { record, stats })
}
