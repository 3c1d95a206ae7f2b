//! Property-based tests over randomly generated content models
//!
//! Every stage of the pipeline must accept exactly the same language, and
//! the canonical record must be stable under re-minimization.

use std::collections::{BTreeSet, VecDeque};

use proptest::prelude::*;
use xsd_automata::automata::{canonicalize, subset_construction, AutomatonRecord, FragmentBuilder};
use xsd_automata::model::OccursShape;
use xsd_automata::{build_dfa, ContentNode, Limits, ModelType, Occurs};

const NAMES: [&str; 3] = ["a", "b", "c"];

fn occurs() -> impl Strategy<Value = Occurs> {
    prop_oneof![
        Just(Occurs::once()),
        Just(Occurs::optional()),
        Just(Occurs::zero_or_more()),
        Just(Occurs::one_or_more()),
    ]
}

fn content_model() -> impl Strategy<Value = ContentNode> {
    let leaf = (prop::sample::select(NAMES.to_vec()), occurs())
        .prop_map(|(name, occurs)| ContentNode::element(name).with_occurs(occurs));

    leaf.prop_recursive(3, 12, 3, |inner| {
        prop_oneof![
            (prop::collection::vec(inner.clone(), 1..=3), occurs())
                .prop_map(|(p, o)| ContentNode::sequence(p).with_occurs(o)),
            (prop::collection::vec(inner.clone(), 0..=3), occurs())
                .prop_map(|(p, o)| ContentNode::choice(p).with_occurs(o)),
            (prop::collection::vec(inner, 1..=3), occurs())
                .prop_map(|(p, o)| ContentNode::all(p).with_occurs(o)),
        ]
    })
}

/// Every word over `NAMES` plus one foreign name, up to `max_len` symbols.
fn all_words(max_len: usize) -> Vec<Vec<&'static str>> {
    let alphabet = ["a", "b", "c", "z"];
    let mut words = vec![Vec::new()];
    let mut frontier = vec![Vec::new()];
    for _ in 0..max_len {
        let mut next = Vec::new();
        for word in &frontier {
            for name in alphabet {
                let mut longer: Vec<&str> = word.clone();
                longer.push(name);
                next.push(longer);
            }
        }
        words.extend(next.iter().cloned());
        frontier = next;
    }
    words
}

/// Positions where a match of `node` starting at `at` can end.
fn match_ends(node: &ContentNode, word: &[&str], at: usize) -> BTreeSet<usize> {
    let once = |from: usize| match_once(node, word, from);
    let shape = node.occurs().shape().expect("generated occurs are supported");
    match shape {
        OccursShape::Once => once(at),
        OccursShape::Optional => {
            let mut ends = once(at);
            ends.insert(at);
            ends
        }
        OccursShape::ZeroOrMore => repeat(BTreeSet::from([at]), once),
        OccursShape::OneOrMore => repeat(once(at), once),
    }
}

/// Close `ends` under further matches of one repetition.
fn repeat(mut ends: BTreeSet<usize>, once: impl Fn(usize) -> BTreeSet<usize>) -> BTreeSet<usize> {
    let mut queue: Vec<usize> = ends.iter().copied().collect();
    while let Some(from) = queue.pop() {
        for end in once(from) {
            if ends.insert(end) {
                queue.push(end);
            }
        }
    }
    ends
}

/// One occurrence of `node`, ignoring its own occurs bounds.
fn match_once(node: &ContentNode, word: &[&str], at: usize) -> BTreeSet<usize> {
    match node {
        ContentNode::Element(e) => {
            if word.get(at) == Some(&e.name()) {
                BTreeSet::from([at + 1])
            } else {
                BTreeSet::new()
            }
        }
        ContentNode::Group(g) => match g.model {
            ModelType::Sequence => g.particles.iter().fold(BTreeSet::from([at]), |ends, p| {
                ends.iter().flat_map(|&from| match_ends(p, word, from)).collect()
            }),
            ModelType::Choice => g
                .particles
                .iter()
                .flat_map(|p| match_ends(p, word, at))
                .collect(),
            ModelType::All => {
                let remaining: Vec<&ContentNode> = g.particles.iter().collect();
                match_any_order(&remaining, word, at)
            }
        },
    }
}

/// Every particle exactly once, in any order.
fn match_any_order(remaining: &[&ContentNode], word: &[&str], at: usize) -> BTreeSet<usize> {
    if remaining.is_empty() {
        return BTreeSet::from([at]);
    }
    let mut ends = BTreeSet::new();
    for i in 0..remaining.len() {
        let mut rest = remaining.to_vec();
        let first = rest.remove(i);
        for from in match_ends(first, word, at) {
            ends.extend(match_any_order(&rest, word, from));
        }
    }
    ends
}

fn model_accepts(model: &ContentNode, word: &[&str]) -> bool {
    match_ends(model, word, 0).contains(&word.len())
}

/// States that can reach an accepting state.
fn live_states(record: &AutomatonRecord) -> BTreeSet<u32> {
    let mut live: BTreeSet<u32> = record.accepts.clone();
    let mut queue: VecDeque<u32> = live.iter().copied().collect();
    while let Some(target) = queue.pop_front() {
        for (&state, row) in &record.transitions {
            if row.values().any(|&next| next == target) && live.insert(state) {
                queue.push_back(state);
            }
        }
    }
    live
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn stages_accept_the_same_language(model in content_model()) {
        let limits = Limits::default();
        let build = FragmentBuilder::build(&model, &limits).unwrap();
        let dfa = subset_construction(&build.nfa);
        let minimal = dfa.minimize();
        let record = canonicalize(&minimal, build.elements.clone());

        for word in all_words(4) {
            let expected = build.nfa.accepts(&word);
            prop_assert_eq!(dfa.accepts(&word), expected, "DFA disagrees on {:?}", word);
            prop_assert_eq!(minimal.accepts(&word), expected, "minimal DFA disagrees on {:?}", word);
            prop_assert_eq!(record.accepts(&word), expected, "record disagrees on {:?}", word);
        }
    }

    #[test]
    fn record_matches_content_model(model in content_model()) {
        let record = build_dfa(&model).unwrap();
        for word in all_words(4) {
            prop_assert_eq!(
                record.accepts(&word),
                model_accepts(&model, &word),
                "record disagrees with the content model on {:?}",
                word
            );
        }
    }

    #[test]
    fn empty_word_iff_model_is_emptiable(model in content_model()) {
        let record = build_dfa(&model).unwrap();
        prop_assert_eq!(record.accepts(Vec::<&str>::new()), model.is_emptiable());
    }

    #[test]
    fn minimization_is_idempotent(model in content_model()) {
        let build = FragmentBuilder::build(&model, &Limits::default()).unwrap();
        let once = subset_construction(&build.nfa).minimize();
        let twice = once.to_dfa().minimize();

        prop_assert_eq!(once.num_states(), twice.num_states());
        prop_assert_eq!(once.trap().is_some(), twice.trap().is_some());
        prop_assert_eq!(
            canonicalize(&once, build.elements.clone()),
            canonicalize(&twice, build.elements)
        );
    }

    #[test]
    fn minimal_dfa_is_no_larger(model in content_model()) {
        let build = FragmentBuilder::build(&model, &Limits::default()).unwrap();
        let dfa = subset_construction(&build.nfa);
        let minimal = dfa.minimize();
        // The minimal DFA may add one explicit trap state.
        prop_assert!(minimal.num_states() <= dfa.num_states() + 1);
    }

    #[test]
    fn record_is_dense_and_trap_free(model in content_model()) {
        let record = build_dfa(&model).unwrap();
        let n = record.num_states() as u32;

        prop_assert_eq!(record.states.iter().copied().collect::<Vec<_>>(), (0..n).collect::<Vec<_>>());
        prop_assert!(record.start < n);
        for (state, row) in &record.transitions {
            prop_assert!(record.states.contains(state));
            for (name, next) in row {
                prop_assert!(record.states.contains(next));
                prop_assert!(record.elements.contains_key(name));
            }
        }

        // No surviving state is dead, unless the whole language is empty.
        if !record.accepts.is_empty() {
            prop_assert_eq!(live_states(&record), record.states.clone());
        } else {
            prop_assert_eq!(n, 1);
            prop_assert!(record.transitions.is_empty());
        }
    }

    #[test]
    fn compilation_is_deterministic(model in content_model()) {
        prop_assert_eq!(build_dfa(&model).unwrap(), build_dfa(&model).unwrap());
    }

    #[test]
    fn json_model_compiles_identically(model in content_model()) {
        let reloaded = ContentNode::from_json_value(model.to_json_value().unwrap()).unwrap();
        prop_assert_eq!(&reloaded, &model);
        prop_assert_eq!(build_dfa(&reloaded).unwrap(), build_dfa(&model).unwrap());
    }
}
