//! Symbol types for automata transitions.

use indexmap::IndexSet;

/// An interned element name.
/// The special value `EPSILON` represents an epsilon (empty) transition.
pub type SymbolId = u32;

/// Special symbol ID representing epsilon (empty) transitions.
pub const EPSILON: SymbolId = u32::MAX;

/// Check if a symbol is an epsilon transition.
#[inline]
pub fn is_epsilon(symbol: SymbolId) -> bool {
    symbol == EPSILON
}

/// Element names interned in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alphabet {
    names: IndexSet<String>,
}

impl Alphabet {
    /// Create an empty alphabet
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a name, returning its id
    pub fn intern(&mut self, name: &str) -> SymbolId {
        if let Some(idx) = self.names.get_index_of(name) {
            return idx as SymbolId;
        }
        let (idx, _) = self.names.insert_full(name.to_string());
        idx as SymbolId
    }

    /// Look up the id of a name
    pub fn id(&self, name: &str) -> Option<SymbolId> {
        self.names.get_index_of(name).map(|idx| idx as SymbolId)
    }

    /// Name of a symbol id
    pub fn name(&self, symbol: SymbolId) -> Option<&str> {
        self.names.get_index(symbol as usize).map(String::as_str)
    }

    /// Number of symbols (epsilon excluded)
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if no symbol has been interned
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All symbol ids in interning order
    pub fn ids(&self) -> impl Iterator<Item = SymbolId> {
        0..self.names.len() as SymbolId
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epsilon() {
        assert!(is_epsilon(EPSILON));
        assert!(!is_epsilon(0));
        assert!(!is_epsilon(100));
    }

    #[test]
    fn test_intern() {
        let mut alphabet = Alphabet::new();
        assert_eq!(alphabet.intern("b"), 0);
        assert_eq!(alphabet.intern("a"), 1);
        assert_eq!(alphabet.intern("b"), 0);
        assert_eq!(alphabet.len(), 2);
        assert_eq!(alphabet.name(1), Some("a"));
        assert_eq!(alphabet.id("c"), None);
        assert_eq!(alphabet.name(0), Some("b"));
    }
}
