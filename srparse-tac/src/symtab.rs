//! # symtab
//!
//! Interned identifier names, built on [`indexmap::IndexSet`]. Each distinct
//! name gets a stable index in order of first appearance.
//!
//! ```rust
//! # use srparse_tac::SymTab;
//! let mut st = SymTab::new();
//! let a = st.intern("a");
//! assert_eq!(st.intern("b"), a + 1);
//! assert_eq!(st.intern("a"), a);
//! assert_eq!(st.name(a).unwrap(), "a");
//! ```

use crate::TacError;
use indexmap::IndexSet;
use smartstring::alias::String;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymTab {
    names: IndexSet<String>,
}

impl SymTab {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Inserts `name` if missing and returns its index.
    pub fn intern(&mut self, name: impl AsRef<str>) -> usize {
        self.names.insert_full(String::from(name.as_ref())).0
    }

    /// Returns the name at `index`.
    pub fn name(&self, index: usize) -> Result<&str, TacError> {
        self.names
            .get_index(index)
            .map(|s| s.as_str())
            .ok_or(TacError::InvalidName {
                index,
                len: self.names.len(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_assigns_sequential_indices() {
        let mut st = SymTab::new();
        assert!(st.is_empty());
        let idx: Vec<usize> = ["x", "y", "x", "z"].iter().map(|n| st.intern(n)).collect();
        assert_eq!(idx, vec![0, 1, 0, 2]);
        assert_eq!(st.iter().collect::<Vec<_>>(), vec!["x", "y", "z"]);
    }

    #[test]
    fn invalid_index_errors() {
        let mut st = SymTab::new();
        st.intern("only_one");
        assert_eq!(st.name(5), Err(TacError::InvalidName { index: 5, len: 1 }));
    }
}
