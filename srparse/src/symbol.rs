//! The closed symbol alphabet of the expression grammar.
//!
//! Terminals come first and the end-of-input marker `$` is always the last
//! terminal, so table rows can be stored densely by [`Symbol::column`].

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A grammar symbol: one of the six terminals or three non-terminals.
///
/// Symbols are plain values: `Copy`, totally ordered and hashable, so they can
/// key any map. The discriminant order is part of the contract; table
/// construction in `srparse-gen` relies on `End` being the last terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Symbol {
    // Terminals:
    /// Identifier, `id`.
    Id = 0,
    /// `+`
    Plus = 1,
    /// `*`
    Star = 2,
    /// `(`
    LParen = 3,
    /// `)`
    RParen = 4,
    /// End-of-input marker, `$`.
    End = 5,

    // Non-terminals:
    /// Expression.
    E = 6,
    /// Term.
    T = 7,
    /// Factor.
    F = 8,
}

impl Symbol {
    pub const COUNT: usize = 9;
    pub const COUNT_TERMINALS: usize = 6;
    pub const COUNT_NONTERMINALS: usize = 3;

    pub const ALL: [Symbol; Self::COUNT] = [
        Symbol::Id,
        Symbol::Plus,
        Symbol::Star,
        Symbol::LParen,
        Symbol::RParen,
        Symbol::End,
        Symbol::E,
        Symbol::T,
        Symbol::F,
    ];

    pub const TERMINALS: [Symbol; Self::COUNT_TERMINALS] = [
        Symbol::Id,
        Symbol::Plus,
        Symbol::Star,
        Symbol::LParen,
        Symbol::RParen,
        Symbol::End,
    ];

    pub const NON_TERMINALS: [Symbol; Self::COUNT_NONTERMINALS] =
        [Symbol::E, Symbol::T, Symbol::F];

    /// Position of the symbol in [`Symbol::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Position of the symbol within its own category: an index into
    /// [`Symbol::TERMINALS`] or [`Symbol::NON_TERMINALS`].
    #[inline]
    pub fn column(self) -> usize {
        if self.is_terminal() {
            self.index()
        } else {
            self.index() - Self::COUNT_TERMINALS
        }
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        self.index() < Self::COUNT_TERMINALS
    }

    #[inline]
    pub fn is_non_terminal(self) -> bool {
        !self.is_terminal()
    }

    /// The textual spelling used in grammars, tables and inputs.
    pub fn label(self) -> &'static str {
        match self {
            Symbol::Id => "id",
            Symbol::Plus => "+",
            Symbol::Star => "*",
            Symbol::LParen => "(",
            Symbol::RParen => ")",
            Symbol::End => "$",
            Symbol::E => "E",
            Symbol::T => "T",
            Symbol::F => "F",
        }
    }

    /// Classifies a raw textual token.
    ///
    /// # Errors
    /// [`Error::UnknownSymbol`] when `text` is not the label of any symbol.
    ///
    /// # Example
    /// ```rust
    /// # use srparse::Symbol;
    /// assert_eq!(Symbol::classify("id").unwrap(), Symbol::Id);
    /// assert!(Symbol::classify("E").unwrap().is_non_terminal());
    /// assert!(Symbol::classify("-").is_err());
    /// ```
    pub fn classify(text: &str) -> Result<Symbol> {
        Symbol::ALL
            .iter()
            .copied()
            .find(|sym| sym.label() == text)
            .ok_or_else(|| Error::UnknownSymbol(text.into()))
    }

    /// Classifies every whitespace-separated token of `text`.
    ///
    /// This is the simplest input reader; `srparse-gen` provides one that does
    /// not need separating whitespace.
    pub fn tokenize(text: &str) -> Result<Vec<Symbol>> {
        text.split_whitespace().map(Symbol::classify).collect()
    }
}

impl FromStr for Symbol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Symbol::classify(s)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn categories_are_disjoint_and_complete() {
        for sym in Symbol::ALL {
            assert_ne!(sym.is_terminal(), sym.is_non_terminal());
        }
        assert!(Symbol::TERMINALS.iter().all(|s| s.is_terminal()));
        assert!(Symbol::NON_TERMINALS.iter().all(|s| s.is_non_terminal()));
        assert_eq!(
            Symbol::TERMINALS.len() + Symbol::NON_TERMINALS.len(),
            Symbol::ALL.len()
        );
    }

    #[test]
    fn end_marker_is_last_terminal() {
        assert_eq!(Symbol::End.column(), Symbol::COUNT_TERMINALS - 1);
        assert_eq!(Symbol::TERMINALS[Symbol::COUNT_TERMINALS - 1], Symbol::End);
    }

    #[test]
    fn columns_index_their_category() {
        for (i, sym) in Symbol::TERMINALS.iter().enumerate() {
            assert_eq!(sym.column(), i);
        }
        for (i, sym) in Symbol::NON_TERMINALS.iter().enumerate() {
            assert_eq!(sym.column(), i);
        }
        for (i, sym) in Symbol::ALL.iter().enumerate() {
            assert_eq!(sym.index(), i);
        }
    }

    #[test]
    fn classify_round_trips_labels() {
        for sym in Symbol::ALL {
            assert_eq!(Symbol::classify(sym.label()), Ok(sym));
            assert_eq!(sym.label().parse::<Symbol>(), Ok(sym));
            assert_eq!(sym.to_string(), sym.label());
        }
    }

    #[test]
    fn classify_rejects_unknown_tokens() {
        for raw in ["", "ID", "e", "-", "$$", "id "] {
            assert_eq!(
                Symbol::classify(raw),
                Err(Error::UnknownSymbol(raw.into()))
            );
        }
    }

    #[test]
    fn symbols_key_hash_sets() {
        let set: HashSet<Symbol> = Symbol::ALL.iter().chain(Symbol::ALL.iter()).copied().collect();
        assert_eq!(set.len(), Symbol::COUNT);
    }

    #[test]
    fn tokenize_splits_on_whitespace() {
        assert_eq!(
            Symbol::tokenize(" id +\tid\n* id $ ").unwrap(),
            vec![
                Symbol::Id,
                Symbol::Plus,
                Symbol::Id,
                Symbol::Star,
                Symbol::Id,
                Symbol::End
            ]
        );
        assert!(matches!(
            Symbol::tokenize("id - id"),
            Err(Error::UnknownSymbol(s)) if s.as_str() == "-"
        ));
    }
}
