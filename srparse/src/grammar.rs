//! Grammar model: an ordered, indexable list of productions.
//!
//! Productions are numbered in declaration order and reduce actions refer to
//! them by that number, so a [`Grammar`] never reorders or deduplicates what it
//! was given.

use crate::{Error, Result, Symbol};
use std::fmt;

/// A single production `lhs -> rhs`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Production {
    lhs: Symbol,
    rhs: Vec<Symbol>,
}

impl Production {
    fn new(lhs: Symbol, rhs: &[Symbol]) -> Self {
        Self {
            lhs,
            rhs: rhs.to_vec(),
        }
    }

    /// The left-hand non-terminal.
    pub fn lhs(&self) -> Symbol {
        self.lhs
    }

    /// The right-hand symbols, in order.
    pub fn rhs(&self) -> &[Symbol] {
        &self.rhs
    }

    /// Number of right-hand symbols, i.e. how many states a reduce pops.
    pub fn len(&self) -> usize {
        self.rhs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rhs.is_empty()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.lhs)?;
        for sym in &self.rhs {
            write!(f, " {}", sym)?;
        }
        Ok(())
    }
}

/// A validated grammar: a start symbol plus productions `0..len()`.
///
/// # Invariants
/// - at least one production exists, and one of them derives the start symbol;
/// - every left-hand side is a non-terminal;
/// - every right-hand side has one or more symbols and never contains `$`;
/// - every non-terminal used on a right-hand side has a production.
///
/// A `Grammar` is immutable; it is `Send + Sync` and may back any number of
/// concurrent parses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grammar {
    start: Symbol,
    prods: Vec<Production>,
}

impl Grammar {
    /// Builds a grammar from `(lhs, rhs)` pairs in declaration order.
    ///
    /// # Errors
    /// [`Error::MalformedGrammar`] if any invariant listed on [`Grammar`] is
    /// violated. Nothing is returned on failure.
    ///
    /// # Example
    /// ```rust
    /// # use srparse::{Grammar, Symbol::*};
    /// let g = Grammar::new(E, [(E, vec![E, Plus, Id]), (E, vec![Id])]).unwrap();
    /// assert_eq!(g.len(), 2);
    /// assert_eq!(g.production_at(0).unwrap().to_string(), "E -> E + id");
    /// ```
    pub fn new<I, R>(start: Symbol, prods: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Symbol, R)>,
        R: IntoIterator<Item = Symbol>,
    {
        let prods: Vec<Production> = prods
            .into_iter()
            .map(|(lhs, rhs)| Production {
                lhs,
                rhs: rhs.into_iter().collect(),
            })
            .collect();
        let grammar = Self { start, prods };
        grammar.validate()?;
        Ok(grammar)
    }

    /// Builds a grammar from raw textual tokens, classifying each one with
    /// [`Symbol::classify`].
    ///
    /// # Errors
    /// [`Error::MalformedGrammar`] when a token names no symbol, or when the
    /// resulting grammar fails validation.
    pub fn from_raw<'s, I, R>(start: &str, prods: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'s str, R)>,
        R: IntoIterator<Item = &'s str>,
    {
        let start = Symbol::classify(start)
            .map_err(|_| Error::grammar(format!("unknown start symbol {:?}", start)))?;
        let mut pairs = Vec::new();
        for (i, (lhs, rhs)) in prods.into_iter().enumerate() {
            let classify = |raw: &str| {
                Symbol::classify(raw).map_err(|_| {
                    Error::grammar(format!("production {}: unknown symbol {:?}", i, raw))
                })
            };
            let lhs = classify(lhs)?;
            let rhs = rhs.into_iter().map(classify).collect::<Result<Vec<_>>>()?;
            pairs.push((lhs, rhs));
        }
        Self::new(start, pairs)
    }

    /// The classic expression grammar with start symbol `E`:
    ///
    /// ```text
    /// 0: E -> E + T
    /// 1: E -> T
    /// 2: T -> T * F
    /// 3: T -> F
    /// 4: F -> ( E )
    /// 5: F -> id
    /// ```
    pub fn expression() -> Self {
        use Symbol::*;
        Self {
            start: E,
            prods: vec![
                Production::new(E, &[E, Plus, T]),
                Production::new(E, &[T]),
                Production::new(T, &[T, Star, F]),
                Production::new(T, &[F]),
                Production::new(F, &[LParen, E, RParen]),
                Production::new(F, &[Id]),
            ],
        }
    }

    fn validate(&self) -> Result<()> {
        if self.prods.is_empty() {
            return Err(Error::grammar("grammar has no productions"));
        }
        if !self.start.is_non_terminal() {
            return Err(Error::grammar(format!(
                "start symbol `{}` is not a non-terminal",
                self.start
            )));
        }
        for (i, prod) in self.prods.iter().enumerate() {
            if !prod.lhs.is_non_terminal() {
                return Err(Error::grammar(format!(
                    "production {}: left-hand side `{}` is not a non-terminal",
                    i, prod.lhs
                )));
            }
            if prod.rhs.is_empty() {
                return Err(Error::grammar(format!(
                    "production {}: empty right-hand side",
                    i
                )));
            }
            for &sym in &prod.rhs {
                if sym == Symbol::End {
                    return Err(Error::grammar(format!(
                        "production {}: end marker `$` on right-hand side",
                        i
                    )));
                }
                if sym.is_non_terminal() && !self.prods.iter().any(|p| p.lhs == sym) {
                    return Err(Error::grammar(format!(
                        "production {}: no productions found for non-terminal `{}`",
                        i, sym
                    )));
                }
            }
        }
        if !self.prods.iter().any(|p| p.lhs == self.start) {
            return Err(Error::grammar(format!(
                "no production for start symbol `{}`",
                self.start
            )));
        }
        Ok(())
    }

    pub fn start(&self) -> Symbol {
        self.start
    }

    /// Number of productions.
    pub fn len(&self) -> usize {
        self.prods.len()
    }

    /// Always `false` for a validated grammar.
    pub fn is_empty(&self) -> bool {
        self.prods.is_empty()
    }

    pub fn productions(&self) -> &[Production] {
        &self.prods
    }

    /// Returns production `index`.
    ///
    /// # Errors
    /// [`Error::IndexOutOfRange`] if `index >= len()`.
    pub fn production_at(&self, index: usize) -> Result<&Production> {
        self.prods.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.prods.len(),
        })
    }

    /// Productions whose left-hand side is `lhs`, with their indices.
    pub fn productions_for(&self, lhs: Symbol) -> impl Iterator<Item = (usize, &Production)> {
        self.prods
            .iter()
            .enumerate()
            .filter(move |(_, p)| p.lhs == lhs)
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, prod) in self.prods.iter().enumerate() {
            writeln!(f, "{}: {}", i, prod)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Symbol::*;

    fn assert_malformed(result: Result<Grammar>, want: &str) {
        match result {
            Err(Error::MalformedGrammar(msg)) => assert_eq!(msg.as_str(), want),
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("no error"),
        }
    }

    #[test]
    fn expression_grammar_is_valid() {
        let g = Grammar::expression();
        assert!(g.validate().is_ok());
        assert_eq!(g.start(), E);
        assert_eq!(g.len(), 6);
        assert_eq!(
            g.to_string(),
            concat!(
                "0: E -> E + T\n",
                "1: E -> T\n",
                "2: T -> T * F\n",
                "3: T -> F\n",
                "4: F -> ( E )\n",
                "5: F -> id\n",
            )
        );
    }

    #[test]
    fn production_at_is_bounds_checked() {
        let g = Grammar::expression();
        assert_eq!(g.production_at(5).unwrap().rhs(), &[Id]);
        assert_eq!(g.production_at(2).unwrap().len(), 3);
        assert_eq!(
            g.production_at(6),
            Err(Error::IndexOutOfRange { index: 6, len: 6 })
        );
        assert_eq!(
            g.production_at(usize::MAX),
            Err(Error::IndexOutOfRange {
                index: usize::MAX,
                len: 6
            })
        );
    }

    #[test]
    fn productions_for_keeps_declaration_order() {
        let g = Grammar::expression();
        let idx: Vec<usize> = g.productions_for(T).map(|(i, _)| i).collect();
        assert_eq!(idx, vec![2, 3]);
        let idx: Vec<usize> = g.productions_for(F).map(|(i, _)| i).collect();
        assert_eq!(idx, vec![4, 5]);
        assert_eq!(g.productions_for(Id).count(), 0);
    }

    #[test]
    fn from_raw_matches_typed_construction() {
        let raw = [
            ("E", vec!["E", "+", "T"]),
            ("E", vec!["T"]),
            ("T", vec!["T", "*", "F"]),
            ("T", vec!["F"]),
            ("F", vec!["(", "E", ")"]),
            ("F", vec!["id"]),
        ];
        let a = Grammar::from_raw("E", raw.iter().map(|(l, r)| (*l, r.iter().copied()))).unwrap();
        let b = Grammar::from_raw("E", raw.iter().map(|(l, r)| (*l, r.iter().copied()))).unwrap();
        assert_eq!(a, Grammar::expression());
        assert_eq!(a, b);
    }

    #[test]
    fn from_raw_reports_unknown_symbols() {
        assert_malformed(
            Grammar::from_raw("E", [("E", vec!["E", "-", "T"])]),
            "production 0: unknown symbol \"-\"",
        );
        assert_malformed(
            Grammar::from_raw("S", [("E", vec!["id"])]),
            "unknown start symbol \"S\"",
        );
    }

    #[test]
    fn validation_failures() {
        assert_malformed(
            Grammar::new(E, Vec::<(Symbol, Vec<Symbol>)>::new()),
            "grammar has no productions",
        );
        assert_malformed(
            Grammar::new(Id, [(E, vec![Id])]),
            "start symbol `id` is not a non-terminal",
        );
        assert_malformed(
            Grammar::new(E, [(E, vec![Id]), (Plus, vec![Id])]),
            "production 1: left-hand side `+` is not a non-terminal",
        );
        assert_malformed(
            Grammar::new(E, [(E, vec![])]),
            "production 0: empty right-hand side",
        );
        assert_malformed(
            Grammar::new(E, [(E, vec![Id, End])]),
            "production 0: end marker `$` on right-hand side",
        );
        assert_malformed(
            Grammar::new(E, [(E, vec![T])]),
            "production 0: no productions found for non-terminal `T`",
        );
        assert_malformed(
            Grammar::new(E, [(T, vec![Id])]),
            "no production for start symbol `E`",
        );
    }

    #[test]
    fn start_symbol_need_not_be_first() {
        let g = Grammar::new(T, [(F, vec![Id]), (T, vec![F, Star, F])]).unwrap();
        assert_eq!(g.start(), T);
        assert_eq!(g.productions_for(T).next().map(|(i, _)| i), Some(1));
    }
}
