// Integer encoding of a grammar plus FIRST / FOLLOW / nullable computation.

use srparse::{Grammar, Symbol};
use std::collections::BTreeSet;

/// A grammar encoded as symbol index vectors, the left-hand side at index 0.
///
/// Symbol 0 is the augmented start `S'`, symbols `1..n_nonterm` are the
/// non-terminals of [`Symbol::NON_TERMINALS`], and the terminals follow with
/// `$` last. Encoded production 0 is `S' -> start`; grammar production `p` is
/// encoded production `p + 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Encoded {
    pub prods: Vec<Vec<usize>>,
    pub n_nonterm: usize,
    pub n_term: usize,
}

impl Encoded {
    pub fn new(grammar: &Grammar) -> Self {
        let n_nonterm = Symbol::COUNT_NONTERMINALS + 1;
        let encode = |sym: Symbol| {
            if sym.is_non_terminal() {
                1 + sym.column()
            } else {
                n_nonterm + sym.column()
            }
        };
        let prods = std::iter::once(vec![0, encode(grammar.start())])
            .chain(grammar.productions().iter().map(|prod| {
                std::iter::once(encode(prod.lhs()))
                    .chain(prod.rhs().iter().map(|&sym| encode(sym)))
                    .collect()
            }))
            .collect();
        Self {
            prods,
            n_nonterm,
            n_term: Symbol::COUNT_TERMINALS,
        }
    }

    pub fn n_sym(&self) -> usize {
        self.n_nonterm + self.n_term
    }

    /// Index of the end-of-input marker.
    pub fn eos(&self) -> usize {
        self.n_sym() - 1
    }

    pub fn is_nonterm(&self, sym: usize) -> bool {
        sym < self.n_nonterm
    }

    /// The grammar symbol behind `sym`; `None` for `S'`.
    pub fn decode(&self, sym: usize) -> Option<Symbol> {
        match sym {
            0 => None,
            s if s < self.n_nonterm => Some(Symbol::NON_TERMINALS[s - 1]),
            s => Symbol::TERMINALS.get(s - self.n_nonterm).copied(),
        }
    }

    pub fn name(&self, sym: usize) -> &'static str {
        self.decode(sym).map_or("S'", Symbol::label)
    }

    /// Transition symbols in exploration order: terminals, then non-terminals.
    pub fn transition_order(&self) -> impl Iterator<Item = usize> {
        (self.n_nonterm..self.n_sym()).chain(1..self.n_nonterm)
    }

    /// Index of the grammar production behind encoded production `prod`.
    pub fn grammar_prod(&self, prod: usize) -> Option<usize> {
        prod.checked_sub(1)
    }
}

/// FIRST sets and nullability for every encoded symbol.
pub fn first_sets(enc: &Encoded) -> (Vec<BTreeSet<usize>>, Vec<bool>) {
    let n_sym = enc.n_sym();
    let mut first: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); n_sym];
    let mut nullable = vec![false; n_sym];
    for t in enc.n_nonterm..n_sym {
        first[t].insert(t);
    }
    let mut changed = true;
    while changed {
        changed = false;
        for prod in &enc.prods {
            let lhs = prod[0];
            let mut all_nullable = true;
            for &sym in &prod[1..] {
                let first_sym = first[sym].clone();
                for f in first_sym {
                    changed |= first[lhs].insert(f);
                }
                if !nullable[sym] {
                    all_nullable = false;
                    break;
                }
            }
            if all_nullable && !nullable[lhs] {
                nullable[lhs] = true;
                changed = true;
            }
        }
    }
    (first, nullable)
}

/// FIRST of the sequence `seq` followed by `lookahead`.
pub fn first_of_seq(
    seq: &[usize],
    lookahead: usize,
    first: &[BTreeSet<usize>],
    nullable: &[bool],
) -> BTreeSet<usize> {
    let mut out = BTreeSet::new();
    for &sym in seq {
        out.extend(first[sym].iter().copied());
        if !nullable[sym] {
            return out;
        }
    }
    out.insert(lookahead);
    out
}

/// FOLLOW sets for every non-terminal; `$` follows `S'`.
pub fn follow_sets(
    enc: &Encoded,
    first: &[BTreeSet<usize>],
    nullable: &[bool],
) -> Vec<BTreeSet<usize>> {
    let mut follow: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); enc.n_nonterm];
    follow[0].insert(enc.eos());
    let mut changed = true;
    while changed {
        changed = false;
        for prod in &enc.prods {
            let lhs = prod[0];
            let rhs = &prod[1..];
            for (i, &b) in rhs.iter().enumerate() {
                if !enc.is_nonterm(b) {
                    continue;
                }
                let mut beta_nullable = true;
                let mut first_beta = BTreeSet::new();
                for &sym in &rhs[i + 1..] {
                    first_beta.extend(first[sym].iter().copied());
                    if !nullable[sym] {
                        beta_nullable = false;
                        break;
                    }
                }
                if beta_nullable {
                    first_beta.extend(follow[lhs].iter().copied());
                }
                for f in first_beta {
                    changed |= follow[b].insert(f);
                }
            }
        }
    }
    follow
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(enc: &Encoded, set: &BTreeSet<usize>) -> Vec<&'static str> {
        set.iter().map(|&s| enc.name(s)).collect()
    }

    #[test]
    fn encoding_layout() {
        let enc = Encoded::new(&Grammar::expression());
        assert_eq!(enc.n_sym(), 10);
        assert_eq!(enc.prods.len(), 7);
        // S' -> E, E -> E + T
        assert_eq!(enc.prods[0], vec![0, 1]);
        assert_eq!(enc.prods[1], vec![1, 1, 5, 2]);
        assert_eq!(enc.name(enc.eos()), "$");
        assert_eq!(enc.decode(3), Some(Symbol::F));
        assert_eq!(enc.decode(4), Some(Symbol::Id));
        assert_eq!(enc.grammar_prod(1), Some(0));
        assert_eq!(enc.grammar_prod(0), None);
        assert_eq!(
            enc.transition_order().collect::<Vec<_>>(),
            vec![4, 5, 6, 7, 8, 9, 1, 2, 3]
        );
    }

    #[test]
    fn expression_first_and_follow() {
        let enc = Encoded::new(&Grammar::expression());
        let (first, nullable) = first_sets(&enc);
        assert!(nullable.iter().all(|n| !n));
        for nt in 0..4 {
            assert_eq!(names(&enc, &first[nt]), vec!["id", "("]);
        }
        let follow = follow_sets(&enc, &first, &nullable);
        assert_eq!(names(&enc, &follow[1]), vec!["+", ")", "$"]);
        assert_eq!(names(&enc, &follow[2]), vec!["+", "*", ")", "$"]);
        assert_eq!(names(&enc, &follow[3]), vec!["+", "*", ")", "$"]);
    }

    #[test]
    fn first_of_sequences() {
        let enc = Encoded::new(&Grammar::expression());
        let (first, nullable) = first_sets(&enc);
        let eos = enc.eos();
        assert_eq!(
            names(&enc, &first_of_seq(&[5, 2], eos, &first, &nullable)),
            vec!["+"]
        );
        assert_eq!(
            names(&enc, &first_of_seq(&[], eos, &first, &nullable)),
            vec!["$"]
        );
    }
}
