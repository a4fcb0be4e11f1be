// LR(0) item machinery and SLR(1) table construction.

use super::sets::Encoded;
use super::{Entry, Tab};
use srparse::{Action, StateId};
use std::collections::{BTreeMap, BTreeSet};

/// An LR(0) item: a production index and a dot position.
///
/// Positions index the encoded production, whose element 0 is the left-hand
/// side, so the dot of a fresh item is 1 and `dot == prod.len()` means
/// complete.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Item {
    pub prod: usize,
    pub dot: usize,
}

pub type ItemSet = BTreeSet<Item>;

/// The canonical collection of item sets.
pub type ItemSetSet = BTreeSet<ItemSet>;

/// Adds an item `B -> . gamma` for every item with the dot before `B`.
pub fn closure(items: &ItemSet, enc: &Encoded) -> ItemSet {
    let mut c = items.clone();
    let mut work: Vec<Item> = c.iter().copied().collect();
    while let Some(item) = work.pop() {
        let p = &enc.prods[item.prod];
        if item.dot < p.len() && enc.is_nonterm(p[item.dot]) {
            let t = p[item.dot];
            for (j, q) in enc.prods.iter().enumerate() {
                let new_item = Item { prod: j, dot: 1 };
                if q[0] == t && c.insert(new_item) {
                    work.push(new_item);
                }
            }
        }
    }
    c
}

/// Items of `items` advanced past `sym`, closed.
pub fn goto(items: &ItemSet, sym: usize, enc: &Encoded) -> ItemSet {
    let moved: ItemSet = items
        .iter()
        .filter(|item| {
            let p = &enc.prods[item.prod];
            item.dot < p.len() && p[item.dot] == sym
        })
        .map(|item| Item {
            prod: item.prod,
            dot: item.dot + 1,
        })
        .collect();
    closure(&moved, enc)
}

/// Builds the canonical LR(0) collection.
///
/// States are numbered in set order. The start set is the only one holding
/// `S' -> . start`, the smallest item there is, so it is always state 0.
pub fn construct_set(enc: &Encoded) -> ItemSetSet {
    let mut c = ItemSetSet::new();
    let start0 = ItemSet::from([Item { prod: 0, dot: 1 }]);
    c.insert(closure(&start0, enc));
    let mut changed = true;
    while changed {
        changed = false;
        for state in c.clone() {
            for sym in 0..enc.n_sym() {
                let nxt = goto(&state, sym, enc);
                if !nxt.is_empty() && c.insert(nxt) {
                    changed = true;
                }
            }
        }
    }
    log::debug!("LR(0) collection has {} states", c.len());
    c
}

/// Fills shift, goto, reduce (on FOLLOW of the left-hand side) and accept
/// entries for the collection `c`.
pub fn construct_slr(c: &[ItemSet], flw: &[BTreeSet<usize>], enc: &Encoded) -> Tab {
    let index: BTreeMap<&ItemSet, usize> = c.iter().enumerate().map(|(i, s)| (s, i)).collect();
    let mut tab: Tab = vec![vec![BTreeSet::new(); enc.n_sym()]; c.len()];

    for (state, items) in c.iter().enumerate() {
        for sym in 1..enc.n_sym() {
            let nxt = goto(items, sym, enc);
            if let Some(&ns) = index.get(&nxt) {
                let entry = if enc.is_nonterm(sym) {
                    Entry::Goto(StateId(ns))
                } else {
                    Entry::Action(Action::Shift(StateId(ns)))
                };
                tab[state][sym].insert(entry);
            }
        }
        for item in items {
            let p = &enc.prods[item.prod];
            if item.dot != p.len() {
                continue;
            }
            match enc.grammar_prod(item.prod) {
                None => {
                    tab[state][enc.eos()].insert(Entry::Action(Action::Accept));
                }
                Some(prod) => {
                    for &t in &flw[p[0]] {
                        tab[state][t].insert(Entry::Action(Action::Reduce(prod)));
                    }
                }
            }
        }
    }
    tab
}

#[cfg(test)]
mod tests {
    use super::*;
    use srparse::Grammar;

    #[test]
    fn expression_collection_has_twelve_states() {
        let enc = Encoded::new(&Grammar::expression());
        let c = construct_set(&enc);
        assert_eq!(c.len(), 12);
        let first = c.iter().next().unwrap();
        assert!(first.contains(&Item { prod: 0, dot: 1 }));
        // S' -> . E plus the six grammar productions with the dot at 1
        assert_eq!(first.len(), 7);
    }

    #[test]
    fn closure_follows_leading_nonterminals() {
        let enc = Encoded::new(&Grammar::expression());
        // F -> ( . E )
        let items = closure(&ItemSet::from([Item { prod: 5, dot: 2 }]), &enc);
        assert_eq!(items.len(), 7);
        // goto on E keeps only the kernel items that expect E
        let after = goto(&items, 1, &enc);
        assert_eq!(
            after,
            ItemSet::from([Item { prod: 1, dot: 2 }, Item { prod: 5, dot: 3 }])
        );
    }
}
