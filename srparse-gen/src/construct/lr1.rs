// Canonical LR(1) collection and table construction.

use super::sets::{first_of_seq, Encoded};
use super::{Entry, Tab};
use srparse::{Action, StateId};
use std::collections::{BTreeMap, BTreeSet};

/// An LR(1) item: an LR(0) core plus one lookahead terminal.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Item {
    pub prod: usize,
    pub dot: usize,
    pub lookahead: usize,
}

pub type ItemSet = BTreeSet<Item>;

/// The canonical collection: item sets in discovery order, and for each state
/// its transitions by symbol.
#[derive(Clone, Debug, Default)]
pub struct Collection {
    pub states: Vec<ItemSet>,
    pub edges: Vec<BTreeMap<usize, usize>>,
}

/// Helper holding what closure needs beyond the items themselves.
pub struct Closer<'a> {
    enc: &'a Encoded,
    first: &'a [BTreeSet<usize>],
    nullable: &'a [bool],
}

impl<'a> Closer<'a> {
    pub fn new(enc: &'a Encoded, first: &'a [BTreeSet<usize>], nullable: &'a [bool]) -> Self {
        Self {
            enc,
            first,
            nullable,
        }
    }

    /// For `[A -> alpha . B beta, a]` adds `[B -> . gamma, b]` for every `b` in
    /// FIRST(beta a).
    pub fn closure(&self, items: &ItemSet) -> ItemSet {
        let enc = self.enc;
        let mut c = items.clone();
        let mut work: Vec<Item> = c.iter().copied().collect();
        while let Some(item) = work.pop() {
            let p = &enc.prods[item.prod];
            if item.dot >= p.len() || !enc.is_nonterm(p[item.dot]) {
                continue;
            }
            let next = p[item.dot];
            let lookaheads = first_of_seq(&p[item.dot + 1..], item.lookahead, self.first, self.nullable);
            for (j, q) in enc.prods.iter().enumerate() {
                if q[0] != next {
                    continue;
                }
                for &la in &lookaheads {
                    let new_item = Item {
                        prod: j,
                        dot: 1,
                        lookahead: la,
                    };
                    if c.insert(new_item) {
                        work.push(new_item);
                    }
                }
            }
        }
        c
    }

    pub fn goto(&self, items: &ItemSet, sym: usize) -> ItemSet {
        let moved: ItemSet = items
            .iter()
            .filter(|item| {
                let p = &self.enc.prods[item.prod];
                item.dot < p.len() && p[item.dot] == sym
            })
            .map(|item| Item {
                dot: item.dot + 1,
                ..*item
            })
            .collect();
        if moved.is_empty() {
            return moved;
        }
        self.closure(&moved)
    }

    /// Explores states breadth first from `[S' -> . start, $]`, trying
    /// terminals before non-terminals, so numbering is deterministic and state
    /// 0 is the start state.
    pub fn collection(&self) -> Collection {
        let enc = self.enc;
        let start = self.closure(&ItemSet::from([Item {
            prod: 0,
            dot: 1,
            lookahead: enc.eos(),
        }]));
        let mut coll = Collection::default();
        let mut index: BTreeMap<ItemSet, usize> = BTreeMap::new();
        index.insert(start.clone(), 0);
        coll.states.push(start);
        let mut current = 0;
        while current < coll.states.len() {
            let mut edges = BTreeMap::new();
            for sym in enc.transition_order() {
                let nxt = self.goto(&coll.states[current], sym);
                if nxt.is_empty() {
                    continue;
                }
                let target = match index.get(&nxt) {
                    Some(&i) => i,
                    None => {
                        let i = coll.states.len();
                        index.insert(nxt.clone(), i);
                        coll.states.push(nxt);
                        i
                    }
                };
                edges.insert(sym, target);
            }
            coll.edges.push(edges);
            current += 1;
        }
        log::debug!("LR(1) collection has {} states", coll.states.len());
        coll
    }
}

/// Fills shift and goto entries from the edges, reduce entries on each
/// complete item's own lookahead, and accept for `[S' -> start ., $]`.
pub fn construct_lr1(coll: &Collection, enc: &Encoded) -> Tab {
    let mut tab: Tab = vec![vec![BTreeSet::new(); enc.n_sym()]; coll.states.len()];
    for (state, items) in coll.states.iter().enumerate() {
        for (&sym, &target) in &coll.edges[state] {
            let entry = if enc.is_nonterm(sym) {
                Entry::Goto(StateId(target))
            } else {
                Entry::Action(Action::Shift(StateId(target)))
            };
            tab[state][sym].insert(entry);
        }
        for item in items {
            if item.dot != enc.prods[item.prod].len() {
                continue;
            }
            let action = match enc.grammar_prod(item.prod) {
                None if item.lookahead == enc.eos() => Action::Accept,
                None => continue,
                Some(prod) => Action::Reduce(prod),
            };
            tab[state][item.lookahead].insert(Entry::Action(action));
        }
    }
    tab
}

#[cfg(test)]
mod tests {
    use super::super::sets::first_sets;
    use super::*;
    use srparse::Grammar;

    fn collection(grammar: &Grammar) -> (Encoded, Collection) {
        let enc = Encoded::new(grammar);
        let (first, nullable) = first_sets(&enc);
        let coll = Closer::new(&enc, &first, &nullable).collection();
        (enc, coll)
    }

    #[test]
    fn expression_collection_has_twenty_two_states() {
        let (_, coll) = collection(&Grammar::expression());
        assert_eq!(coll.states.len(), 22);
        assert_eq!(coll.edges.len(), 22);
    }

    #[test]
    fn start_state_items() {
        let (enc, coll) = collection(&Grammar::expression());
        let start = &coll.states[0];
        assert!(start.contains(&Item {
            prod: 0,
            dot: 1,
            lookahead: enc.eos()
        }));
        // BFS tries `id` first, then `(`
        assert_eq!(coll.edges[0].get(&4), Some(&1));
        assert_eq!(coll.edges[0].get(&7), Some(&2));
        // then the non-terminals E, T, F
        assert_eq!(coll.edges[0].get(&1), Some(&3));
        assert_eq!(coll.edges[0].get(&2), Some(&4));
        assert_eq!(coll.edges[0].get(&3), Some(&5));
    }

    #[test]
    fn reduce_entries_use_item_lookaheads() {
        let (enc, coll) = collection(&Grammar::expression());
        let tab = construct_lr1(&coll, &enc);
        // state 1 holds [F -> id ., $/+/*]: no reduce on `)`
        assert!(tab[1][8].is_empty());
        assert_eq!(
            tab[1][enc.eos()],
            BTreeSet::from([Entry::Action(Action::Reduce(5))])
        );
        assert_eq!(
            tab[3][enc.eos()],
            BTreeSet::from([Entry::Action(Action::Accept)])
        );
    }
}
