//! Parsing table construction.
//!
//! Two methods are available: canonical LR(1), which numbers its states in
//! breadth-first discovery order, and SLR(1), which builds the LR(0)
//! collection and places reduces on FOLLOW sets. Both work on the grammar
//! augmented with `S' -> start` and report every conflicting cell instead of
//! resolving it.
//!
//! ```rust
//! use srparse::{Driver, Grammar, Symbol};
//! use srparse_gen::construct::{build_table, Method};
//!
//! let grammar = Grammar::expression();
//! let table = build_table(&grammar, Method::Lr1)?;
//! assert_eq!(table.state_count(), 22);
//!
//! let input = Symbol::tokenize("id * ( id + id )")?;
//! assert!(Driver::new(&grammar, &table).run(&input)?.is_accepted());
//! # Ok::<(), anyhow::Error>(())
//! ```

mod lr1;
mod sets;
mod slr;

pub use sets::{first_sets, follow_sets, Encoded};

use anyhow::{bail, Result};
use srparse::{Action, ActionCell, GotoCell, Grammar, ParsingTable, StateId, Symbol};
use std::collections::BTreeSet;
use std::fmt;

/// Construction algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Method {
    /// Canonical LR(1).
    #[default]
    Lr1,
    /// SLR(1).
    Slr,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Lr1 => "LR(1)",
            Method::Slr => "SLR(1)",
        })
    }
}

/// A cell of the construction table, before conflicts are ruled out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Entry {
    Action(Action),
    Goto(StateId),
}

/// Rows are states, columns are encoded symbols; a cell with two or more
/// entries is a conflict.
pub type Tab = Vec<Vec<BTreeSet<Entry>>>;

/// Two or more actions competing for one cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conflict {
    pub state: StateId,
    pub symbol: Symbol,
    pub actions: Vec<Action>,
}

impl Conflict {
    /// `"shift/reduce"`, `"reduce/reduce"`, ...
    pub fn kind(&self) -> &'static str {
        let shifts = self
            .actions
            .iter()
            .any(|a| matches!(a, Action::Shift(_)));
        if shifts {
            "shift/reduce"
        } else {
            "reduce/reduce"
        }
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} conflict in state {} on `{}`:",
            self.kind(),
            self.state,
            self.symbol
        )?;
        for action in &self.actions {
            write!(f, " {}", action)?;
        }
        Ok(())
    }
}

/// Item sets of either method, indexed by state.
#[derive(Clone, Debug)]
pub enum ItemSets {
    Lr0(Vec<slr::ItemSet>),
    Lr1(Vec<lr1::ItemSet>),
}

/// One item in method-independent form, for reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemView {
    pub prod: usize,
    pub dot: usize,
    pub lookahead: Option<usize>,
}

impl ItemSets {
    pub fn len(&self) -> usize {
        match self {
            ItemSets::Lr0(sets) => sets.len(),
            ItemSets::Lr1(sets) => sets.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The items of `state`, or `None` past the last state.
    pub fn items(&self, state: usize) -> Option<Vec<ItemView>> {
        let items: Vec<ItemView> = match self {
            ItemSets::Lr0(sets) => sets
                .get(state)?
                .iter()
                .map(|i| ItemView {
                    prod: i.prod,
                    dot: i.dot,
                    lookahead: None,
                })
                .collect(),
            ItemSets::Lr1(sets) => sets
                .get(state)?
                .iter()
                .map(|i| ItemView {
                    prod: i.prod,
                    dot: i.dot,
                    lookahead: Some(i.lookahead),
                })
                .collect(),
        };
        Some(items)
    }
}

/// The automaton of a grammar under one method, with its raw table.
#[derive(Clone, Debug)]
pub struct Automaton {
    method: Method,
    enc: Encoded,
    sets: ItemSets,
    tab: Tab,
}

impl Automaton {
    pub fn build(grammar: &Grammar, method: Method) -> Self {
        let enc = Encoded::new(grammar);
        let (first, nullable) = first_sets(&enc);
        let (sets, tab) = match method {
            Method::Lr1 => {
                let coll = lr1::Closer::new(&enc, &first, &nullable).collection();
                let tab = lr1::construct_lr1(&coll, &enc);
                (ItemSets::Lr1(coll.states), tab)
            }
            Method::Slr => {
                let flw = follow_sets(&enc, &first, &nullable);
                let c: Vec<slr::ItemSet> = slr::construct_set(&enc).into_iter().collect();
                let tab = slr::construct_slr(&c, &flw, &enc);
                (ItemSets::Lr0(c), tab)
            }
        };
        log::info!("{} automaton: {} states", method, sets.len());
        Self {
            method,
            enc,
            sets,
            tab,
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn encoded(&self) -> &Encoded {
        &self.enc
    }

    pub fn item_sets(&self) -> &ItemSets {
        &self.sets
    }

    pub fn tab(&self) -> &Tab {
        &self.tab
    }

    pub fn state_count(&self) -> usize {
        self.tab.len()
    }

    /// Every cell holding more than one action, row by row.
    pub fn conflicts(&self) -> Vec<Conflict> {
        let mut out = Vec::new();
        for (state, row) in self.tab.iter().enumerate() {
            for (sym, cell) in row.iter().enumerate() {
                if cell.len() < 2 {
                    continue;
                }
                let Some(symbol) = self.enc.decode(sym) else {
                    continue;
                };
                out.push(Conflict {
                    state: StateId(state),
                    symbol,
                    actions: cell
                        .iter()
                        .filter_map(|e| match e {
                            Entry::Action(a) => Some(*a),
                            Entry::Goto(_) => None,
                        })
                        .collect(),
                });
            }
        }
        out
    }

    /// The validated parsing table.
    ///
    /// # Errors
    /// Fails listing every conflict when the grammar is not in the class of
    /// the method, and with any [`srparse::Error`] the table validation raises.
    pub fn table(&self, grammar: &Grammar) -> Result<ParsingTable> {
        let conflicts = self.conflicts();
        if !conflicts.is_empty() {
            let list: Vec<String> = conflicts.iter().map(ToString::to_string).collect();
            bail!("grammar is not {}: {}", self.method, list.join("; "));
        }
        let mut actions = Vec::new();
        let mut gotos = Vec::new();
        for (state, row) in self.tab.iter().enumerate() {
            for (sym, cell) in row.iter().enumerate() {
                let (Some(&entry), Some(symbol)) = (cell.first(), self.enc.decode(sym)) else {
                    continue;
                };
                let state = StateId(state);
                match entry {
                    Entry::Action(action) => actions.push(ActionCell {
                        state,
                        symbol,
                        action,
                    }),
                    Entry::Goto(target) => gotos.push(GotoCell {
                        state,
                        symbol,
                        target,
                    }),
                }
            }
        }
        Ok(ParsingTable::new(grammar, actions, gotos)?)
    }
}

/// Builds and validates the parsing table of `grammar`.
pub fn build_table(grammar: &Grammar, method: Method) -> Result<ParsingTable> {
    Automaton::build(grammar, method).table(grammar)
}
