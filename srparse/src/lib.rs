//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0
//! or (at your option) any later version (LGPL-3.0-or-later).
//!
//! Table-driven shift-reduce parsing.
//!
//! `srparse` is the runtime half of an LR parser: given a [`Grammar`] and a
//! validated [`ParsingTable`], a [`Driver`] decides whether a token sequence is
//! a sentence of the grammar, and records every shift and reduce it performs in
//! a [`Trace`].
//!
//! The symbol alphabet is the closed [`Symbol`] enum of the classic expression
//! grammar
//!
//! ```text
//! E -> E + T | T
//! T -> T * F | F
//! F -> ( E ) | id
//! ```
//!
//! and [`Grammar::expression`] / [`ParsingTable::expression`] provide that
//! grammar together with its SLR(1) table. Tables for other grammars over the
//! same alphabet are built by `srparse-gen`.
//!
//! # Example
//! ```rust
//! use srparse::{Driver, Grammar, ParseTree, ParsingTable, Symbol};
//!
//! let grammar = Grammar::expression();
//! let table = ParsingTable::expression(&grammar)?;
//! let input = Symbol::tokenize("id + id * id")?;
//!
//! let outcome = Driver::new(&grammar, &table).run(&input)?;
//! assert!(outcome.is_accepted());
//! assert_eq!(outcome.trace().reductions(), [5, 3, 1, 5, 3, 5, 2, 0]);
//!
//! let tree = ParseTree::from_trace(&grammar, outcome.trace())?;
//! assert_eq!(tree.frontier(), input);
//! # Ok::<(), srparse::Error>(())
//! ```
//!
//! # Logging
//! The driver logs every transition at `trace` level through the [`log`]
//! facade, followed by a dump of the stack and the remaining input.

mod driver;
mod error;
mod grammar;
mod input;
mod stack;
mod symbol;
mod table;
mod trace;
mod tree;

pub use crate::driver::{Diagnostic, Driver, DriverOptions, Parse, ParseOutcome, Status};
pub use crate::error::{Error, Result};
pub use crate::grammar::{Grammar, Production};
pub use crate::input::InputBuffer;
pub use crate::stack::ParserStack;
pub use crate::symbol::Symbol;
pub use crate::table::{Action, ActionCell, GotoCell, ParsingTable, StateId};
pub use crate::trace::{ParseStats, Step, Trace};
pub use crate::tree::{Child, Node, ParseTree};
