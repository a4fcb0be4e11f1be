//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0
//! or (at your option) any later version (LGPL-3.0-or-later).
//!
//! Table construction and tooling for `srparse`.
//!
//!  * [`construct`] builds canonical LR(1) or SLR(1) parsing tables from a
//!    [`srparse::Grammar`] and reports conflicts;
//!  * [`text`] reads and writes grammars, tables and inputs in a small
//!    line-oriented text format;
//!  * [`report`] renders productions, item sets, the table grid and traces.
//!
//! The `srparse` binary (feature `cli`) ties them together.

pub mod construct;
pub mod report;
pub mod text;

pub use construct::{build_table, Automaton, Conflict, Method};
