//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0
//! or (at your option) any later version (LGPL-3.0-or-later).
//!
//! # srparse-tac
//!
//! A small demonstration crate built on **srparse**: it translates
//! identifier expressions such as `a + b * (c + d)` into three-address code.
//!
//! ## Overview
//!
//! - [`lexer`] turns source text into terminal symbols, interning identifier
//!   spellings in a [`SymTab`] and remembering byte offsets.
//! - [`translate`] runs the core driver with the expression grammar and
//!   replays the accepted trace to emit one instruction per binary operator.
//! - [`symtab`] holds the interned names.
//!
//! ## Example
//!
//! ```rust
//! use srparse_tac::Translator;
//!
//! let translator = Translator::new()?;
//! let program = translator.translate("(a + b) * c")?;
//! assert_eq!(program.to_string(), "1. t1 := a + b\n2. t2 := t1 * c\n");
//! # Ok::<(), srparse_tac::TacError>(())
//! ```
pub mod error;
pub mod lexer;
pub mod symtab;
pub mod translate;

pub use error::TacError;
pub use lexer::Lexeme;
pub use symtab::SymTab;
pub use translate::{Instruction, Op, Operand, Program, Translator};
