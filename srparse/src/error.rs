//! Error taxonomy of the parser core.
//!
//! Every fallible operation in this crate returns [`Result`], whose error type
//! is the closed [`Error`] enum. The variants fall into three groups:
//!
//! - **construction errors** ([`Error::UnknownSymbol`],
//!   [`Error::MalformedGrammar`], [`Error::MalformedTable`],
//!   [`Error::MalformedInput`]): raised while building a grammar, a table or an
//!   input buffer. Construction is atomic, so no partially built value escapes.
//! - **contract errors** ([`Error::InvalidQuery`], [`Error::IndexOutOfRange`]):
//!   the caller asked a question the data model cannot answer.
//! - **fatal errors** ([`Error::StackUnderflow`], [`Error::MissingGoto`],
//!   [`Error::StepLimitExceeded`]): the driver halts immediately. The first two
//!   mean the table is corrupt even though it passed validation.
//!
//! A syntax error in the input is *not* an [`Error`]; it is reported as
//! [`ParseOutcome::Rejected`](crate::ParseOutcome::Rejected).

use crate::{StateId, Symbol};
use smartstring::alias::String;
use thiserror::Error;

/// Errors produced by the parser core.
///
/// The type is `Clone` so that a halted parse can keep a copy of the error
/// that stopped it (see [`Status::Halted`](crate::Status::Halted)).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A raw token does not name any [`Symbol`].
    #[error("unknown symbol {0:?}")]
    UnknownSymbol(String),

    /// Structural validation of a grammar failed.
    #[error("malformed grammar: {0}")]
    MalformedGrammar(String),

    /// Structural validation of a parsing table failed.
    #[error("malformed table: {0}")]
    MalformedTable(String),

    /// An input sequence or a trace is not usable by the driver.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The table was queried with a symbol of the wrong category.
    #[error("invalid query: {query} expects a {expected}, got `{symbol}`")]
    InvalidQuery {
        /// Name of the query (`action` or `goto`).
        query: &'static str,
        /// The symbol category the query accepts.
        expected: &'static str,
        /// The offending symbol.
        symbol: Symbol,
    },

    /// A production index lies outside `[0, len)`.
    #[error("production index {index} out of range (grammar has {len} productions)")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of productions in the grammar.
        len: usize,
    },

    /// A reduce tried to pop more states than the stack holds.
    #[error("stack underflow in state {state}: cannot pop {needed} of {depth} entries")]
    StackUnderflow {
        /// State on top of the stack when the reduce started.
        state: StateId,
        /// Number of entries the reduce needed to pop.
        needed: usize,
        /// Number of entries on the stack.
        depth: usize,
    },

    /// A reduce exposed a state that has no goto entry for the reduced symbol.
    #[error("no goto entry for state {state} on `{symbol}`")]
    MissingGoto {
        /// The exposed state.
        state: StateId,
        /// The left-hand side that was reduced.
        symbol: Symbol,
    },

    /// The configured step limit was reached before the parse finished.
    #[error("step limit of {limit} exceeded")]
    StepLimitExceeded {
        /// The configured limit.
        limit: usize,
    },
}

impl Error {
    /// Returns `true` for errors that halt a running parse.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::StackUnderflow { .. } | Error::MissingGoto { .. } | Error::StepLimitExceeded { .. }
        )
    }

    pub(crate) fn grammar(msg: impl AsRef<str>) -> Self {
        Error::MalformedGrammar(String::from(msg.as_ref()))
    }

    pub(crate) fn table(msg: impl AsRef<str>) -> Self {
        Error::MalformedTable(String::from(msg.as_ref()))
    }

    pub(crate) fn input(msg: impl AsRef<str>) -> Self {
        Error::MalformedInput(String::from(msg.as_ref()))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
