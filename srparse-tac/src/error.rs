//! # Translator Error Type
//!
//! [`TacError`] gathers everything that can stop a translation: a character the
//! lexer does not know, a fatal parser error, a syntax error in the source, or
//! a production the translation scheme has no rule for.
use smartstring::alias::String;
use srparse::Diagnostic;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TacError {
    /// No token starts at `offset`, or a `$` there is not the last token.
    #[error("unexpected character {text:?} at offset {offset}")]
    Lex {
        /// Byte offset in the source.
        offset: usize,
        /// The offending text.
        text: String,
    },

    /// The parser failed on a fatal condition.
    ///
    /// Converted from [`srparse::Error`] with `?`.
    #[error("parser error: {0}")]
    Parse(#[from] srparse::Error),

    /// The source is not a well-formed expression.
    #[error("syntax error at offset {offset}: unexpected `{}`", .diagnostic.lookahead)]
    Syntax {
        /// Where the driver stopped.
        diagnostic: Diagnostic,
        /// Byte offset of the offending token; the source length at end of input.
        offset: usize,
    },

    /// A reduced production has no translation rule.
    #[error("no translation for production {production}")]
    Untranslatable {
        /// The production, as `E -> ...`.
        production: String,
    },

    /// An operand index does not name an interned identifier.
    #[error("invalid name index {index} (table length {len})")]
    InvalidName { index: usize, len: usize },
}
