//! Expression lexer.
//!
//! Turns source text such as `a + b * (c + d)` into terminal [`Symbol`]s.
//! Every identifier becomes [`Symbol::Id`] and its spelling is interned in a
//! [`SymTab`]; the lexeme keeps the name index so the translator can refer to
//! the operand later.

use crate::{SymTab, TacError};
use logos::Logos;
use srparse::Symbol;

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\f\r\n]+")]
enum LogosToken {
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[token("+")]
    Plus,

    #[token("*")]
    Star,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("$")]
    End,
}

/// One token of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme {
    pub symbol: Symbol,
    /// Index into the [`SymTab`] for identifiers.
    pub name: Option<usize>,
    /// Byte offset of the first character.
    pub offset: usize,
}

/// Splits `source` into lexemes, interning identifiers into `names`.
///
/// # Errors
/// [`TacError::Lex`] at the first character that starts no token, or at a
/// `$` that is followed by more input.
pub fn tokenize(source: &str, names: &mut SymTab) -> Result<Vec<Lexeme>, TacError> {
    let mut lexer = LogosToken::lexer(source);
    let mut lexemes = Vec::new();
    while let Some(kind) = lexer.next() {
        let offset = lexer.span().start;
        let (symbol, name) = match kind {
            Ok(LogosToken::Ident) => (Symbol::Id, Some(names.intern(lexer.slice()))),
            Ok(LogosToken::Plus) => (Symbol::Plus, None),
            Ok(LogosToken::Star) => (Symbol::Star, None),
            Ok(LogosToken::LParen) => (Symbol::LParen, None),
            Ok(LogosToken::RParen) => (Symbol::RParen, None),
            Ok(LogosToken::End) => (Symbol::End, None),
            Err(()) => {
                return Err(TacError::Lex {
                    offset,
                    text: lexer.slice().into(),
                })
            }
        };
        if let Some(end) = lexemes.last().filter(|l: &&Lexeme| l.symbol == Symbol::End) {
            return Err(TacError::Lex {
                offset: end.offset,
                text: "$".into(),
            });
        }
        log::trace!("lexeme {} at {}", symbol, offset);
        lexemes.push(Lexeme {
            symbol,
            name,
            offset,
        });
    }
    Ok(lexemes)
}
