//! Lexer shared by the grammar, table and input formats.
//!
//! Built on [`logos`]. Whitespace other than line feeds is skipped, `--`
//! comments run to the end of the line, and every symbol spelling (`id`, `E`,
//! `+`, `$`, ...) comes out as a [`Token::Label`]; classifying labels into
//! grammar symbols is left to the readers.

use anyhow::{anyhow, Result};
use logos::Logos;
use std::fmt;
use std::ops::Range;

/// Tokens produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// `->`
    Arrow,
    /// `|`
    Pipe,
    /// The `%start` directive.
    Start,
    /// A line feed, ending a rule or a table line.
    LineFeed,
    /// A decimal number (state index).
    Number(usize),
    /// A word or a punctuation character.
    Label(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Arrow => f.write_str("`->`"),
            Token::Pipe => f.write_str("`|`"),
            Token::Start => f.write_str("`%start`"),
            Token::LineFeed => f.write_str("end of line"),
            Token::Number(n) => write!(f, "`{}`", n),
            Token::Label(s) => write!(f, "`{}`", s),
        }
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\f\r]+")]
enum LogosToken {
    #[regex(r"\n")]
    LineFeed,

    #[regex(r"--[^\n]*")]
    Comment,

    #[token("->")]
    Arrow,

    #[token("|")]
    Pipe,

    #[token("%start")]
    Start,

    #[regex(r"[0-9]+")]
    Number,

    #[regex(r"[a-zA-Z][a-zA-Z0-9_]*")]
    Word,

    #[regex(r###"[-~`!@#$%^&*+=\\<>?/;\(\)\[\]{},\.'":]"###)]
    Punct,
}

/// A token together with its byte range in the source.
pub type Spanned = (Token, Range<usize>);

pub struct Lexer<'source> {
    inner: logos::Lexer<'source, LogosToken>,
}

impl<'source> Lexer<'source> {
    pub fn new(input: &'source str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
        }
    }

    /// Returns the next token, skipping comments, or `None` at end of input.
    ///
    /// # Errors
    /// On a character no token starts with, or a number that does not fit in
    /// `usize`.
    pub fn next_token(&mut self) -> Option<Result<Spanned>> {
        while let Some(kind) = self.inner.next() {
            let slice = self.inner.slice();
            let span = self.inner.span();
            let token = match kind {
                Ok(LogosToken::Comment) => continue,
                Ok(LogosToken::LineFeed) => Token::LineFeed,
                Ok(LogosToken::Arrow) => Token::Arrow,
                Ok(LogosToken::Pipe) => Token::Pipe,
                Ok(LogosToken::Start) => Token::Start,
                Ok(LogosToken::Number) => match slice.parse() {
                    Ok(n) => Token::Number(n),
                    Err(_) => {
                        return Some(Err(anyhow!(
                            "number {} at offset {} is too large",
                            slice,
                            span.start
                        )))
                    }
                },
                Ok(LogosToken::Word) | Ok(LogosToken::Punct) => Token::Label(slice.to_owned()),
                Err(()) => {
                    return Some(Err(anyhow!(
                        "unexpected character {:?} at offset {}",
                        slice,
                        span.start
                    )))
                }
            };
            return Some(Ok((token, span)));
        }
        None
    }

    /// Tokenizes all of `input`.
    pub fn tokenize_all(input: &'source str) -> Result<Vec<Spanned>> {
        let mut lex = Lexer::new(input);
        let mut out = Vec::new();
        while let Some(tok) = lex.next_token() {
            out.push(tok?);
        }
        log::debug!("lexed {} tokens", out.len());
        Ok(out)
    }
}

/// 1-based line of byte `offset` in `source`.
pub fn line_of(source: &str, offset: usize) -> usize {
    source
        .as_bytes()
        .iter()
        .take(offset)
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}
