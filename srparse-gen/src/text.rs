//! Text formats for grammars, tables and inputs.
//!
//! ```text
//! -- grammar: one rule per line, `|` separates alternatives
//! %start E
//! E -> E + T | T
//! T -> T * F | F
//! F -> ( E ) | id
//!
//! -- table: one cell per line
//! action 0 id s5
//! action 1 $ acc
//! goto 0 E 1
//!
//! -- input: whitespace between tokens is optional
//! id+id*id$
//! ```
//!
//! Productions are numbered in the order they appear, alternatives left to
//! right. Without a `%start` line the start symbol is the left-hand side of
//! the first rule.

mod lexer;
mod parser;

pub use lexer::{line_of, Lexer, Spanned, Token};

use anyhow::{anyhow, bail, Context, Result};
use chumsky::error::Rich;
use chumsky::Parser;
use parser::{GrammarLine, TableLine};
use srparse::{Action, ActionCell, Grammar, GotoCell, ParsingTable, StateId, Symbol};
use std::io::{self, Write};

/// Lexes `source`, making sure the token stream ends with a line feed.
fn lex(source: &str) -> Result<(Vec<Token>, Vec<Spanned>)> {
    let mut spanned = Lexer::tokenize_all(source)?;
    if !matches!(spanned.last(), None | Some((Token::LineFeed, _))) {
        spanned.push((Token::LineFeed, source.len()..source.len()));
    }
    let tokens = spanned.iter().map(|(tok, _)| tok.clone()).collect();
    Ok((tokens, spanned))
}

/// Turns the first parse error into a message naming the source line.
fn syntax_error(source: &str, spanned: &[Spanned], errs: Vec<Rich<'_, Token>>) -> anyhow::Error {
    let Some(err) = errs.into_iter().next() else {
        return anyhow!("syntax error");
    };
    let offset = spanned
        .get(err.span().start)
        .map_or(source.len(), |(_, span)| span.start);
    anyhow!("line {}: {}", line_of(source, offset), err)
}

/// Reads a grammar in the rule format.
///
/// # Errors
/// Lexical and syntax errors with the offending line, a second `%start`, and
/// every [`srparse::Error::MalformedGrammar`] raised by grammar validation.
pub fn read_grammar(source: &str) -> Result<Grammar> {
    let (tokens, spanned) = lex(source)?;
    let lines = parser::grammar_parser()
        .parse(&tokens)
        .into_result()
        .map_err(|errs| syntax_error(source, &spanned, errs))?;

    let mut start = None;
    let mut prods = Vec::new();
    for line in &lines {
        match line {
            GrammarLine::Start(sym) => {
                if start.replace(sym.as_str()).is_some() {
                    bail!("duplicate %start directive");
                }
            }
            GrammarLine::Rule(rule) => {
                for alt in &rule.alternatives {
                    prods.push((rule.lhs.as_str(), alt.iter().map(String::as_str)));
                }
            }
        }
    }
    let start = match start {
        Some(start) => start,
        None => prods.first().map(|(lhs, _)| *lhs).unwrap_or(""),
    };
    log::debug!("read {} productions, start symbol {:?}", prods.len(), start);
    if prods.is_empty() {
        return Err(srparse::Error::MalformedGrammar("grammar has no productions".into()).into());
    }
    Ok(Grammar::from_raw(start, prods)?)
}

/// Reads a table in the cell format and validates it against `grammar`.
///
/// # Errors
/// Lexical and syntax errors with the offending line, unknown symbols or
/// action spellings, and every [`srparse::Error::MalformedTable`] raised by
/// table validation.
pub fn read_table(grammar: &Grammar, source: &str) -> Result<ParsingTable> {
    let (tokens, spanned) = lex(source)?;
    let lines = parser::table_parser()
        .parse(&tokens)
        .into_result()
        .map_err(|errs| syntax_error(source, &spanned, errs))?;

    let mut actions = Vec::new();
    let mut gotos = Vec::new();
    for (i, line) in lines.into_iter().enumerate() {
        match line {
            TableLine::Action(state, sym, act) => actions.push(ActionCell {
                state: StateId(state),
                symbol: sym
                    .parse()
                    .with_context(|| format!("table cell {}", i))?,
                action: act
                    .parse::<Action>()
                    .with_context(|| format!("table cell {}", i))?,
            }),
            TableLine::Goto(state, sym, target) => gotos.push(GotoCell {
                state: StateId(state),
                symbol: sym
                    .parse()
                    .with_context(|| format!("table cell {}", i))?,
                target: StateId(target),
            }),
        }
    }
    log::debug!(
        "read {} action cells and {} goto cells",
        actions.len(),
        gotos.len()
    );
    Ok(ParsingTable::new(grammar, actions, gotos)?)
}

/// Reads an input sentence such as `id+id*id$`.
///
/// # Errors
/// [`srparse::Error::UnknownSymbol`] for a label that names no symbol, and an
/// error for any grammar or table punctuation.
pub fn read_input(source: &str) -> Result<Vec<Symbol>> {
    let mut symbols = Vec::new();
    for (token, span) in Lexer::tokenize_all(source)? {
        match token {
            Token::Label(label) => symbols.push(Symbol::classify(&label)?),
            Token::LineFeed => {}
            other => bail!("unexpected {} at offset {} in input", other, span.start),
        }
    }
    Ok(symbols)
}

/// Writes `table` in the cell format read by [`read_table`].
pub fn write_table<W: Write>(out: &mut W, table: &ParsingTable) -> io::Result<()> {
    writeln!(out, "-- {} states", table.state_count())?;
    for cell in table.action_cells() {
        writeln!(out, "action {} {} {}", cell.state, cell.symbol, cell.action)?;
    }
    for cell in table.goto_cells() {
        writeln!(out, "goto {} {} {}", cell.state, cell.symbol, cell.target)?;
    }
    Ok(())
}

/// Writes `grammar` in the rule format read by [`read_grammar`], one
/// production per line so that the numbering survives a round trip.
pub fn write_grammar<W: Write>(out: &mut W, grammar: &Grammar) -> io::Result<()> {
    writeln!(out, "%start {}", grammar.start())?;
    for prod in grammar.productions() {
        writeln!(out, "{}", prod)?;
    }
    Ok(())
}
