//! `chumsky` parsers over lexed [`Token`]s for the grammar and table formats.
//!
//! Both formats are line oriented: every item ends with a [`Token::LineFeed`],
//! and blank lines are allowed anywhere. The readers guarantee a final line
//! feed before parsing.

use super::lexer::Token;
use chumsky::prelude::*;

pub type Extra<'t> = extra::Err<Rich<'t, Token>>;

/// `lhs -> alt | alt | ...` with raw symbol labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub lhs: String,
    pub alternatives: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GrammarLine {
    Start(String),
    Rule(Rule),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableLine {
    /// `action <state> <terminal> <action>`
    Action(usize, String, String),
    /// `goto <state> <non-terminal> <state>`
    Goto(usize, String, usize),
}

fn label<'t>() -> impl Parser<'t, &'t [Token], String, Extra<'t>> + Clone {
    select! { Token::Label(l) => l }.labelled("symbol")
}

fn number<'t>() -> impl Parser<'t, &'t [Token], usize, Extra<'t>> + Clone {
    select! { Token::Number(n) => n }.labelled("state")
}

fn line_feed<'t>() -> impl Parser<'t, &'t [Token], (), Extra<'t>> + Clone {
    just(Token::LineFeed).ignored().labelled("end of line")
}

fn keyword<'t>(kw: &str) -> impl Parser<'t, &'t [Token], (), Extra<'t>> + Clone {
    just(Token::Label(kw.to_owned())).ignored()
}

/// Lines of a grammar file, blank lines dropped.
pub fn grammar_parser<'t>() -> impl Parser<'t, &'t [Token], Vec<GrammarLine>, Extra<'t>> {
    let alternative = label().repeated().at_least(1).collect::<Vec<_>>();

    let rule = label()
        .then_ignore(just(Token::Arrow).labelled("`->`"))
        .then(
            alternative
                .separated_by(just(Token::Pipe))
                .at_least(1)
                .collect::<Vec<_>>(),
        )
        .then_ignore(line_feed())
        .map(|(lhs, alternatives)| Some(GrammarLine::Rule(Rule { lhs, alternatives })));

    let start = just(Token::Start)
        .ignore_then(label())
        .then_ignore(line_feed())
        .map(|sym| Some(GrammarLine::Start(sym)));

    let empty_line = line_feed().to(None);

    choice((start, rule, empty_line))
        .repeated()
        .collect::<Vec<_>>()
        .map(|items| items.into_iter().flatten().collect())
}

/// Lines of a table file, blank lines dropped.
pub fn table_parser<'t>() -> impl Parser<'t, &'t [Token], Vec<TableLine>, Extra<'t>> {
    let action = keyword("action")
        .ignore_then(number())
        .then(label())
        .then(label().labelled("action"))
        .then_ignore(line_feed())
        .map(|((state, sym), act)| Some(TableLine::Action(state, sym, act)));

    let goto = keyword("goto")
        .ignore_then(number())
        .then(label())
        .then(number())
        .then_ignore(line_feed())
        .map(|((state, sym), target)| Some(TableLine::Goto(state, sym, target)));

    let empty_line = line_feed().to(None);

    choice((action, goto, empty_line))
        .repeated()
        .collect::<Vec<_>>()
        .map(|items| items.into_iter().flatten().collect())
}
