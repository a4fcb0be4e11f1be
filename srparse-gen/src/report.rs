//! Human-readable reports: productions, item sets, FIRST/FOLLOW sets, the
//! action/goto grid and step-by-step parse traces.

use crate::construct::{first_sets, follow_sets, Automaton, Encoded};
use srparse::{Action, Grammar, InputBuffer, ParserStack, ParsingTable, StateId, Symbol, Trace};
use std::io::{self, Write};

/// Writes the numbered production list.
///
/// ```text
/// 0: E -> E + T
/// 1: E -> T
/// ```
pub fn write_prods<W: Write>(out: &mut W, grammar: &Grammar) -> io::Result<()> {
    write!(out, "{}", grammar)
}

fn write_item<W: Write>(
    out: &mut W,
    enc: &Encoded,
    prod: usize,
    dot: usize,
    lookahead: Option<usize>,
) -> io::Result<()> {
    let p = &enc.prods[prod];
    write!(out, "[{} ->", enc.name(p[0]))?;
    for (j, &t) in p.iter().enumerate().skip(1) {
        if j == dot {
            write!(out, " .")?;
        }
        write!(out, " {}", enc.name(t))?;
    }
    if dot == p.len() {
        write!(out, " .")?;
    }
    if let Some(la) = lookahead {
        write!(out, ", {}", enc.name(la))?;
    }
    write!(out, "]")
}

/// Writes every state of the automaton with its items.
pub fn write_sets<W: Write>(out: &mut W, automaton: &Automaton) -> io::Result<()> {
    let sets = automaton.item_sets();
    let enc = automaton.encoded();
    writeln!(out, "{} states", sets.len())?;
    for state in 0..sets.len() {
        writeln!(out, "\nI{}:", state)?;
        for item in sets.items(state).unwrap_or_default() {
            write!(out, "  ")?;
            write_item(out, enc, item.prod, item.dot, item.lookahead)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Writes FIRST sets (with `ε` for nullable symbols) and FOLLOW sets of the
/// non-terminals.
pub fn write_first_follow<W: Write>(out: &mut W, grammar: &Grammar) -> io::Result<()> {
    let enc = Encoded::new(grammar);
    let (first, nullable) = first_sets(&enc);
    let follow = follow_sets(&enc, &first, &nullable);
    let names = |set: &std::collections::BTreeSet<usize>| {
        set.iter()
            .map(|&s| enc.name(s))
            .collect::<Vec<_>>()
            .join(", ")
    };
    for nt in 1..enc.n_nonterm {
        let eps = if nullable[nt] { "ε, " } else { "" };
        writeln!(out, "FIRST({}) = {{{}{}}}", enc.name(nt), eps, names(&first[nt]))?;
    }
    for nt in 1..enc.n_nonterm {
        writeln!(out, "FOLLOW({}) = {{{}}}", enc.name(nt), names(&follow[nt]))?;
    }
    Ok(())
}

/// Writes the action/goto grid, one row per state.
pub fn write_table<W: Write>(out: &mut W, table: &ParsingTable) -> io::Result<()> {
    write!(out, "{:<6}", "State")?;
    for sym in Symbol::TERMINALS {
        write!(out, "{:<6}", sym.label())?;
    }
    write!(out, "|")?;
    for sym in Symbol::NON_TERMINALS {
        write!(out, " {:<5}", sym.label())?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "{}",
        "-".repeat(6 * (1 + Symbol::COUNT_TERMINALS) + 1 + 6 * Symbol::COUNT_NONTERMINALS)
    )?;
    for state in (0..table.state_count()).map(StateId) {
        write!(out, "{:<6}", state.0)?;
        for sym in Symbol::TERMINALS {
            let cell = match table.action_for(state, sym) {
                Ok(Action::Error) | Err(_) => String::new(),
                Ok(action) => action.to_string(),
            };
            write!(out, "{:<6}", cell)?;
        }
        write!(out, "|")?;
        for sym in Symbol::NON_TERMINALS {
            let cell = table
                .goto_for(state, sym)
                .map(|s| s.to_string())
                .unwrap_or_default();
            write!(out, " {:<5}", cell)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Replays `trace` over `input` and writes one line per step with the stack
/// and the remaining input before the action.
///
/// # Errors
/// Fails if the trace does not belong to `grammar`, `table` and `input`.
pub fn write_trace<W: Write>(
    out: &mut W,
    grammar: &Grammar,
    table: &ParsingTable,
    input: &[Symbol],
    trace: &Trace,
) -> anyhow::Result<()> {
    let mut stack = ParserStack::new();
    let mut input = InputBuffer::new(input)?;
    writeln!(out, "{:<5} {:<32} {:<20} {}", "Step", "Stack", "Input", "Action")?;
    writeln!(out, "{}", "-".repeat(72))?;
    for (i, step) in trace.steps().iter().enumerate() {
        let stack_text = stack
            .states()
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let input_text: String = input.remaining().iter().map(|s| s.label()).collect();
        let action_text = match step.action {
            Action::Shift(s) => format!("shift {}", s),
            Action::Reduce(p) => format!("reduce {} ({})", p, grammar.production_at(p)?),
            Action::Accept => "accept".to_owned(),
            Action::Error => "error".to_owned(),
        };
        writeln!(out, "{:<5} {:<32} {:<20} {}", i, stack_text, input_text, action_text)?;
        match step.action {
            Action::Shift(s) => {
                stack.push(s, input.lookahead());
                input.advance();
            }
            Action::Reduce(p) => {
                let prod = grammar.production_at(p)?;
                stack.pop(prod.len())?;
                let next = table.goto_for(stack.top(), prod.lhs())?;
                stack.push(next, prod.lhs());
            }
            Action::Accept | Action::Error => {}
        }
    }
    Ok(())
}
