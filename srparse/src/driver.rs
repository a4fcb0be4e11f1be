//! The shift-reduce stack machine.
//!
//! A [`Driver`] binds a [`Grammar`] and a [`ParsingTable`]; it holds no
//! mutable state, so one driver can start any number of independent parses,
//! concurrently if need be. Each [`Parse`] owns its stack, its input cursor
//! and its trace.
//!
//! # State machine
//!
//! ```text
//!            Shift / Reduce
//!              +------+
//!              v      |
//!  start --> Running -+--- Accept ----------> Accepted
//!              |      +--- Error -----------> Rejected(diagnostic)
//!              +---- fatal error ---------> Halted(error)
//! ```
//!
//! Reaching an `Error` cell is an ordinary outcome: the parse ends in
//! [`Status::Rejected`] and [`Driver::run`] returns
//! [`ParseOutcome::Rejected`]. Only fatal conditions (stack underflow, a
//! missing goto, the step limit) surface as `Err`.

use crate::{
    Action, Error, Grammar, InputBuffer, ParserStack, ParsingTable, Result, StateId, Step, Symbol,
    Trace,
};
use std::fmt;

/// Where and why the input was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    /// State on top of the stack.
    pub state: StateId,
    /// The lookahead no action exists for.
    pub lookahead: Symbol,
    /// Input cursor position of the lookahead.
    pub position: usize,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "syntax error at position {}: unexpected `{}` in state {}",
            self.position, self.lookahead, self.state
        )
    }
}

/// Result of a parse that ran to completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The input is a sentence of the grammar; the trace ends in `Accept`.
    Accepted { trace: Trace },
    /// The input is not a sentence; the trace ends in `Error`.
    Rejected { diagnostic: Diagnostic, trace: Trace },
}

impl ParseOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ParseOutcome::Accepted { .. })
    }

    pub fn trace(&self) -> &Trace {
        match self {
            ParseOutcome::Accepted { trace } | ParseOutcome::Rejected { trace, .. } => trace,
        }
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            ParseOutcome::Accepted { .. } => None,
            ParseOutcome::Rejected { diagnostic, .. } => Some(diagnostic),
        }
    }
}

/// Logical state of a [`Parse`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    Accepted,
    Rejected(Diagnostic),
    Halted(Error),
}

impl Status {
    pub fn is_running(&self) -> bool {
        matches!(self, Status::Running)
    }
}

/// Driver configuration.
///
/// ```rust
/// # use srparse::DriverOptions;
/// let options = DriverOptions::new().max_steps(100);
/// assert_eq!(options.max_steps, Some(100));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriverOptions {
    /// Halt with [`Error::StepLimitExceeded`] after this many steps. A
    /// validated table always terminates, so the default is no limit.
    pub max_steps: Option<usize>,
}

impl DriverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_steps(mut self, limit: usize) -> Self {
        self.max_steps = Some(limit);
        self
    }
}

/// Runs parses against a grammar and a table.
///
/// # Example
/// ```rust
/// use srparse::{Action, Driver, Grammar, ParsingTable, Symbol};
///
/// let grammar = Grammar::expression();
/// let table = ParsingTable::expression(&grammar).unwrap();
/// let driver = Driver::new(&grammar, &table);
///
/// let input = Symbol::tokenize("id + id * id $").unwrap();
/// let outcome = driver.run(&input).unwrap();
/// assert!(outcome.is_accepted());
/// assert_eq!(outcome.trace().last_action(), Some(Action::Accept));
///
/// let input = Symbol::tokenize("id + $").unwrap();
/// let outcome = driver.run(&input).unwrap();
/// assert_eq!(outcome.diagnostic().unwrap().position, 2);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Driver<'g> {
    grammar: &'g Grammar,
    table: &'g ParsingTable,
    options: DriverOptions,
}

impl<'g> Driver<'g> {
    pub fn new(grammar: &'g Grammar, table: &'g ParsingTable) -> Self {
        Self {
            grammar,
            table,
            options: DriverOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DriverOptions) -> Self {
        self.options = options;
        self
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    pub fn table(&self) -> &'g ParsingTable {
        self.table
    }

    /// Prepares a parse of `input` without taking any step.
    ///
    /// # Errors
    /// [`Error::MalformedInput`] if `input` is not a terminal sequence that
    /// ends with at most one `$`.
    pub fn start(&self, input: &[Symbol]) -> Result<Parse<'g>> {
        Ok(Parse {
            grammar: self.grammar,
            table: self.table,
            options: self.options,
            stack: ParserStack::new(),
            input: InputBuffer::new(input)?,
            trace: Trace::new(),
            status: Status::Running,
        })
    }

    /// Parses `input` to completion.
    ///
    /// # Errors
    /// Input validation errors from [`Driver::start`] and fatal errors from
    /// [`Parse::step`]. A syntax error is an `Ok` [`ParseOutcome::Rejected`].
    pub fn run(&self, input: &[Symbol]) -> Result<ParseOutcome> {
        self.start(input)?.finish()
    }
}

/// A parse in progress.
///
/// Call [`Parse::step`] repeatedly, or [`Parse::finish`] once. Dropping a
/// parse between steps is the way to cancel it.
#[derive(Clone, Debug)]
pub struct Parse<'g> {
    grammar: &'g Grammar,
    table: &'g ParsingTable,
    options: DriverOptions,
    stack: ParserStack,
    input: InputBuffer,
    trace: Trace,
    status: Status,
}

impl<'g> Parse<'g> {
    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn stack(&self) -> &ParserStack {
        &self.stack
    }

    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Performs one transition and returns the resulting status.
    ///
    /// Stepping a parse that is no longer [`Status::Running`] changes nothing.
    ///
    /// # Errors
    /// A fatal [`Error`]; the parse is then [`Status::Halted`] with a copy of it.
    pub fn step(&mut self) -> Result<&Status> {
        if !self.status.is_running() {
            return Ok(&self.status);
        }
        if let Err(err) = self.transition() {
            log::error!("parse halted: {}", err);
            self.status = Status::Halted(err.clone());
            return Err(err);
        }
        Ok(&self.status)
    }

    /// Steps until the parse is accepted or rejected.
    pub fn finish(mut self) -> Result<ParseOutcome> {
        while self.step()?.is_running() {}
        match self.status {
            Status::Accepted => Ok(ParseOutcome::Accepted { trace: self.trace }),
            Status::Rejected(diagnostic) => Ok(ParseOutcome::Rejected {
                diagnostic,
                trace: self.trace,
            }),
            Status::Halted(err) => Err(err),
            Status::Running => unreachable!(),
        }
    }

    fn transition(&mut self) -> Result<()> {
        if let Some(limit) = self.options.max_steps {
            if self.trace.len() >= limit {
                return Err(Error::StepLimitExceeded { limit });
            }
        }

        let state = self.stack.top();
        let lookahead = self.input.lookahead();
        let position = self.input.position();
        let action = self.table.action_for(state, lookahead)?;
        self.trace.push(Step {
            state,
            lookahead,
            position,
            depth: self.stack.depth(),
            action,
        });

        match action {
            Action::Shift(next) => {
                log::trace!("Shift {}", next);
                self.stack.push(next, lookahead);
                self.input.advance();
            }

            Action::Reduce(prod_id) => {
                let prod = self.grammar.production_at(prod_id)?;
                log::trace!("Reduce {} ({})", prod_id, prod);
                self.stack.pop(prod.len())?;
                let next = self.table.goto_for(self.stack.top(), prod.lhs())?;
                self.stack.push(next, prod.lhs());
            }

            Action::Accept => {
                log::trace!("Accept");
                self.status = Status::Accepted;
            }

            Action::Error => {
                log::trace!("Error on `{}` at position {}", lookahead, position);
                self.status = Status::Rejected(Diagnostic {
                    state,
                    lookahead,
                    position,
                });
            }
        }

        if log::log_enabled!(log::Level::Trace) {
            self.dump_state();
        }
        Ok(())
    }

    /// Logs the stack as `<state> symbol <state> ...` followed by the
    /// remaining input.
    fn dump_state(&self) {
        let mut output = format!("<{}>", self.stack.states()[0]);
        for (sym, state) in self.stack.symbols().iter().zip(&self.stack.states()[1..]) {
            output.push_str(&format!("  {}  <{}>", sym, state));
        }
        output.push_str("  <-  ");
        for sym in self.input.remaining() {
            output.push_str(&format!("{} ", sym));
        }
        log::trace!("{}", output);
    }
}
