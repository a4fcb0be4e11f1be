//! Syntax-directed translation to three-address code.
//!
//! The [`Translator`] parses the lexed source with the core driver and then
//! replays the accepted trace with an attribute stack that runs parallel to
//! the parser stack. Each entry holds the value of one grammar symbol:
//!
//! * shifting `id` pushes the named operand, other terminals push nothing;
//! * reducing `X -> Y + Z` or `X -> Y * Z` pops both operands, allocates a
//!   fresh temporary `tN` and emits `tN := y op z`;
//! * reducing a production with exactly one valued symbol (`E -> T`,
//!   `F -> ( E )`, `F -> id`, ...) passes that value through.
//!
//! Rules are chosen by the shape of the right-hand side, so any grammar over
//! the expression alphabet translates, not only the built-in one.

use crate::lexer::{self, Lexeme};
use crate::{SymTab, TacError};
use smartstring::alias::String;
use srparse::{
    Action, Driver, DriverOptions, Grammar, ParseOutcome, ParsingTable, Production, Symbol, Trace,
};
use std::fmt;

/// A binary operator of the target code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    Add,
    Mul,
}

impl Op {
    fn from_symbol(sym: Symbol) -> Option<Op> {
        match sym {
            Symbol::Plus => Some(Op::Add),
            Symbol::Star => Some(Op::Mul),
            _ => None,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Op::Add => "+",
            Op::Mul => "*",
        })
    }
}

/// An instruction operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    /// A source identifier, by [`SymTab`] index.
    Name(usize),
    /// Temporary `tN`, numbered from 1.
    Temp(usize),
}

/// `target := lhs op rhs`, where `target` is a temporary number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub target: usize,
    pub lhs: Operand,
    pub op: Op,
    pub rhs: Operand,
}

/// The result of a translation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program {
    names: SymTab,
    code: Vec<Instruction>,
    result: Operand,
}

impl Program {
    pub fn names(&self) -> &SymTab {
        &self.names
    }

    pub fn code(&self) -> &[Instruction] {
        &self.code
    }

    /// The operand holding the value of the whole expression.
    pub fn result(&self) -> Operand {
        self.result
    }

    /// Spells an operand: the identifier name or `tN`.
    pub fn operand(&self, operand: Operand) -> Result<String, TacError> {
        match operand {
            Operand::Name(index) => Ok(self.names.name(index)?.into()),
            Operand::Temp(n) => Ok(format!("t{}", n).into()),
        }
    }

    /// Renders one instruction as `tN := a op b`.
    pub fn render(&self, instr: &Instruction) -> Result<String, TacError> {
        Ok(format!(
            "t{} := {} {} {}",
            instr.target,
            self.operand(instr.lhs)?,
            instr.op,
            self.operand(instr.rhs)?
        )
        .into())
    }

    /// The instructions as text, one per entry.
    pub fn lines(&self) -> Result<Vec<String>, TacError> {
        self.code.iter().map(|instr| self.render(instr)).collect()
    }
}

/// Numbered instruction list, `1. t1 := b * c`.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, instr) in self.code.iter().enumerate() {
            let line = self.render(instr).map_err(|_| fmt::Error)?;
            writeln!(f, "{}. {}", i + 1, line)?;
        }
        Ok(())
    }
}

/// Translates expressions with a fixed grammar and table.
#[derive(Clone, Debug)]
pub struct Translator {
    grammar: Grammar,
    table: ParsingTable,
    options: DriverOptions,
}

impl Translator {
    /// A translator for the built-in expression grammar and its table.
    pub fn new() -> Result<Self, TacError> {
        let grammar = Grammar::expression();
        let table = ParsingTable::expression(&grammar)?;
        Ok(Self::with_table(grammar, table))
    }

    /// A translator for any grammar over the expression alphabet.
    pub fn with_table(grammar: Grammar, table: ParsingTable) -> Self {
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

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Translates `source` into three-address code.
    ///
    /// # Errors
    /// [`TacError::Lex`] for characters outside the alphabet or a misplaced `$`,
    /// [`TacError::Syntax`] when the parser rejects the input,
    /// [`TacError::Parse`] on a fatal parser error and
    /// [`TacError::Untranslatable`] for a production without a rule.
    ///
    /// # Example
    /// ```rust
    /// # use srparse_tac::Translator;
    /// let program = Translator::new()?.translate("a + b * c")?;
    /// assert_eq!(program.to_string(), "1. t1 := b * c\n2. t2 := a + t1\n");
    /// # Ok::<(), srparse_tac::TacError>(())
    /// ```
    pub fn translate(&self, source: &str) -> Result<Program, TacError> {
        let mut names = SymTab::new();
        let lexemes = lexer::tokenize(source, &mut names)?;
        let symbols: Vec<Symbol> = lexemes.iter().map(|l| l.symbol).collect();

        let driver = Driver::new(&self.grammar, &self.table).with_options(self.options);
        match driver.run(&symbols)? {
            ParseOutcome::Rejected { diagnostic, .. } => {
                let offset = lexemes
                    .get(diagnostic.position)
                    .map_or(source.len(), |l| l.offset);
                log::debug!("rejected at offset {}: {}", offset, diagnostic);
                Err(TacError::Syntax { diagnostic, offset })
            }
            ParseOutcome::Accepted { trace } => {
                let (code, result) = Emitter::default().replay(&self.grammar, &trace, &lexemes)?;
                log::debug!("{} instructions", code.len());
                Ok(Program {
                    names,
                    code,
                    result,
                })
            }
        }
    }
}

/// Attribute stack and output buffer of one replay.
#[derive(Default)]
struct Emitter {
    values: Vec<Option<Operand>>,
    code: Vec<Instruction>,
}

impl Emitter {
    fn replay(
        mut self,
        grammar: &Grammar,
        trace: &Trace,
        lexemes: &[Lexeme],
    ) -> Result<(Vec<Instruction>, Operand), TacError> {
        for step in trace.steps() {
            match step.action {
                Action::Shift(_) => {
                    let value = match lexemes.get(step.position) {
                        Some(Lexeme {
                            symbol: Symbol::Id,
                            name: Some(index),
                            ..
                        }) => Some(Operand::Name(*index)),
                        _ => None,
                    };
                    self.values.push(value);
                }
                Action::Reduce(index) => {
                    let prod = grammar.production_at(index)?;
                    self.reduce(prod)?;
                }
                Action::Accept => {
                    return match self.values.as_slice() {
                        [Some(result)] => Ok((self.code, *result)),
                        _ => Err(srparse::Error::MalformedInput(
                            "accepted trace leaves no single value".into(),
                        )
                        .into()),
                    };
                }
                Action::Error => break,
            }
        }
        Err(srparse::Error::MalformedInput("trace does not end in accept".into()).into())
    }

    fn reduce(&mut self, prod: &Production) -> Result<(), TacError> {
        let len = prod.len();
        let Some(split) = self.values.len().checked_sub(len) else {
            return Err(srparse::Error::MalformedInput(
                format!("reduce by {} with {} values", prod, self.values.len()).into(),
            )
            .into());
        };
        let popped: Vec<Option<Operand>> = self.values.drain(split..).collect();
        let untranslatable = || TacError::Untranslatable {
            production: prod.to_string().into(),
        };

        let value = match (prod.rhs(), popped.as_slice()) {
            ([y, sym, z], [Some(lhs), None, Some(rhs)])
                if y.is_non_terminal() && z.is_non_terminal() =>
            {
                let op = Op::from_symbol(*sym).ok_or_else(untranslatable)?;
                let target = self.code.len() + 1;
                let instr = Instruction {
                    target,
                    lhs: *lhs,
                    op,
                    rhs: *rhs,
                };
                log::trace!("emit t{} for {}", target, prod);
                self.code.push(instr);
                Operand::Temp(target)
            }
            (rhs, values) => {
                let valued: Vec<Operand> = rhs
                    .iter()
                    .zip(values)
                    .filter(|(sym, _)| sym.is_non_terminal() || **sym == Symbol::Id)
                    .map(|(_, value)| value.ok_or_else(untranslatable))
                    .collect::<Result<_, _>>()?;
                match valued.as_slice() {
                    [single] => *single,
                    _ => return Err(untranslatable()),
                }
            }
        };
        self.values.push(Some(value));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use srparse::{ActionCell, GotoCell, StateId};

    fn lines(source: &str) -> Vec<std::string::String> {
        let _ = env_logger::builder().is_test(true).try_init();
        let program = Translator::new().unwrap().translate(source).unwrap();
        program
            .lines()
            .unwrap()
            .into_iter()
            .map(|l| l.to_string())
            .collect()
    }

    #[test]
    fn precedence_follows_the_grammar() {
        assert_eq!(lines("a+b*c"), vec!["t1 := b * c", "t2 := a + t1"]);
        assert_eq!(lines("(a+b)*c"), vec!["t1 := a + b", "t2 := t1 * c"]);
        assert_eq!(
            lines("a * b + c * d"),
            vec!["t1 := a * b", "t2 := c * d", "t3 := t1 + t2"]
        );
    }

    #[test]
    fn operators_associate_left() {
        assert_eq!(lines("a+b+c"), vec!["t1 := a + b", "t2 := t1 + c"]);
    }

    #[test]
    fn single_operand_emits_nothing() {
        let program = Translator::new().unwrap().translate("((x))").unwrap();
        assert!(program.code().is_empty());
        assert_eq!(program.result(), Operand::Name(0));
        assert_eq!(program.operand(program.result()).unwrap(), "x");
        assert_eq!(program.to_string(), "");
    }

    #[test]
    fn repeated_names_share_an_operand() {
        let program = Translator::new().unwrap().translate("a * a").unwrap();
        assert_eq!(program.names().len(), 1);
        assert_eq!(
            program.code(),
            &[Instruction {
                target: 1,
                lhs: Operand::Name(0),
                op: Op::Mul,
                rhs: Operand::Name(0),
            }]
        );
        assert_eq!(program.result(), Operand::Temp(1));
    }

    #[test]
    fn syntax_errors_point_into_the_source() {
        let translator = Translator::new().unwrap();
        match translator.translate("a + ") {
            Err(TacError::Syntax { diagnostic, offset }) => {
                assert_eq!(offset, 4);
                assert_eq!(diagnostic.position, 2);
                assert_eq!(diagnostic.lookahead, Symbol::End);
                assert_eq!(diagnostic.state, StateId(6));
            }
            other => panic!("unexpected {:?}", other),
        }
        match translator.translate("a b") {
            Err(TacError::Syntax { offset, .. }) => assert_eq!(offset, 2),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn step_limit_surfaces_as_parse_error() {
        let translator = Translator::new()
            .unwrap()
            .with_options(DriverOptions::new().max_steps(2));
        let err = translator.translate("a + b").unwrap_err();
        assert_eq!(
            err,
            TacError::Parse(srparse::Error::StepLimitExceeded { limit: 2 })
        );
    }

    #[test]
    fn productions_without_a_rule_are_untranslatable() {
        use Symbol::*;
        // F -> ( ) carries no value.
        let grammar = Grammar::new(
            E,
            vec![
                (E, vec![T]),
                (T, vec![F]),
                (F, vec![LParen, RParen]),
                (F, vec![Id]),
            ],
        )
        .unwrap();
        let act = |state, symbol, action| ActionCell {
            state: StateId(state),
            symbol,
            action,
        };
        let goto = |state, symbol, target| GotoCell {
            state: StateId(state),
            symbol,
            target: StateId(target),
        };
        let table = ParsingTable::new(
            &grammar,
            vec![
                act(0, LParen, Action::Shift(StateId(4))),
                act(0, Id, Action::Shift(StateId(5))),
                act(1, End, Action::Accept),
                act(2, End, Action::Reduce(0)),
                act(3, End, Action::Reduce(1)),
                act(4, RParen, Action::Shift(StateId(6))),
                act(5, End, Action::Reduce(3)),
                act(6, End, Action::Reduce(2)),
            ],
            vec![goto(0, E, 1), goto(0, T, 2), goto(0, F, 3)],
        )
        .unwrap();
        let translator = Translator::with_table(grammar, table);
        assert_eq!(lines_of(&translator, "x"), Vec::<std::string::String>::new());
        assert_eq!(
            translator.translate("()").unwrap_err(),
            TacError::Untranslatable {
                production: "F -> ( )".into()
            }
        );
    }

    fn lines_of(translator: &Translator, source: &str) -> Vec<std::string::String> {
        translator
            .translate(source)
            .unwrap()
            .lines()
            .unwrap()
            .into_iter()
            .map(|l| l.to_string())
            .collect()
    }
}
