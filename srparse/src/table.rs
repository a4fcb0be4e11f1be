//! Parsing table: the action and goto mappings of an LR automaton.
//!
//! Rows are stored densely, one array per state, indexed by
//! [`Symbol::column`]. Cells that were never defined read as
//! [`Action::Error`], which is the normal "no legal move" answer rather than a
//! failure.

use crate::{Error, Grammar, Result, Symbol};
use std::fmt;
use std::str::FromStr;

/// Identifier of an automaton state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(pub usize);

impl StateId {
    /// The state every parse starts in.
    pub const START: StateId = StateId(0);
}

impl From<StateId> for usize {
    fn from(state: StateId) -> Self {
        state.0
    }
}

impl From<usize> for StateId {
    fn from(state: usize) -> Self {
        StateId(state)
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An action-table entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    /// No legal move.
    #[default]
    Error,
    /// The input is a sentence of the grammar.
    Accept,
    /// Push the state and consume the lookahead.
    Shift(StateId),
    /// Reduce by the production with this index.
    Reduce(usize),
}

impl fmt::Display for Action {
    /// Compact textbook notation: `s5`, `r3`, `acc`, `err`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Error => f.write_str("err"),
            Action::Accept => f.write_str("acc"),
            Action::Shift(state) => write!(f, "s{}", state),
            Action::Reduce(prod) => write!(f, "r{}", prod),
        }
    }
}

impl FromStr for Action {
    type Err = Error;

    /// Parses the notation produced by [`Display`](fmt::Display).
    fn from_str(s: &str) -> Result<Self> {
        let number = |digits: &str| {
            digits
                .parse::<usize>()
                .map_err(|_| Error::table(format!("invalid action {:?}", s)))
        };
        match s {
            "acc" => Ok(Action::Accept),
            "err" => Ok(Action::Error),
            _ if s.len() > 1 && s.starts_with('s') => Ok(Action::Shift(StateId(number(&s[1..])?))),
            _ if s.len() > 1 && s.starts_with('r') => Ok(Action::Reduce(number(&s[1..])?)),
            _ => Err(Error::table(format!("invalid action {:?}", s))),
        }
    }
}

/// One raw action-table cell, as supplied by a table source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ActionCell {
    pub state: StateId,
    pub symbol: Symbol,
    pub action: Action,
}

/// One raw goto-table cell, as supplied by a table source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GotoCell {
    pub state: StateId,
    pub symbol: Symbol,
    pub target: StateId,
}

type ActionRow = [Action; Symbol::COUNT_TERMINALS];
type GotoRow = [Option<StateId>; Symbol::COUNT_NONTERMINALS];

/// A validated LR parsing table.
///
/// The table has `state_count()` states, numbered from 0. Every shift and goto
/// target is one of them and every reduce names a production of the grammar
/// the table was validated against. Like [`Grammar`], a table is immutable and
/// freely shareable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsingTable {
    actions: Vec<ActionRow>,
    gotos: Vec<GotoRow>,
}

impl ParsingTable {
    /// Builds and validates a table from raw cells.
    ///
    /// The number of states is one more than the largest state that owns a
    /// cell. Repeating a cell with the same content is harmless.
    ///
    /// # Errors
    /// [`Error::MalformedTable`] when
    /// - no cell is given at all;
    /// - an action cell is keyed by a non-terminal, or a goto cell by a terminal;
    /// - `Accept` appears outside the `$` column, or a shift inside it;
    /// - two cells for the same `(state, symbol)` disagree;
    /// - a shift or goto targets a state outside the table;
    /// - a reduce names a production `grammar` does not have.
    pub fn new<A, G>(grammar: &Grammar, actions: A, gotos: G) -> Result<Self>
    where
        A: IntoIterator<Item = ActionCell>,
        G: IntoIterator<Item = GotoCell>,
    {
        let actions: Vec<ActionCell> = actions.into_iter().collect();
        let gotos: Vec<GotoCell> = gotos.into_iter().collect();

        let n_states = actions
            .iter()
            .map(|c| c.state)
            .chain(gotos.iter().map(|c| c.state))
            .max()
            .map(|s| s.0 + 1)
            .ok_or_else(|| Error::table("table has no cells"))?;

        let mut action_rows = vec![[None; Symbol::COUNT_TERMINALS]; n_states];
        for cell in &actions {
            if !cell.symbol.is_terminal() {
                return Err(Error::table(format!(
                    "action cell ({}, {}) is keyed by a non-terminal",
                    cell.state, cell.symbol
                )));
            }
            match cell.action {
                Action::Shift(target) if target.0 >= n_states => {
                    return Err(Error::table(format!(
                        "action cell ({}, {}) shifts to unknown state {}",
                        cell.state, cell.symbol, target
                    )));
                }
                Action::Reduce(prod) if prod >= grammar.len() => {
                    return Err(Error::table(format!(
                        "action cell ({}, {}) reduces by unknown production {}",
                        cell.state, cell.symbol, prod
                    )));
                }
                Action::Shift(_) if cell.symbol == Symbol::End => {
                    return Err(Error::table(format!(
                        "action cell ({}, {}) shifts past end of input",
                        cell.state, cell.symbol
                    )));
                }
                Action::Accept if cell.symbol != Symbol::End => {
                    return Err(Error::table(format!(
                        "action cell ({}, {}) accepts before end of input",
                        cell.state, cell.symbol
                    )));
                }
                _ => {}
            }
            let slot = &mut action_rows[cell.state.0][cell.symbol.column()];
            match *slot {
                Some(prev) if prev != cell.action => {
                    return Err(Error::table(format!(
                        "conflict in cell ({}, {}): {} vs {}",
                        cell.state, cell.symbol, prev, cell.action
                    )));
                }
                _ => *slot = Some(cell.action),
            }
        }

        let mut goto_rows = vec![[None; Symbol::COUNT_NONTERMINALS]; n_states];
        for cell in &gotos {
            if !cell.symbol.is_non_terminal() {
                return Err(Error::table(format!(
                    "goto cell ({}, {}) is keyed by a terminal",
                    cell.state, cell.symbol
                )));
            }
            if cell.target.0 >= n_states {
                return Err(Error::table(format!(
                    "goto cell ({}, {}) targets unknown state {}",
                    cell.state, cell.symbol, cell.target
                )));
            }
            let slot = &mut goto_rows[cell.state.0][cell.symbol.column()];
            match *slot {
                Some(prev) if prev != cell.target => {
                    return Err(Error::table(format!(
                        "conflict in goto cell ({}, {}): {} vs {}",
                        cell.state, cell.symbol, prev, cell.target
                    )));
                }
                _ => *slot = Some(cell.target),
            }
        }

        Ok(Self {
            actions: action_rows
                .into_iter()
                .map(|row| row.map(Option::unwrap_or_default))
                .collect(),
            gotos: goto_rows,
        })
    }

    /// The precomputed SLR(1) table for [`Grammar::expression`].
    ///
    /// ```text
    /// state | id   +    *    (    )    $    | E  T  F
    ///     0 | s5             s4             | 1  2  3
    ///     1 |      s6                  acc  |
    ///     2 |      r1   s7        r1   r1   |
    ///     3 |      r3   r3        r3   r3   |
    ///     4 | s5             s4             | 8  2  3
    ///     5 |      r5   r5        r5   r5   |
    ///     6 | s5             s4             |    9  3
    ///     7 | s5             s4             |       10
    ///     8 |      s6             s11       |
    ///     9 |      r0   s7        r0   r0   |
    ///    10 |      r2   r2        r2   r2   |
    ///    11 |      r4   r4        r4   r4   |
    /// ```
    ///
    /// # Errors
    /// [`Error::MalformedTable`] if `grammar` has fewer than six productions.
    pub fn expression(grammar: &Grammar) -> Result<Self> {
        use Symbol::*;
        fn s(state: usize) -> Action {
            Action::Shift(StateId(state))
        }
        fn r(prod: usize) -> Action {
            Action::Reduce(prod)
        }

        let mut actions = Vec::new();
        let mut row = |state: usize, cells: &[(Symbol, Action)]| {
            for &(symbol, action) in cells {
                actions.push(ActionCell {
                    state: StateId(state),
                    symbol,
                    action,
                });
            }
        };
        row(0, &[(Id, s(5)), (LParen, s(4))]);
        row(1, &[(Plus, s(6)), (End, Action::Accept)]);
        row(2, &[(Plus, r(1)), (Star, s(7)), (RParen, r(1)), (End, r(1))]);
        row(3, &[(Plus, r(3)), (Star, r(3)), (RParen, r(3)), (End, r(3))]);
        row(4, &[(Id, s(5)), (LParen, s(4))]);
        row(5, &[(Plus, r(5)), (Star, r(5)), (RParen, r(5)), (End, r(5))]);
        row(6, &[(Id, s(5)), (LParen, s(4))]);
        row(7, &[(Id, s(5)), (LParen, s(4))]);
        row(8, &[(Plus, s(6)), (RParen, s(11))]);
        row(9, &[(Plus, r(0)), (Star, s(7)), (RParen, r(0)), (End, r(0))]);
        row(10, &[(Plus, r(2)), (Star, r(2)), (RParen, r(2)), (End, r(2))]);
        row(11, &[(Plus, r(4)), (Star, r(4)), (RParen, r(4)), (End, r(4))]);

        let gotos = [
            (0, E, 1),
            (0, T, 2),
            (0, F, 3),
            (4, E, 8),
            (4, T, 2),
            (4, F, 3),
            (6, T, 9),
            (6, F, 3),
            (7, F, 10),
        ]
        .into_iter()
        .map(|(state, symbol, target)| GotoCell {
            state: StateId(state),
            symbol,
            target: StateId(target),
        });

        Self::new(grammar, actions, gotos)
    }

    pub fn state_count(&self) -> usize {
        self.actions.len()
    }

    /// Looks up the action for `state` on the terminal `symbol`.
    ///
    /// Undefined cells, including every cell of a state outside the table,
    /// yield [`Action::Error`].
    ///
    /// # Errors
    /// [`Error::InvalidQuery`] if `symbol` is a non-terminal.
    pub fn action_for(&self, state: StateId, symbol: Symbol) -> Result<Action> {
        if !symbol.is_terminal() {
            return Err(Error::InvalidQuery {
                query: "action",
                expected: "terminal",
                symbol,
            });
        }
        Ok(self
            .actions
            .get(state.0)
            .map_or(Action::Error, |row| row[symbol.column()]))
    }

    /// Looks up the state reached from `state` after reducing to `symbol`.
    ///
    /// # Errors
    /// - [`Error::InvalidQuery`] if `symbol` is a terminal;
    /// - [`Error::MissingGoto`] if the cell is undefined.
    pub fn goto_for(&self, state: StateId, symbol: Symbol) -> Result<StateId> {
        if !symbol.is_non_terminal() {
            return Err(Error::InvalidQuery {
                query: "goto",
                expected: "non-terminal",
                symbol,
            });
        }
        self.gotos
            .get(state.0)
            .and_then(|row| row[symbol.column()])
            .ok_or(Error::MissingGoto { state, symbol })
    }

    /// All defined (non-error) action cells, row by row.
    pub fn action_cells(&self) -> impl Iterator<Item = ActionCell> + '_ {
        self.actions.iter().enumerate().flat_map(|(state, row)| {
            Symbol::TERMINALS
                .iter()
                .zip(row.iter())
                .filter(|(_, action)| **action != Action::Error)
                .map(move |(&symbol, &action)| ActionCell {
                    state: StateId(state),
                    symbol,
                    action,
                })
        })
    }

    /// All defined goto cells, row by row.
    pub fn goto_cells(&self) -> impl Iterator<Item = GotoCell> + '_ {
        self.gotos.iter().enumerate().flat_map(|(state, row)| {
            Symbol::NON_TERMINALS
                .iter()
                .zip(row.iter())
                .filter_map(move |(&symbol, target)| {
                    target.map(|target| GotoCell {
                        state: StateId(state),
                        symbol,
                        target,
                    })
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Symbol::*;

    const NO_ACTIONS: [ActionCell; 0] = [];
    const NO_GOTOS: [GotoCell; 0] = [];

    fn assert_malformed(result: Result<ParsingTable>, want: &str) {
        match result {
            Err(Error::MalformedTable(msg)) => assert_eq!(msg.as_str(), want),
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("no error"),
        }
    }

    fn cell(state: usize, symbol: Symbol, action: Action) -> ActionCell {
        ActionCell {
            state: StateId(state),
            symbol,
            action,
        }
    }

    fn goto(state: usize, symbol: Symbol, target: usize) -> GotoCell {
        GotoCell {
            state: StateId(state),
            symbol,
            target: StateId(target),
        }
    }

    #[test]
    fn expression_table_shape() {
        let g = Grammar::expression();
        let t = ParsingTable::expression(&g).unwrap();
        assert_eq!(t.state_count(), 12);
        assert_eq!(t.action_for(StateId(0), Id), Ok(Action::Shift(StateId(5))));
        assert_eq!(t.action_for(StateId(1), End), Ok(Action::Accept));
        assert_eq!(t.action_for(StateId(9), Star), Ok(Action::Shift(StateId(7))));
        assert_eq!(t.action_for(StateId(11), RParen), Ok(Action::Reduce(4)));
        assert_eq!(t.goto_for(StateId(7), F), Ok(StateId(10)));
        assert_eq!(t.goto_for(StateId(4), E), Ok(StateId(8)));
        assert_eq!(t.action_cells().count(), 36);
        assert_eq!(t.goto_cells().count(), 9);
    }

    #[test]
    fn missing_cells_are_errors() {
        let g = Grammar::expression();
        let t = ParsingTable::expression(&g).unwrap();
        for state in 0..t.state_count() + 3 {
            for sym in Symbol::TERMINALS {
                let action = t.action_for(StateId(state), sym).unwrap();
                let defined = t
                    .action_cells()
                    .any(|c| c.state == StateId(state) && c.symbol == sym);
                assert_eq!(action == Action::Error, !defined);
            }
        }
        assert_eq!(t.action_for(StateId(0), End), Ok(Action::Error));
        assert_eq!(t.action_for(StateId(99), Id), Ok(Action::Error));
    }

    #[test]
    fn queries_check_symbol_category() {
        let g = Grammar::expression();
        let t = ParsingTable::expression(&g).unwrap();
        assert_eq!(
            t.action_for(StateId(0), E),
            Err(Error::InvalidQuery {
                query: "action",
                expected: "terminal",
                symbol: E
            })
        );
        assert_eq!(
            t.goto_for(StateId(0), Plus),
            Err(Error::InvalidQuery {
                query: "goto",
                expected: "non-terminal",
                symbol: Plus
            })
        );
        assert_eq!(
            t.goto_for(StateId(1), T),
            Err(Error::MissingGoto {
                state: StateId(1),
                symbol: T
            })
        );
    }

    #[test]
    fn construction_is_idempotent() {
        let g = Grammar::expression();
        let a = ParsingTable::expression(&g).unwrap();
        let b = ParsingTable::new(&g, a.action_cells(), a.goto_cells()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn duplicate_identical_cells_are_accepted() {
        let g = Grammar::expression();
        let t = ParsingTable::new(
            &g,
            [cell(0, Id, Action::Reduce(5)), cell(0, Id, Action::Reduce(5))],
            NO_GOTOS,
        )
        .unwrap();
        assert_eq!(t.state_count(), 1);
        assert_eq!(t.action_for(StateId(0), Id), Ok(Action::Reduce(5)));
    }

    #[test]
    fn explicit_error_cells_read_as_error() {
        let g = Grammar::expression();
        let t = ParsingTable::new(&g, [cell(2, Plus, Action::Error)], NO_GOTOS).unwrap();
        assert_eq!(t.state_count(), 3);
        assert_eq!(t.action_for(StateId(2), Plus), Ok(Action::Error));
        assert_eq!(t.action_cells().count(), 0);
    }

    #[test]
    fn validation_failures() {
        let g = Grammar::expression();
        assert_malformed(ParsingTable::new(&g, NO_ACTIONS, NO_GOTOS), "table has no cells");
        assert_malformed(
            ParsingTable::new(&g, [cell(0, E, Action::Accept)], NO_GOTOS),
            "action cell (0, E) is keyed by a non-terminal",
        );
        assert_malformed(
            ParsingTable::new(&g, [cell(0, Id, Action::Shift(StateId(1)))], NO_GOTOS),
            "action cell (0, id) shifts to unknown state 1",
        );
        assert_malformed(
            ParsingTable::new(&g, [cell(0, Id, Action::Reduce(6))], NO_GOTOS),
            "action cell (0, id) reduces by unknown production 6",
        );
        assert_malformed(
            ParsingTable::new(&g, [cell(0, Id, Action::Accept)], NO_GOTOS),
            "action cell (0, id) accepts before end of input",
        );
        assert_malformed(
            ParsingTable::new(&g, [cell(0, End, Action::Shift(StateId(0)))], NO_GOTOS),
            "action cell (0, $) shifts past end of input",
        );
        assert_malformed(
            ParsingTable::new(
                &g,
                [cell(0, Plus, Action::Reduce(0)), cell(0, Plus, Action::Reduce(1))],
                NO_GOTOS,
            ),
            "conflict in cell (0, +): r0 vs r1",
        );
        assert_malformed(
            ParsingTable::new(&g, [cell(0, End, Action::Accept)], [goto(0, Id, 0)]),
            "goto cell (0, id) is keyed by a terminal",
        );
        assert_malformed(
            ParsingTable::new(&g, [cell(0, End, Action::Accept)], [goto(0, E, 4)]),
            "goto cell (0, E) targets unknown state 4",
        );
        assert_malformed(
            ParsingTable::new(
                &g,
                [cell(1, End, Action::Accept)],
                [goto(0, E, 1), goto(0, E, 0)],
            ),
            "conflict in goto cell (0, E): 1 vs 0",
        );
    }

    #[test]
    fn reduce_indices_are_checked_against_the_grammar() {
        let small = Grammar::new(E, [(E, vec![Id])]).unwrap();
        assert_malformed(
            ParsingTable::expression(&small),
            "action cell (2, +) reduces by unknown production 1",
        );
    }

    #[test]
    fn action_notation_round_trips() {
        for action in [
            Action::Error,
            Action::Accept,
            Action::Shift(StateId(11)),
            Action::Reduce(0),
        ] {
            assert_eq!(action.to_string().parse::<Action>(), Ok(action));
        }
        for bad in ["", "s", "r", "x1", "s-1", "acc2", "rr"] {
            assert!(bad.parse::<Action>().is_err(), "{:?}", bad);
        }
    }
}
