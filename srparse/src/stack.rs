use crate::{Error, Result, StateId, Symbol};

/// The state stack of one parse.
///
/// Starts as `[0]`. A parallel history of the symbols that led to each state
/// is kept for tracing; the states alone decide every transition. The bottom
/// state is never popped, so `states().len() == symbols().len() + 1` always
/// holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserStack {
    states: Vec<StateId>,
    symbols: Vec<Symbol>,
}

impl Default for ParserStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserStack {
    pub fn new() -> Self {
        Self {
            states: vec![StateId::START],
            symbols: Vec::new(),
        }
    }

    /// The state on top of the stack.
    #[inline]
    pub fn top(&self) -> StateId {
        // The bottom state is never popped.
        self.states[self.states.len() - 1]
    }

    /// Number of states on the stack, including the bottom state.
    #[inline]
    pub fn depth(&self) -> usize {
        self.states.len()
    }

    pub fn states(&self) -> &[StateId] {
        &self.states
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Pushes `state`, reached on `symbol`.
    pub fn push(&mut self, state: StateId, symbol: Symbol) {
        self.states.push(state);
        self.symbols.push(symbol);
    }

    /// Pops `count` states.
    ///
    /// # Errors
    /// [`Error::StackUnderflow`] if fewer than `count + 1` states are on the
    /// stack, since a reduce must leave a state to take the goto from. The
    /// stack is left untouched in that case.
    pub fn pop(&mut self, count: usize) -> Result<()> {
        if count >= self.states.len() {
            return Err(Error::StackUnderflow {
                state: self.top(),
                needed: count,
                depth: self.states.len(),
            });
        }
        let keep = self.states.len() - count;
        self.states.truncate(keep);
        self.symbols.truncate(keep - 1);
        Ok(())
    }
}
