use crate::{Error, Result, Symbol};

/// Read-only input of one parse, with a cursor that only moves forward.
///
/// The stored sequence always ends with exactly one `$`; it is appended when
/// the caller leaves it out. Reading past the end yields `$` as well.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputBuffer {
    tokens: Vec<Symbol>,
    cursor: usize,
}

impl InputBuffer {
    /// Wraps a terminal sequence.
    ///
    /// # Errors
    /// [`Error::MalformedInput`] if a token is a non-terminal, or if `$`
    /// appears anywhere but in the last position.
    pub fn new(tokens: &[Symbol]) -> Result<Self> {
        for (pos, &sym) in tokens.iter().enumerate() {
            if !sym.is_terminal() {
                return Err(Error::input(format!(
                    "non-terminal `{}` at position {}",
                    sym, pos
                )));
            }
            if sym == Symbol::End && pos + 1 != tokens.len() {
                return Err(Error::input(format!(
                    "end marker `$` at position {} is not last",
                    pos
                )));
            }
        }
        let mut tokens = tokens.to_vec();
        if tokens.last() != Some(&Symbol::End) {
            tokens.push(Symbol::End);
        }
        Ok(Self { tokens, cursor: 0 })
    }

    /// The current lookahead, `$` once the input is exhausted.
    #[inline]
    pub fn lookahead(&self) -> Symbol {
        self.tokens.get(self.cursor).copied().unwrap_or(Symbol::End)
    }

    /// Cursor position, counted in tokens from 0.
    #[inline]
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Consumes the lookahead.
    #[inline]
    pub fn advance(&mut self) {
        self.cursor += 1;
    }

    /// All tokens, including the final `$`.
    pub fn tokens(&self) -> &[Symbol] {
        &self.tokens
    }

    /// Tokens not consumed yet.
    pub fn remaining(&self) -> &[Symbol] {
        &self.tokens[self.cursor.min(self.tokens.len())..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Symbol::*;

    #[test]
    fn end_marker_is_appended_once() {
        let a = InputBuffer::new(&[Id, Plus, Id]).unwrap();
        let b = InputBuffer::new(&[Id, Plus, Id, End]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.tokens(), &[Id, Plus, Id, End]);
        assert_eq!(InputBuffer::new(&[]).unwrap().tokens(), &[End]);
    }

    #[test]
    fn cursor_moves_forward_and_reads_end_past_the_end() {
        let mut input = InputBuffer::new(&[Id, End]).unwrap();
        assert_eq!(input.lookahead(), Id);
        input.advance();
        assert_eq!((input.position(), input.lookahead()), (1, End));
        input.advance();
        input.advance();
        assert_eq!(input.lookahead(), End);
        assert!(input.remaining().is_empty());
    }

    #[test]
    fn rejects_non_terminals_and_inner_end_markers() {
        assert_eq!(
            InputBuffer::new(&[Id, E]),
            Err(Error::MalformedInput("non-terminal `E` at position 1".into()))
        );
        assert_eq!(
            InputBuffer::new(&[Id, End, Id]),
            Err(Error::MalformedInput(
                "end marker `$` at position 1 is not last".into()
            ))
        );
    }
}
