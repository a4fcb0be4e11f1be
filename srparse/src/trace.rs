use crate::{Action, StateId, Symbol};

/// One driver step: the configuration it started from and the action taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Step {
    /// State on top of the stack.
    pub state: StateId,
    /// Lookahead terminal.
    pub lookahead: Symbol,
    /// Input cursor position.
    pub position: usize,
    /// Stack depth before the action.
    pub depth: usize,
    /// The action the table prescribed.
    pub action: Action,
}

/// Counters gathered over a parse, in the spirit of per-run parser statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub steps: usize,
    pub shifts: usize,
    pub reductions: usize,
}

/// The ordered record of every step of a parse.
///
/// Two runs over the same input with the same table produce equal traces.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Trace {
    steps: Vec<Step>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The actions taken, in order.
    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.steps.iter().map(|step| step.action)
    }

    /// The indices of the productions reduced, in order.
    pub fn reductions(&self) -> Vec<usize> {
        self.actions()
            .filter_map(|action| match action {
                Action::Reduce(prod) => Some(prod),
                _ => None,
            })
            .collect()
    }

    pub fn last_action(&self) -> Option<Action> {
        self.steps.last().map(|step| step.action)
    }

    pub fn stats(&self) -> ParseStats {
        self.actions().fold(
            ParseStats {
                steps: self.steps.len(),
                ..ParseStats::default()
            },
            |mut stats, action| {
                match action {
                    Action::Shift(_) => stats.shifts += 1,
                    Action::Reduce(_) => stats.reductions += 1,
                    Action::Accept | Action::Error => {}
                }
                stats
            },
        )
    }
}
