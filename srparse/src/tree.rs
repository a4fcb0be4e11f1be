use crate::{Action, Error, Grammar, Result, Symbol, Trace};

/// A parse tree rebuilt from the reductions of an accepted parse.
///
/// Nodes live in an arena; a node is created for every reduce, so the root is
/// always the last node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseTree {
    nodes: Vec<Node>,
}

/// An interior node: the production reduced and its children in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub production: usize,
    pub lhs: Symbol,
    pub children: Vec<Child>,
}

/// A child of a parse tree node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Child {
    NonTerminal(usize),
    Terminal(Symbol),
}

impl ParseTree {
    /// Replays the shifts and reduces of `trace`.
    ///
    /// # Errors
    /// - [`Error::MalformedInput`] if the trace does not end in `Accept` or does
    ///   not leave exactly one subtree;
    /// - [`Error::IndexOutOfRange`] if a reduce names an unknown production;
    /// - [`Error::StackUnderflow`] if a reduce needs more subtrees than exist.
    pub fn from_trace(grammar: &Grammar, trace: &Trace) -> Result<Self> {
        if trace.last_action() != Some(Action::Accept) {
            return Err(Error::input("trace does not end in accept"));
        }
        let mut nodes = Vec::new();
        let mut stack: Vec<Child> = Vec::new();
        for step in trace.steps() {
            match step.action {
                Action::Shift(_) => stack.push(Child::Terminal(step.lookahead)),
                Action::Reduce(prod_id) => {
                    let prod = grammar.production_at(prod_id)?;
                    if stack.len() < prod.len() {
                        return Err(Error::StackUnderflow {
                            state: step.state,
                            needed: prod.len(),
                            depth: stack.len(),
                        });
                    }
                    let children = stack.split_off(stack.len() - prod.len());
                    nodes.push(Node {
                        production: prod_id,
                        lhs: prod.lhs(),
                        children,
                    });
                    stack.push(Child::NonTerminal(nodes.len() - 1));
                }
                Action::Accept | Action::Error => {}
            }
        }
        match stack.as_slice() {
            [Child::NonTerminal(root)] if *root + 1 == nodes.len() => Ok(Self { nodes }),
            _ => Err(Error::input(format!(
                "trace leaves {} subtrees instead of one",
                stack.len()
            ))),
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn root(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn root_symbol(&self) -> Symbol {
        self.nodes[self.root()].lhs
    }

    /// The leaves from left to right, which is the consumed input without `$`.
    pub fn frontier(&self) -> Vec<Symbol> {
        fn traverse(tree: &ParseTree, node: usize, out: &mut Vec<Symbol>) {
            for child in &tree.nodes[node].children {
                match *child {
                    Child::NonTerminal(next) => traverse(tree, next, out),
                    Child::Terminal(sym) => out.push(sym),
                }
            }
        }
        let mut out = Vec::new();
        traverse(self, self.root(), &mut out);
        out
    }

    /// One-line rendering such as `E→[T→[F→[id]]]`.
    pub fn visualize(&self) -> std::string::String {
        fn traverse(tree: &ParseTree, node: usize, out: &mut std::string::String) {
            let node = &tree.nodes[node];
            out.push_str(node.lhs.label());
            out.push_str("→[");
            for (i, child) in node.children.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                match *child {
                    Child::NonTerminal(next) => traverse(tree, next, out),
                    Child::Terminal(sym) => out.push_str(sym.label()),
                }
            }
            out.push(']');
        }
        let mut out = std::string::String::new();
        traverse(self, self.root(), &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Driver, ParsingTable};
    use Symbol::*;

    fn parse(input: &[Symbol]) -> (Grammar, Trace) {
        let grammar = Grammar::expression();
        let table = ParsingTable::expression(&grammar).unwrap();
        let trace = Driver::new(&grammar, &table)
            .run(input)
            .unwrap()
            .trace()
            .clone();
        (grammar, trace)
    }

    #[test]
    fn rebuilds_precedence() {
        let input = [Id, Plus, Id, Star, Id];
        let (grammar, trace) = parse(&input);
        let tree = ParseTree::from_trace(&grammar, &trace).unwrap();
        assert_eq!(tree.root_symbol(), E);
        assert_eq!(tree.frontier(), input);
        assert_eq!(tree.nodes().len(), trace.reductions().len());
        assert_eq!(
            tree.visualize(),
            "E→[E→[T→[F→[id]]] + T→[T→[F→[id]] * F→[id]]]"
        );
    }

    #[test]
    fn parentheses_are_leaves() {
        let (grammar, trace) = parse(&[LParen, Id, RParen]);
        let tree = ParseTree::from_trace(&grammar, &trace).unwrap();
        assert_eq!(tree.visualize(), "E→[T→[F→[( E→[T→[F→[id]]] )]]]");
    }

    #[test]
    fn rejected_trace_has_no_tree() {
        let (grammar, trace) = parse(&[Id, Plus]);
        assert!(matches!(
            ParseTree::from_trace(&grammar, &trace),
            Err(Error::MalformedInput(_))
        ));
    }
}
