use std::sync::Arc;

use regex::Regex;

use crate::diagnostics::Fault;
use crate::peg::{LazyText, State};

/// Handle to an expression node in a grammar arena.
///
/// Expressions form a graph (rules share subexpressions, forwards tie
/// recursive knots), so nodes live in an arena and refer to each other by
/// index rather than by pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprId(u32);

impl ExprId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A semantic action attached to an expression node.
///
/// Called with the external state, the match length, and the lazily
/// materialized match text. Returning `Ok(false)` rejects the match: the
/// engine restores cursor and state and reports failure, which lets a
/// semantic check veto a syntactically valid parse.
pub type Action = Arc<dyn Fn(&mut dyn State, usize, &LazyText) -> Result<bool, Fault> + Send + Sync>;

/// The closed algebra of parsing expressions.
pub enum Expr {
    /// Exact text at the cursor.
    Literal(String),
    /// An anchored, atomic regex: matched exactly at the cursor, no
    /// separator skipping, no backtracking into the pattern.
    Pattern { source: String, re: Regex },
    /// Items in order, no separator skipping.
    Sequence(Vec<ExprId>),
    /// Items in order, greedily skipping separators before and between
    /// items.
    Separated(Vec<ExprId>),
    ZeroOrMore(ExprId),
    OneOrMore(ExprId),
    Optional(ExprId),
    /// First successful alternative wins; later ones are never tried.
    OrderedChoice(Vec<ExprId>),
    /// Succeeds iff the inner expression fails; never consumes input.
    NegativeLookahead(ExprId),
    /// A named placeholder, resolved once by `assign` before any parse.
    Forward {
        name: String,
        target: Option<ExprId>,
    },
}

pub(crate) struct Node {
    pub(crate) expr: Expr,
    pub(crate) actions: Vec<Action>,
}

/// Mutable arena used during grammar assembly.
///
/// All construction happens here: combinator constructors allocate nodes,
/// `assign` resolves forwards, `apply` attaches reducers. [`finish`] freezes
/// the arena into an immutable [`Grammar`] shared by every parse.
///
/// [`finish`]: GrammarBuilder::finish
#[derive(Default)]
pub struct GrammarBuilder {
    nodes: Vec<Node>,
    fault: Option<Fault>,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, expr: Expr) -> ExprId {
        let id = ExprId(self.nodes.len() as u32);
        self.nodes.push(Node {
            expr,
            actions: Vec::new(),
        });
        id
    }

    pub fn lit(&mut self, text: &str) -> ExprId {
        self.push(Expr::Literal(text.to_string()))
    }

    /// An anchored regex atom. A pattern that fails to compile poisons the
    /// builder: construction stays chainable, and [`finish`] reports the
    /// first bad pattern as [`Fault::InvalidPattern`].
    ///
    /// [`finish`]: GrammarBuilder::finish
    pub fn pat(&mut self, source: &str) -> ExprId {
        match Regex::new(&format!("^(?:{source})")) {
            Ok(re) => self.push(Expr::Pattern {
                source: source.to_string(),
                re,
            }),
            Err(e) => {
                if self.fault.is_none() {
                    self.fault = Some(Fault::InvalidPattern {
                        pattern: source.to_string(),
                        source: e,
                    });
                }
                self.empty()
            }
        }
    }

    pub fn seq(&mut self, items: Vec<ExprId>) -> ExprId {
        self.push(Expr::Sequence(items))
    }

    /// The empty sequence: matches everywhere, consumes nothing. Used as an
    /// action anchor (introducer markers).
    pub fn empty(&mut self) -> ExprId {
        self.seq(Vec::new())
    }

    /// A sequence that skips separators before and between its items.
    pub fn sep_seq(&mut self, items: Vec<ExprId>) -> ExprId {
        self.push(Expr::Separated(items))
    }

    pub fn rep0(&mut self, inner: ExprId) -> ExprId {
        self.push(Expr::ZeroOrMore(inner))
    }

    pub fn rep1(&mut self, inner: ExprId) -> ExprId {
        self.push(Expr::OneOrMore(inner))
    }

    pub fn opt(&mut self, inner: ExprId) -> ExprId {
        self.push(Expr::Optional(inner))
    }

    pub fn sor(&mut self, alternatives: Vec<ExprId>) -> ExprId {
        self.push(Expr::OrderedChoice(alternatives))
    }

    pub fn not(&mut self, inner: ExprId) -> ExprId {
        self.push(Expr::NegativeLookahead(inner))
    }

    /// A forward declaration for a rule defined later (or mutually
    /// recursively). Must be resolved by [`assign`](Self::assign) before any
    /// parse reaches it.
    pub fn fwd(&mut self, name: &str) -> ExprId {
        self.push(Expr::Forward {
            name: name.to_string(),
            target: None,
        })
    }

    /// Resolve a forward declaration. Fails if `lhs` is not an unresolved
    /// forward, or if `rhs` is itself an unresolved forward.
    pub fn assign(&mut self, lhs: ExprId, rhs: ExprId) -> Result<(), Fault> {
        if let Expr::Forward { name, target: None } = &self.nodes[rhs.index()].expr {
            return Err(Fault::ForwardTarget { rule: name.clone() });
        }
        match &mut self.nodes[lhs.index()].expr {
            Expr::Forward {
                target: target @ None,
                ..
            } => {
                *target = Some(rhs);
                Ok(())
            }
            _ => Err(Fault::NotAForward),
        }
    }

    /// Attach a reducer to a node. Reducers compose: they run in
    /// registration order and a rejection short-circuits the rest, so a
    /// semantics-oriented check can be installed ahead of a tree-building
    /// action.
    pub fn apply(&mut self, expr: ExprId, action: Action) {
        self.nodes[expr.index()].actions.push(action);
    }

    /// A shallow copy of a node: same children, fresh identity, no actions.
    /// Lets two grammar positions share one expression shape while carrying
    /// different reducers. Copying a forward wraps it so later resolution of
    /// the original still reaches the copy.
    pub fn copy_of(&mut self, expr: ExprId) -> ExprId {
        let cloned = match &self.nodes[expr.index()].expr {
            Expr::Literal(s) => Expr::Literal(s.clone()),
            Expr::Pattern { source, re } => Expr::Pattern {
                source: source.clone(),
                re: re.clone(),
            },
            Expr::Sequence(items) => Expr::Sequence(items.clone()),
            Expr::Separated(items) => Expr::Separated(items.clone()),
            Expr::ZeroOrMore(e) => Expr::ZeroOrMore(*e),
            Expr::OneOrMore(e) => Expr::OneOrMore(*e),
            Expr::Optional(e) => Expr::Optional(*e),
            Expr::OrderedChoice(alts) => Expr::OrderedChoice(alts.clone()),
            Expr::NegativeLookahead(e) => Expr::NegativeLookahead(*e),
            Expr::Forward { .. } => Expr::Sequence(vec![expr]),
        };
        self.push(cloned)
    }

    /// A word-boundary-aware literal: matches `word` only when not followed
    /// by `word_tail` (more identifier material). `BEGINNING` is not the
    /// keyword `BEGIN`.
    pub fn keyword(&mut self, word: &str, word_tail: ExprId) -> ExprId {
        let w = self.lit(word);
        let follow = self.not(word_tail);
        self.seq(vec![w, follow])
    }

    /// An identifier that is not a reserved keyword: `pattern` matches, but
    /// not when the input at the cursor is exactly one of `keywords`
    /// (`word_tail` is the boundary test, as in [`keyword`](Self::keyword)).
    pub fn identifier(&mut self, pattern: ExprId, word_tail: ExprId, keywords: &[&str]) -> ExprId {
        let words: Vec<ExprId> = keywords
            .iter()
            .map(|word| self.keyword(word, word_tail))
            .collect();
        let reserved = self.sor(words);
        let guard = self.not(reserved);
        self.seq(vec![guard, pattern])
    }

    /// Freeze the arena. The grammar is read-only from here on and can be
    /// shared by reference across any number of parses. Fails if any
    /// pattern handed to [`pat`] did not compile.
    ///
    /// [`pat`]: GrammarBuilder::pat
    pub fn finish(self) -> Result<Grammar, Fault> {
        match self.fault {
            Some(fault) => Err(fault),
            None => Ok(Grammar { nodes: self.nodes }),
        }
    }
}

/// An immutable, fully assembled expression graph.
pub struct Grammar {
    nodes: Vec<Node>,
}

impl Grammar {
    pub(crate) fn node(&self, id: ExprId) -> &Node {
        &self.nodes[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_rejects_non_forward() {
        let mut g = GrammarBuilder::new();
        let a = g.lit("a");
        let b = g.lit("b");
        assert!(matches!(g.assign(a, b), Err(Fault::NotAForward)));
    }

    #[test]
    fn assign_rejects_unresolved_target() {
        let mut g = GrammarBuilder::new();
        let f = g.fwd("A");
        let t = g.fwd("B");
        assert!(matches!(
            g.assign(f, t),
            Err(Fault::ForwardTarget { rule }) if rule == "B"
        ));
    }

    #[test]
    fn assign_is_one_shot() {
        let mut g = GrammarBuilder::new();
        let f = g.fwd("A");
        let t = g.lit("a");
        g.assign(f, t).unwrap();
        let t2 = g.lit("b");
        assert!(matches!(g.assign(f, t2), Err(Fault::NotAForward)));
    }

    #[test]
    fn bad_pattern_surfaces_at_finish() {
        let mut g = GrammarBuilder::new();
        g.pat("[unclosed");
        g.lit("a");
        assert!(matches!(
            g.finish(),
            Err(Fault::InvalidPattern { pattern, .. }) if pattern == "[unclosed"
        ));
    }
}
