use std::any::Any;

use crate::diagnostics::Fault;
use crate::peg::expr::{Expr, ExprId, Grammar};
use crate::peg::{LazyText, NullState, State};

/// Whether trailing unconsumed input fails the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// The expression must consume the entire input.
    #[default]
    Full,
    /// A successful match of a prefix is enough.
    Prefix,
}

struct Cursor<'t> {
    text: &'t str,
    pos: usize,
}

/// A cursor/state snapshot. The pair is always saved and restored together:
/// that is the invariant that keeps the semantic stack consistent under
/// backtracking.
struct Snapshot {
    pos: usize,
    state: Box<dyn Any>,
}

/// The recursive-descent interpreter for a [`Grammar`].
///
/// A parser is cheap to construct and borrows the grammar; separate parses
/// may share one grammar freely, since the expression graph is immutable
/// after assembly. Recursion depth tracks the nesting depth of the input;
/// deeply nested adversarial inputs are bounded only by the native stack.
pub struct Parser<'g> {
    grammar: &'g Grammar,
    separator: Option<ExprId>,
}

impl<'g> Parser<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self {
            grammar,
            separator: None,
        }
    }

    /// Configure the "skip one separator unit" expression (typically an
    /// ordered choice of comment and whitespace atoms). Applied greedily
    /// before and between the items of every separated sequence; separator
    /// matches never trigger actions because separator expressions carry
    /// none.
    pub fn with_separator(grammar: &'g Grammar, separator: ExprId) -> Self {
        Self {
            grammar,
            separator: Some(separator),
        }
    }

    /// Full-match syntax check with no semantic state.
    pub fn parse(&self, expr: ExprId, text: &str) -> Result<bool, Fault> {
        self.parse_in(expr, text, MatchMode::Full, &mut NullState)
    }

    /// Match `expr` against `text`, threading `state` through every step.
    /// `Ok(false)` is ordinary rejection of the input; `Err` is a grammar
    /// construction bug surfacing (see [`Fault`]).
    pub fn parse_in(
        &self,
        expr: ExprId,
        text: &str,
        mode: MatchMode,
        state: &mut dyn State,
    ) -> Result<bool, Fault> {
        let mut cursor = Cursor { text, pos: 0 };
        if !self.eval(expr, &mut cursor, state)? {
            return Ok(false);
        }
        Ok(mode == MatchMode::Prefix || cursor.pos == text.len())
    }

    /// Evaluate one node: run the combinator, then the node's actions. An
    /// action rejection restores the pre-match snapshot, exactly like a
    /// syntactic failure.
    fn eval(&self, id: ExprId, cursor: &mut Cursor, state: &mut dyn State) -> Result<bool, Fault> {
        let node = self.grammar.node(id);
        if node.actions.is_empty() {
            return self.eval_expr(&node.expr, cursor, state);
        }

        let begin = cursor.pos;
        let saved = Self::snapshot(cursor, state);
        if !self.eval_expr(&node.expr, cursor, state)? {
            return Ok(false);
        }
        let len = cursor.pos - begin;
        let text = LazyText::new(cursor.text, begin, cursor.pos);
        for action in &node.actions {
            if !action(state, len, &text)? {
                Self::restore(cursor, state, &saved);
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn eval_expr(
        &self,
        expr: &Expr,
        cursor: &mut Cursor,
        state: &mut dyn State,
    ) -> Result<bool, Fault> {
        match expr {
            Expr::Literal(text) => {
                if cursor.text[cursor.pos..].starts_with(text.as_str()) {
                    cursor.pos += text.len();
                    Ok(true)
                } else {
                    Ok(false)
                }
            }

            Expr::Pattern { re, .. } => match re.find(&cursor.text[cursor.pos..]) {
                Some(m) => {
                    cursor.pos += m.end();
                    Ok(true)
                }
                None => Ok(false),
            },

            Expr::Sequence(items) => {
                let saved = Self::snapshot(cursor, state);
                for item in items {
                    if !self.eval(*item, cursor, state)? {
                        Self::restore(cursor, state, &saved);
                        return Ok(false);
                    }
                }
                Ok(true)
            }

            Expr::Separated(items) => {
                let saved = Self::snapshot(cursor, state);
                self.skip_separators(cursor, state)?;
                for item in items {
                    if !self.eval(*item, cursor, state)? {
                        Self::restore(cursor, state, &saved);
                        return Ok(false);
                    }
                    self.skip_separators(cursor, state)?;
                }
                Ok(true)
            }

            Expr::Optional(inner) => {
                let saved = Self::snapshot(cursor, state);
                if !self.eval(*inner, cursor, state)? {
                    Self::restore(cursor, state, &saved);
                }
                Ok(true)
            }

            Expr::ZeroOrMore(inner) => {
                self.repeat(*inner, cursor, state)?;
                Ok(true)
            }

            Expr::OneOrMore(inner) => {
                if !self.eval(*inner, cursor, state)? {
                    return Ok(false);
                }
                self.repeat(*inner, cursor, state)?;
                Ok(true)
            }

            Expr::OrderedChoice(alternatives) => {
                let saved = Self::snapshot(cursor, state);
                for alternative in alternatives {
                    Self::restore(cursor, state, &saved);
                    if self.eval(*alternative, cursor, state)? {
                        return Ok(true);
                    }
                }
                Self::restore(cursor, state, &saved);
                Ok(false)
            }

            Expr::NegativeLookahead(inner) => {
                let saved = Self::snapshot(cursor, state);
                let matched = self.eval(*inner, cursor, state)?;
                Self::restore(cursor, state, &saved);
                Ok(!matched)
            }

            Expr::Forward { name, target } => match target {
                Some(t) => self.eval(*t, cursor, state),
                None => Err(Fault::UnresolvedForward { rule: name.clone() }),
            },
        }
    }

    /// Tail of a repetition: keep matching `inner` until it fails. A
    /// successful iteration that consumes nothing means the grammar wrapped
    /// a nullable expression in a repetition; that would loop forever, so it
    /// faults instead.
    fn repeat(&self, inner: ExprId, cursor: &mut Cursor, state: &mut dyn State) -> Result<(), Fault> {
        let mut last = cursor.pos;
        while self.eval(inner, cursor, state)? {
            if cursor.pos == last {
                return Err(Fault::NullableRepetition { at: cursor.pos });
            }
            last = cursor.pos;
        }
        Ok(())
    }

    /// Greedily consume separator units. Stops on a zero-progress match so a
    /// nullable separator cannot wedge the engine.
    fn skip_separators(&self, cursor: &mut Cursor, state: &mut dyn State) -> Result<(), Fault> {
        let Some(separator) = self.separator else {
            return Ok(());
        };
        loop {
            let before = cursor.pos;
            if !self.eval(separator, cursor, state)? || cursor.pos == before {
                return Ok(());
            }
        }
    }

    fn snapshot(cursor: &Cursor, state: &dyn State) -> Snapshot {
        Snapshot {
            pos: cursor.pos,
            state: state.save(),
        }
    }

    fn restore(cursor: &mut Cursor, state: &mut dyn State, saved: &Snapshot) {
        cursor.pos = saved.pos;
        state.restore(saved.state.as_ref());
    }
}

// ==== TESTS ====

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peg::expr::{Action, GrammarBuilder};

    /// A state that records which actions ran, for observing rollback.
    #[derive(Debug, Default)]
    struct Tally(Vec<&'static str>);

    impl State for Tally {
        fn save(&self) -> Box<dyn std::any::Any> {
            Box::new(self.0.clone())
        }

        fn restore(&mut self, saved: &dyn std::any::Any) {
            if let Some(entries) = saved.downcast_ref::<Vec<&'static str>>() {
                self.0 = entries.clone();
            }
        }

        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    }

    fn record(entry: &'static str, verdict: bool) -> Action {
        std::sync::Arc::new(move |state: &mut dyn State, _, _| {
            if let Some(tally) = state.as_any_mut().downcast_mut::<Tally>() {
                tally.0.push(entry);
            }
            Ok(verdict)
        })
    }

    #[test]
    fn literal_and_pattern() {
        let mut b = GrammarBuilder::new();
        let hello = b.lit("hello");
        let digits = b.pat("[0-9]+");
        let g = b.finish().unwrap();
        let p = Parser::new(&g);
        assert!(p.parse(hello, "hello").unwrap());
        assert!(!p.parse(hello, "hell").unwrap());
        assert!(p.parse(digits, "12345").unwrap());
        assert!(!p.parse(digits, "12a").unwrap());
        assert!(p.parse_in(digits, "12a", MatchMode::Prefix, &mut NullState).unwrap());
    }

    #[test]
    fn pattern_is_anchored() {
        let mut b = GrammarBuilder::new();
        let digits = b.pat("[0-9]+");
        let g = b.finish().unwrap();
        let p = Parser::new(&g);
        // A match later in the input does not count.
        assert!(!p.parse(digits, "ab12").unwrap());
    }

    #[test]
    fn ordered_choice_takes_first_match() {
        let mut b = GrammarBuilder::new();
        let ab = b.lit("ab");
        let abc = b.lit("abc");
        let choice = b.sor(vec![ab, abc]);
        let g = b.finish().unwrap();
        let p = Parser::new(&g);
        // "ab" matches first and wins, leaving "c" unconsumed.
        assert!(!p.parse(choice, "abc").unwrap());
        assert!(p.parse_in(choice, "abc", MatchMode::Prefix, &mut NullState).unwrap());
    }

    #[test]
    fn optional_and_repetition() {
        let mut b = GrammarBuilder::new();
        let a = b.lit("a");
        let opt_a = b.opt(a);
        let b1 = b.lit("b");
        let word = b.seq(vec![opt_a, b1]);
        let many = b.rep0(word);
        let g = b.finish().unwrap();
        let p = Parser::new(&g);
        assert!(p.parse(many, "").unwrap());
        assert!(p.parse(many, "babab").unwrap());
        assert!(!p.parse(many, "aa").unwrap());
    }

    #[test]
    fn nullable_repetition_faults() {
        let mut b = GrammarBuilder::new();
        let a = b.lit("a");
        let opt_a = b.opt(a);
        let many = b.rep0(opt_a);
        let g = b.finish().unwrap();
        let p = Parser::new(&g);
        assert!(matches!(
            p.parse(many, "b"),
            Err(Fault::NullableRepetition { .. })
        ));
    }

    #[test]
    fn negative_lookahead() {
        let mut b = GrammarBuilder::new();
        let kw = b.lit("if");
        let tail = b.pat("[a-z]");
        let not_tail = b.not(tail);
        let exact = b.seq(vec![kw, not_tail]);
        let g = b.finish().unwrap();
        let p = Parser::new(&g);
        assert!(p.parse_in(exact, "if x", MatchMode::Prefix, &mut NullState).unwrap());
        assert!(!p.parse_in(exact, "iffy", MatchMode::Prefix, &mut NullState).unwrap());
    }

    #[test]
    fn unresolved_forward_faults() {
        let mut b = GrammarBuilder::new();
        let fwd = b.fwd("Pending");
        let g = b.finish().unwrap();
        let p = Parser::new(&g);
        assert!(matches!(
            p.parse(fwd, "x"),
            Err(Fault::UnresolvedForward { .. })
        ));
    }

    #[test]
    fn separated_sequence_skips_comments_and_whitespace() {
        let mut b = GrammarBuilder::new();
        let ws = b.pat("[ \\t\\r\\n]");
        let comment = b.pat("--[^\\n]*\\n");
        let sep = b.sor(vec![comment, ws]);
        let a = b.lit("a");
        let b1 = b.lit("b");
        let pair = b.sep_seq(vec![a, b1]);
        let g = b.finish().unwrap();
        let p = Parser::with_separator(&g, sep);
        assert!(p.parse(pair, "ab").unwrap());
        assert!(p.parse(pair, "  a -- gap\n b ").unwrap());
        assert!(!p.parse(pair, "a x b").unwrap());
    }

    #[test]
    fn backtracking_restores_position() {
        let mut b = GrammarBuilder::new();
        let ab = b.lit("ab");
        let c = b.lit("c");
        let abc = b.seq(vec![ab, c]);
        let abd = b.lit("abd");
        let choice = b.sor(vec![abc, abd]);
        let g = b.finish().unwrap();
        let p = Parser::new(&g);
        // The first alternative consumes "ab" then fails on "c"; the second
        // must see the input from the start again.
        assert!(p.parse(choice, "abd").unwrap());
    }

    #[test]
    fn rejecting_action_restores_state_and_cursor() {
        let mut b = GrammarBuilder::new();
        let veto = b.lit("ab");
        b.apply(veto, record("vetoed", false));
        let keep = b.lit("ab");
        b.apply(keep, record("kept", true));
        let choice = b.sor(vec![veto, keep]);
        let g = b.finish().unwrap();
        let p = Parser::new(&g);
        let mut state = Tally::default();
        assert!(p.parse_in(choice, "ab", MatchMode::Full, &mut state).unwrap());
        // The veto ran and mutated the state, but its branch failed; only
        // the second alternative's effect may survive.
        assert_eq!(state.0, vec!["kept"]);
    }

    #[test]
    fn optional_rolls_back_actioned_inner_on_failure() {
        let mut b = GrammarBuilder::new();
        let a = b.lit("a");
        b.apply(a, record("a", true));
        let bee = b.lit("b");
        let inner = b.seq(vec![a, bee]);
        let maybe = b.opt(inner);
        let tail = b.lit("a");
        let whole = b.seq(vec![maybe, tail]);
        let g = b.finish().unwrap();
        let p = Parser::new(&g);
        let mut state = Tally::default();
        assert!(p.parse_in(whole, "a", MatchMode::Full, &mut state).unwrap());
        // Inside the optional, "a" matched and its action ran before "b"
        // failed the sequence; the identity outcome must erase that effect.
        assert!(state.0.is_empty());
    }
}
