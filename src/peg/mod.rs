//! The backtracking PEG engine.
//!
//! Grammars are values: [`GrammarBuilder`] allocates expression nodes into an
//! arena and hands back [`ExprId`] handles; [`Parser`] interprets a node
//! against an input string. Recursive and mutually recursive rules are tied
//! with forward declarations resolved once by [`GrammarBuilder::assign`].
//!
//! Semantic side effects run through a caller-supplied [`State`]: every
//! combinator that can fail after consuming input snapshots the cursor and
//! state together and restores both before reporting failure, so no partial
//! effect escapes a failed branch.

mod engine;
mod expr;
mod lazy;

pub use engine::{MatchMode, Parser};
pub use expr::{Action, Expr, ExprId, Grammar, GrammarBuilder};
pub use lazy::LazyText;

use std::any::Any;

/// A save/restore-capable container for semantic side effects, threaded
/// through every parse step so backtracking can roll it back.
pub trait State {
    /// Capture an opaque snapshot of the current state.
    fn save(&self) -> Box<dyn Any>;

    /// Revert to a previously captured snapshot. The same snapshot may be
    /// restored more than once (ordered choice restores before each
    /// alternative).
    fn restore(&mut self, saved: &dyn Any);

    /// Downcasting hook for reducers that need the concrete state type.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A state with no effects, for pure syntax checks.
#[derive(Debug, Default)]
pub struct NullState;

impl State for NullState {
    fn save(&self) -> Box<dyn Any> {
        Box::new(())
    }

    fn restore(&mut self, _saved: &dyn Any) {}

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
