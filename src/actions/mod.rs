//! Reducers that turn successful matches into AST values.
//!
//! Every reducer follows the same discipline: pop the items its
//! production's sub-expressions pushed, combine them, push the result.
//! The engine snapshots the whole [`Asn1State`] before any actioned node,
//! so a reducer never has to undo anything itself.
//!
//! Three reducer shapes recur:
//!
//! - *introducers*: zero-width rules that push an empty accumulator or a
//!   bare marker before the items of a list start arriving;
//! - *accumulators*: per-item rules that pop the accumulator and the new
//!   item and push the extended accumulator;
//! - *closers*: rules at the end of a production that pop everything down
//!   to the introducer (or a fixed arity) and push the finished construct.
//!
//! A reducer returning `Ok(false)` rejects the branch syntactically and
//! the engine backtracks; `Err` means the stack did not have the shape the
//! grammar guarantees, which is a bug in the grammar/action pairing, not
//! in the input.

mod constraints;
mod items;
mod lexical;
mod modules;
mod types;
mod values;

pub use items::{BitsOrNames, Item, RangeInProgress};

use std::any::Any;
use std::sync::Arc;

use crate::diagnostics::Fault;
use crate::grammar::Asn1Rules;
use crate::peg::{Action, GrammarBuilder, LazyText, State};
use crate::stack::Stack;

/// The reduction state: a persistent stack of [`Item`]s.
///
/// Snapshots are O(1) because the underlying vector is persistent; the
/// engine saves and restores freely around every actioned node.
#[derive(Debug, Clone, Default)]
pub struct Asn1State {
    pub stack: Stack<Item>,
}

impl Asn1State {
    pub fn new() -> Self {
        Self::default()
    }

    /// The sole remaining item after a completed parse, if there is
    /// exactly one.
    pub fn into_result(mut self) -> Option<Item> {
        let item = self.stack.pop()?;
        self.stack.is_empty().then_some(item)
    }
}

impl State for Asn1State {
    fn save(&self) -> Box<dyn Any> {
        Box::new(self.stack.clone())
    }

    fn restore(&mut self, saved: &dyn Any) {
        if let Some(stack) = saved.downcast_ref::<Stack<Item>>() {
            self.stack = stack.clone();
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Install every reducer onto the grammar in `b`.
pub fn install(b: &mut GrammarBuilder, r: &Asn1Rules) {
    lexical::install(b, r);
    types::install(b, r);
    values::install(b, r);
    constraints::install(b, r);
    modules::install(b, r);
}

/// Adapt a reducer over the concrete stack into an [`Action`].
///
/// When the parse is driven by some other state (a plain recognizer run,
/// say), the reducer is skipped and the match accepted unchanged.
fn reduce<F>(f: F) -> Action
where
    F: Fn(&mut Stack<Item>, usize, &LazyText) -> Result<bool, Fault> + Send + Sync + 'static,
{
    Arc::new(move |state: &mut dyn State, len: usize, txt: &LazyText| {
        match state.as_any_mut().downcast_mut::<Asn1State>() {
            Some(asn1) => f(&mut asn1.stack, len, txt),
            None => Ok(true),
        }
    })
}

fn pop1(stack: &mut Stack<Item>, rule: &'static str) -> Result<Item, Fault> {
    stack.pop().ok_or(Fault::StackUnderflow { rule })
}

fn pop2(stack: &mut Stack<Item>, rule: &'static str) -> Result<(Item, Item), Fault> {
    stack.pop2().ok_or(Fault::StackUnderflow { rule })
}

fn pop3(stack: &mut Stack<Item>, rule: &'static str) -> Result<(Item, Item, Item), Fault> {
    stack.pop3().ok_or(Fault::StackUnderflow { rule })
}

fn pop4(stack: &mut Stack<Item>, rule: &'static str) -> Result<(Item, Item, Item, Item), Fault> {
    stack.pop4().ok_or(Fault::StackUnderflow { rule })
}

fn mismatch(rule: &'static str, item: &Item) -> Fault {
    Fault::ItemMismatch {
        rule,
        found: item.kind_name(),
    }
}
