pub use crate::actions::{Asn1State, Item};
pub use crate::diagnostics::Fault;
pub use crate::grammar::Asn1Rules;
pub use crate::notation::Asn1Notation;
pub use crate::peg::{
    Action, ExprId, Grammar, GrammarBuilder, LazyText, MatchMode, NullState, Parser, State,
};

pub mod actions;
pub mod ast;
pub mod diagnostics;
pub mod grammar;
pub mod notation;
pub mod peg;
pub mod stack;
