//! Fatal engine faults.
//!
//! Ordinary syntactic rejection is never an error value: the engine reports
//! it as `Ok(false)` and rolls the cursor and semantic state back to the
//! nearest snapshot. A `Fault` is different in kind — it means the grammar
//! and its actions have drifted out of sync (an unresolved forward rule, a
//! repetition over a nullable expression, a reducer popping the wrong item).
//! Faults abort the parse and are not recoverable by grammar code.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum Fault {
    /// A forward-declared rule was dereferenced before `assign` resolved it.
    #[error("unassigned forward rule: {rule}")]
    #[diagnostic(code(asn1_notation::unresolved_forward))]
    UnresolvedForward { rule: String },

    /// `assign` was called on something other than an unresolved forward.
    #[error("attempt to overwrite a non-forward expression")]
    #[diagnostic(code(asn1_notation::not_a_forward))]
    NotAForward,

    /// `assign` was handed a forward placeholder as the target.
    #[error("forward rule {rule} assigned to an unresolved forward")]
    #[diagnostic(code(asn1_notation::forward_target))]
    ForwardTarget { rule: String },

    /// A repetition matched without consuming input; looping would never end.
    #[error("repetition of a nullable expression at byte {at}")]
    #[diagnostic(code(asn1_notation::nullable_repetition))]
    NullableRepetition { at: usize },

    /// A regex atom failed to compile.
    #[error("invalid pattern {pattern:?}")]
    #[diagnostic(code(asn1_notation::invalid_pattern))]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A reducer popped an empty semantic stack.
    #[error("semantic stack underflow in {rule}")]
    #[diagnostic(code(asn1_notation::stack_underflow))]
    StackUnderflow { rule: &'static str },

    /// A reducer popped an item whose tag does not match the production shape.
    #[error("unexpected {found} item on the semantic stack in {rule}")]
    #[diagnostic(code(asn1_notation::item_mismatch))]
    ItemMismatch {
        rule: &'static str,
        found: &'static str,
    },
}
