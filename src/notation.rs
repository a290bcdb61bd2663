//! The assembled notation: grammar, reducers, and separator bundled into
//! one immutable value.
//!
//! Construction happens exactly once per [`Asn1Notation`]; after
//! [`Asn1Notation::new`] returns, the grammar is frozen and any number of
//! parses can run against it, each with its own fresh state.

use crate::actions::{self, Asn1State, Item};
use crate::ast::{Module, Type, Value};
use crate::diagnostics::Fault;
use crate::grammar::{self, Asn1Rules};
use crate::peg::{ExprId, Grammar, GrammarBuilder, MatchMode, Parser};

pub struct Asn1Notation {
    grammar: Grammar,
    rules: Asn1Rules,
}

impl Asn1Notation {
    /// Build the grammar and install every reducer.
    pub fn new() -> Result<Self, Fault> {
        let mut builder = GrammarBuilder::new();
        let rules = grammar::build(&mut builder)?;
        actions::install(&mut builder, &rules);
        Ok(Self {
            grammar: builder.finish()?,
            rules,
        })
    }

    /// Handles to the named productions, for use as parse entry points.
    pub fn rules(&self) -> &Asn1Rules {
        &self.rules
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// A parser over this grammar with the ASN.1 separator conventions
    /// (whitespace, `--` line comments, nestable `/* */` comments).
    pub fn parser(&self) -> Parser<'_> {
        Parser::with_separator(&self.grammar, self.rules.separator)
    }

    /// Parse the whole of `text` as one instance of `rule`.
    ///
    /// `Ok(None)` means the input did not match; `Ok(Some(item))` hands
    /// back whatever single item the rule's reducers left behind. A parse
    /// that matches but leaves the stack in any other shape reports
    /// nothing, which for the rules exposed on [`Asn1Rules`] cannot
    /// happen unless a reducer is wrong.
    pub fn parse_one(&self, rule: ExprId, text: &str) -> Result<Option<Item>, Fault> {
        let mut state = Asn1State::new();
        let matched = self
            .parser()
            .parse_in(rule, text, MatchMode::Full, &mut state)?;
        Ok(if matched { state.into_result() } else { None })
    }

    /// Parse `text` as a type.
    pub fn parse_type(&self, text: &str) -> Result<Option<Type>, Fault> {
        Ok(match self.parse_one(self.rules.ty, text)? {
            Some(Item::Type(t)) => Some(t),
            _ => None,
        })
    }

    /// Parse `text` as a value.
    pub fn parse_value(&self, text: &str) -> Result<Option<Value>, Fault> {
        Ok(match self.parse_one(self.rules.value, text)? {
            Some(Item::Value(v)) => Some(v),
            _ => None,
        })
    }

    /// Parse `text` as a complete module definition.
    pub fn parse_module(&self, text: &str) -> Result<Option<Module>, Fault> {
        Ok(match self.parse_one(self.rules.module_definition, text)? {
            Some(Item::Module(m)) => Some(m),
            _ => None,
        })
    }
}
