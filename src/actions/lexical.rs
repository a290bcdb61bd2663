//! Clause 12: reducers for the lexical items.
//!
//! Each token rule pushes one leaf [`Item`] carrying the matched text in
//! its decoded form: numbers become bignums, `bstring`/`hstring` literals
//! become bit strings, and `cstring` literals are unescaped here so no
//! later reducer has to care about quoting or line folds.

use num::bigint::BigInt;
use num::BigUint;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::BitString;
use crate::grammar::Asn1Rules;
use crate::peg::GrammarBuilder;

use super::{reduce, Item};

/// Whitespace spanning a newline inside a `cstring` is not content.
static LINE_FOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t\x0B\x0C\r]*[\r\n][ \t\x0B\x0C\r\n]*").unwrap());

fn bits_from_binary(digits: &str) -> BitString {
    let mut bits = BigUint::default();
    let mut length = 0;
    for c in digits.chars() {
        match c {
            '0' => {
                bits <<= 1u8;
                length += 1;
            }
            '1' => {
                bits = (bits << 1u8) + 1u8;
                length += 1;
            }
            _ => {}
        }
    }
    BitString { length, bits }
}

fn bits_from_hex(digits: &str) -> BitString {
    let mut bits = BigUint::default();
    let mut length = 0;
    for c in digits.chars() {
        if let Some(v) = c.to_digit(16) {
            bits = (bits << 4u8) + v;
            length += 4;
        }
    }
    BitString { length, bits }
}

fn unquote(text: &str) -> &str {
    &text[1..text.len() - 1]
}

pub(super) fn install(b: &mut GrammarBuilder, r: &Asn1Rules) {
    b.apply(
        r.typereference,
        reduce(|stack, _, txt| {
            stack.push(Item::TypeRef(txt.get().to_string()));
            Ok(true)
        }),
    );
    b.apply(
        r.modulereference,
        reduce(|stack, _, txt| {
            stack.push(Item::ModuleRef(txt.get().to_string()));
            Ok(true)
        }),
    );
    b.apply(
        r.encodingreference,
        reduce(|stack, _, txt| {
            stack.push(Item::EncodingRef(txt.get().to_string()));
            Ok(true)
        }),
    );
    b.apply(
        r.valuereference,
        reduce(|stack, _, txt| {
            stack.push(Item::ValueRef(txt.get().to_string()));
            Ok(true)
        }),
    );
    b.apply(
        r.identifier,
        reduce(|stack, _, txt| {
            stack.push(Item::Identifier(txt.get().to_string()));
            Ok(true)
        }),
    );
    b.apply(
        r.number,
        reduce(|stack, _, txt| {
            // The pattern admits only decimal digits.
            let n: BigInt = txt.get().parse().unwrap_or_default();
            stack.push(Item::Number(n));
            Ok(true)
        }),
    );
    b.apply(
        r.realnumber,
        reduce(|stack, _, txt| {
            let n: f64 = txt.get().parse().unwrap_or_default();
            stack.push(Item::RealNumber(n));
            Ok(true)
        }),
    );
    b.apply(
        r.bstring,
        reduce(|stack, _, txt| {
            let text = txt.get();
            // Strip the quotes and the trailing B.
            stack.push(Item::BString(bits_from_binary(&text[1..text.len() - 2])));
            Ok(true)
        }),
    );
    b.apply(
        r.hstring,
        reduce(|stack, _, txt| {
            let text = txt.get();
            stack.push(Item::HString(bits_from_hex(&text[1..text.len() - 2])));
            Ok(true)
        }),
    );
    b.apply(
        r.cstring,
        reduce(|stack, _, txt| {
            let folded = LINE_FOLD.replace_all(unquote(txt.get()), "");
            stack.push(Item::CString(folded.replace("\"\"", "\"")));
            Ok(true)
        }),
    );
    b.apply(
        r.tstring,
        reduce(|stack, _, txt| {
            stack.push(Item::TString(unquote(txt.get()).to_string()));
            Ok(true)
        }),
    );
}
