//! Reducers for the value notation.
//!
//! Bit and octet string literals are assembled here: a `bstring` or
//! `hstring` leaf already carries its bits as a bignum, so a BIT STRING
//! value takes it verbatim while an OCTET STRING value pads it out to a
//! whole number of octets before serializing big-endian.

use crate::ast::{
    BitString, CharacterStringComponent, NamedValue, OidComponent, Value, ValueList,
};
use crate::grammar::Asn1Rules;
use crate::peg::{ExprId, GrammarBuilder};

use super::{mismatch, pop1, pop2, pop3, pop4, reduce, BitsOrNames, Item};

/// Pad to a multiple of eight bits and emit big-endian octets.
fn octets(bs: BitString) -> Vec<u8> {
    let pad = (8 - bs.length % 8) % 8;
    let total = (bs.length + pad) / 8;
    if total == 0 {
        return Vec::new();
    }
    let bytes = (bs.bits << pad).to_bytes_be();
    let mut out = vec![0u8; total - bytes.len().min(total)];
    out.extend(bytes);
    out
}

pub(super) fn install(b: &mut GrammarBuilder, r: &Asn1Rules) {
    // Clause 14: defined values.

    b.apply(
        r.external_value_reference,
        reduce(|stack, _, _| {
            let (module, name) = match pop2(stack, "ExternalValueReference")? {
                (Item::ModuleRef(m), Item::ValueRef(n)) => (m, n),
                (_, other) => return Err(mismatch("ExternalValueReference", &other)),
            };
            stack.push(Item::Value(Value::Defined {
                module: Some(module),
                name,
            }));
            Ok(true)
        }),
    );
    b.apply(
        r.defined_value,
        reduce(|stack, _, _| {
            match pop1(stack, "DefinedValue")? {
                v @ Item::Value(_) => stack.push(v),
                Item::ValueRef(name) => {
                    stack.push(Item::Value(Value::Defined { module: None, name }))
                }
                other => return Err(mismatch("DefinedValue", &other)),
            }
            Ok(true)
        }),
    );

    // Clause 17: named values.

    b.apply(
        r.named_value,
        reduce(|stack, _, _| {
            let (name, value) = match pop2(stack, "NamedValue")? {
                (Item::Identifier(n), Item::Value(v)) => (n, v),
                (_, other) => return Err(mismatch("NamedValue", &other)),
            };
            stack.push(Item::NamedValue(NamedValue { name, value }));
            Ok(true)
        }),
    );

    // Clause 18: BOOLEAN.

    b.apply(
        r.boolean_value,
        reduce(|stack, _, txt| {
            stack.push(Item::Value(Value::Boolean(txt.get() == "TRUE")));
            Ok(true)
        }),
    );

    // Clause 19: INTEGER.

    b.apply(
        r.integer_value,
        reduce(|stack, _, _| {
            let value = match pop1(stack, "IntegerValue")? {
                Item::Number(n) => Value::Integer(n),
                Item::Identifier(name) => Value::Defined { module: None, name },
                other => return Err(mismatch("IntegerValue", &other)),
            };
            stack.push(Item::Value(value));
            Ok(true)
        }),
    );

    // Clause 20: ENUMERATED. A bare identifier; resolution against the
    // enumeration is not a parsing concern.

    b.apply(
        r.enumerated_value,
        reduce(|stack, _, _| {
            match pop1(stack, "EnumeratedValue")? {
                Item::Identifier(name) => {
                    stack.push(Item::Value(Value::Defined { module: None, name }))
                }
                other => return Err(mismatch("EnumeratedValue", &other)),
            }
            Ok(true)
        }),
    );

    // Clause 21: REAL.

    b.apply(
        r.negated_real_number,
        reduce(|stack, _, _| {
            match pop1(stack, "NegatedRealNumber")? {
                Item::RealNumber(x) => stack.push(Item::RealNumber(-x)),
                other => return Err(mismatch("NegatedRealNumber", &other)),
            }
            Ok(true)
        }),
    );
    b.apply(
        r.numeric_real_value,
        reduce(|stack, _, _| {
            match pop1(stack, "NumericRealValue")? {
                Item::RealNumber(x) => stack.push(Item::Value(Value::Real(x))),
                other => return Err(mismatch("NumericRealValue", &other)),
            }
            Ok(true)
        }),
    );
    b.apply(
        r.special_real_value,
        reduce(|stack, _, txt| {
            let x = match txt.get() {
                "PLUS-INFINITY" => f64::INFINITY,
                "MINUS-INFINITY" => f64::NEG_INFINITY,
                _ => f64::NAN,
            };
            stack.push(Item::Value(Value::Real(x)));
            Ok(true)
        }),
    );

    // Clause 22: BIT STRING.

    b.apply(
        r.identifier_list_introducer,
        reduce(|stack, _, _| {
            stack.push(Item::BitStringValue(BitsOrNames::Names(Vec::new())));
            Ok(true)
        }),
    );
    b.apply(
        r.bit_string_value,
        reduce(|stack, _, _| {
            let value = match pop1(stack, "BitStringValue")? {
                Item::BString(bs) | Item::HString(bs) => Value::BitString(bs),
                first => {
                    let mut names = Vec::new();
                    let mut item = first;
                    loop {
                        match item {
                            Item::Identifier(n) => names.push(n),
                            Item::BitStringValue(_) => break,
                            other => return Err(mismatch("BitStringValue", &other)),
                        }
                        item = pop1(stack, "BitStringValue")?;
                    }
                    names.reverse();
                    Value::NamedBits(names)
                }
            };
            stack.push(Item::Value(value));
            Ok(true)
        }),
    );

    // Clause 23: OCTET STRING.

    b.apply(
        r.octet_string_value,
        reduce(|stack, _, _| {
            match pop1(stack, "OctetStringValue")? {
                Item::BString(bs) | Item::HString(bs) => {
                    stack.push(Item::Value(Value::OctetString(octets(bs))))
                }
                other => return Err(mismatch("OctetStringValue", &other)),
            }
            Ok(true)
        }),
    );

    // Clause 24: NULL.

    b.apply(
        r.null_value,
        reduce(|stack, _, _| {
            stack.push(Item::Value(Value::Null));
            Ok(true)
        }),
    );

    // Clauses 25-28: collection values.

    named_collection_value(
        b,
        r.sequence_value_introducer,
        r.sequence_value,
        "SequenceValue",
        Item::SequenceValue,
        Value::Sequence,
    );
    named_collection_value(
        b,
        r.set_value_introducer,
        r.set_value,
        "SetValue",
        Item::SetValue,
        Value::Set,
    );
    of_collection_value(
        b,
        r.sequence_of_value_introducer,
        r.sequence_of_value,
        "SequenceOfValue",
        Item::SequenceOfValue,
        Value::SequenceOf,
    );
    of_collection_value(
        b,
        r.set_of_value_introducer,
        r.set_of_value,
        "SetOfValue",
        Item::SetOfValue,
        Value::SetOf,
    );

    // Clause 29: CHOICE.

    b.apply(
        r.choice_value,
        reduce(|stack, _, _| {
            let (name, value) = match pop2(stack, "ChoiceValue")? {
                (Item::Identifier(n), Item::Value(v)) => (n, v),
                (_, other) => return Err(mismatch("ChoiceValue", &other)),
            };
            stack.push(Item::Value(Value::Choice {
                name,
                value: Box::new(value),
            }));
            Ok(true)
        }),
    );

    // Clauses 32-33: object identifiers. The component reducers append to
    // whichever accumulator an introducer left below them; the same nodes
    // therefore serve OBJECT IDENTIFIER and RELATIVE-OID values alike.

    oid_marker(b, r.oid_introducer);
    oid_marker(b, r.relative_oid_introducer);
    b.apply(
        r.name_and_number_form,
        reduce(|stack, _, _| {
            let (mut list, name, n) = match pop3(stack, "NameAndNumberForm")? {
                (Item::OidValue(l), Item::Identifier(id), Item::Number(n)) => (l, id, n),
                (_, _, other) => return Err(mismatch("NameAndNumberForm", &other)),
            };
            list.push(OidComponent::NameAndNumber(name, n));
            stack.push(Item::OidValue(list));
            Ok(true)
        }),
    );
    b.apply(
        r.name_form,
        reduce(|stack, _, _| {
            let (mut list, name) = match pop2(stack, "NameForm")? {
                (Item::OidValue(l), Item::Identifier(id)) => (l, id),
                (_, other) => return Err(mismatch("NameForm", &other)),
            };
            list.push(OidComponent::Name(name));
            stack.push(Item::OidValue(list));
            Ok(true)
        }),
    );
    b.apply(
        r.number_form,
        reduce(|stack, _, _| {
            let (mut list, n) = match pop2(stack, "NumberForm")? {
                (Item::OidValue(l), Item::Number(n)) => (l, n),
                (_, other) => return Err(mismatch("NumberForm", &other)),
            };
            list.push(OidComponent::Number(n));
            stack.push(Item::OidValue(list));
            Ok(true)
        }),
    );
    b.apply(
        r.relative_oid_defined_value,
        reduce(|stack, _, _| {
            let (mut list, component) = match pop2(stack, "RelativeOidDefinedValue")? {
                (Item::OidValue(l), Item::Value(Value::Defined { module, name })) => {
                    (l, OidComponent::Defined { module, name })
                }
                (_, other) => return Err(mismatch("RelativeOidDefinedValue", &other)),
            };
            list.push(component);
            stack.push(Item::OidValue(list));
            Ok(true)
        }),
    );
    b.apply(
        r.relative_oid_value,
        reduce(|stack, _, _| {
            match pop1(stack, "RelativeOidValue")? {
                Item::OidValue(l) => stack.push(Item::Value(Value::RelativeOid(l))),
                other => return Err(mismatch("RelativeOidValue", &other)),
            }
            Ok(true)
        }),
    );

    // Clause 38: TIME.

    b.apply(
        r.time_value,
        reduce(|stack, _, _| {
            match pop1(stack, "TimeValue")? {
                Item::TString(s) => stack.push(Item::Value(Value::Time(s))),
                other => return Err(mismatch("TimeValue", &other)),
            }
            Ok(true)
        }),
    );

    // Clauses 39-44: character string values.

    b.apply(
        r.atomic_character_string,
        reduce(|stack, _, _| {
            match pop1(stack, "AtomicCharacterString")? {
                Item::CString(s) => stack.push(Item::Value(Value::CharacterString(
                    CharacterStringComponent::Atom(s),
                ))),
                other => return Err(mismatch("AtomicCharacterString", &other)),
            }
            Ok(true)
        }),
    );
    b.apply(
        r.tuple,
        reduce(|stack, _, _| {
            let (column, row) = match pop2(stack, "Tuple")? {
                (Item::Number(c), Item::Number(r)) => (c, r),
                (_, other) => return Err(mismatch("Tuple", &other)),
            };
            stack.push(Item::Value(Value::CharacterString(
                CharacterStringComponent::Tuple(column, row),
            )));
            Ok(true)
        }),
    );
    b.apply(
        r.quadruple,
        reduce(|stack, _, _| {
            match pop4(stack, "Quadruple")? {
                (Item::Number(g), Item::Number(p), Item::Number(r), Item::Number(c)) => {
                    stack.push(Item::Value(Value::CharacterString(
                        CharacterStringComponent::Quadruple(g, p, r, c),
                    )));
                    Ok(true)
                }
                (_, _, _, other) => Err(mismatch("Quadruple", &other)),
            }
        }),
    );
    b.apply(
        r.character_string_list_introducer,
        reduce(|stack, _, _| {
            stack.push(Item::CharacterStringList(Vec::new()));
            Ok(true)
        }),
    );
    b.apply(
        r.character_string_list,
        reduce(|stack, _, _| {
            let mut components = Vec::new();
            loop {
                match pop1(stack, "CharacterStringList")? {
                    Item::Value(Value::CharacterString(c)) => components.push(c),
                    Item::Value(Value::Defined { module, name }) => {
                        components.push(CharacterStringComponent::Defined { module, name })
                    }
                    Item::CharacterStringList(_) => break,
                    other => return Err(mismatch("CharacterStringList", &other)),
                }
            }
            components.reverse();
            stack.push(Item::Value(Value::CharacterStringList(components)));
            Ok(true)
        }),
    );

    // The builtin-value root: every alternative has already reduced to a
    // Value except a bare object identifier, which stays raw so module
    // headers can also consume it.

    b.apply(
        r.builtin_value,
        reduce(|stack, _, _| {
            match pop1(stack, "BuiltinValue")? {
                v @ Item::Value(_) => stack.push(v),
                Item::OidValue(l) => stack.push(Item::Value(Value::ObjectIdentifier(l))),
                other => return Err(mismatch("BuiltinValue", &other)),
            }
            Ok(true)
        }),
    );
}

fn oid_marker(b: &mut GrammarBuilder, introducer: ExprId) {
    b.apply(
        introducer,
        reduce(|stack, _, _| {
            stack.push(Item::OidValue(Vec::new()));
            Ok(true)
        }),
    );
}

fn named_collection_value(
    b: &mut GrammarBuilder,
    introducer: ExprId,
    closer: ExprId,
    name: &'static str,
    marker: fn(Vec<NamedValue>) -> Item,
    make: fn(Vec<NamedValue>) -> Value,
) {
    b.apply(
        introducer,
        reduce(move |stack, _, _| {
            stack.push(marker(Vec::new()));
            Ok(true)
        }),
    );
    b.apply(
        closer,
        reduce(move |stack, _, _| {
            let mut items = Vec::new();
            loop {
                match pop1(stack, name)? {
                    Item::NamedValue(nv) => items.push(nv),
                    Item::SequenceValue(_) | Item::SetValue(_) => break,
                    other => return Err(mismatch(name, &other)),
                }
            }
            items.reverse();
            stack.push(Item::Value(make(items)));
            Ok(true)
        }),
    );
}

fn of_collection_value(
    b: &mut GrammarBuilder,
    introducer: ExprId,
    closer: ExprId,
    name: &'static str,
    marker: fn(ValueList) -> Item,
    make: fn(ValueList) -> Value,
) {
    b.apply(
        introducer,
        reduce(move |stack, _, _| {
            stack.push(marker(ValueList::Plain(Vec::new())));
            Ok(true)
        }),
    );
    b.apply(
        closer,
        reduce(move |stack, _, _| {
            let mut plain = Vec::new();
            let mut named = Vec::new();
            loop {
                match pop1(stack, name)? {
                    Item::Value(v) => plain.push(v),
                    Item::NamedValue(nv) => named.push(nv),
                    Item::SequenceOfValue(_) | Item::SetOfValue(_) => break,
                    other => return Err(mismatch(name, &other)),
                }
            }
            // The grammar only admits a homogeneous list.
            let list = if named.is_empty() {
                plain.reverse();
                ValueList::Plain(plain)
            } else {
                named.reverse();
                ValueList::Named(named)
            };
            stack.push(Item::Value(make(list)));
            Ok(true)
        }),
    );
}
