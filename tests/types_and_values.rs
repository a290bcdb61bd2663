use asn1_notation::ast::{
    BitString, CharacterStringComponent, ComponentPresence, EnumItem, NamedType, NamedValue,
    OidComponent, TagClass, TagPlicity, Type, Value, ValueList,
};
use asn1_notation::{Asn1Notation, Asn1State, Item, MatchMode};
use num::{BigInt, BigUint};

fn notation() -> Asn1Notation {
    Asn1Notation::new().unwrap()
}

fn int(n: i64) -> Value {
    Value::Integer(BigInt::from(n))
}

#[test]
fn builtin_leaf_types() {
    let n = notation();
    assert_eq!(n.parse_type("BOOLEAN").unwrap(), Some(Type::Boolean));
    assert_eq!(n.parse_type("NULL").unwrap(), Some(Type::Null));
    assert_eq!(n.parse_type("OCTET STRING").unwrap(), Some(Type::OctetString));
    assert_eq!(
        n.parse_type("OBJECT IDENTIFIER").unwrap(),
        Some(Type::ObjectIdentifier)
    );
    assert_eq!(n.parse_type("DATE-TIME").unwrap(), Some(Type::DateTime));
    assert_eq!(
        n.parse_type("UTF8String").unwrap(),
        Some(Type::CharacterString(Some("UTF8String".into())))
    );
    assert_eq!(
        n.parse_type("CHARACTER STRING").unwrap(),
        Some(Type::CharacterString(None))
    );
}

#[test]
fn integer_type_with_named_numbers() {
    let n = notation();
    assert_eq!(n.parse_type("INTEGER").unwrap(), Some(Type::Integer(vec![])));
    assert_eq!(
        n.parse_type("INTEGER { a(1), b(2), c(qux) }").unwrap(),
        Some(Type::Integer(vec![
            NamedValue {
                name: "a".into(),
                value: int(1),
            },
            NamedValue {
                name: "b".into(),
                value: int(2),
            },
            NamedValue {
                name: "c".into(),
                value: Value::Defined {
                    module: None,
                    name: "qux".into(),
                },
            },
        ]))
    );
}

#[test]
fn enumerated_type_items_may_carry_values() {
    let n = notation();
    assert_eq!(
        n.parse_type("ENUMERATED { red, green (5) }").unwrap(),
        Some(Type::Enumerated(vec![
            EnumItem {
                name: "red".into(),
                value: None,
            },
            EnumItem {
                name: "green".into(),
                value: Some(int(5)),
            },
        ]))
    );
}

#[test]
fn sequence_type_components_and_qualifiers() {
    let n = notation();
    let got = n
        .parse_type("SEQUENCE { name UTF8String, age INTEGER OPTIONAL, tag BOOLEAN DEFAULT TRUE }")
        .unwrap();
    assert_eq!(
        got,
        Some(Type::Sequence(vec![
            NamedType {
                name: "name".into(),
                ty: Type::CharacterString(Some("UTF8String".into())),
                presence: None,
            },
            NamedType {
                name: "age".into(),
                ty: Type::Integer(vec![]),
                presence: Some(ComponentPresence::Optional),
            },
            NamedType {
                name: "tag".into(),
                ty: Type::Boolean,
                presence: Some(ComponentPresence::Default(Value::Boolean(true))),
            },
        ]))
    );
}

#[test]
fn empty_sequence_type() {
    let n = notation();
    assert_eq!(n.parse_type("SEQUENCE { }").unwrap(), Some(Type::Sequence(vec![])));
}

#[test]
fn choice_and_selection_types() {
    let n = notation();
    assert_eq!(
        n.parse_type("CHOICE { a NULL, b BOOLEAN }").unwrap(),
        Some(Type::Choice(vec![
            NamedType {
                name: "a".into(),
                ty: Type::Null,
                presence: None,
            },
            NamedType {
                name: "b".into(),
                ty: Type::Boolean,
                presence: None,
            },
        ]))
    );
    assert_eq!(
        n.parse_type("field < My-Type").unwrap(),
        Some(Type::Selection {
            name: "field".into(),
            inner: Box::new(Type::Defined {
                module: None,
                name: "My-Type".into(),
            }),
        })
    );
}

#[test]
fn of_types_keep_the_element_name() {
    let n = notation();
    assert_eq!(
        n.parse_type("SET OF INTEGER").unwrap(),
        Some(Type::SetOf {
            name: None,
            element: Box::new(Type::Integer(vec![])),
        })
    );
    assert_eq!(
        n.parse_type("SEQUENCE OF point SEQUENCE { x INTEGER }").unwrap(),
        Some(Type::SequenceOf {
            name: Some("point".into()),
            element: Box::new(Type::Sequence(vec![NamedType {
                name: "x".into(),
                ty: Type::Integer(vec![]),
                presence: None,
            }])),
        })
    );
}

#[test]
fn tagged_type_assembly() {
    let n = notation();
    let got = n.parse_type("[APPLICATION 3] IMPLICIT INTEGER").unwrap();
    let tagged = match got {
        Some(Type::Tagged(t)) => t,
        other => panic!("expected a tagged type, got {other:?}"),
    };
    assert_eq!(tagged.class, Some(TagClass::Application));
    assert_eq!(tagged.tag, int(3));
    assert_eq!(tagged.plicity, Some(TagPlicity::Implicit));
    assert_eq!(tagged.inner, Type::Integer(vec![]));
}

#[test]
fn tag_without_class_or_plicity() {
    let n = notation();
    let tagged = match n.parse_type("[0] BOOLEAN").unwrap() {
        Some(Type::Tagged(t)) => t,
        other => panic!("expected a tagged type, got {other:?}"),
    };
    assert_eq!(tagged.class, None);
    assert_eq!(tagged.tag, int(0));
    assert_eq!(tagged.plicity, None);
    assert_eq!(tagged.inner, Type::Boolean);
}

#[test]
fn defined_types_may_come_from_another_module() {
    let n = notation();
    assert_eq!(
        n.parse_type("Other.My-Type").unwrap(),
        Some(Type::Defined {
            module: Some("Other".into()),
            name: "My-Type".into(),
        })
    );
}

#[test]
fn simple_values() {
    let n = notation();
    assert_eq!(n.parse_value("TRUE").unwrap(), Some(Value::Boolean(true)));
    assert_eq!(n.parse_value("FALSE").unwrap(), Some(Value::Boolean(false)));
    assert_eq!(n.parse_value("NULL").unwrap(), Some(Value::Null));
    assert_eq!(n.parse_value("42").unwrap(), Some(int(42)));
    assert_eq!(n.parse_value("-42").unwrap(), Some(int(-42)));
    assert_eq!(
        n.parse_value("other-value").unwrap(),
        Some(Value::Defined {
            module: None,
            name: "other-value".into(),
        })
    );
}

#[test]
fn real_values() {
    let n = notation();
    let r = n.rules();
    assert_eq!(
        n.parse_one(r.real_value, "3.25").unwrap(),
        Some(Item::Value(Value::Real(3.25)))
    );
    assert_eq!(
        n.parse_one(r.real_value, "-0.5").unwrap(),
        Some(Item::Value(Value::Real(-0.5)))
    );
    assert_eq!(
        n.parse_one(r.real_value, "MINUS-INFINITY").unwrap(),
        Some(Item::Value(Value::Real(f64::NEG_INFINITY)))
    );
}

#[test]
fn bit_string_values() {
    let n = notation();
    assert_eq!(
        n.parse_value("'10011001'B").unwrap(),
        Some(Value::BitString(BitString {
            length: 8,
            bits: BigUint::from(0b10011001u32),
        }))
    );
    assert_eq!(
        n.parse_value("{ a, b }").unwrap(),
        Some(Value::NamedBits(vec!["a".into(), "b".into()]))
    );
}

#[test]
fn octet_string_values_pad_to_whole_octets() {
    let n = notation();
    let r = n.rules();
    assert_eq!(
        n.parse_one(r.octet_string_value, "'000000010000001010000000111111'B")
            .unwrap(),
        Some(Item::Value(Value::OctetString(vec![1, 2, 128, 252])))
    );
    assert_eq!(
        n.parse_one(r.octet_string_value, "'DEADBEE'H").unwrap(),
        Some(Item::Value(Value::OctetString(vec![222, 173, 190, 224])))
    );
    assert_eq!(
        n.parse_one(r.octet_string_value, "''B").unwrap(),
        Some(Item::Value(Value::OctetString(vec![])))
    );
}

#[test]
fn object_identifier_value_component_forms() {
    let n = notation();
    let got = n
        .parse_value("{ iso standard 8571 application-context (1) }")
        .unwrap();
    assert_eq!(
        got,
        Some(Value::ObjectIdentifier(vec![
            OidComponent::Name("iso".into()),
            OidComponent::Name("standard".into()),
            OidComponent::Number(BigInt::from(8571)),
            OidComponent::NameAndNumber("application-context".into(), BigInt::from(1)),
        ]))
    );
}

#[test]
fn collection_values() {
    let n = notation();
    // A brace list of plain values is a SEQUENCE OF.
    assert_eq!(
        n.parse_value("{ 1, 2, 3 }").unwrap(),
        Some(Value::SequenceOf(ValueList::Plain(vec![
            int(1),
            int(2),
            int(3),
        ])))
    );
    // Named components make it a SEQUENCE value instead.
    assert_eq!(
        n.parse_value("{ a 1, b TRUE }").unwrap(),
        Some(Value::Sequence(vec![
            NamedValue {
                name: "a".into(),
                value: int(1),
            },
            NamedValue {
                name: "b".into(),
                value: Value::Boolean(true),
            },
        ]))
    );
    assert_eq!(
        n.parse_value("choice-alt : 7").unwrap(),
        Some(Value::Choice {
            name: "choice-alt".into(),
            value: Box::new(int(7)),
        })
    );
}

#[test]
fn character_string_values() {
    let n = notation();
    assert_eq!(
        n.parse_value("\"ABC\"").unwrap(),
        Some(Value::CharacterString(CharacterStringComponent::Atom(
            "ABC".into()
        )))
    );
    assert_eq!(
        n.parse_value("{ \"A\", { 0, 0, 0, 66 } }").unwrap(),
        Some(Value::CharacterStringList(vec![
            CharacterStringComponent::Atom("A".into()),
            CharacterStringComponent::Quadruple(
                BigInt::from(0),
                BigInt::from(0),
                BigInt::from(0),
                BigInt::from(66),
            ),
        ]))
    );
}

#[test]
fn time_value_entry_point() {
    let n = notation();
    assert_eq!(
        n.parse_one(n.rules().time_value, "\"P0Y29M0DT0H0.00M\"").unwrap(),
        Some(Item::Value(Value::Time("P0Y29M0DT0H0.00M".into())))
    );
}

#[test]
fn first_match_choice_commits() {
    let n = notation();
    // A brace list of bare identifiers is always named bits, never a
    // sequence-of of defined values: the bit-string alternative comes
    // first and the choice commits to it.
    assert_eq!(
        n.parse_value("{ iso }").unwrap(),
        Some(Value::NamedBits(vec!["iso".into()]))
    );
    // The integer alternative commits to "1" and the leftover ".5" fails
    // the full-input check; the choice never revisits later alternatives.
    assert_eq!(n.parse_value("1.5").unwrap(), None);
}

#[test]
fn failed_branch_leaves_no_stack_residue() {
    let n = notation();
    let mut state = Asn1State::new();
    // The SEQUENCE introducer pushes its marker before the component list
    // fails on the unclosed brace; the rollback must take the marker with it.
    let matched = n
        .parser()
        .parse_in(n.rules().ty, "SEQUENCE {", MatchMode::Full, &mut state)
        .unwrap();
    assert!(!matched);
    assert!(state.stack.is_empty());
}

#[test]
fn ast_serializes_to_json() {
    let n = notation();
    let value = n.parse_value("TRUE").unwrap().unwrap();
    assert_eq!(
        serde_json::to_value(&value).unwrap(),
        serde_json::json!({ "Boolean": true })
    );
    let ty = n.parse_type("SEQUENCE OF INTEGER").unwrap().unwrap();
    assert_eq!(
        serde_json::to_value(&ty).unwrap(),
        serde_json::json!({ "SequenceOf": { "name": null, "element": { "Integer": [] } } })
    );
}
