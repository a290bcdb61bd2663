use asn1_notation::ast::{
    Assignment, Exports, NamedValue, OidComponent, TagDefault, Type, Value,
};
use asn1_notation::Asn1Notation;
use num::BigInt;

fn notation() -> Asn1Notation {
    Asn1Notation::new().unwrap()
}

#[test]
fn minimal_module() {
    let n = notation();
    let m = n
        .parse_module("M DEFINITIONS ::= BEGIN END")
        .unwrap()
        .expect("module should parse");
    assert_eq!(m.name, "M");
    assert_eq!(m.oid, None);
    assert_eq!(m.encoding_reference, None);
    assert_eq!(m.tag_default, None);
    assert_eq!(m.exports, None);
    assert!(m.imports.is_empty());
    assert!(m.assignments.is_empty());
}

#[test]
fn module_header_options() {
    let n = notation();
    let m = n
        .parse_module(
            "Mod { iso standard 42 } DEFINITIONS XER INSTRUCTIONS AUTOMATIC TAGS ::= BEGIN END",
        )
        .unwrap()
        .expect("module should parse");
    assert_eq!(m.name, "Mod");
    assert_eq!(
        m.oid,
        Some(vec![
            OidComponent::Name("iso".into()),
            OidComponent::Name("standard".into()),
            OidComponent::Number(BigInt::from(42)),
        ])
    );
    assert_eq!(m.encoding_reference, Some("XER".into()));
    assert_eq!(m.tag_default, Some(TagDefault::Automatic));
}

#[test]
fn assignments_in_order() {
    let n = notation();
    let m = n
        .parse_module(
            "M DEFINITIONS ::= BEGIN \
               Rocket ::= SEQUENCE { fuel INTEGER { solid(0), liquid(1) } } \
               max-count ::= 500 \
             END",
        )
        .unwrap()
        .expect("module should parse");
    assert_eq!(m.assignments.len(), 2);
    match &m.assignments[0] {
        Assignment::Type { name, ty } => {
            assert_eq!(name, "Rocket");
            let Type::Sequence(components) = ty else {
                panic!("expected a sequence, got {ty:?}");
            };
            assert_eq!(components[0].name, "fuel");
            assert_eq!(
                components[0].ty,
                Type::Integer(vec![
                    NamedValue {
                        name: "solid".into(),
                        value: Value::Integer(BigInt::from(0)),
                    },
                    NamedValue {
                        name: "liquid".into(),
                        value: Value::Integer(BigInt::from(1)),
                    },
                ])
            );
        }
        other => panic!("expected a type assignment, got {other:?}"),
    }
    match &m.assignments[1] {
        Assignment::Value { name, value } => {
            assert_eq!(name, "max-count");
            assert_eq!(value, &Value::Integer(BigInt::from(500)));
        }
        other => panic!("expected a value assignment, got {other:?}"),
    }
}

#[test]
fn exports_and_imports() {
    let n = notation();
    let m = n
        .parse_module(
            "M DEFINITIONS EXPLICIT TAGS ::= BEGIN \
               EXPORTS Foo, bar; \
               IMPORTS Baz, quux FROM Other { iso 3 } ; \
               Foo ::= INTEGER \
               bar ::= 5 \
             END",
        )
        .unwrap()
        .expect("module should parse");
    assert_eq!(m.tag_default, Some(TagDefault::Explicit));
    assert_eq!(
        m.exports,
        Some(Exports::Symbols(vec!["Foo".into(), "bar".into()]))
    );
    assert_eq!(m.imports.len(), 1);
    let from = &m.imports[0];
    assert_eq!(from.symbols, vec!["Baz".to_string(), "quux".to_string()]);
    assert_eq!(from.module, "Other");
    assert_eq!(
        from.identification,
        Some(Value::ObjectIdentifier(vec![
            OidComponent::Name("iso".into()),
            OidComponent::Number(BigInt::from(3)),
        ]))
    );
    assert_eq!(m.assignments.len(), 2);
}

#[test]
fn exports_all() {
    let n = notation();
    let m = n
        .parse_module("M DEFINITIONS ::= BEGIN EXPORTS ALL; END")
        .unwrap()
        .expect("module should parse");
    assert_eq!(m.exports, Some(Exports::All));
}

#[test]
fn empty_exports_list() {
    let n = notation();
    let m = n
        .parse_module("M DEFINITIONS ::= BEGIN EXPORTS; END")
        .unwrap()
        .expect("module should parse");
    assert_eq!(m.exports, Some(Exports::Symbols(vec![])));
}

#[test]
fn comments_are_separators() {
    let n = notation();
    let m = n
        .parse_module(
            "M DEFINITIONS ::= BEGIN -- a line comment\n\
               Foo ::= /* a /* nested */ block comment */ BOOLEAN\n\
             END",
        )
        .unwrap()
        .expect("module should parse");
    assert_eq!(m.assignments.len(), 1);
    assert!(matches!(
        m.assignments[0],
        Assignment::Type { ref name, ty: Type::Boolean } if name == "Foo"
    ));
}

#[test]
fn imports_with_successors_option() {
    let n = notation();
    let m = n
        .parse_module(
            "M DEFINITIONS ::= BEGIN \
               IMPORTS Thing FROM Elsewhere WITH SUCCESSORS ; \
             END",
        )
        .unwrap()
        .expect("module should parse");
    assert_eq!(m.imports[0].module, "Elsewhere");
    assert_eq!(m.imports[0].identification, None);
}

#[test]
fn unterminated_module_does_not_parse() {
    let n = notation();
    assert_eq!(
        n.parse_module("M DEFINITIONS ::= BEGIN Foo ::= INTEGER").unwrap(),
        None
    );
}
