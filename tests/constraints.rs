use asn1_notation::ast::{Constraint, RangeBound, Type, Value};
use asn1_notation::Asn1Notation;
use num::BigInt;

fn notation() -> Asn1Notation {
    Asn1Notation::new().unwrap()
}

fn int(n: i64) -> Value {
    Value::Integer(BigInt::from(n))
}

fn bound(n: i64) -> RangeBound {
    RangeBound::Value(int(n))
}

/// Unwrap a constrained type into its base and constraint list.
fn constrained(ty: Option<Type>) -> (Type, Vec<Constraint>) {
    match ty {
        Some(Type::Constrained { base, constraints }) => (*base, constraints),
        other => panic!("expected a constrained type, got {other:?}"),
    }
}

#[test]
fn single_value_constraint() {
    let n = notation();
    let (base, cs) = constrained(n.parse_type("INTEGER (10)").unwrap());
    assert_eq!(base, Type::Integer(vec![]));
    assert_eq!(cs, vec![Constraint::Value(int(10))]);
}

#[test]
fn value_range_with_open_lower_end() {
    let n = notation();
    let (_, cs) = constrained(n.parse_type("INTEGER (1<..10)").unwrap());
    assert_eq!(
        cs,
        vec![Constraint::Range {
            min: bound(1),
            min_included: false,
            max: bound(10),
            max_included: true,
        }]
    );
}

#[test]
fn value_range_with_open_upper_end() {
    let n = notation();
    let (_, cs) = constrained(n.parse_type("INTEGER (1..<10)").unwrap());
    assert_eq!(
        cs,
        vec![Constraint::Range {
            min: bound(1),
            min_included: true,
            max: bound(10),
            max_included: false,
        }]
    );
}

#[test]
fn min_and_max_leave_the_ends_unbounded() {
    let n = notation();
    let (_, cs) = constrained(n.parse_type("INTEGER (MIN..MAX)").unwrap());
    assert_eq!(
        cs,
        vec![Constraint::Range {
            min: RangeBound::Min,
            min_included: true,
            max: RangeBound::Max,
            max_included: true,
        }]
    );
}

#[test]
fn size_constraint_on_a_string_type() {
    let n = notation();
    let (base, cs) = constrained(n.parse_type("UTF8String (SIZE (1..10))").unwrap());
    assert_eq!(base, Type::CharacterString(Some("UTF8String".into())));
    assert_eq!(
        cs,
        vec![Constraint::Size(Box::new(Constraint::Range {
            min: bound(1),
            min_included: true,
            max: bound(10),
            max_included: true,
        }))]
    );
}

#[test]
fn permitted_alphabet_constraint() {
    let n = notation();
    let (_, cs) = constrained(n.parse_type("IA5String (FROM (\"A\"..\"Z\"))").unwrap());
    let Constraint::From(inner) = &cs[0] else {
        panic!("expected a FROM constraint, got {cs:?}");
    };
    assert!(matches!(**inner, Constraint::Range { .. }));
}

#[test]
fn unions_and_intersections() {
    let n = notation();
    let (_, cs) = constrained(n.parse_type("INTEGER (1 | 2 | 3)").unwrap());
    assert_eq!(
        cs,
        vec![Constraint::Union(vec![
            Constraint::Value(int(1)),
            Constraint::Value(int(2)),
            Constraint::Value(int(3)),
        ])]
    );

    let (_, cs) = constrained(n.parse_type("INTEGER (1..10 ^ 5..15)").unwrap());
    assert_eq!(
        cs,
        vec![Constraint::Intersection(vec![
            Constraint::Range {
                min: bound(1),
                min_included: true,
                max: bound(10),
                max_included: true,
            },
            Constraint::Range {
                min: bound(5),
                min_included: true,
                max: bound(15),
                max_included: true,
            },
        ])]
    );
}

#[test]
fn singleton_lists_collapse() {
    let n = notation();
    // One member: no Union or Intersection wrapper appears.
    let (_, cs) = constrained(n.parse_type("INTEGER (7)").unwrap());
    assert_eq!(cs, vec![Constraint::Value(int(7))]);
}

#[test]
fn exclusions() {
    let n = notation();
    let (_, cs) = constrained(n.parse_type("INTEGER (ALL EXCEPT 5)").unwrap());
    assert_eq!(
        cs,
        vec![Constraint::Except {
            base: Box::new(Constraint::All),
            except: Box::new(Constraint::Value(int(5))),
        }]
    );

    let (_, cs) = constrained(n.parse_type("INTEGER ((1..10) EXCEPT 5)").unwrap());
    assert_eq!(
        cs,
        vec![Constraint::Except {
            base: Box::new(Constraint::Range {
                min: bound(1),
                min_included: true,
                max: bound(10),
                max_included: true,
            }),
            except: Box::new(Constraint::Value(int(5))),
        }]
    );
}

#[test]
fn contained_subtype_constraint() {
    let n = notation();
    let (_, cs) = constrained(n.parse_type("INTEGER (INCLUDES Other-Type)").unwrap());
    assert_eq!(
        cs,
        vec![Constraint::Type(Type::Defined {
            module: None,
            name: "Other-Type".into(),
        })]
    );
}

#[test]
fn multiple_trailing_constraints_stay_in_order() {
    let n = notation();
    let (base, cs) = constrained(n.parse_type("INTEGER (1..10) (2..5)").unwrap());
    assert_eq!(base, Type::Integer(vec![]));
    assert_eq!(cs.len(), 2);
    assert!(matches!(
        cs[0],
        Constraint::Range { min: RangeBound::Value(Value::Integer(ref n)), .. } if *n == BigInt::from(1)
    ));
}

#[test]
fn of_type_with_inline_size_constraint() {
    let n = notation();
    let (base, cs) = constrained(n.parse_type("SEQUENCE (SIZE (1..4)) OF INTEGER").unwrap());
    assert_eq!(
        base,
        Type::SequenceOf {
            name: None,
            element: Box::new(Type::Integer(vec![])),
        }
    );
    assert!(matches!(cs[0], Constraint::Size(_)));
}
