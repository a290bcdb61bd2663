//! Reducers for subtype constraints (clauses 49-51).
//!
//! A value range is built incrementally: the introducer pushes a record
//! with both ends open, the endpoint reducers narrow it in place, and the
//! closing reducer turns it into the finished constraint. Union and
//! intersection lists collapse a singleton to its sole element, so `(1)`
//! and `(1|2)` come out as `Value` and `Union` respectively.

use crate::ast::{Constraint, RangeBound};
use crate::grammar::Asn1Rules;
use crate::peg::{ExprId, GrammarBuilder};

use super::{mismatch, pop1, pop2, reduce, Item, RangeInProgress};

pub(super) fn install(b: &mut GrammarBuilder, r: &Asn1Rules) {
    b.apply(
        r.single_value,
        reduce(|stack, _, _| {
            match pop1(stack, "SingleValue")? {
                Item::Value(v) => stack.push(Item::Constraint(Constraint::Value(v))),
                other => return Err(mismatch("SingleValue", &other)),
            }
            Ok(true)
        }),
    );
    b.apply(
        r.contained_subtype,
        reduce(|stack, _, _| {
            match pop1(stack, "ContainedSubtype")? {
                Item::Type(t) => stack.push(Item::Constraint(Constraint::Type(t))),
                other => return Err(mismatch("ContainedSubtype", &other)),
            }
            Ok(true)
        }),
    );

    // Value ranges.

    b.apply(
        r.value_range_introducer,
        reduce(|stack, _, _| {
            stack.push(Item::ValueRange(RangeInProgress::default()));
            Ok(true)
        }),
    );
    b.apply(
        r.lower_end_value,
        reduce(|stack, _, _| {
            let (mut range, v) = match pop2(stack, "LowerEndValue")? {
                (Item::ValueRange(r), Item::Value(v)) => (r, v),
                (_, other) => return Err(mismatch("LowerEndValue", &other)),
            };
            range.min = RangeBound::Value(v);
            stack.push(Item::ValueRange(range));
            Ok(true)
        }),
    );
    b.apply(
        r.upper_end_value,
        reduce(|stack, _, _| {
            let (mut range, v) = match pop2(stack, "UpperEndValue")? {
                (Item::ValueRange(r), Item::Value(v)) => (r, v),
                (_, other) => return Err(mismatch("UpperEndValue", &other)),
            };
            range.max = RangeBound::Value(v);
            stack.push(Item::ValueRange(range));
            Ok(true)
        }),
    );
    open_endpoint(b, r.lower_less, "LowerLess", |range| {
        range.min_included = false;
    });
    open_endpoint(b, r.upper_less, "UpperLess", |range| {
        range.max_included = false;
    });
    b.apply(
        r.value_range,
        reduce(|stack, _, _| {
            match pop1(stack, "ValueRange")? {
                Item::ValueRange(range) => stack.push(Item::Constraint(Constraint::Range {
                    min: range.min,
                    min_included: range.min_included,
                    max: range.max,
                    max_included: range.max_included,
                })),
                other => return Err(mismatch("ValueRange", &other)),
            }
            Ok(true)
        }),
    );

    // Wrapping constraints.

    boxed_constraint(b, r.permitted_alphabet, "PermittedAlphabet", Constraint::From);
    boxed_constraint(b, r.size_constraint, "SizeConstraint", Constraint::Size);
    b.apply(
        r.type_constraint,
        reduce(|stack, _, _| {
            match pop1(stack, "TypeConstraint")? {
                Item::Type(t) => stack.push(Item::Constraint(Constraint::Type(t))),
                other => return Err(mismatch("TypeConstraint", &other)),
            }
            Ok(true)
        }),
    );
    b.apply(
        r.pattern_constraint,
        reduce(|stack, _, _| {
            match pop1(stack, "PatternConstraint")? {
                Item::Value(v) => stack.push(Item::Constraint(Constraint::Pattern(v))),
                other => return Err(mismatch("PatternConstraint", &other)),
            }
            Ok(true)
        }),
    );

    // Exclusions. `ALL EXCEPT x` seeds the base with the universal set.

    b.apply(
        r.all_exclusions_introducer,
        reduce(|stack, _, _| {
            stack.push(Item::Constraint(Constraint::All));
            Ok(true)
        }),
    );
    b.apply(
        r.exclusions,
        reduce(|stack, _, _| {
            let (base, except) = match pop2(stack, "Exclusions")? {
                (Item::Constraint(a), Item::Constraint(b)) => (a, b),
                (_, other) => return Err(mismatch("Exclusions", &other)),
            };
            stack.push(Item::Constraint(Constraint::Except {
                base: Box::new(base),
                except: Box::new(except),
            }));
            Ok(true)
        }),
    );

    // Unions and intersections.

    set_arithmetic(
        b,
        r.unions_introducer,
        r.unions,
        "Unions",
        Item::UnionsMarker,
        Constraint::Union,
    );
    set_arithmetic(
        b,
        r.intersections_introducer,
        r.intersections,
        "Intersections",
        Item::IntersectionsMarker,
        Constraint::Intersection,
    );
}

fn open_endpoint(
    b: &mut GrammarBuilder,
    rule: ExprId,
    name: &'static str,
    adjust: fn(&mut RangeInProgress),
) {
    b.apply(
        rule,
        reduce(move |stack, _, _| {
            match pop1(stack, name)? {
                Item::ValueRange(mut range) => {
                    adjust(&mut range);
                    stack.push(Item::ValueRange(range));
                }
                other => return Err(mismatch(name, &other)),
            }
            Ok(true)
        }),
    );
}

fn boxed_constraint(
    b: &mut GrammarBuilder,
    rule: ExprId,
    name: &'static str,
    make: fn(Box<Constraint>) -> Constraint,
) {
    b.apply(
        rule,
        reduce(move |stack, _, _| {
            match pop1(stack, name)? {
                Item::Constraint(c) => stack.push(Item::Constraint(make(Box::new(c)))),
                other => return Err(mismatch(name, &other)),
            }
            Ok(true)
        }),
    );
}

fn set_arithmetic(
    b: &mut GrammarBuilder,
    introducer: ExprId,
    closer: ExprId,
    name: &'static str,
    marker: Item,
    make: fn(Vec<Constraint>) -> Constraint,
) {
    b.apply(
        introducer,
        reduce(move |stack, _, _| {
            stack.push(marker.clone());
            Ok(true)
        }),
    );
    b.apply(
        closer,
        reduce(move |stack, _, _| {
            let mut members = Vec::new();
            loop {
                match pop1(stack, name)? {
                    Item::Constraint(c) => members.push(c),
                    Item::UnionsMarker | Item::IntersectionsMarker => break,
                    other => return Err(mismatch(name, &other)),
                }
            }
            members.reverse();
            let combined = match members.len() {
                1 => members.remove(0),
                _ => make(members),
            };
            stack.push(Item::Constraint(combined));
            Ok(true)
        }),
    );
}
