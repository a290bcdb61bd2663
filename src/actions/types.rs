//! Reducers for the type notation: clauses 17 through 31, the string and
//! time types, and the `SET OF`/`SEQUENCE OF` with-constraint forms.

use crate::ast::{
    ComponentPresence, EnumItem, NamedType, NamedValue, TagClass, TagPlicity, TaggedType, Type,
    Value,
};
use crate::grammar::Asn1Rules;
use crate::peg::{Action, ExprId, GrammarBuilder};

use super::{mismatch, pop1, pop2, reduce, Item};

/// Push a fixed leaf type; the matched text is irrelevant.
fn leaf(b: &mut GrammarBuilder, rule: ExprId, ty: Type) {
    b.apply(
        rule,
        reduce(move |stack, _, _| {
            stack.push(Item::Type(ty.clone()));
            Ok(true)
        }),
    );
}

pub(super) fn install(b: &mut GrammarBuilder, r: &Asn1Rules) {
    leaf(b, r.boolean_type, Type::Boolean);
    leaf(b, r.real_type, Type::Real);
    leaf(b, r.null_type, Type::Null);
    leaf(b, r.octet_string_type, Type::OctetString);
    leaf(b, r.object_identifier_type, Type::ObjectIdentifier);
    leaf(b, r.relative_oid_type, Type::RelativeOid);
    leaf(b, r.time_type, Type::Time);
    leaf(b, r.date_type, Type::Date);
    leaf(b, r.time_of_day_type, Type::TimeOfDay);
    leaf(b, r.date_time_type, Type::DateTime);
    leaf(b, r.duration_type, Type::Duration);
    leaf(b, r.unrestricted_string_type, Type::CharacterString(None));

    b.apply(
        r.restricted_string_type,
        reduce(|stack, _, txt| {
            stack.push(Item::Type(Type::CharacterString(Some(
                txt.get().to_string(),
            ))));
            Ok(true)
        }),
    );

    // Clause 14: defined types.

    b.apply(
        r.external_type_reference,
        reduce(|stack, _, _| {
            let (module, name) = match pop2(stack, "ExternalTypeReference")? {
                (Item::ModuleRef(m), Item::TypeRef(n)) => (m, n),
                (_, other) => return Err(mismatch("ExternalTypeReference", &other)),
            };
            stack.push(Item::Type(Type::Defined {
                module: Some(module),
                name,
            }));
            Ok(true)
        }),
    );
    b.apply(
        r.defined_type,
        reduce(|stack, _, _| {
            match pop1(stack, "DefinedType")? {
                t @ Item::Type(_) => stack.push(t),
                Item::TypeRef(name) => {
                    stack.push(Item::Type(Type::Defined { module: None, name }))
                }
                other => return Err(mismatch("DefinedType", &other)),
            }
            Ok(true)
        }),
    );

    // Clause 17: named types.

    b.apply(
        r.named_type,
        reduce(|stack, _, _| {
            let (name, ty) = match pop2(stack, "NamedType")? {
                (Item::Identifier(n), Item::Type(t)) => (n, t),
                (_, other) => return Err(mismatch("NamedType", &other)),
            };
            stack.push(Item::NamedType(NamedType {
                name,
                ty,
                presence: None,
            }));
            Ok(true)
        }),
    );

    // Clause 19: INTEGER.

    b.apply(
        r.integer_type_introducer,
        reduce(|stack, _, _| {
            stack.push(Item::IntegerType(Vec::new()));
            Ok(true)
        }),
    );
    b.apply(
        r.named_number,
        reduce(|stack, _, _| {
            let (name, value) = match pop2(stack, "NamedNumber")? {
                (Item::Identifier(n), Item::Number(v)) => (n, Value::Integer(v)),
                (Item::Identifier(n), Item::Value(v)) => (n, v),
                (_, other) => return Err(mismatch("NamedNumber", &other)),
            };
            stack.push(Item::NamedValue(NamedValue { name, value }));
            Ok(true)
        }),
    );
    b.apply(
        r.negated_number,
        reduce(|stack, _, _| {
            match pop1(stack, "NegatedNumber")? {
                Item::Number(n) => stack.push(Item::Number(-n)),
                other => return Err(mismatch("NegatedNumber", &other)),
            }
            Ok(true)
        }),
    );
    b.apply(
        r.named_number_item,
        reduce(|stack, _, _| {
            let (mut list, item) = match pop2(stack, "NamedNumberItem")? {
                (Item::IntegerType(l), Item::NamedValue(v)) => (l, v),
                (_, other) => return Err(mismatch("NamedNumberItem", &other)),
            };
            list.push(item);
            stack.push(Item::IntegerType(list));
            Ok(true)
        }),
    );

    // Clause 20: ENUMERATED.

    b.apply(
        r.enumerated_type_introducer,
        reduce(|stack, _, _| {
            stack.push(Item::EnumeratedType(Vec::new()));
            Ok(true)
        }),
    );
    b.apply(
        r.enumeration_item,
        reduce(|stack, _, _| {
            let (mut list, item) = match pop2(stack, "EnumerationItem")? {
                (Item::EnumeratedType(l), Item::NamedValue(v)) => (
                    l,
                    EnumItem {
                        name: v.name,
                        value: Some(v.value),
                    },
                ),
                (Item::EnumeratedType(l), Item::Identifier(n)) => (
                    l,
                    EnumItem {
                        name: n,
                        value: None,
                    },
                ),
                (_, other) => return Err(mismatch("EnumerationItem", &other)),
            };
            list.push(item);
            stack.push(Item::EnumeratedType(list));
            Ok(true)
        }),
    );

    // Clause 22: BIT STRING.

    b.apply(
        r.bit_string_type_introducer,
        reduce(|stack, _, _| {
            stack.push(Item::BitStringType(Vec::new()));
            Ok(true)
        }),
    );
    b.apply(
        r.named_bit,
        reduce(|stack, _, _| {
            let (name, value) = match pop2(stack, "NamedBit")? {
                (Item::Identifier(n), Item::Number(v)) => (n, Value::Integer(v)),
                (Item::Identifier(n), Item::Value(v)) => (n, v),
                (_, other) => return Err(mismatch("NamedBit", &other)),
            };
            stack.push(Item::NamedValue(NamedValue { name, value }));
            Ok(true)
        }),
    );
    b.apply(
        r.bit_string_type,
        reduce(|stack, _, _| {
            let mut bits = Vec::new();
            loop {
                match pop1(stack, "BitStringType")? {
                    Item::NamedValue(nv) => bits.push(nv),
                    Item::BitStringType(_) => break,
                    other => return Err(mismatch("BitStringType", &other)),
                }
            }
            bits.reverse();
            stack.push(Item::BitStringType(bits));
            Ok(true)
        }),
    );

    // Clauses 25-29: the component-list types share one closing shape.

    component_list_type(
        b,
        r.sequence_type_introducer,
        r.sequence_type,
        "SequenceType",
        Item::SequenceType,
    );
    component_list_type(b, r.set_type_introducer, r.set_type, "SetType", Item::SetType);
    component_list_type(
        b,
        r.choice_type_introducer,
        r.choice_type,
        "ChoiceType",
        Item::ChoiceType,
    );

    b.apply(
        r.optional_qualifier,
        reduce(|stack, _, _| {
            match pop1(stack, "OptionalQualifier")? {
                Item::NamedType(mut nt) => {
                    nt.presence = Some(ComponentPresence::Optional);
                    stack.push(Item::NamedType(nt));
                }
                other => return Err(mismatch("OptionalQualifier", &other)),
            }
            Ok(true)
        }),
    );
    b.apply(
        r.default_qualifier,
        reduce(|stack, _, _| {
            match pop2(stack, "DefaultQualifier")? {
                (Item::NamedType(mut nt), Item::Value(v)) => {
                    nt.presence = Some(ComponentPresence::Default(v));
                    stack.push(Item::NamedType(nt));
                }
                (_, other) => return Err(mismatch("DefaultQualifier", &other)),
            }
            Ok(true)
        }),
    );

    // Clauses 26 and 28: the OF types.

    of_type(b, r.sequence_of_type, "SequenceOfType", |name, element| {
        Type::SequenceOf { name, element }
    });
    of_type(b, r.set_of_type, "SetOfType", |name, element| Type::SetOf {
        name,
        element,
    });

    // Clause 30: selection types.

    b.apply(
        r.selection_type,
        reduce(|stack, _, _| {
            let (name, inner) = match pop2(stack, "SelectionType")? {
                (Item::Identifier(n), Item::Type(t)) => (n, t),
                (_, other) => return Err(mismatch("SelectionType", &other)),
            };
            stack.push(Item::Type(Type::Selection {
                name,
                inner: Box::new(inner),
            }));
            Ok(true)
        }),
    );

    // Clause 31: tags.

    b.apply(
        r.tag_introducer,
        reduce(|stack, _, _| {
            stack.push(Item::TaggedType(TaggedType {
                class: None,
                tag: Value::Null,
                plicity: None,
                inner: Type::Null,
            }));
            Ok(true)
        }),
    );
    // An encoding reference in a tag is recognized but carries no meaning
    // here; drop the item so it cannot disturb the tag assembly.
    b.apply(
        r.tag_encoding_reference,
        reduce(|stack, _, _| {
            match pop1(stack, "TagEncodingReference")? {
                Item::EncodingRef(_) => Ok(true),
                other => Err(mismatch("TagEncodingReference", &other)),
            }
        }),
    );
    b.apply(
        r.tag_class,
        reduce(|stack, _, txt| {
            let class = match txt.get() {
                "UNIVERSAL" => TagClass::Universal,
                "APPLICATION" => TagClass::Application,
                _ => TagClass::Private,
            };
            match pop1(stack, "TagClass")? {
                Item::TaggedType(mut t) => {
                    t.class = Some(class);
                    stack.push(Item::TaggedType(t));
                }
                other => return Err(mismatch("TagClass", &other)),
            }
            Ok(true)
        }),
    );
    b.apply(
        r.tag_class_number,
        reduce(|stack, _, _| {
            let (mut tagged, tag) = match pop2(stack, "TagClassNumber")? {
                (Item::TaggedType(t), Item::Number(n)) => (t, Value::Integer(n)),
                (Item::TaggedType(t), Item::Value(v)) => (t, v),
                (_, other) => return Err(mismatch("TagClassNumber", &other)),
            };
            tagged.tag = tag;
            stack.push(Item::TaggedType(tagged));
            Ok(true)
        }),
    );
    plicity(b, r.explicit_tag, "ExplicitTag", TagPlicity::Explicit);
    plicity(b, r.implicit_tag, "ImplicitTag", TagPlicity::Implicit);
    let close_tag: Action = reduce(|stack, _, _| {
        let (mut tagged, inner) = match pop2(stack, "TaggedType")? {
            (Item::TaggedType(t), Item::Type(i)) => (t, i),
            (_, other) => return Err(mismatch("TaggedType", &other)),
        };
        tagged.inner = inner;
        stack.push(Item::TaggedType(tagged));
        Ok(true)
    });
    b.apply(r.tagged_type, close_tag.clone());
    b.apply(r.prefixed_type, close_tag);

    // SET/SEQUENCE with a constraint between the keyword and OF.

    with_constraint(b, r.set_with_constraint, "SetWithConstraint", |n, e| {
        Type::SetOf { name: n, element: e }
    });
    with_constraint(
        b,
        r.sequence_with_constraint,
        "SequenceWithConstraint",
        |n, e| Type::SequenceOf { name: n, element: e },
    );

    // The builtin-type root normalizes every accumulator shape to a Type.

    b.apply(
        r.builtin_type,
        reduce(|stack, _, _| {
            let ty = match pop1(stack, "BuiltinType")? {
                Item::Type(t) => t,
                Item::IntegerType(l) => Type::Integer(l),
                Item::EnumeratedType(l) => Type::Enumerated(l),
                Item::BitStringType(l) => Type::BitString(l),
                Item::SequenceType(l) => Type::Sequence(l),
                Item::SetType(l) => Type::Set(l),
                Item::ChoiceType(l) => Type::Choice(l),
                Item::TaggedType(t) => Type::Tagged(Box::new(t)),
                other => return Err(mismatch("BuiltinType", &other)),
            };
            stack.push(Item::Type(ty));
            Ok(true)
        }),
    );

    // Trailing constraints attach to the type they follow.

    b.apply(
        r.ty,
        reduce(|stack, _, _| {
            let mut constraints = Vec::new();
            let base = loop {
                match pop1(stack, "Type")? {
                    Item::Constraint(c) => constraints.push(c),
                    Item::Type(t) => break t,
                    other => return Err(mismatch("Type", &other)),
                }
            };
            let ty = if constraints.is_empty() {
                base
            } else {
                constraints.reverse();
                Type::Constrained {
                    base: Box::new(base),
                    constraints,
                }
            };
            stack.push(Item::Type(ty));
            Ok(true)
        }),
    );
}

fn plicity(
    b: &mut GrammarBuilder,
    rule: ExprId,
    name: &'static str,
    which: TagPlicity,
) {
    b.apply(
        rule,
        reduce(move |stack, _, _| {
            match pop1(stack, name)? {
                Item::TaggedType(mut t) => {
                    t.plicity = Some(which);
                    stack.push(Item::TaggedType(t));
                }
                other => return Err(mismatch(name, &other)),
            }
            Ok(true)
        }),
    );
}

/// Introducer pushes an empty accumulator; the closer pops components
/// back down to it. Nested composites have already collapsed to a single
/// `Type` item by the time an enclosing closer runs, so the first marker
/// found is always the matching one.
fn component_list_type(
    b: &mut GrammarBuilder,
    introducer: ExprId,
    closer: ExprId,
    name: &'static str,
    make: fn(Vec<NamedType>) -> Item,
) {
    b.apply(
        introducer,
        reduce(move |stack, _, _| {
            stack.push(make(Vec::new()));
            Ok(true)
        }),
    );
    b.apply(
        closer,
        reduce(move |stack, _, _| {
            let mut components = Vec::new();
            loop {
                match pop1(stack, name)? {
                    Item::NamedType(nt) => components.push(nt),
                    Item::SequenceType(_) | Item::SetType(_) | Item::ChoiceType(_) => break,
                    other => return Err(mismatch(name, &other)),
                }
            }
            components.reverse();
            stack.push(make(components));
            Ok(true)
        }),
    );
}

fn of_type<F>(b: &mut GrammarBuilder, rule: ExprId, name: &'static str, make: F)
where
    F: Fn(Option<String>, Box<Type>) -> Type + Send + Sync + 'static,
{
    b.apply(
        rule,
        reduce(move |stack, _, _| {
            let ty = match pop1(stack, name)? {
                Item::Type(t) => make(None, Box::new(t)),
                Item::NamedType(nt) => make(Some(nt.name), Box::new(nt.ty)),
                other => return Err(mismatch(name, &other)),
            };
            stack.push(Item::Type(ty));
            Ok(true)
        }),
    );
}

fn with_constraint<F>(b: &mut GrammarBuilder, rule: ExprId, name: &'static str, make: F)
where
    F: Fn(Option<String>, Box<Type>) -> Type + Send + Sync + 'static,
{
    b.apply(
        rule,
        reduce(move |stack, _, _| {
            let (constraint, element) = pop2(stack, name)?;
            let constraint = match constraint {
                Item::Constraint(c) => c,
                other => return Err(mismatch(name, &other)),
            };
            let base = match element {
                Item::Type(t) => make(None, Box::new(t)),
                Item::NamedType(nt) => make(Some(nt.name), Box::new(nt.ty)),
                other => return Err(mismatch(name, &other)),
            };
            stack.push(Item::Type(Type::Constrained {
                base: Box::new(base),
                constraints: vec![constraint],
            }));
            Ok(true)
        }),
    );
}
