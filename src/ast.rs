//! The abstract syntax produced by a successful parse.
//!
//! These are plain data types: no interning, no spans, no resolution of
//! defined names across modules. Numeric fields use arbitrary precision
//! (`num::BigInt` / `num::BigUint`) because the notation places no bound on
//! literal size.

use num::{BigInt, BigUint};
use serde::Serialize;

/// A bit pattern with an explicit length, assembled from a binary or
/// hexadecimal string literal. `length` counts bits including leading
/// zeros, which the numeric value alone cannot represent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BitString {
    pub length: usize,
    pub bits: BigUint,
}

/// UNIVERSAL / APPLICATION / PRIVATE; context-specific when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TagClass {
    Universal,
    Application,
    Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TagPlicity {
    Explicit,
    Implicit,
}

/// A `[class number] EXPLICIT|IMPLICIT Type` prefix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaggedType {
    pub class: Option<TagClass>,
    /// The tag number, either a literal or a defined value.
    pub tag: Value,
    pub plicity: Option<TagPlicity>,
    pub inner: Type,
}

/// OPTIONAL, or DEFAULT with the default value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ComponentPresence {
    Optional,
    Default(Value),
}

/// `name Type`, optionally qualified with OPTIONAL/DEFAULT when it appears
/// as a SEQUENCE/SET component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedType {
    pub name: String,
    pub ty: Type,
    pub presence: Option<ComponentPresence>,
}

/// `name Value`. Also carries a named number (`a(1)`) or a named bit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedValue {
    pub name: String,
    pub value: Value,
}

/// One item of an ENUMERATED body: a bare name or a named number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumItem {
    pub name: String,
    pub value: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Type {
    Null,
    Boolean,
    Real,
    ObjectIdentifier,
    RelativeOid,
    OctetString,
    Time,
    Date,
    TimeOfDay,
    DateTime,
    Duration,
    /// INTEGER, with its (possibly empty) named-number list.
    Integer(Vec<NamedValue>),
    Enumerated(Vec<EnumItem>),
    /// BIT STRING, with its (possibly empty) named-bit list.
    BitString(Vec<NamedValue>),
    Sequence(Vec<NamedType>),
    SequenceOf {
        name: Option<String>,
        element: Box<Type>,
    },
    Set(Vec<NamedType>),
    SetOf {
        name: Option<String>,
        element: Box<Type>,
    },
    Choice(Vec<NamedType>),
    Tagged(Box<TaggedType>),
    /// A reference to a type defined elsewhere, optionally
    /// module-qualified.
    Defined {
        module: Option<String>,
        name: String,
    },
    /// `identifier < Type` selection.
    Selection {
        name: String,
        inner: Box<Type>,
    },
    /// A restricted character string type by name (`IA5String`, ...);
    /// `None` is the unrestricted `CHARACTER STRING`.
    CharacterString(Option<String>),
    /// A type with one or more subtype constraints applied.
    Constrained {
        base: Box<Type>,
        constraints: Vec<Constraint>,
    },
}

/// Element list of a SEQUENCE OF / SET OF value: all plain values or all
/// named values, never mixed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ValueList {
    Plain(Vec<Value>),
    Named(Vec<NamedValue>),
}

/// One component of an OBJECT IDENTIFIER or RELATIVE-OID value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum OidComponent {
    Name(String),
    Number(BigInt),
    NameAndNumber(String, BigInt),
    /// RELATIVE-OID components may also reference a defined value.
    Defined {
        module: Option<String>,
        name: String,
    },
}

/// One restricted-character-string building block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CharacterStringComponent {
    /// A quoted string with escapes resolved.
    Atom(String),
    /// `{ column, row }`.
    Tuple(BigInt, BigInt),
    /// `{ group, plane, row, cell }`.
    Quadruple(BigInt, BigInt, BigInt, BigInt),
    Defined {
        module: Option<String>,
        name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(BigInt),
    Real(f64),
    OctetString(Vec<u8>),
    BitString(BitString),
    /// A BIT STRING value given as `{ bitname, ... }`.
    NamedBits(Vec<String>),
    Defined {
        module: Option<String>,
        name: String,
    },
    Choice {
        name: String,
        value: Box<Value>,
    },
    Sequence(Vec<NamedValue>),
    SequenceOf(ValueList),
    Set(Vec<NamedValue>),
    SetOf(ValueList),
    ObjectIdentifier(Vec<OidComponent>),
    RelativeOid(Vec<OidComponent>),
    CharacterString(CharacterStringComponent),
    CharacterStringList(Vec<CharacterStringComponent>),
    /// A time literal, kept as written (between the quotes).
    Time(String),
}

/// Endpoint of a value-range constraint; `Min`/`Max` are the open keywords.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RangeBound {
    Min,
    Max,
    Value(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Constraint {
    /// A single permitted value.
    Value(Value),
    Range {
        min: RangeBound,
        min_included: bool,
        max: RangeBound,
        max_included: bool,
    },
    Union(Vec<Constraint>),
    Intersection(Vec<Constraint>),
    Except {
        base: Box<Constraint>,
        except: Box<Constraint>,
    },
    /// Everything; only appears as the base of an `ALL EXCEPT` exclusion.
    All,
    /// A contained subtype (`INCLUDES Type`) or a type constraint.
    Type(Type),
    Size(Box<Constraint>),
    From(Box<Constraint>),
    Pattern(Value),
}

/// EXPLICIT TAGS / IMPLICIT TAGS / AUTOMATIC TAGS in a module header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TagDefault {
    Explicit,
    Implicit,
    Automatic,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Exports {
    All,
    Symbols(Vec<String>),
}

/// One `symbols FROM Module { oid }` clause of an IMPORTS list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolsFromModule {
    pub symbols: Vec<String>,
    pub module: String,
    /// The module's assigned identifier, when given.
    pub identification: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Assignment {
    Type { name: String, ty: Type },
    Value { name: String, value: Value },
}

/// A whole `DEFINITIONS ... BEGIN ... END` module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Module {
    pub name: String,
    pub oid: Option<Vec<OidComponent>>,
    /// `encodingreference INSTRUCTIONS` default, when given.
    pub encoding_reference: Option<String>,
    pub tag_default: Option<TagDefault>,
    pub exports: Option<Exports>,
    pub imports: Vec<SymbolsFromModule>,
    pub assignments: Vec<Assignment>,
}
