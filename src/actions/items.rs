use num::bigint::BigInt;

use crate::ast::{
    Assignment, BitString, CharacterStringComponent, Constraint, EnumItem, Exports, Module,
    NamedType, NamedValue, OidComponent, RangeBound, SymbolsFromModule, TagDefault, TaggedType,
    Type, Value, ValueList,
};

/// Which of bits and names a BIT STRING value literal carried.
#[derive(Debug, Clone, PartialEq)]
pub enum BitsOrNames {
    Bits(BitString),
    Names(Vec<String>),
}

/// A partially assembled value range constraint.
///
/// Pushed by the range introducer with both ends open, then narrowed by
/// the endpoint reducers before the closing reducer turns it into a
/// [`Constraint::Range`].
#[derive(Debug, Clone, PartialEq)]
pub struct RangeInProgress {
    pub min: RangeBound,
    pub min_included: bool,
    pub max: RangeBound,
    pub max_included: bool,
}

impl Default for RangeInProgress {
    fn default() -> Self {
        RangeInProgress {
            min: RangeBound::Min,
            min_included: true,
            max: RangeBound::Max,
            max_included: true,
        }
    }
}

/// Everything that can sit on the reduction stack.
///
/// Leaf variants hold raw lexical material; the `*Type`, `*Value`, and
/// marker variants are intermediate shapes that exist only between an
/// introducer and its closing reducer. A finished parse leaves exactly
/// one `Type`, `Value`, `Assignment`, or `Module` behind (or a leaf, when
/// a lexical rule is used as the entry point).
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    // Lexical leaves.
    TypeRef(String),
    ValueRef(String),
    ModuleRef(String),
    EncodingRef(String),
    Identifier(String),
    CString(String),
    TString(String),
    Number(BigInt),
    RealNumber(f64),
    BString(BitString),
    HString(BitString),

    // Finished constructs.
    Type(Type),
    Value(Value),
    NamedType(NamedType),
    NamedValue(NamedValue),
    Assignment(Assignment),
    Module(Module),

    // Accumulators and markers for composite types.
    IntegerType(Vec<NamedValue>),
    EnumeratedType(Vec<EnumItem>),
    BitStringType(Vec<NamedValue>),
    SequenceType(Vec<NamedType>),
    SetType(Vec<NamedType>),
    ChoiceType(Vec<NamedType>),
    TaggedType(TaggedType),

    // Accumulators and markers for composite values.
    BitStringValue(BitsOrNames),
    SequenceValue(Vec<NamedValue>),
    SetValue(Vec<NamedValue>),
    SequenceOfValue(ValueList),
    SetOfValue(ValueList),
    OidValue(Vec<OidComponent>),
    CharacterStringList(Vec<CharacterStringComponent>),

    // Constraint assembly.
    Constraint(Constraint),
    ValueRange(RangeInProgress),
    UnionsMarker,
    IntersectionsMarker,

    // Module assembly.
    Symbol(String),
    Exports(Exports),
    ImportsMarker,
    SymbolsFromModuleMarker,
    SymbolsFromModule(SymbolsFromModule),
    Imports(Vec<SymbolsFromModule>),
    TagDefault(TagDefault),
}

impl Item {
    /// Stable name for mismatch diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Item::TypeRef(_) => "typereference",
            Item::ValueRef(_) => "valuereference",
            Item::ModuleRef(_) => "modulereference",
            Item::EncodingRef(_) => "encodingreference",
            Item::Identifier(_) => "identifier",
            Item::CString(_) => "cstring",
            Item::TString(_) => "tstring",
            Item::Number(_) => "number",
            Item::RealNumber(_) => "realnumber",
            Item::BString(_) => "bstring",
            Item::HString(_) => "hstring",
            Item::Type(_) => "Type",
            Item::Value(_) => "Value",
            Item::NamedType(_) => "NamedType",
            Item::NamedValue(_) => "NamedValue",
            Item::Assignment(_) => "Assignment",
            Item::Module(_) => "Module",
            Item::IntegerType(_) => "IntegerType",
            Item::EnumeratedType(_) => "EnumeratedType",
            Item::BitStringType(_) => "BitStringType",
            Item::SequenceType(_) => "SequenceType",
            Item::SetType(_) => "SetType",
            Item::ChoiceType(_) => "ChoiceType",
            Item::TaggedType(_) => "TaggedType",
            Item::BitStringValue(_) => "BitStringValue",
            Item::SequenceValue(_) => "SequenceValue",
            Item::SetValue(_) => "SetValue",
            Item::SequenceOfValue(_) => "SequenceOfValue",
            Item::SetOfValue(_) => "SetOfValue",
            Item::OidValue(_) => "ObjectIdentifierValue",
            Item::CharacterStringList(_) => "CharacterStringList",
            Item::Constraint(_) => "Constraint",
            Item::ValueRange(_) => "ValueRange",
            Item::UnionsMarker => "UnionsMarker",
            Item::IntersectionsMarker => "IntersectionsMarker",
            Item::Symbol(_) => "Symbol",
            Item::Exports(_) => "Exports",
            Item::ImportsMarker => "ImportsMarker",
            Item::SymbolsFromModuleMarker => "SymbolsFromModuleMarker",
            Item::SymbolsFromModule(_) => "SymbolsFromModule",
            Item::Imports(_) => "Imports",
            Item::TagDefault(_) => "TagDefault",
        }
    }
}
