//! The ASN.1 (X.680) notation as an expression arena.
//!
//! `build` assembles every production into a caller-supplied
//! [`GrammarBuilder`] and returns an [`Asn1Rules`] handle table: one
//! `ExprId` per production that either carries a reducer or serves as a
//! parse entry point. Reducers themselves are installed separately (see
//! `actions::install_actions`), so the syntax can also be used on its own
//! for pure recognition.
//!
//! Layout follows the X.680 clause numbering. Limitations carried over
//! from the source grammar: no extension/exception notation, no
//! `COMPONENTS OF`, no encoding prefixes, no information object classes.

mod keywords;

pub use keywords::KEYWORDS;

use crate::diagnostics::Fault;
use crate::peg::{ExprId, GrammarBuilder};

/// Handles to the grammar's named productions.
///
/// Every field that ends in `_introducer` (or is one of the `*_marker`
/// empties) is a zero-width expression whose only purpose is to anchor a
/// stack-marker action.
pub struct Asn1Rules {
    /// One separator unit: line comment, nestable block comment, or a
    /// whitespace character.
    pub separator: ExprId,

    // ==== CLAUSE 12: LEXICAL ITEMS ====
    pub typereference: ExprId,
    pub modulereference: ExprId,
    pub encodingreference: ExprId,
    pub valuereference: ExprId,
    pub identifier: ExprId,
    pub number: ExprId,
    pub realnumber: ExprId,
    pub bstring: ExprId,
    pub hstring: ExprId,
    pub cstring: ExprId,
    pub tstring: ExprId,

    // ==== CLAUSE 13: MODULE HEADERS ====
    pub definitive_oid_introducer: ExprId,
    pub definitive_name_and_number: ExprId,
    pub definitive_number: ExprId,
    pub definitive_name: ExprId,
    pub encoding_instructions: ExprId,
    pub tag_default: ExprId,
    pub symbol: ExprId,
    pub exports_introducer: ExprId,
    pub exports_symbols: ExprId,
    pub exports_all: ExprId,
    pub imports_introducer: ExprId,
    pub imports: ExprId,
    pub symbols_from_module_introducer: ExprId,
    pub symbols_from_module: ExprId,
    pub assigned_identifier_value: ExprId,
    pub module_definition: ExprId,

    // ==== CLAUSE 14: DEFINED TYPES AND VALUES ====
    pub external_type_reference: ExprId,
    pub external_value_reference: ExprId,
    pub defined_type: ExprId,
    pub defined_value: ExprId,

    // ==== CLAUSE 16: ASSIGNMENTS ====
    pub type_assignment: ExprId,
    pub value_assignment: ExprId,

    // ==== CLAUSE 17: TYPES AND VALUES ====
    pub ty: ExprId,
    pub value: ExprId,
    pub builtin_type: ExprId,
    pub builtin_value: ExprId,
    pub named_type: ExprId,
    pub named_value: ExprId,

    // ==== CLAUSE 18: BOOLEAN ====
    pub boolean_type: ExprId,
    pub boolean_value: ExprId,

    // ==== CLAUSE 19: INTEGER ====
    pub negated_number: ExprId,
    pub number_or_reference: ExprId,
    pub named_number: ExprId,
    pub named_number_item: ExprId,
    pub integer_type_introducer: ExprId,
    pub integer_type: ExprId,
    pub integer_value: ExprId,

    // ==== CLAUSE 20: ENUMERATED ====
    pub enumeration_item: ExprId,
    pub enumerated_type_introducer: ExprId,
    pub enumerated_type: ExprId,
    pub enumerated_value: ExprId,

    // ==== CLAUSE 21: REAL ====
    pub real_type: ExprId,
    pub negated_real_number: ExprId,
    pub numeric_real_value: ExprId,
    pub special_real_value: ExprId,
    pub real_value: ExprId,

    // ==== CLAUSE 22: BIT STRING ====
    pub named_bit: ExprId,
    pub bit_string_type_introducer: ExprId,
    pub bit_string_type: ExprId,
    pub identifier_list_introducer: ExprId,
    pub bit_string_value: ExprId,

    // ==== CLAUSE 23: OCTET STRING ====
    pub octet_string_type: ExprId,
    pub octet_string_value: ExprId,

    // ==== CLAUSE 24: NULL ====
    pub null_type: ExprId,
    pub null_value: ExprId,

    // ==== CLAUSES 25-28: SEQUENCE, SET, AND OF ====
    pub optional_qualifier: ExprId,
    pub default_qualifier: ExprId,
    pub sequence_type_introducer: ExprId,
    pub sequence_type: ExprId,
    pub sequence_value_introducer: ExprId,
    pub sequence_value: ExprId,
    pub sequence_of_type: ExprId,
    pub sequence_of_value_introducer: ExprId,
    pub sequence_of_value: ExprId,
    pub set_type_introducer: ExprId,
    pub set_type: ExprId,
    pub set_value_introducer: ExprId,
    pub set_value: ExprId,
    pub set_of_type: ExprId,
    pub set_of_value_introducer: ExprId,
    pub set_of_value: ExprId,

    // ==== CLAUSE 29: CHOICE ====
    pub choice_type_introducer: ExprId,
    pub choice_type: ExprId,
    pub choice_value: ExprId,

    // ==== CLAUSE 30: SELECTION ====
    pub selection_type: ExprId,

    // ==== CLAUSE 31: TAGS ====
    pub tag_introducer: ExprId,
    pub tag_encoding_reference: ExprId,
    pub tag_class: ExprId,
    pub tag_class_number: ExprId,
    pub explicit_tag: ExprId,
    pub implicit_tag: ExprId,
    pub tagged_type: ExprId,
    pub prefixed_type: ExprId,

    // ==== CLAUSES 32-33: OBJECT IDENTIFIERS ====
    pub object_identifier_type: ExprId,
    pub oid_introducer: ExprId,
    pub name_and_number_form: ExprId,
    pub name_form: ExprId,
    pub number_form: ExprId,
    pub object_identifier_value: ExprId,
    pub relative_oid_type: ExprId,
    pub relative_oid_introducer: ExprId,
    pub relative_oid_defined_value: ExprId,
    pub relative_oid_value: ExprId,

    // ==== CLAUSE 38: TIME AND DATE ====
    pub time_type: ExprId,
    pub time_value: ExprId,
    pub date_type: ExprId,
    pub time_of_day_type: ExprId,
    pub date_time_type: ExprId,
    pub duration_type: ExprId,

    // ==== CLAUSES 39-44: CHARACTER STRINGS ====
    pub restricted_string_type: ExprId,
    pub unrestricted_string_type: ExprId,
    pub character_string_type: ExprId,
    pub tuple: ExprId,
    pub quadruple: ExprId,
    pub atomic_character_string: ExprId,
    pub character_string_list_introducer: ExprId,
    pub character_string_list: ExprId,
    pub character_string_value: ExprId,

    // ==== CLAUSES 49-51: CONSTRAINTS ====
    pub constraint: ExprId,
    pub element_set_spec: ExprId,
    pub single_value: ExprId,
    pub contained_subtype: ExprId,
    pub value_range_introducer: ExprId,
    pub lower_end_value: ExprId,
    pub upper_end_value: ExprId,
    pub lower_less: ExprId,
    pub upper_less: ExprId,
    pub value_range: ExprId,
    pub permitted_alphabet: ExprId,
    pub size_constraint: ExprId,
    pub type_constraint: ExprId,
    pub pattern_constraint: ExprId,
    pub all_exclusions_introducer: ExprId,
    pub exclusions: ExprId,
    pub unions_introducer: ExprId,
    pub unions: ExprId,
    pub intersections_introducer: ExprId,
    pub intersections: ExprId,
    pub set_with_constraint: ExprId,
    pub sequence_with_constraint: ExprId,
    pub type_with_constraint: ExprId,
}

/// Assemble the whole grammar into `b`.
///
/// The only error paths are the `assign` contract checks on the forward
/// declarations, which cannot fire unless this function itself is broken;
/// they are propagated rather than unwrapped so the construction stays
/// panic-free.
pub fn build(b: &mut GrammarBuilder) -> Result<Asn1Rules, Fault> {
    // Forward declarations.
    let ty = b.fwd("Type");
    let value = b.fwd("Value");
    let type_assignment = b.fwd("TypeAssignment");
    let value_assignment = b.fwd("ValueAssignment");
    let element_set_spec = b.fwd("ElementSetSpec");
    let constraint = b.fwd("Constraint");

    // Shared punctuation. Literals never carry actions, so one node per
    // symbol is enough; productions that hang an action on a token (the
    // range `<` flags, for instance) allocate their own node instead.
    let lbrace = b.lit("{");
    let rbrace = b.lit("}");
    let lparen = b.lit("(");
    let rparen = b.lit(")");
    let lbracket = b.lit("[");
    let rbracket = b.lit("]");
    let comma = b.lit(",");
    let dot = b.lit(".");
    let colon = b.lit(":");
    let semicolon = b.lit(";");
    let assign_tok = b.lit("::=");
    let minus = b.lit("-");
    let range_tok = b.lit("..");

    // Keyword boundary: a keyword must not be followed by more word
    // material, so `BEGINNING` stays an ordinary identifier.
    let word_tail = b.pat("[a-zA-Z0-9_]+");

    // ==== SEPARATORS ====

    let line_comment = b.pat(r"--([^\n\r-]|-[^\n\r-])*(--|-?[\n\r])");
    let block_comment = b.fwd("blockComment");
    let block_open = b.lit("/*");
    let block_close = b.lit("*/");
    let block_text = b.pat(r"([*][^/]|[/][^*]|[^*/])+");
    let block_inner = b.sor(vec![block_comment, block_text]);
    let block_rep = b.rep0(block_inner);
    let block_body = b.seq(vec![block_open, block_rep, block_close]);
    b.assign(block_comment, block_body)?;
    let whitespace = b.pat(r"[ \t\r\n\f\v]");
    let separator = b.sor(vec![line_comment, block_comment, whitespace]);

    // ==== CLAUSE 12: LEXICAL ITEMS ====

    let upper_name = r"[A-Z](-?[a-zA-Z0-9_])*";
    let lower_name = r"[a-z](-?[a-zA-Z0-9_])*";
    let typereference = {
        let p = b.pat(upper_name);
        b.identifier(p, word_tail, KEYWORDS)
    };
    let modulereference = {
        let p = b.pat(upper_name);
        b.identifier(p, word_tail, KEYWORDS)
    };
    let encodingreference = {
        let p = b.pat(upper_name);
        b.identifier(p, word_tail, KEYWORDS)
    };
    let identifier = {
        let p = b.pat(lower_name);
        b.identifier(p, word_tail, KEYWORDS)
    };
    let valuereference = {
        let p = b.pat(lower_name);
        b.identifier(p, word_tail, KEYWORDS)
    };
    let number = b.pat(r"0|([1-9][0-9]*)");
    let realnumber = b.pat(r"(0|[1-9][0-9]*)([.][0-9]+)?([eE][+-]?[0-9]+)?");
    let bstring = b.pat(r"'([01 \t\r\n\v\f]*)'B");
    let hstring = b.pat(r"'([0-9A-F \t\r\n\v\f])*'[H]");
    let cstring = b.pat(r#""([^"]|"")*""#);
    let tstring = b.pat(r#""[0-9+:.,CDHMRPSTWYZ-]+""#);

    // ==== CLAUSE 14: DEFINED TYPES AND VALUES ====

    let external_type_reference = b.sep_seq(vec![modulereference, dot, typereference]);
    let defined_type = b.sor(vec![external_type_reference, typereference]);
    let external_value_reference = b.sep_seq(vec![modulereference, dot, valuereference]);
    let defined_value = b.sor(vec![external_value_reference, valuereference]);

    // ==== CLAUSE 17: NAMED TYPES AND VALUES ====

    let named_type = b.sep_seq(vec![identifier, ty]);
    let named_value = b.sep_seq(vec![identifier, value]);

    // ==== CLAUSE 18: BOOLEAN ====

    let boolean_type = b.keyword("BOOLEAN", word_tail);
    let kw_true = b.keyword("TRUE", word_tail);
    let kw_false = b.keyword("FALSE", word_tail);
    let boolean_value = b.sor(vec![kw_true, kw_false]);

    // ==== CLAUSE 19: INTEGER ====

    let negated_number = b.sep_seq(vec![minus, number]);
    let signed_number = b.sor(vec![negated_number, number]);
    let number_or_reference = b.sor(vec![signed_number, defined_value]);
    let named_number = b.sep_seq(vec![identifier, lparen, number_or_reference, rparen]);
    let named_number_item = b.seq(vec![named_number]);
    let named_number_tail = {
        let item = b.sep_seq(vec![comma, named_number_item]);
        b.rep0(item)
    };
    let named_number_list = b.sep_seq(vec![lbrace, named_number_item, named_number_tail, rbrace]);
    let opt_named_number_list = b.opt(named_number_list);
    let integer_type_introducer = b.keyword("INTEGER", word_tail);
    let integer_type = b.sep_seq(vec![integer_type_introducer, opt_named_number_list]);
    let integer_value = b.sor(vec![signed_number, identifier]);

    // ==== CLAUSE 20: ENUMERATED ====
    //
    // Additional enumerations and exception specs are not supported.

    let enumeration_item = b.sor(vec![named_number, identifier]);
    let enumeration_tail = {
        let item = b.sep_seq(vec![comma, enumeration_item]);
        b.rep0(item)
    };
    let enumerated_type_introducer = b.keyword("ENUMERATED", word_tail);
    let enumerated_type = b.sep_seq(vec![
        enumerated_type_introducer,
        lbrace,
        enumeration_item,
        enumeration_tail,
        rbrace,
    ]);
    let enumerated_value = b.seq(vec![identifier]);

    // ==== CLAUSE 21: REAL ====

    let real_type = b.keyword("REAL", word_tail);
    let negated_real_number = b.sep_seq(vec![minus, realnumber]);
    let numeric_real_value = b.sor(vec![negated_real_number, realnumber]);
    let kw_plus_inf = b.keyword("PLUS-INFINITY", word_tail);
    let kw_minus_inf = b.keyword("MINUS-INFINITY", word_tail);
    let kw_nan = b.keyword("NOT-A-NUMBER", word_tail);
    let special_real_value = b.sor(vec![kw_plus_inf, kw_minus_inf, kw_nan]);
    let real_value = b.sor(vec![numeric_real_value, special_real_value]);

    // ==== CLAUSE 22: BIT STRING ====

    let named_bit_value = b.sor(vec![number, defined_value]);
    let named_bit = b.sep_seq(vec![identifier, lparen, named_bit_value, rparen]);
    let named_bit_tail = {
        let item = b.sep_seq(vec![comma, named_bit]);
        b.rep0(item)
    };
    let named_bit_list = b.sep_seq(vec![lbrace, named_bit, named_bit_tail, rbrace]);
    let opt_named_bit_list = b.opt(named_bit_list);
    let bit_string_type_introducer = {
        let kw_bit = b.keyword("BIT", word_tail);
        let kw_string = b.keyword("STRING", word_tail);
        b.sep_seq(vec![kw_bit, kw_string])
    };
    let bit_string_type = b.sep_seq(vec![bit_string_type_introducer, opt_named_bit_list]);
    let identifier_list_introducer = b.empty();
    let identifier_list = {
        let more = b.sep_seq(vec![comma, identifier]);
        let tail = b.rep0(more);
        let list = b.sep_seq(vec![identifier, tail]);
        b.opt(list)
    };
    let identifier_list_value = b.sep_seq(vec![
        identifier_list_introducer,
        lbrace,
        identifier_list,
        rbrace,
    ]);
    let bit_string_value = b.sor(vec![bstring, hstring, identifier_list_value]);

    // ==== CLAUSE 23: OCTET STRING ====

    let octet_string_type = {
        let kw_octet = b.keyword("OCTET", word_tail);
        let kw_string = b.keyword("STRING", word_tail);
        b.sep_seq(vec![kw_octet, kw_string])
    };
    let octet_string_value = b.sor(vec![bstring, hstring]);

    // ==== CLAUSE 24: NULL ====

    let null_type = b.keyword("NULL", word_tail);
    let null_value = b.keyword("NULL", word_tail);

    // ==== CLAUSE 25: SEQUENCE ====
    //
    // Extension markers, exception specs, and COMPONENTS OF are not
    // supported.

    let optional_qualifier = b.keyword("OPTIONAL", word_tail);
    let default_qualifier = {
        let kw_default = b.keyword("DEFAULT", word_tail);
        b.sep_seq(vec![kw_default, value])
    };
    let component_qualifier = {
        let q = b.sor(vec![optional_qualifier, default_qualifier]);
        b.opt(q)
    };
    let component_type = b.sep_seq(vec![named_type, component_qualifier]);
    let component_type_list = {
        let more = b.sep_seq(vec![comma, component_type]);
        let tail = b.rep0(more);
        let list = b.sep_seq(vec![component_type, tail]);
        b.opt(list)
    };
    let sequence_type_introducer = b.keyword("SEQUENCE", word_tail);
    let sequence_type = b.sep_seq(vec![
        sequence_type_introducer,
        lbrace,
        component_type_list,
        rbrace,
    ]);
    let component_value_list = {
        let more = b.sep_seq(vec![comma, named_value]);
        let tail = b.rep0(more);
        let list = b.sep_seq(vec![named_value, tail]);
        b.opt(list)
    };
    let sequence_value_introducer = b.empty();
    let sequence_value = b.sep_seq(vec![
        sequence_value_introducer,
        lbrace,
        component_value_list,
        rbrace,
    ]);

    // ==== CLAUSE 26: SEQUENCE OF ====

    let sequence_of_type = {
        let kw_sequence = b.keyword("SEQUENCE", word_tail);
        let kw_of = b.keyword("OF", word_tail);
        let element = b.sor(vec![ty, named_type]);
        b.sep_seq(vec![kw_sequence, kw_of, element])
    };
    let value_or_named_value_list = {
        let value_more = b.sep_seq(vec![comma, value]);
        let value_tail = b.rep0(value_more);
        let value_list = b.sep_seq(vec![value, value_tail]);
        let named_more = b.sep_seq(vec![comma, named_value]);
        let named_tail = b.rep0(named_more);
        let named_list = b.sep_seq(vec![named_value, named_tail]);
        let either = b.sor(vec![named_list, value_list]);
        b.opt(either)
    };
    let sequence_of_value_introducer = b.empty();
    let sequence_of_value = b.sep_seq(vec![
        sequence_of_value_introducer,
        lbrace,
        value_or_named_value_list,
        rbrace,
    ]);

    // ==== CLAUSE 27: SET ====

    let set_type_introducer = b.keyword("SET", word_tail);
    let set_type = b.sep_seq(vec![set_type_introducer, lbrace, component_type_list, rbrace]);
    let set_value_introducer = b.empty();
    let set_value = b.sep_seq(vec![
        set_value_introducer,
        lbrace,
        component_value_list,
        rbrace,
    ]);

    // ==== CLAUSE 28: SET OF ====

    let set_of_type = {
        let kw_set = b.keyword("SET", word_tail);
        let kw_of = b.keyword("OF", word_tail);
        let element = b.sor(vec![ty, named_type]);
        b.sep_seq(vec![kw_set, kw_of, element])
    };
    let set_of_value_introducer = b.empty();
    let set_of_value = b.sep_seq(vec![
        set_of_value_introducer,
        lbrace,
        value_or_named_value_list,
        rbrace,
    ]);

    // ==== CLAUSE 29: CHOICE ====

    let alternative_type_list = {
        let more = b.sep_seq(vec![comma, named_type]);
        let tail = b.rep0(more);
        b.sep_seq(vec![named_type, tail])
    };
    let choice_type_introducer = b.keyword("CHOICE", word_tail);
    let choice_type = b.sep_seq(vec![
        choice_type_introducer,
        lbrace,
        alternative_type_list,
        rbrace,
    ]);
    let choice_value = b.sep_seq(vec![identifier, colon, value]);

    // ==== CLAUSE 30: SELECTION ====

    let selection_type = {
        let lt = b.lit("<");
        b.sep_seq(vec![identifier, lt, ty])
    };

    // ==== CLAUSE 31: TAGS ====
    //
    // Encoding-prefixed types are not supported; an encoding reference in
    // a tag is parsed and discarded.

    let tag_introducer = b.empty();
    let tag_encoding_reference = b.sep_seq(vec![encodingreference, colon]);
    let opt_tag_encoding_reference = b.opt(tag_encoding_reference);
    let tag_class = {
        let kw_universal = b.keyword("UNIVERSAL", word_tail);
        let kw_application = b.keyword("APPLICATION", word_tail);
        let kw_private = b.keyword("PRIVATE", word_tail);
        b.sor(vec![kw_universal, kw_application, kw_private])
    };
    let opt_tag_class = b.opt(tag_class);
    let tag_class_number = b.sor(vec![number, defined_value]);
    let tag = b.sep_seq(vec![
        tag_introducer,
        lbracket,
        opt_tag_encoding_reference,
        opt_tag_class,
        tag_class_number,
        rbracket,
    ]);
    let explicit_tag = b.keyword("EXPLICIT", word_tail);
    let implicit_tag = b.keyword("IMPLICIT", word_tail);
    let opt_plicity = {
        let plicity = b.sor(vec![explicit_tag, implicit_tag]);
        b.opt(plicity)
    };
    let tagged_type = b.sep_seq(vec![tag, opt_plicity, ty]);
    let prefixed_type = b.copy_of(tagged_type);

    // ==== CLAUSE 32: OBJECT IDENTIFIER ====

    let object_identifier_type = {
        let kw_object = b.keyword("OBJECT", word_tail);
        let kw_identifier = b.keyword("IDENTIFIER", word_tail);
        b.sep_seq(vec![kw_object, kw_identifier])
    };
    let oid_introducer = b.empty();
    let name_and_number_form = b.sep_seq(vec![identifier, lparen, number, rparen]);
    let name_form = b.seq(vec![identifier]);
    let number_form = b.seq(vec![number]);
    let obj_id_components = b.sor(vec![name_and_number_form, name_form, number_form]);
    let obj_id_component_list = {
        let item = b.sep_seq(vec![obj_id_components]);
        b.rep1(item)
    };
    let object_identifier_value = b.sep_seq(vec![
        oid_introducer,
        lbrace,
        obj_id_component_list,
        rbrace,
    ]);

    // ==== CLAUSE 33: RELATIVE-OID ====

    let relative_oid_type = b.keyword("RELATIVE-OID", word_tail);
    let relative_oid_introducer = b.empty();
    let relative_oid_defined_value = b.seq(vec![defined_value]);
    let relative_oid_components = b.sor(vec![
        name_and_number_form,
        number_form,
        relative_oid_defined_value,
    ]);
    let relative_oid_component_list = {
        let item = b.sep_seq(vec![relative_oid_components]);
        b.rep1(item)
    };
    let relative_oid_value = b.sep_seq(vec![
        relative_oid_introducer,
        lbrace,
        relative_oid_component_list,
        rbrace,
    ]);

    // ==== CLAUSE 38: TIME AND DATE ====

    let time_type = b.keyword("TIME", word_tail);
    let time_value = b.seq(vec![tstring]);
    let date_type = b.keyword("DATE", word_tail);
    let time_of_day_type = b.keyword("TIME-OF-DAY", word_tail);
    let date_time_type = b.keyword("DATE-TIME", word_tail);
    let duration_type = b.keyword("DURATION", word_tail);

    // ==== CLAUSES 39-44: CHARACTER STRINGS ====

    let restricted_string_type = {
        let names = [
            "BMPString",
            "GeneralString",
            "GraphicString",
            "IA5String",
            "ISO646String",
            "NumericString",
            "PrintableString",
            "TeletexString",
            "T61String",
            "UniversalString",
            "UTF8String",
            "VideotexString",
            "VisibleString",
        ];
        let alts: Vec<ExprId> = names.iter().map(|n| b.keyword(n, word_tail)).collect();
        b.sor(alts)
    };
    let unrestricted_string_type = {
        let kw_character = b.keyword("CHARACTER", word_tail);
        let kw_string = b.keyword("STRING", word_tail);
        b.sep_seq(vec![kw_character, kw_string])
    };
    let character_string_type = b.sor(vec![restricted_string_type, unrestricted_string_type]);
    let quadruple = b.sep_seq(vec![
        lbrace, number, comma, number, comma, number, comma, number, rbrace,
    ]);
    let tuple = b.sep_seq(vec![lbrace, number, comma, number, rbrace]);
    let atomic_character_string = b.seq(vec![cstring]);
    let chars_defn = b.sor(vec![atomic_character_string, quadruple, tuple, defined_value]);
    let character_string_list_introducer = b.empty();
    let character_string_list = {
        let more = b.sep_seq(vec![comma, chars_defn]);
        let tail = b.rep0(more);
        b.sep_seq(vec![
            character_string_list_introducer,
            lbrace,
            chars_defn,
            tail,
            rbrace,
        ])
    };
    let restricted_string_value = b.sor(vec![
        atomic_character_string,
        quadruple,
        tuple,
        character_string_list,
    ]);
    let character_string_value = b.sor(vec![restricted_string_value, sequence_value]);

    // ==== CLAUSES 49-51: CONSTRAINTS ====
    //
    // Exception specs, inner type constraints (WITH COMPONENT/COMPONENTS),
    // property settings, and general constraints are not supported.

    let single_value = b.seq(vec![value]);
    let contained_subtype = {
        let kw_includes = b.keyword("INCLUDES", word_tail);
        let opt_includes = b.opt(kw_includes);
        b.sep_seq(vec![opt_includes, ty])
    };
    let value_range_introducer = b.empty();
    let lower_end_value = b.seq(vec![value]);
    let upper_end_value = b.seq(vec![value]);
    let kw_min = b.keyword("MIN", word_tail);
    let kw_max = b.keyword("MAX", word_tail);
    let lower_less = b.lit("<");
    let upper_less = b.lit("<");
    let lower_endpoint = {
        let base = b.sor(vec![lower_end_value, kw_min]);
        let open = b.opt(lower_less);
        b.sep_seq(vec![base, open])
    };
    let upper_endpoint = {
        let open = b.opt(upper_less);
        let base = b.sor(vec![upper_end_value, kw_max]);
        b.sep_seq(vec![open, base])
    };
    let value_range = b.sep_seq(vec![
        value_range_introducer,
        lower_endpoint,
        range_tok,
        upper_endpoint,
    ]);
    let permitted_alphabet = {
        let kw_from = b.keyword("FROM", word_tail);
        b.sep_seq(vec![kw_from, constraint])
    };
    let size_constraint = {
        let kw_size = b.keyword("SIZE", word_tail);
        b.sep_seq(vec![kw_size, constraint])
    };
    let type_constraint = b.seq(vec![ty]);
    let pattern_constraint = {
        let kw_pattern = b.keyword("PATTERN", word_tail);
        b.sep_seq(vec![kw_pattern, value])
    };
    let subtype_elements = b.sor(vec![
        contained_subtype,
        value_range,
        permitted_alphabet,
        size_constraint,
        type_constraint,
        pattern_constraint,
        single_value,
    ]);
    let parens_element_set_spec = b.sep_seq(vec![lparen, element_set_spec, rparen]);
    let elements = b.sor(vec![subtype_elements, parens_element_set_spec]);
    let exclusions = {
        let kw_except = b.keyword("EXCEPT", word_tail);
        b.sep_seq(vec![kw_except, elements])
    };
    let all_exclusions_introducer = b.empty();
    let exclusions_spec = {
        let kw_all = b.keyword("ALL", word_tail);
        b.sep_seq(vec![kw_all, all_exclusions_introducer, exclusions])
    };
    let opt_exclusions = b.opt(exclusions);
    let intersection_elements = b.sep_seq(vec![elements, opt_exclusions]);
    let intersections_introducer = b.empty();
    let intersections = {
        let caret = b.lit("^");
        let kw_intersection = b.keyword("INTERSECTION", word_tail);
        let mark = b.sor(vec![caret, kw_intersection]);
        let more = b.sep_seq(vec![mark, intersection_elements]);
        let tail = b.rep0(more);
        b.sep_seq(vec![intersections_introducer, intersection_elements, tail])
    };
    let unions_introducer = b.empty();
    let unions = {
        let bar = b.lit("|");
        let kw_union = b.keyword("UNION", word_tail);
        let mark = b.sor(vec![bar, kw_union]);
        let more = b.sep_seq(vec![mark, intersections]);
        let tail = b.rep0(more);
        b.sep_seq(vec![unions_introducer, intersections, tail])
    };
    let element_set_spec_body = b.sor(vec![exclusions_spec, unions]);
    b.assign(element_set_spec, element_set_spec_body)?;
    let constraint_body = b.sep_seq(vec![lparen, element_set_spec, rparen]);
    b.assign(constraint, constraint_body)?;

    let type_or_named_type = b.sor(vec![named_type, ty]);
    let constraint_or_size = b.sor(vec![constraint, size_constraint]);
    let set_with_constraint = {
        let kw_set = b.keyword("SET", word_tail);
        let kw_of = b.keyword("OF", word_tail);
        b.sep_seq(vec![kw_set, constraint_or_size, kw_of, type_or_named_type])
    };
    let sequence_with_constraint = {
        let kw_sequence = b.keyword("SEQUENCE", word_tail);
        let kw_of = b.keyword("OF", word_tail);
        b.sep_seq(vec![kw_sequence, constraint_or_size, kw_of, type_or_named_type])
    };
    let type_with_constraint = b.sor(vec![set_with_constraint, sequence_with_constraint]);

    // ==== CLAUSE 17 REDUX: TYPE AND VALUE ROOTS ====

    let builtin_type = b.sor(vec![
        bit_string_type,
        boolean_type,
        character_string_type,
        choice_type,
        date_time_type,
        date_type,
        duration_type,
        enumerated_type,
        integer_type,
        null_type,
        object_identifier_type,
        octet_string_type,
        real_type,
        relative_oid_type,
        sequence_type,
        sequence_of_type,
        set_type,
        set_of_type,
        prefixed_type,
        time_of_day_type,
        time_type,
    ]);
    let referenced_type = b.sor(vec![defined_type, selection_type]);
    let unconstrained_type = b.sor(vec![builtin_type, referenced_type, type_with_constraint]);
    let trailing_constraints = b.rep0(constraint);
    let type_body = b.sep_seq(vec![unconstrained_type, trailing_constraints]);
    b.assign(ty, type_body)?;

    let builtin_value = b.sor(vec![
        bit_string_value,
        boolean_value,
        character_string_value,
        choice_value,
        enumerated_value,
        integer_value,
        null_value,
        object_identifier_value,
        octet_string_value,
        real_value,
        relative_oid_value,
        sequence_value,
        sequence_of_value,
        set_value,
        set_of_value,
        time_value,
    ]);
    let value_body = b.sor(vec![builtin_value, defined_value]);
    b.assign(value, value_body)?;

    // ==== CLAUSE 16: ASSIGNMENTS ====

    let type_assignment_body = b.sep_seq(vec![typereference, assign_tok, ty]);
    b.assign(type_assignment, type_assignment_body)?;
    let value_assignment_body = b.sep_seq(vec![valuereference, assign_tok, value]);
    b.assign(value_assignment, value_assignment_body)?;

    // ==== CLAUSE 13: MODULE HEADERS ====

    let definitive_oid_introducer = b.empty();
    let definitive_name_and_number = b.sep_seq(vec![identifier, lparen, number, rparen]);
    let definitive_number = b.seq(vec![number]);
    let definitive_name = b.seq(vec![identifier]);
    let definitive_component = b.sor(vec![
        definitive_name_and_number,
        definitive_number,
        definitive_name,
    ]);
    let definitive_component_list = {
        let item = b.sep_seq(vec![definitive_component]);
        b.rep1(item)
    };
    let definitive_oid = b.sep_seq(vec![
        definitive_oid_introducer,
        lbrace,
        definitive_component_list,
        rbrace,
    ]);
    let module_identifier = {
        let opt_oid = b.opt(definitive_oid);
        b.sep_seq(vec![modulereference, opt_oid])
    };
    let encoding_instructions = {
        let kw_instructions = b.keyword("INSTRUCTIONS", word_tail);
        b.sep_seq(vec![encodingreference, kw_instructions])
    };
    let opt_encoding_instructions = b.opt(encoding_instructions);
    let tag_default = {
        let kw_explicit = b.keyword("EXPLICIT", word_tail);
        let kw_implicit = b.keyword("IMPLICIT", word_tail);
        let kw_automatic = b.keyword("AUTOMATIC", word_tail);
        let kw_tags_1 = b.keyword("TAGS", word_tail);
        let kw_tags_2 = b.keyword("TAGS", word_tail);
        let kw_tags_3 = b.keyword("TAGS", word_tail);
        let explicit = b.sep_seq(vec![kw_explicit, kw_tags_1]);
        let implicit = b.sep_seq(vec![kw_implicit, kw_tags_2]);
        let automatic = b.sep_seq(vec![kw_automatic, kw_tags_3]);
        b.sor(vec![explicit, implicit, automatic])
    };
    let opt_tag_default = b.opt(tag_default);

    let reference = b.sor(vec![typereference, valuereference]);
    let symbol = b.seq(vec![reference]);
    let symbol_list = {
        let more = b.sep_seq(vec![comma, symbol]);
        let tail = b.rep0(more);
        let list = b.sep_seq(vec![symbol, tail]);
        b.opt(list)
    };
    let exports_introducer = b.empty();
    let exports_symbols = {
        let kw_exports = b.keyword("EXPORTS", word_tail);
        b.sep_seq(vec![kw_exports, exports_introducer, symbol_list, semicolon])
    };
    let exports_all = {
        let kw_exports = b.keyword("EXPORTS", word_tail);
        let kw_all = b.keyword("ALL", word_tail);
        b.sep_seq(vec![kw_exports, kw_all, semicolon])
    };
    let exports = b.sor(vec![exports_symbols, exports_all]);

    let assigned_identifier_value = {
        let inner = b.sor(vec![object_identifier_value, defined_value]);
        b.seq(vec![inner])
    };
    let assigned_identifier = b.opt(assigned_identifier_value);
    let selection_option = {
        let kw_with_1 = b.keyword("WITH", word_tail);
        let kw_with_2 = b.keyword("WITH", word_tail);
        let kw_successors = b.keyword("SUCCESSORS", word_tail);
        let kw_descendants = b.keyword("DESCENDANTS", word_tail);
        let successors = b.sep_seq(vec![kw_with_1, kw_successors]);
        let descendants = b.sep_seq(vec![kw_with_2, kw_descendants]);
        b.sor(vec![successors, descendants])
    };
    let opt_selection_option = b.opt(selection_option);
    let symbols_from_module_introducer = b.empty();
    let symbols_from_module = {
        let kw_from = b.keyword("FROM", word_tail);
        b.sep_seq(vec![
            symbols_from_module_introducer,
            symbol_list,
            kw_from,
            modulereference,
            assigned_identifier,
            opt_selection_option,
        ])
    };
    let imports_introducer = b.empty();
    let imports = {
        let kw_imports = b.keyword("IMPORTS", word_tail);
        let item = b.sep_seq(vec![symbols_from_module]);
        let list = b.rep0(item);
        let opt_semicolon = b.opt(semicolon);
        b.sep_seq(vec![kw_imports, imports_introducer, list, opt_semicolon])
    };
    let opt_exports = b.opt(exports);
    let opt_imports = b.opt(imports);
    let assignment = b.sor(vec![type_assignment, value_assignment]);
    let assignment_list = {
        let item = b.sep_seq(vec![assignment]);
        b.rep0(item)
    };
    let module_body = b.sep_seq(vec![opt_exports, opt_imports, assignment_list]);
    let module_definition = {
        let kw_definitions = b.keyword("DEFINITIONS", word_tail);
        let kw_begin = b.keyword("BEGIN", word_tail);
        let kw_end = b.keyword("END", word_tail);
        b.sep_seq(vec![
            module_identifier,
            kw_definitions,
            opt_encoding_instructions,
            opt_tag_default,
            assign_tok,
            kw_begin,
            module_body,
            kw_end,
        ])
    };

    Ok(Asn1Rules {
        separator,
        typereference,
        modulereference,
        encodingreference,
        valuereference,
        identifier,
        number,
        realnumber,
        bstring,
        hstring,
        cstring,
        tstring,
        definitive_oid_introducer,
        definitive_name_and_number,
        definitive_number,
        definitive_name,
        encoding_instructions,
        tag_default,
        symbol,
        exports_introducer,
        exports_symbols,
        exports_all,
        imports_introducer,
        imports,
        symbols_from_module_introducer,
        symbols_from_module,
        assigned_identifier_value,
        module_definition,
        external_type_reference,
        external_value_reference,
        defined_type,
        defined_value,
        type_assignment,
        value_assignment,
        ty,
        value,
        builtin_type,
        builtin_value,
        named_type,
        named_value,
        boolean_type,
        boolean_value,
        negated_number,
        number_or_reference,
        named_number,
        named_number_item,
        integer_type_introducer,
        integer_type,
        integer_value,
        enumeration_item,
        enumerated_type_introducer,
        enumerated_type,
        enumerated_value,
        real_type,
        negated_real_number,
        numeric_real_value,
        special_real_value,
        real_value,
        named_bit,
        bit_string_type_introducer,
        bit_string_type,
        identifier_list_introducer,
        bit_string_value,
        octet_string_type,
        octet_string_value,
        null_type,
        null_value,
        optional_qualifier,
        default_qualifier,
        sequence_type_introducer,
        sequence_type,
        sequence_value_introducer,
        sequence_value,
        sequence_of_type,
        sequence_of_value_introducer,
        sequence_of_value,
        set_type_introducer,
        set_type,
        set_value_introducer,
        set_value,
        set_of_type,
        set_of_value_introducer,
        set_of_value,
        choice_type_introducer,
        choice_type,
        choice_value,
        selection_type,
        tag_introducer,
        tag_encoding_reference,
        tag_class,
        tag_class_number,
        explicit_tag,
        implicit_tag,
        tagged_type,
        prefixed_type,
        object_identifier_type,
        oid_introducer,
        name_and_number_form,
        name_form,
        number_form,
        object_identifier_value,
        relative_oid_type,
        relative_oid_introducer,
        relative_oid_defined_value,
        relative_oid_value,
        time_type,
        time_value,
        date_type,
        time_of_day_type,
        date_time_type,
        duration_type,
        restricted_string_type,
        unrestricted_string_type,
        character_string_type,
        tuple,
        quadruple,
        atomic_character_string,
        character_string_list_introducer,
        character_string_list,
        character_string_value,
        constraint,
        element_set_spec,
        single_value,
        contained_subtype,
        value_range_introducer,
        lower_end_value,
        upper_end_value,
        lower_less,
        upper_less,
        value_range,
        permitted_alphabet,
        size_constraint,
        type_constraint,
        pattern_constraint,
        all_exclusions_introducer,
        exclusions,
        unions_introducer,
        unions,
        intersections_introducer,
        intersections,
        set_with_constraint,
        sequence_with_constraint,
        type_with_constraint,
    })
}
