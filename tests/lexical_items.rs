use asn1_notation::ast::BitString;
use asn1_notation::{Asn1Notation, Item};
use num::{BigInt, BigUint};

fn notation() -> Asn1Notation {
    Asn1Notation::new().unwrap()
}

#[test]
fn typereference_accepts_names_and_rejects_keywords() {
    let n = notation();
    let r = n.rules();
    assert_eq!(
        n.parse_one(r.typereference, "My-Type").unwrap(),
        Some(Item::TypeRef("My-Type".into()))
    );
    // A keyword followed by more word material is an ordinary name.
    assert_eq!(
        n.parse_one(r.typereference, "BEGIN1").unwrap(),
        Some(Item::TypeRef("BEGIN1".into()))
    );
    assert_eq!(n.parse_one(r.typereference, "BEGIN").unwrap(), None);
    assert_eq!(n.parse_one(r.typereference, "lower").unwrap(), None);
}

#[test]
fn identifier_starts_lowercase() {
    let n = notation();
    let r = n.rules();
    assert_eq!(
        n.parse_one(r.identifier, "application-context").unwrap(),
        Some(Item::Identifier("application-context".into()))
    );
    assert_eq!(n.parse_one(r.identifier, "Upper").unwrap(), None);
    // Keywords are all upper-case, so this is a legal identifier.
    assert_eq!(
        n.parse_one(r.identifier, "true").unwrap(),
        Some(Item::Identifier("true".into()))
    );
}

#[test]
fn numbers_have_no_leading_zeros() {
    let n = notation();
    let r = n.rules();
    assert_eq!(
        n.parse_one(r.number, "0").unwrap(),
        Some(Item::Number(BigInt::from(0)))
    );
    assert_eq!(
        n.parse_one(r.number, "8571").unwrap(),
        Some(Item::Number(BigInt::from(8571)))
    );
    assert_eq!(n.parse_one(r.number, "007").unwrap(), None);
}

#[test]
fn bstring_ignores_internal_whitespace() {
    let n = notation();
    let got = n.parse_one(n.rules().bstring, "'1 00 10 01'B").unwrap();
    assert_eq!(
        got,
        Some(Item::BString(BitString {
            length: 7,
            bits: BigUint::from(73u32),
        }))
    );
}

#[test]
fn hstring_counts_four_bits_per_digit() {
    let n = notation();
    let got = n.parse_one(n.rules().hstring, "'DEAD BEEF'H").unwrap();
    assert_eq!(
        got,
        Some(Item::HString(BitString {
            length: 32,
            bits: BigUint::from(0xDEADBEEFu32),
        }))
    );
}

#[test]
fn bstring_and_hstring_read_the_same_digits_differently() {
    let n = notation();
    let r = n.rules();
    assert_eq!(
        n.parse_one(r.bstring, "'10011001'B").unwrap(),
        Some(Item::BString(BitString {
            length: 8,
            bits: BigUint::from(0b10011001u32),
        }))
    );
    assert_eq!(
        n.parse_one(r.hstring, "'10011001'H").unwrap(),
        Some(Item::HString(BitString {
            length: 32,
            bits: BigUint::from(0x10011001u32),
        }))
    );
}

#[test]
fn cstring_unescapes_quotes_and_removes_line_folds() {
    let n = notation();
    let input = "\"ABCDE\tFGH \n\tIJK\"\"XYZ\"";
    assert_eq!(
        n.parse_one(n.rules().cstring, input).unwrap(),
        Some(Item::CString("ABCDE\tFGHIJK\"XYZ".into()))
    );
}

#[test]
fn tstring_is_limited_to_the_time_alphabet() {
    let n = notation();
    let r = n.rules();
    assert_eq!(
        n.parse_one(r.tstring, "\"P0Y29M0DT0H0.00M\"").unwrap(),
        Some(Item::TString("P0Y29M0DT0H0.00M".into()))
    );
    assert_eq!(n.parse_one(r.tstring, "\"hello\"").unwrap(), None);
}
