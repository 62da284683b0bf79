//! Tests for the record codec
//!
//! These tests verify:
//! - Escape/unescape round-trips
//! - Record encode/decode round-trips
//! - Literal coercion
//! - Constraint validation

use casklite::catalog::{Column, ColumnType};
use casklite::error::CaskError;
use casklite::record::{self, Record, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn person_columns() -> Vec<Column> {
    vec![
        Column::new("id", ColumnType::Int, 5).indexed(),
        Column::new("name", ColumnType::Str, 10),
        Column::new("age", ColumnType::Int, 2),
    ]
}

fn person(id: i64, name: &str, age: i64) -> Record {
    let mut rec = Record::new();
    rec.set("id", Value::Int(id));
    rec.set("name", Value::Str(name.to_string()));
    rec.set("age", Value::Int(age));
    rec
}

// =============================================================================
// Escaping
// =============================================================================

#[test]
fn test_escape_round_trip() {
    let cases = [
        "plain",
        "",
        "back\\slash",
        "angle<bracket",
        "line\nbreak\r",
        "unit\x1fseparator",
        "<EOK><EOP><NAN>",
    ];

    for case in cases {
        let escaped = record::escape(case);
        assert_eq!(record::unescape(&escaped).unwrap(), case, "case {case:?}");
    }
}

#[test]
fn test_escaped_text_contains_no_delimiters() {
    // The replacement for '<' must not itself contain '<', or a value
    // like "x<EOP>y" would keep a literal delimiter after escaping.
    let escaped = record::escape("x<EOK>y<EOP>z<NAN>");
    assert!(!escaped.contains('<'));
    assert!(!escaped.contains("<EOK>"));
    assert!(!escaped.contains("<EOP>"));
    assert!(!escaped.contains("<NAN>"));
}

#[test]
fn test_unescape_rejects_dangling_escape() {
    assert!(matches!(
        record::unescape("oops\\"),
        Err(CaskError::CorruptLog(_))
    ));
}

#[test]
fn test_unescape_rejects_unknown_sequence() {
    assert!(matches!(
        record::unescape("\\z"),
        Err(CaskError::CorruptLog(_))
    ));
}

// =============================================================================
// Encode / Decode
// =============================================================================

#[test]
fn test_record_round_trip() {
    let columns = person_columns();
    let rec = person(1, "ada", 30);

    let encoded = record::encode(&rec, &columns).unwrap();
    assert_eq!(record::decode(&encoded, &columns).unwrap(), rec);
}

#[test]
fn test_record_round_trip_with_tricky_string() {
    let columns = vec![
        Column::new("id", ColumnType::Int, 5).indexed(),
        Column::new("name", ColumnType::Str, 100),
        Column::new("age", ColumnType::Int, 2),
    ];
    let rec = person(1, "a=b<EOK>\nc\x1fd", 30);

    let encoded = record::encode(&rec, &columns).unwrap();
    assert_eq!(record::decode(&encoded, &columns).unwrap(), rec);
}

#[test]
fn test_encode_fails_on_missing_value() {
    let columns = person_columns();
    let mut rec = Record::new();
    rec.set("id", Value::Int(1));

    let result = record::encode(&rec, &columns);
    assert!(matches!(
        result,
        Err(CaskError::ConstraintViolation { column, .. }) if column == "name"
    ));
}

#[test]
fn test_decode_rejects_undeclared_column() {
    let columns = person_columns();
    let result = record::decode("ghost=1", &columns);
    assert!(matches!(result, Err(CaskError::CorruptLog(_))));
}

#[test]
fn test_decode_rejects_missing_fields() {
    let columns = person_columns();
    let result = record::decode("id=1", &columns);
    assert!(matches!(result, Err(CaskError::CorruptLog(_))));
}

// =============================================================================
// Literals
// =============================================================================

#[test]
fn test_int_literal() {
    assert_eq!(
        record::decode_literal("42", ColumnType::Int).unwrap(),
        Value::Int(42)
    );
    assert_eq!(
        record::decode_literal(" -7 ", ColumnType::Int).unwrap(),
        Value::Int(-7)
    );
}

#[test]
fn test_str_literal_strips_one_quote_layer() {
    assert_eq!(
        record::decode_literal("'ada'", ColumnType::Str).unwrap(),
        Value::Str("ada".to_string())
    );
    assert_eq!(
        record::decode_literal("\"ada\"", ColumnType::Str).unwrap(),
        Value::Str("ada".to_string())
    );
    assert_eq!(
        record::decode_literal("''quoted''", ColumnType::Str).unwrap(),
        Value::Str("'quoted'".to_string())
    );
}

#[test]
fn test_unquoted_str_literal_passes_through() {
    assert_eq!(
        record::decode_literal("ada", ColumnType::Str).unwrap(),
        Value::Str("ada".to_string())
    );
}

#[test]
fn test_str_literal_preserves_case() {
    assert_eq!(
        record::decode_literal("'Ada Lovelace'", ColumnType::Str).unwrap(),
        Value::Str("Ada Lovelace".to_string())
    );
}

#[test]
fn test_bad_int_literal() {
    let result = record::decode_literal("'1'", ColumnType::Int);
    assert!(matches!(result, Err(CaskError::TypeMismatch { .. })));

    let result = record::decode_literal("one", ColumnType::Int);
    assert!(matches!(result, Err(CaskError::TypeMismatch { .. })));
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_validate_accepts_valid_record() {
    assert!(record::validate(&person(1, "ada", 30), &person_columns()).is_ok());
}

#[test]
fn test_validate_rejects_overlong_value() {
    // name max length is 10
    let rec = person(1, "a very long name", 30);
    let result = record::validate(&rec, &person_columns());
    assert!(matches!(
        result,
        Err(CaskError::ConstraintViolation { column, .. }) if column == "name"
    ));
}

#[test]
fn test_validate_rejects_overlong_int() {
    // age max length is 2 characters
    let rec = person(1, "ada", 100);
    let result = record::validate(&rec, &person_columns());
    assert!(matches!(
        result,
        Err(CaskError::ConstraintViolation { column, .. }) if column == "age"
    ));
}

#[test]
fn test_validate_rejects_type_mismatch() {
    let mut rec = person(1, "ada", 30);
    rec.set("age", Value::Str("thirty".to_string()));

    let result = record::validate(&rec, &person_columns());
    assert!(matches!(
        result,
        Err(CaskError::ConstraintViolation { column, .. }) if column == "age"
    ));
}

#[test]
fn test_validate_rejects_missing_column() {
    let mut rec = Record::new();
    rec.set("id", Value::Int(1));

    let result = record::validate(&rec, &person_columns());
    assert!(matches!(result, Err(CaskError::ConstraintViolation { .. })));
}

#[test]
fn test_validate_rejects_undeclared_column() {
    let mut rec = person(1, "ada", 30);
    rec.set("ghost", Value::Int(0));

    let result = record::validate(&rec, &person_columns());
    assert!(matches!(result, Err(CaskError::UnknownColumn(name)) if name == "ghost"));
}
