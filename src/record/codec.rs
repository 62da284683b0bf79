//! Record codec
//!
//! Deterministic two-way mapping between a `Record` and its on-disk
//! textual form, plus coercion of user-supplied literal tokens.
//!
//! ## Encoded Form
//! ```text
//! name=value<US>name=value<US>name=value
//! ```
//! Fields are joined with the unit separator (0x1F) in declared column
//! order. Value text is escaped so that the encoded form contains no
//! separator, no `<` (the opening of the log delimiter tokens), and no
//! line break. `<` maps to `\l` rather than `\<` so the escaped output
//! itself cannot spell a delimiter token.

use crate::catalog::{Column, ColumnType};
use crate::error::{CaskError, Result};

use super::{Record, Value};

/// Separator between encoded fields
const FIELD_SEP: char = '\x1f';

// =============================================================================
// Escaping
// =============================================================================

/// Escape value text for embedding in a log entry
///
/// Escape set: `\`, `<`, newline, carriage return, and the field
/// separator. Everything else passes through unchanged. None of the
/// replacement sequences reintroduce an escaped character, so the
/// output is free of `<` and the recovery scan can split entries on
/// the raw delimiter tokens.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '<' => out.push_str("\\l"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            FIELD_SEP => out.push_str("\\u"),
            other => out.push(other),
        }
    }
    out
}

/// Invert `escape`; fails on a dangling or unknown escape sequence
pub fn unescape(text: &str) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('l') => out.push('<'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('u') => out.push(FIELD_SEP),
            Some(other) => {
                return Err(CaskError::CorruptLog(format!(
                    "unknown escape sequence \\{other}"
                )))
            }
            None => {
                return Err(CaskError::CorruptLog(
                    "dangling escape at end of value".to_string(),
                ))
            }
        }
    }
    Ok(out)
}

// =============================================================================
// Record <-> Text
// =============================================================================

/// Encode a record in declared column order
///
/// Every column must have a value; `validate` is expected to have run
/// first, but a missing value still fails cleanly here.
pub fn encode(record: &Record, columns: &[Column]) -> Result<String> {
    let mut fields = Vec::with_capacity(columns.len());
    for col in columns {
        let value = record
            .get(&col.name)
            .ok_or_else(|| CaskError::ConstraintViolation {
                column: col.name.clone(),
                reason: "missing value".to_string(),
            })?;
        fields.push(format!("{}={}", col.name, escape(&value.to_string())));
    }
    Ok(fields.join(&FIELD_SEP.to_string()))
}

/// Decode an encoded record against the table's columns
///
/// Called during recovery and scans; any malformed field is log
/// corruption, not user error.
pub fn decode(text: &str, columns: &[Column]) -> Result<Record> {
    let mut record = Record::new();

    for field in text.split(FIELD_SEP) {
        let (name, raw) = field.split_once('=').ok_or_else(|| {
            CaskError::CorruptLog(format!("field without separator: {field:?}"))
        })?;

        let column = columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| CaskError::CorruptLog(format!("undeclared column {name}")))?;

        let value_text = unescape(raw)?;
        let value = Value::parse_text(&value_text, column.ty).map_err(|_| {
            CaskError::CorruptLog(format!(
                "column {name} holds {value_text:?}, expected {}",
                column.ty
            ))
        })?;
        record.set(name, value);
    }

    if record.len() != columns.len() {
        return Err(CaskError::CorruptLog(format!(
            "record has {} fields, table declares {}",
            record.len(),
            columns.len()
        )));
    }

    Ok(record)
}

// =============================================================================
// Literals and Validation
// =============================================================================

/// Coerce a user-supplied literal token to a typed value
///
/// Integers parse base-10; strings strip a single layer of surrounding
/// `'` or `"` quotes. A quoted token is never an integer.
pub fn decode_literal(token: &str, ty: ColumnType) -> Result<Value> {
    let token = token.trim();
    match ty {
        ColumnType::Int => {
            token
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| CaskError::TypeMismatch {
                    token: token.to_string(),
                    expected: ty.to_string(),
                })
        }
        ColumnType::Str => Ok(Value::Str(strip_quotes(token).to_string())),
    }
}

/// Strip one layer of matching surrounding quotes, if present
fn strip_quotes(token: &str) -> &str {
    let bytes = token.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'\'' || first == b'"') {
            return &token[1..token.len() - 1];
        }
    }
    token
}

/// Check a fully-built record against the table's columns
///
/// For every column: a value must be present, its runtime type must match
/// the declared type, and its textual length must not exceed the declared
/// maximum. Values for undeclared columns are rejected as well. No side
/// effects.
pub fn validate(record: &Record, columns: &[Column]) -> Result<()> {
    for col in columns {
        let value = record
            .get(&col.name)
            .ok_or_else(|| CaskError::ConstraintViolation {
                column: col.name.clone(),
                reason: "missing value".to_string(),
            })?;

        if value.column_type() != col.ty {
            return Err(CaskError::ConstraintViolation {
                column: col.name.clone(),
                reason: format!("expected {}, got {}", col.ty, value.column_type()),
            });
        }

        if value.text_len() > col.max_len {
            return Err(CaskError::ConstraintViolation {
                column: col.name.clone(),
                reason: format!(
                    "length {} exceeds maximum {}",
                    value.text_len(),
                    col.max_len
                ),
            });
        }
    }

    for (name, _) in record.iter() {
        if !columns.iter().any(|c| &c.name == name) {
            return Err(CaskError::UnknownColumn(name.clone()));
        }
    }

    Ok(())
}
