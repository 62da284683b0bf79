//! Records and scalar values
//!
//! A `Record` is a row: a mapping from column name to a typed scalar
//! `Value`. The codec submodule handles the on-disk textual form and
//! literal coercion.

mod codec;

pub use codec::{decode, decode_literal, encode, escape, unescape, validate};

use std::collections::BTreeMap;

use crate::catalog::ColumnType;
use crate::error::{CaskError, Result};

/// A typed scalar value
///
/// The variant is checked against the declared `ColumnType` at validation
/// time; values of one table column are always the same variant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Value {
    Int(i64),
    Str(String),
}

impl Value {
    /// Parse raw text into a value of the given type
    ///
    /// No quote handling: this is the inverse of `Display`, used when
    /// decoding log entries. SQL literals go through `decode_literal`.
    pub fn parse_text(text: &str, ty: ColumnType) -> Result<Self> {
        match ty {
            ColumnType::Int => text
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| CaskError::TypeMismatch {
                    token: text.to_string(),
                    expected: ty.to_string(),
                }),
            ColumnType::Str => Ok(Value::Str(text.to_string())),
        }
    }

    /// The type this value inhabits
    pub fn column_type(&self) -> ColumnType {
        match self {
            Value::Int(_) => ColumnType::Int,
            Value::Str(_) => ColumnType::Str,
        }
    }

    /// Length in characters of the textual form
    pub fn text_len(&self) -> usize {
        match self {
            Value::Int(i) => i.to_string().len(),
            Value::Str(s) => s.chars().count(),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}

/// A row: column name → value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    values: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column's value, replacing any previous one
    pub fn set(&mut self, column: impl Into<String>, value: Value) {
        self.values.insert(column.into(), value);
    }

    /// Get a column's value
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// Number of columns with a value
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over (column, value) pairs in column-name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }
}
