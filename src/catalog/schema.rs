//! Column definitions
//!
//! The scalar types and per-column constraints a table declares.

use serde::{Deserialize, Serialize};

use crate::error::{CaskError, Result};

/// Scalar type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    /// 64-bit signed integer, declared as `int`
    #[serde(rename = "int")]
    Int,

    /// UTF-8 string, declared as `str`
    #[serde(rename = "str")]
    Str,
}

impl ColumnType {
    /// Resolve a declared type name (`int`, `str`)
    ///
    /// An unrecognized name is a schema error, surfaced at CREATE TABLE time.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "int" => Ok(Self::Int),
            "str" => Ok(Self::Str),
            other => Err(CaskError::Schema(format!("unrecognized type: {other}"))),
        }
    }

    /// Name used in declarations and error messages
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Str => "str",
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name, unique within the table
    pub name: String,

    /// Declared scalar type
    #[serde(rename = "type")]
    pub ty: ColumnType,

    /// Maximum value length in characters
    pub max_len: usize,

    /// Whether this column's value is the storage key for a row
    #[serde(default)]
    pub indexed: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: ColumnType, max_len: usize) -> Self {
        Self {
            name: name.into(),
            ty,
            max_len,
            indexed: false,
        }
    }

    /// Mark this column as the index column
    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }
}
