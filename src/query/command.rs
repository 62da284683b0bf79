//! Structured commands
//!
//! What the parser produces and the executor consumes.

use crate::catalog::{Column, ColumnType};
use crate::error::Result;

/// A parsed statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `create database <name>`
    CreateDatabase { name: String },

    /// `create table <name> (col type.maxlen [index], ...)`
    CreateTable {
        name: String,
        columns: Vec<ColumnSpec>,
    },

    /// `insert into <table>(cols) values(vals)`
    ///
    /// Columns and values are paired positionally and have equal length.
    Insert {
        table: String,
        columns: Vec<String>,
        values: Vec<String>,
    },

    /// `select <cols|*> from <table> [where <pred>] [limit <n>]`
    ///
    /// The predicate is carried as an opaque string; evaluation happens
    /// against decoded records at execution time.
    Select {
        projection: Projection,
        table: String,
        predicate: Option<String>,
        limit: Option<usize>,
    },

    /// `.t` — list tables in the current database
    ListTables,

    /// `.db` — report the current database path
    CurrentDatabase,
}

/// Column list of a SELECT
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// `*` — all columns in declared order
    All,

    /// Explicit column names, in requested order
    Columns(Vec<String>),
}

/// One column definition as written in a CREATE TABLE
///
/// The type name stays textual until the catalog resolves it, so the
/// parser needs no schema knowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub type_name: String,
    pub max_len: usize,
    pub indexed: bool,
}

impl ColumnSpec {
    /// Resolve the spec into a typed column definition
    pub fn resolve(&self) -> Result<Column> {
        let ty = ColumnType::parse(&self.type_name)?;
        let mut column = Column::new(self.name.clone(), ty, self.max_len);
        if self.indexed {
            column = column.indexed();
        }
        Ok(column)
    }
}
