//! Table Catalog
//!
//! Maps table names to their column definitions.
//!
//! ## Responsibilities
//! - Persist column definitions as one JSON metadata file per table
//! - Enforce the single-index-column constraint at creation time
//! - Resolve table names for the executor (lookup, listing)
//!
//! Metadata is written once at `CREATE TABLE` time and is immutable
//! afterwards; there is no ALTER.

mod schema;

pub use schema::{Column, ColumnType};

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CaskError, Result};

/// Suffix of per-table metadata files: `{table}_meta.json`
const META_SUFFIX: &str = "_meta.json";

/// Suffix of per-table log files: `{table}.kv`
const LOG_SUFFIX: &str = ".kv";

/// Catalog over one database directory
#[derive(Debug, Clone)]
pub struct Catalog {
    /// The database directory holding metadata and log files
    db_dir: PathBuf,
}

impl Catalog {
    /// Create a catalog over an existing database directory
    pub fn new(db_dir: impl Into<PathBuf>) -> Self {
        Self {
            db_dir: db_dir.into(),
        }
    }

    /// The database directory this catalog reads and writes
    pub fn db_dir(&self) -> &Path {
        &self.db_dir
    }

    /// Path of the metadata file for a table
    pub fn meta_path(&self, table: &str) -> PathBuf {
        self.db_dir.join(format!("{table}{META_SUFFIX}"))
    }

    /// Path of the log file for a table
    pub fn log_path(&self, table: &str) -> PathBuf {
        self.db_dir.join(format!("{table}{LOG_SUFFIX}"))
    }

    /// Define a new table
    ///
    /// Validates the column set and persists it before any data can be
    /// written:
    /// - at least one column
    /// - column names unique
    /// - exactly one column marked as index
    pub fn define(&self, table: &str, columns: &[Column]) -> Result<()> {
        if self.meta_path(table).exists() {
            return Err(CaskError::DuplicateTable(table.to_string()));
        }

        if columns.is_empty() {
            return Err(CaskError::Schema(format!(
                "table {table} has no columns"
            )));
        }

        for (i, col) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name == col.name) {
                return Err(CaskError::Schema(format!(
                    "duplicate column {} in table {table}",
                    col.name
                )));
            }
        }

        let index_count = columns.iter().filter(|c| c.indexed).count();
        if index_count != 1 {
            return Err(CaskError::Schema(format!(
                "table {table} must have exactly one index column, found {index_count}"
            )));
        }

        let json = serde_json::to_string_pretty(columns)
            .map_err(|e| CaskError::Schema(format!("cannot serialize metadata: {e}")))?;
        fs::write(self.meta_path(table), json)?;

        tracing::info!(table, columns = columns.len(), "table defined");
        Ok(())
    }

    /// Load the column definitions of a table, in declared order
    pub fn lookup(&self, table: &str) -> Result<Vec<Column>> {
        let path = self.meta_path(table);
        if !path.exists() {
            return Err(CaskError::UnknownTable(table.to_string()));
        }

        let json = fs::read_to_string(&path)?;
        let columns: Vec<Column> = serde_json::from_str(&json).map_err(|e| {
            CaskError::Schema(format!("invalid metadata for table {table}: {e}"))
        })?;
        Ok(columns)
    }

    /// List the table names in the database, sorted
    pub fn list(&self) -> Result<Vec<String>> {
        let mut tables = Vec::new();

        for entry in fs::read_dir(&self.db_dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if let Some(table) = name.strip_suffix(META_SUFFIX) {
                tables.push(table.to_string());
            }
        }

        tables.sort();
        Ok(tables)
    }
}
