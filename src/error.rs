//! Error types for CaskLite
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using CaskError
pub type Result<T> = std::result::Result<T, CaskError>;

/// Unified error type for CaskLite operations
#[derive(Debug, Error)]
pub enum CaskError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Parsing Errors
    // -------------------------------------------------------------------------
    #[error("could not parse query: {0}")]
    Parse(String),

    // -------------------------------------------------------------------------
    // Catalog Errors
    // -------------------------------------------------------------------------
    #[error("unknown table: {0}")]
    UnknownTable(String),

    #[error("unknown database: {0}")]
    UnknownDatabase(String),

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("table already exists: {0}")]
    DuplicateTable(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("schema error: {0}")]
    Schema(String),

    // -------------------------------------------------------------------------
    // Value Errors
    // -------------------------------------------------------------------------
    #[error("cannot coerce {token:?} to {expected}")]
    TypeMismatch { token: String, expected: String },

    #[error("constraint violation on column {column}: {reason}")]
    ConstraintViolation { column: String, reason: String },

    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    #[error("corrupt log: {0}")]
    CorruptLog(String),
}
