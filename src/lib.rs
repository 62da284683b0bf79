//! # CaskLite
//!
//! A tiny SQL-subset database where every table is one append-only
//! key/value log:
//! - Offset-indexed "Bitcask-style" storage with tombstone deletes
//! - Crash recovery by replaying the log into an in-memory index
//! - Regex-driven parser for a restricted SQL dialect
//! - Single-threaded, synchronous execution
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Interactive Shell                         │
//! │               (rustyline, one line at a time)                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ raw text
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    Query Parser                              │
//! │              (text → structured Command)                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Command
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    Query Executor                            │
//! │          (owns the current database selection)               │
//! └──────────┬──────────────────────────────┬───────────────────┘
//!            │                              │
//!            ▼                              ▼
//!     ┌─────────────┐               ┌─────────────┐
//!     │   Catalog   │               │  Log Store  │
//!     │ (JSON meta) │               │ (append-only│
//!     └─────────────┘               │  + index)   │
//!                                   └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod catalog;
pub mod record;
pub mod store;
pub mod query;
pub mod executor;
pub mod render;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use config::Config;
pub use error::{CaskError, Result};
pub use executor::{Executor, Outcome, Output, QueryResult};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of CaskLite
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
