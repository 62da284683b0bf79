//! Append-Only Log Store
//!
//! Durable, crash-recoverable persistence of a single table's key→value
//! mapping.
//!
//! ## Responsibilities
//! - Append live entries and tombstones, never mutate in place
//! - Rebuild the in-memory index by replaying the log on open
//! - Serve reads from the index only, never from the file
//!
//! ## File Format
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ key <EOK> encoded-record <EOP>               │  live entry
//! ├──────────────────────────────────────────────┤
//! │ key <EOK> <NAN> <EOP>                        │  tombstone
//! ├──────────────────────────────────────────────┤
//! │ ...                                          │
//! └──────────────────────────────────────────────┘
//! ```
//! No header, no checksums, no length prefixes: recovery is a delimiter
//! scan. The active state of a key is whatever the last entry for it
//! says, tombstones included.

mod log;

pub use log::LogStore;

/// Delimiter closing the key of an entry
pub const EOK: &str = "<EOK>";

/// Delimiter closing an entry
pub const EOP: &str = "<EOP>";

/// Value marker of a tombstone entry
pub const TOMBSTONE: &str = "<NAN>";
