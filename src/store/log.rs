//! LogStore implementation
//!
//! One instance per opened table. Writes go through a single append
//! handle; reads never touch the file after recovery.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::catalog::{Column, ColumnType};
use crate::config::SyncStrategy;
use crate::error::{CaskError, Result};
use crate::record::{self, Record, Value};

use super::{EOK, EOP, TOMBSTONE};

/// Index slot: where the key's most recent live entry starts, and the
/// decoded value it carried
#[derive(Debug, Clone)]
struct Slot {
    offset: u64,
    record: Record,
}

/// Append-only log store for one table
pub struct LogStore {
    /// Path of the log file
    path: PathBuf,

    /// Append handle; the only writer for the file's lifetime
    file: File,

    /// Byte offset the next entry will start at
    offset: u64,

    /// key → most recent live entry
    index: BTreeMap<Value, Slot>,

    /// The table's columns, needed to decode entries
    columns: Vec<Column>,

    /// Type of the index column; keys must parse as this during recovery
    key_type: ColumnType,

    sync: SyncStrategy,
}

impl LogStore {
    /// Open a table's log, creating the file if absent, and recover the
    /// in-memory index by replaying it from offset 0
    pub fn open(path: &Path, columns: Vec<Column>, sync: SyncStrategy) -> Result<Self> {
        let key_type = columns
            .iter()
            .find(|c| c.indexed)
            .map(|c| c.ty)
            .ok_or_else(|| CaskError::Schema("table has no index column".to_string()))?;

        if !path.exists() {
            File::create(path)?;
        }

        let (index, valid_len, truncated) = replay(path, &columns, key_type)?;

        if truncated {
            // Discard the partial trailing entry so new appends start at
            // a clean boundary.
            tracing::warn!(path = %path.display(), valid_len, "truncated trailing entry discarded");
            let file = OpenOptions::new().write(true).open(path)?;
            file.set_len(valid_len)?;
            file.sync_all()?;
        }

        tracing::debug!(
            path = %path.display(),
            live_keys = index.len(),
            bytes = valid_len,
            "log recovered"
        );

        let file = OpenOptions::new().append(true).open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
            offset: valid_len,
            index,
            columns,
            key_type,
            sync,
        })
    }

    /// Append a live entry and repoint the index
    ///
    /// Re-inserting an existing key appends a new entry; the old bytes
    /// stay in the file as dead data. Returns the byte offset the entry
    /// started at.
    pub fn insert(&mut self, key: Value, rec: Record) -> Result<u64> {
        if key.column_type() != self.key_type {
            return Err(CaskError::TypeMismatch {
                token: key.to_string(),
                expected: self.key_type.to_string(),
            });
        }

        let value_text = record::encode(&rec, &self.columns)?;
        let offset = self.append_entry(&record::escape(&key.to_string()), &value_text)?;

        self.index.insert(key, Slot { offset, record: rec });
        Ok(offset)
    }

    /// O(1) lookup against the in-memory index
    pub fn get(&self, key: &Value) -> Option<&Record> {
        self.index.get(key).map(|slot| &slot.record)
    }

    /// Byte offset of the key's most recent live entry
    pub fn offset_of(&self, key: &Value) -> Option<u64> {
        self.index.get(key).map(|slot| slot.offset)
    }

    /// Append a tombstone and drop the key from the index
    ///
    /// Returns whether the key was live. Deleting an absent key appends
    /// nothing.
    pub fn delete(&mut self, key: &Value) -> Result<bool> {
        if !self.index.contains_key(key) {
            return Ok(false);
        }

        self.append_entry(&record::escape(&key.to_string()), TOMBSTONE)?;
        self.index.remove(key);
        Ok(true)
    }

    /// Iterate over all live (key, record) pairs in ascending key order
    pub fn scan(&self) -> impl Iterator<Item = (&Value, &Record)> {
        self.index.iter().map(|(key, slot)| (key, &slot.record))
    }

    /// Number of live keys
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Byte offset the next entry will start at (the valid file length)
    pub fn end_offset(&self) -> u64 {
        self.offset
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Append one `key<EOK>value<EOP>` entry; success is only reported
    /// after the bytes (and the sync, under EveryWrite) reached the file
    fn append_entry(&mut self, key_text: &str, value_text: &str) -> Result<u64> {
        let entry = format!("{key_text}{EOK}{value_text}{EOP}");
        let offset = self.offset;

        self.file.write_all(entry.as_bytes())?;
        if self.sync == SyncStrategy::EveryWrite {
            self.file.sync_data()?;
        }

        self.offset += entry.len() as u64;
        Ok(offset)
    }
}

impl Drop for LogStore {
    /// Under `OnClose` appends are only synced here; `EveryWrite` has
    /// already synced every entry.
    fn drop(&mut self) {
        if self.sync == SyncStrategy::OnClose {
            if let Err(e) = self.file.sync_all() {
                tracing::warn!(path = %self.path.display(), "sync on close failed: {e}");
            }
        }
    }
}

/// Replay a log file into an index
///
/// Returns the index, the length of the valid prefix, and whether a
/// truncated trailing entry was found past it. Offsets recorded are the
/// true encoded-byte offsets each entry started at.
fn replay(
    path: &Path,
    columns: &[Column],
    key_type: ColumnType,
) -> Result<(BTreeMap<Value, Slot>, u64, bool)> {
    let bytes = fs::read(path)?;
    let content = String::from_utf8(bytes)
        .map_err(|e| CaskError::CorruptLog(format!("log is not valid UTF-8: {e}")))?;

    let mut index = BTreeMap::new();
    let mut pos = 0usize;

    loop {
        let rest = &content[pos..];
        if rest.is_empty() {
            return Ok((index, pos as u64, false));
        }

        let Some(end) = rest.find(EOP) else {
            // Partial trailing entry: end of valid content, not corruption.
            return Ok((index, pos as u64, true));
        };

        let entry = &rest[..end];
        let (raw_key, value_text) = entry.split_once(EOK).ok_or_else(|| {
            CaskError::CorruptLog(format!("entry at offset {pos} has no {EOK}"))
        })?;

        let key_text = record::unescape(raw_key)?;
        let key = Value::parse_text(&key_text, key_type).map_err(|_| {
            CaskError::CorruptLog(format!(
                "key {key_text:?} at offset {pos} does not parse as {key_type}"
            ))
        })?;

        // Last write wins: a later entry overwrites the slot, a tombstone
        // removes the key entirely.
        if value_text == TOMBSTONE {
            index.remove(&key);
        } else {
            let rec = record::decode(value_text, columns)?;
            index.insert(
                key,
                Slot {
                    offset: pos as u64,
                    record: rec,
                },
            );
        }

        pos += end + EOP.len();
    }
}
