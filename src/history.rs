//! Append-only, file-persisted run history.
//!
//! The log is one pretty-printed JSON array. Every append is a full
//! read-modify-write: load the whole log, push the new entry, rewrite the
//! file atomically. O(n) per append, which is fine at the scale of an
//! interactive session.
//!
//! An absent file is a valid empty log. Malformed content is not: the store
//! fails loudly instead of silently discarding what it cannot read.

use crate::languages::Language;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::debug;

/// Failure to read or write the backing history file.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("history file {} holds malformed content", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to access history file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One persisted record of a past generation request.
///
/// Entries are immutable once created; the log only ever grows, and
/// insertion order is chronological order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub prompt: String,
    pub language: Language,
    pub file_path: String,
}

/// The ordered log of past generations, backed by a single JSON file.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one entry: loads the current log, pushes, rewrites the file.
    pub fn append(&self, entry: HistoryEntry) -> Result<(), PersistenceError> {
        let mut log = self.load()?;
        log.push(entry);
        self.persist(&log)?;
        debug!("History now holds {} entries", log.len());
        Ok(())
    }

    /// Returns the last `n` entries in original chronological order.
    ///
    /// An absent backing file is a valid empty log, never an error.
    pub fn recent(&self, n: usize) -> Result<Vec<HistoryEntry>, PersistenceError> {
        let log = self.load()?;
        let skip = log.len().saturating_sub(n);
        Ok(log.into_iter().skip(skip).collect())
    }

    fn load(&self) -> Result<Vec<HistoryEntry>, PersistenceError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|source| PersistenceError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| PersistenceError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    /// Rewrites the whole log atomically: write a sibling temp file, then
    /// rename it over the target so no partial write is ever visible.
    fn persist(&self, log: &[HistoryEntry]) -> Result<(), PersistenceError> {
        let io_err = |source| PersistenceError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let content = serde_json::to_string_pretty(log).map_err(|source| {
            PersistenceError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;

        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, content).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use time::macros::datetime;

    fn entry(prompt: &str, path: &str, minute: u8) -> HistoryEntry {
        HistoryEntry {
            timestamp: datetime!(2025-03-01 12:00:00 UTC).replace_minute(minute).unwrap(),
            prompt: prompt.to_string(),
            language: Language::Python,
            file_path: path.to_string(),
        }
    }

    #[test]
    fn test_recent_on_absent_store_is_empty() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));

        let entries = store.recent(5).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_append_then_recent_preserves_order_and_fields() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));

        store.append(entry("first", "generated/first.py", 1)).unwrap();
        store.append(entry("second", "generated/second.py", 2)).unwrap();
        store.append(entry("third", "generated/third.py", 3)).unwrap();

        let entries = store.recent(2).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].prompt, "second");
        assert_eq!(entries[1].prompt, "third");
        assert_eq!(entries[1].file_path, "generated/third.py");
        assert_eq!(entries[1].language, Language::Python);
    }

    #[test]
    fn test_recent_larger_than_log_returns_everything() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));

        store.append(entry("only", "generated/only.py", 0)).unwrap();

        let entries = store.recent(5).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].prompt, "only");
    }

    #[test]
    fn test_persisted_file_is_a_json_array_with_rfc3339_timestamps() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        let store = HistoryStore::new(&path);

        store.append(entry("stamped", "generated/stamped.py", 30)).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["timestamp"], "2025-03-01T12:30:00Z");
        assert_eq!(value[0]["language"], "Python");
    }

    #[test]
    fn test_malformed_content_fails_loudly_on_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "{ not an array").unwrap();
        let store = HistoryStore::new(&path);

        let err = store.recent(5).unwrap_err();
        assert!(matches!(err, PersistenceError::Malformed { .. }));
    }

    #[test]
    fn test_malformed_content_fails_loudly_on_append() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "not json at all").unwrap();
        let store = HistoryStore::new(&path);

        let err = store.append(entry("x", "generated/x.py", 0)).unwrap_err();
        assert!(matches!(err, PersistenceError::Malformed { .. }));
        // The corrupt file is left untouched for inspection.
        assert_eq!(fs::read_to_string(&path).unwrap(), "not json at all");
    }

    #[test]
    fn test_append_creates_missing_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("history.json");
        let store = HistoryStore::new(&path);

        store.append(entry("nested", "generated/nested.py", 0)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        let store = HistoryStore::new(&path);

        store.append(entry("clean", "generated/clean.py", 0)).unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["history.json".to_string()]);
    }
}
