//! Storage layer for the stay-budget calculator.
//!
//! The budget engine never touches storage. Hosts load the interval list
//! through an [`IntervalRepository`], mutate it, and save it back once per
//! change.
//!
//! # File Format
//!
//! [`JsonFileStore`] keeps the list as a pretty-printed JSON array of
//! `{"from": "YYYY-MM-DD", "to": "YYYY-MM-DD"}` objects, the same shape used
//! for import and export. Loading goes through [`vd_core::parse_records`], so
//! lists written with browser-style date-times (`2024-01-01T00:00:00.000Z`)
//! are read as well.
//!
//! # Concurrency
//!
//! Saves hold an exclusive advisory lock on a sibling `<name>.lock` file and
//! replace the data file with an atomic rename from `<name>.tmp`. Loads hold a
//! shared lock on the same file, so a reader never sees a partially written
//! list. The suffixes are appended to the full file name, so a store named
//! `stays.lock` locks `stays.lock.lock` and never its own data.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use fs2::FileExt;
use thiserror::Error;
use vd_core::{DateInterval, InputShapeError};

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the store failed.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The store file exists but does not hold a valid interval list.
    #[error("stored intervals in {} are corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: InputShapeError,
    },
    /// The store lock could not be acquired.
    #[error("failed to lock {}: {source}", path.display())]
    Lock {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The interval list could not be encoded.
    #[error("failed to encode intervals: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Load/save capability for the persisted interval list.
pub trait IntervalRepository: Send + Sync {
    /// Returns the stored intervals, or an empty list if nothing is stored yet.
    fn load(&self) -> Result<Vec<DateInterval>, StoreError>;

    /// Replaces the stored intervals.
    fn save(&self, intervals: &[DateInterval]) -> Result<(), StoreError>;
}

/// Interval list persisted as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn lock_path(&self) -> PathBuf {
        self.sibling_path(".lock")
    }

    fn tmp_path(&self) -> PathBuf {
        self.sibling_path(".tmp")
    }

    fn sibling_path(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| OsString::from("intervals"), ToOwned::to_owned);
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn ensure_parent(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }
        Ok(())
    }

    fn open_lock(&self) -> Result<File, StoreError> {
        let lock_path = self.lock_path();
        // Never truncate: the lock file is shared with concurrent processes.
        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|source| StoreError::Lock {
                path: lock_path,
                source,
            })
    }
}

impl IntervalRepository for JsonFileStore {
    fn load(&self) -> Result<Vec<DateInterval>, StoreError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no stored intervals");
            return Ok(Vec::new());
        }

        let lock = self.open_lock()?;
        lock.lock_shared().map_err(|source| StoreError::Lock {
            path: self.lock_path(),
            source,
        })?;

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            // Removed between the existence check and the lock.
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        if content.trim().is_empty() {
            tracing::warn!(path = %self.path.display(), "store file is empty, treating as no intervals");
            return Ok(Vec::new());
        }

        let intervals = vd_core::parse_records(&content).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), count = intervals.len(), "loaded intervals");
        Ok(intervals)
    }

    fn save(&self, intervals: &[DateInterval]) -> Result<(), StoreError> {
        self.ensure_parent()?;
        let lock = self.open_lock()?;
        lock.lock_exclusive().map_err(|source| StoreError::Lock {
            path: self.lock_path(),
            source,
        })?;

        let json = serde_json::to_string_pretty(intervals)?;
        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, json).map_err(|e| self.io_error(e))?;

        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(self.io_error(e));
        }

        tracing::info!(path = %self.path.display(), count = intervals.len(), "saved intervals");
        Ok(())
    }
}

/// In-memory repository, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    intervals: Mutex<Vec<DateInterval>>,
}

impl MemoryStore {
    pub fn new(intervals: Vec<DateInterval>) -> Self {
        Self {
            intervals: Mutex::new(intervals),
        }
    }
}

impl IntervalRepository for MemoryStore {
    fn load(&self) -> Result<Vec<DateInterval>, StoreError> {
        let guard = self
            .intervals
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(guard.clone())
    }

    fn save(&self, intervals: &[DateInterval]) -> Result<(), StoreError> {
        let mut guard = self
            .intervals
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = intervals.to_vec();
        Ok(())
    }
}
