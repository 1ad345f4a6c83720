use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::state::atomic_write;

const WHITELIST_VERSION: u32 = 1;

/// Lines starting with this are comments in the line format.
pub(crate) const COMMENT_PREFIX: char = '#';

/// Persisted whitelist, split into folder and file entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WhitelistRecord {
    #[serde(default = "current_version")]
    version: u32,
    #[serde(default)]
    pub folders: BTreeSet<String>,
    #[serde(default)]
    pub files: BTreeSet<String>,
}

const fn current_version() -> u32 {
    WHITELIST_VERSION
}

impl Default for WhitelistRecord {
    fn default() -> Self {
        Self {
            version: WHITELIST_VERSION,
            folders: BTreeSet::new(),
            files: BTreeSet::new(),
        }
    }
}

impl WhitelistRecord {
    /// Folders first, then files, each sorted.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.folders
            .iter()
            .chain(self.files.iter())
            .map(String::as_str)
    }

    #[must_use]
    pub fn contains_entry(&self, entry: &str) -> bool {
        self.folders.contains(entry) || self.files.contains(entry)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.folders.len() + self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }

    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }
}

/// Durable home of the whitelist.
pub trait WhitelistStorage {
    /// Read the stored record; `Ok(None)` when nothing has been stored yet.
    ///
    /// # Errors
    /// Returns an error if the store exists but cannot be read or parsed.
    fn load(&self) -> Result<Option<WhitelistRecord>, StorageError>;

    /// Replace the stored record.
    ///
    /// # Errors
    /// Returns an error if the record cannot be written.
    fn save(&self, record: &WhitelistRecord) -> Result<(), StorageError>;

    /// Human-readable location, for log messages.
    fn describe(&self) -> String;
}

impl<S: WhitelistStorage + ?Sized> WhitelistStorage for Box<S> {
    fn load(&self) -> Result<Option<WhitelistRecord>, StorageError> {
        (**self).load()
    }

    fn save(&self, record: &WhitelistRecord) -> Result<(), StorageError> {
        (**self).save(record)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

fn read_optional(path: &Path) -> Result<Option<String>, StorageError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StorageError::Read {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Pretty-printed JSON record with separate `folders` and `files` lists.
#[derive(Debug, Clone)]
pub struct JsonWhitelistFile {
    path: PathBuf,
}

impl JsonWhitelistFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WhitelistStorage for JsonWhitelistFile {
    fn load(&self) -> Result<Option<WhitelistRecord>, StorageError> {
        let Some(content) = read_optional(&self.path)? else {
            return Ok(None);
        };
        let record: WhitelistRecord =
            serde_json::from_str(&content).map_err(|e| StorageError::Parse {
                path: self.path.clone(),
                source: e,
            })?;
        if record.version != WHITELIST_VERSION {
            return Err(StorageError::UnsupportedVersion {
                path: self.path.clone(),
                version: record.version,
            });
        }
        Ok(Some(record))
    }

    fn save(&self, record: &WhitelistRecord) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(record)
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        atomic_write(&self.path, json.as_bytes()).map_err(|e| StorageError::Write {
            path: self.path.clone(),
            source: e,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// One entry per line. Blank lines and `#` comments are ignored.
///
/// The format has no folder/file distinction; every entry loads as a file
/// entry, which does not affect matching.
#[derive(Debug, Clone)]
pub struct LineWhitelistFile {
    path: PathBuf,
}

impl LineWhitelistFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WhitelistStorage for LineWhitelistFile {
    fn load(&self) -> Result<Option<WhitelistRecord>, StorageError> {
        let Some(content) = read_optional(&self.path)? else {
            return Ok(None);
        };
        let mut record = WhitelistRecord::default();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
                continue;
            }
            record.files.insert(line.to_string());
        }
        Ok(Some(record))
    }

    fn save(&self, record: &WhitelistRecord) -> Result<(), StorageError> {
        let mut content = String::from("# asset-guard whitelist: one path prefix per line\n");
        for entry in record.entries() {
            content.push_str(entry);
            content.push('\n');
        }
        atomic_write(&self.path, content.as_bytes()).map_err(|e| StorageError::Write {
            path: self.path.clone(),
            source: e,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Storage held in memory, for hosts that persist elsewhere and for tests.
#[derive(Debug, Default)]
pub struct MemoryWhitelistStorage {
    record: Mutex<Option<WhitelistRecord>>,
    failing: bool,
}

impl MemoryWhitelistStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `record` already stored.
    #[must_use]
    pub fn with_record(record: WhitelistRecord) -> Self {
        Self {
            record: Mutex::new(Some(record)),
            failing: false,
        }
    }

    /// Storage whose every operation fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            record: Mutex::new(None),
            failing: true,
        }
    }

    /// The currently stored record.
    #[must_use]
    pub fn stored(&self) -> Option<WhitelistRecord> {
        self.record.lock().ok().and_then(|r| r.clone())
    }
}

impl WhitelistStorage for MemoryWhitelistStorage {
    fn load(&self) -> Result<Option<WhitelistRecord>, StorageError> {
        if self.failing {
            return Err(StorageError::Unavailable("memory storage disabled".into()));
        }
        self.record
            .lock()
            .map(|r| r.clone())
            .map_err(|_| StorageError::Unavailable("memory storage poisoned".into()))
    }

    fn save(&self, record: &WhitelistRecord) -> Result<(), StorageError> {
        if self.failing {
            return Err(StorageError::Unavailable("memory storage disabled".into()));
        }
        let mut stored = self
            .record
            .lock()
            .map_err(|_| StorageError::Unavailable("memory storage poisoned".into()))?;
        *stored = Some(record.clone());
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory whitelist".to_string()
    }
}

#[cfg(test)]
#[path = "storage_tests.rs"]
mod tests;
