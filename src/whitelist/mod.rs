//! Durable set of path prefixes exempted from unused-asset detection.
//!
//! Matching is a literal string prefix test: an entry `Assets/Foo` exempts
//! `Assets/Foo/bar.png` and also `Assets/FooBar.png`. Append a `/` to a
//! directory entry to restrict it to that directory.

mod storage;

use storage::COMMENT_PREFIX;
pub use storage::{
    JsonWhitelistFile, LineWhitelistFile, MemoryWhitelistStorage, WhitelistRecord,
    WhitelistStorage,
};

use tracing::{info, warn};

use crate::asset::{AssetPath, META_SUFFIX};
use crate::error::{StorageError, WhitelistError};
use crate::index::ProjectIndex;

/// Result of a successful [`Whitelist::add`].
#[derive(Debug, Default)]
pub struct AddOutcome {
    /// Entries that were not present before, in insertion order.
    pub added: Vec<String>,
    /// Whether the whitelist reached durable storage.
    pub persisted: bool,
    /// Storage failure that left the whitelist memory-only.
    pub warning: Option<StorageError>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Whitelist {
    record: WhitelistRecord,
    memory_only: bool,
}

impl Whitelist {
    /// Load from `storage`, initialising an empty store if none exists.
    ///
    /// Never fails: a storage error yields an empty, memory-only whitelist
    /// together with the error as a warning.
    pub fn load<S: WhitelistStorage + ?Sized>(storage: &S) -> (Self, Option<StorageError>) {
        let loaded = storage.load().and_then(|record| match record {
            Some(record) => Ok(record),
            None => {
                let record = WhitelistRecord::default();
                storage.save(&record)?;
                info!(store = %storage.describe(), "created empty whitelist");
                Ok(record)
            }
        });

        match loaded {
            Ok(record) => (
                Self {
                    record,
                    memory_only: false,
                },
                None,
            ),
            Err(e) => {
                warn!(
                    store = %storage.describe(),
                    error = %e,
                    "whitelist unavailable, continuing with an empty in-memory whitelist"
                );
                (Self::memory_only(), Some(e))
            }
        }
    }

    /// Empty whitelist that never touches storage.
    #[must_use]
    pub fn memory_only() -> Self {
        Self {
            record: WhitelistRecord::default(),
            memory_only: true,
        }
    }

    #[must_use]
    pub const fn is_memory_only(&self) -> bool {
        self.memory_only
    }

    /// True if some entry is a literal prefix of `path`.
    #[must_use]
    pub fn contains(&self, path: &AssetPath) -> bool {
        self.record.entries().any(|entry| path.starts_with(entry))
    }

    /// Exempt `raw` and, if the index has one, its `.meta` sidecar.
    ///
    /// Directory entries are recorded as folders, everything else as files.
    /// The whitelist is persisted on every call, even when nothing new was
    /// inserted. A persistence failure is reported in the outcome and turns
    /// the whitelist memory-only for the rest of the session.
    ///
    /// # Errors
    /// Returns [`WhitelistError::Malformed`] for empty or unstorable entries;
    /// nothing is inserted or persisted in that case.
    pub fn add<I, S>(
        &mut self,
        raw: &str,
        index: &I,
        storage: &S,
    ) -> Result<AddOutcome, WhitelistError>
    where
        I: ProjectIndex + ?Sized,
        S: WhitelistStorage + ?Sized,
    {
        let entry = normalize_entry(raw)?;
        let mut outcome = AddOutcome::default();

        let as_asset = AssetPath::new(&entry);
        if self.insert(&entry, index.is_directory(&as_asset)) {
            outcome.added.push(entry.clone());
        }

        if !entry.ends_with('/') {
            let meta = format!("{entry}{META_SUFFIX}");
            if index.exists(&AssetPath::new(&meta)) && self.insert(&meta, false) {
                outcome.added.push(meta);
            }
        }

        if self.memory_only {
            return Ok(outcome);
        }

        match storage.save(&self.record) {
            Ok(()) => {
                outcome.persisted = true;
                if !outcome.added.is_empty() {
                    info!(entries = ?outcome.added, "whitelisted");
                }
            }
            Err(e) => {
                warn!(
                    store = %storage.describe(),
                    error = %e,
                    "failed to persist whitelist, keeping changes in memory only"
                );
                self.memory_only = true;
                outcome.warning = Some(e);
            }
        }
        Ok(outcome)
    }

    fn insert(&mut self, entry: &str, is_folder: bool) -> bool {
        if self.record.contains_entry(entry) {
            return false;
        }
        if is_folder {
            self.record.folders.insert(entry.to_string())
        } else {
            self.record.files.insert(entry.to_string())
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.record.entries()
    }

    pub fn folders(&self) -> impl Iterator<Item = &str> {
        self.record.folders.iter().map(String::as_str)
    }

    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.record.files.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.record.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.record.is_empty()
    }
}

/// Validate and normalize a whitelist entry.
///
/// Backslashes become `/` and a leading `./` is removed. A trailing `/` is
/// kept because it changes what the prefix matches.
///
/// # Errors
/// Returns [`WhitelistError::Malformed`] if the entry is empty, names the
/// project root, or contains characters the storage formats cannot hold.
pub fn normalize_entry(raw: &str) -> Result<String, WhitelistError> {
    let malformed = |reason| WhitelistError::Malformed {
        entry: raw.to_string(),
        reason,
    };

    if raw.trim().is_empty() {
        return Err(malformed("entry is empty"));
    }
    if raw.contains('\0') {
        return Err(malformed("entry contains a NUL byte"));
    }
    if raw.contains(['\n', '\r']) {
        return Err(malformed("entry contains a line break"));
    }

    let mut entry = raw.trim().replace('\\', "/");
    while let Some(rest) = entry.strip_prefix("./") {
        entry = rest.to_string();
    }
    if entry.is_empty() || entry.chars().all(|c| c == '/' || c == '.') {
        return Err(malformed("entry names the project root"));
    }
    if entry.starts_with(COMMENT_PREFIX) {
        return Err(malformed("entry starts with the comment marker '#'"));
    }
    Ok(entry)
}

#[cfg(test)]
#[path = "whitelist_tests.rs"]
mod tests;
