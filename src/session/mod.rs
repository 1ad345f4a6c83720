//! Engine instance owning the whitelist and the unused index of one project.
//!
//! All operations are synchronous. A host that serves several callers keeps
//! one `Session` per project behind a single lock.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::aggregator::{FolderEntry, UnusedIndex};
use crate::asset::AssetPath;
use crate::error::{DeleteError, StorageError, WhitelistError};
use crate::index::ProjectIndex;
use crate::reachability::{ReachabilityStats, StructuralFilter, compute_for_index};
use crate::whitelist::{AddOutcome, Whitelist, WhitelistStorage};

/// Structural exclusion settings applied on every scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Directory names whose contents are never candidates.
    pub internal_segments: Vec<String>,
    /// Literal prefix every candidate must start with.
    pub asset_scope: Option<String>,
}

/// Aggregate figures for the current unused set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UnusedStats {
    pub unused_count: usize,
    pub folder_count: usize,
    /// Sum of sizes of listed files still on disk; missing files count 0.
    pub total_bytes: u64,
}

pub struct Session<I: ProjectIndex, S: WhitelistStorage> {
    index: I,
    storage: S,
    options: SessionOptions,
    whitelist: Whitelist,
    unused: UnusedIndex,
    last_scan: Option<ReachabilityStats>,
    storage_warning: Option<StorageError>,
}

impl<I: ProjectIndex, S: WhitelistStorage> Session<I, S> {
    /// Open a session, loading the whitelist from `storage`.
    ///
    /// A storage failure does not fail the session; it is kept as
    /// [`Session::storage_warning`].
    pub fn open(index: I, storage: S, options: SessionOptions) -> Self {
        let (whitelist, storage_warning) = Whitelist::load(&storage);
        Self {
            index,
            storage,
            options,
            whitelist,
            unused: UnusedIndex::default(),
            last_scan: None,
            storage_warning,
        }
    }

    /// Reload the whitelist and recompute the unused set from scratch.
    ///
    /// A memory-only whitelist is kept as is: reloading it would drop the
    /// entries added during this session.
    pub fn scan(&mut self) -> &UnusedIndex {
        if !self.whitelist.is_memory_only() {
            let (whitelist, warning) = Whitelist::load(&self.storage);
            self.whitelist = whitelist;
            if warning.is_some() {
                self.storage_warning = warning;
            }
        }
        self.recompute();
        &self.unused
    }

    /// Recompute after the host observed asset changes.
    ///
    /// Does nothing until the first scan; returns whether it recomputed.
    pub fn refresh(&mut self) -> bool {
        if self.last_scan.is_none() {
            debug!("refresh requested before first scan, ignoring");
            return false;
        }
        self.recompute();
        true
    }

    fn recompute(&mut self) {
        let filter = StructuralFilter::new(&self.index)
            .with_internal_segments(self.options.internal_segments.clone())
            .with_asset_scope(self.options.asset_scope.clone());
        let result = compute_for_index(
            &self.index,
            &filter,
            &self.whitelist,
            self.unused.selection(),
        );
        info!(
            unused = result.index.len(),
            folders = result.index.by_folder().len(),
            "scan complete"
        );
        self.unused = result.index;
        self.last_scan = Some(result.stats);
    }

    /// Exempt `path` and recompute so the listing reflects it immediately.
    ///
    /// # Errors
    /// Returns [`WhitelistError::Malformed`] for an unusable entry; the
    /// whitelist and the index are unchanged in that case.
    pub fn add_to_whitelist(&mut self, path: &str) -> Result<AddOutcome, WhitelistError> {
        let outcome = self.whitelist.add(path, &self.index, &self.storage)?;
        if let Some(warning) = &outcome.warning {
            warn!(error = %warning, "whitelist change not persisted");
        }
        self.recompute();
        Ok(outcome)
    }

    /// Delete a listed unused asset and patch the index.
    ///
    /// The index changes only after the store confirms the delete.
    ///
    /// # Errors
    /// - [`DeleteError::NotIndexed`] if `path` is not a listed unused asset
    /// - [`DeleteError::Store`] if the store refuses or fails the delete
    pub fn delete(&mut self, path: &AssetPath) -> Result<(), DeleteError> {
        if !self.unused.contains(path) {
            return Err(DeleteError::NotIndexed(path.clone()));
        }
        self.index
            .delete(path)
            .map_err(|source| DeleteError::Store {
                path: path.clone(),
                source,
            })?;
        self.unused.remove(path);
        info!(path = %path, "deleted unused asset");
        Ok(())
    }

    /// Delete several assets in order, one result per path.
    pub fn delete_many(
        &mut self,
        paths: &[AssetPath],
    ) -> Vec<(AssetPath, Result<(), DeleteError>)> {
        paths
            .iter()
            .map(|path| (path.clone(), self.delete(path)))
            .collect()
    }

    /// Focus a folder; unknown keys clear the selection.
    pub fn select_folder(&mut self, folder: &AssetPath) -> Option<&AssetPath> {
        self.unused.select(folder)
    }

    #[must_use]
    pub const fn unused(&self) -> &UnusedIndex {
        &self.unused
    }

    #[must_use]
    pub fn flat(&self) -> &[AssetPath] {
        self.unused.flat()
    }

    #[must_use]
    pub const fn by_folder(&self) -> &BTreeMap<AssetPath, Vec<AssetPath>> {
        self.unused.by_folder()
    }

    #[must_use]
    pub const fn selection(&self) -> Option<&AssetPath> {
        self.unused.selection()
    }

    #[must_use]
    pub fn folders(&self) -> Vec<FolderEntry> {
        self.unused.folders()
    }

    #[must_use]
    pub const fn whitelist(&self) -> &Whitelist {
        &self.whitelist
    }

    /// Counters of the last computation, `None` before the first scan.
    #[must_use]
    pub const fn last_scan(&self) -> Option<&ReachabilityStats> {
        self.last_scan.as_ref()
    }

    /// Most recent whitelist storage failure, if any.
    #[must_use]
    pub const fn storage_warning(&self) -> Option<&StorageError> {
        self.storage_warning.as_ref()
    }

    #[must_use]
    pub const fn index(&self) -> &I {
        &self.index
    }

    #[must_use]
    pub fn stats(&self) -> UnusedStats {
        UnusedStats {
            unused_count: self.unused.len(),
            folder_count: self.unused.by_folder().len(),
            total_bytes: self
                .unused
                .flat()
                .iter()
                .filter_map(|path| self.index.file_size(path))
                .sum(),
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
