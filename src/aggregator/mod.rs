//! Folder-grouped view of the unused asset set.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::asset::AssetPath;

/// One row of the folder listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderEntry {
    pub key: AssetPath,
    /// Nesting level of the folder, used for indentation.
    pub depth: usize,
    pub asset_count: usize,
}

/// Unused assets in enumeration order plus the same assets grouped by
/// containing folder.
///
/// Invariant: `flat` and the concatenated buckets of `by_folder` hold the
/// same paths, every path sits in the bucket of its parent, and no bucket is
/// empty. The selection is `None` or a key of `by_folder`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnusedIndex {
    flat: Vec<AssetPath>,
    by_folder: BTreeMap<AssetPath, Vec<AssetPath>>,
    selection: Option<AssetPath>,
}

impl UnusedIndex {
    /// Group `unused` by parent folder.
    ///
    /// `previous_selection` is kept if its folder still has unused assets;
    /// otherwise the smallest folder key is selected.
    #[must_use]
    pub fn rebuild(unused: Vec<AssetPath>, previous_selection: Option<&AssetPath>) -> Self {
        let mut by_folder: BTreeMap<AssetPath, Vec<AssetPath>> = BTreeMap::new();
        for path in &unused {
            by_folder.entry(path.parent()).or_default().push(path.clone());
        }

        let mut index = Self {
            flat: unused,
            by_folder,
            selection: previous_selection.cloned(),
        };
        index.repair_selection();
        index
    }

    /// Focus `folder`. An unknown key clears the selection.
    pub fn select(&mut self, folder: &AssetPath) -> Option<&AssetPath> {
        self.selection = self
            .by_folder
            .contains_key(folder)
            .then(|| folder.clone());
        self.selection.as_ref()
    }

    /// Drop `path` from the index. Returns false if it was not listed.
    ///
    /// A folder whose last asset is removed disappears; if it was selected,
    /// the selection moves to the smallest remaining folder.
    pub fn remove(&mut self, path: &AssetPath) -> bool {
        let folder = path.parent();
        let Some(bucket) = self.by_folder.get_mut(&folder) else {
            return false;
        };
        let Some(pos) = bucket.iter().position(|p| p == path) else {
            return false;
        };
        let Some(flat_pos) = self.flat.iter().position(|p| p == path) else {
            return false;
        };

        bucket.remove(pos);
        if bucket.is_empty() {
            self.by_folder.remove(&folder);
        }
        self.flat.remove(flat_pos);
        self.repair_selection();
        true
    }

    fn repair_selection(&mut self) {
        let still_present = self
            .selection
            .as_ref()
            .is_some_and(|s| self.by_folder.contains_key(s));
        if !still_present {
            self.selection = self.by_folder.keys().next().cloned();
        }
    }

    #[must_use]
    pub fn flat(&self) -> &[AssetPath] {
        &self.flat
    }

    #[must_use]
    pub const fn by_folder(&self) -> &BTreeMap<AssetPath, Vec<AssetPath>> {
        &self.by_folder
    }

    #[must_use]
    pub const fn selection(&self) -> Option<&AssetPath> {
        self.selection.as_ref()
    }

    #[must_use]
    pub fn contains(&self, path: &AssetPath) -> bool {
        self.by_folder
            .get(&path.parent())
            .is_some_and(|bucket| bucket.contains(path))
    }

    /// Assets of `folder`, empty if the folder is not listed.
    #[must_use]
    pub fn assets_in(&self, folder: &AssetPath) -> &[AssetPath] {
        self.by_folder
            .get(folder)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Assets of the selected folder.
    #[must_use]
    pub fn selected_assets(&self) -> &[AssetPath] {
        self.selection
            .as_ref()
            .map(|folder| self.assets_in(folder))
            .unwrap_or(&[])
    }

    /// Folder listing in key order.
    #[must_use]
    pub fn folders(&self) -> Vec<FolderEntry> {
        self.by_folder
            .iter()
            .map(|(key, assets)| FolderEntry {
                key: key.clone(),
                depth: key.depth(),
                asset_count: assets.len(),
            })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.flat.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flat.is_empty()
    }

    /// Check the partition invariant.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let mut grouped: Vec<&AssetPath> = Vec::with_capacity(self.flat.len());
        for (folder, bucket) in &self.by_folder {
            if bucket.is_empty() || bucket.iter().any(|p| &p.parent() != folder) {
                return false;
            }
            grouped.extend(bucket);
        }
        let mut flat: Vec<&AssetPath> = self.flat.iter().collect();
        grouped.sort();
        flat.sort();
        let selection_ok = self
            .selection
            .as_ref()
            .is_none_or(|s| self.by_folder.contains_key(s));
        grouped == flat && selection_ok
    }
}

#[cfg(test)]
#[path = "aggregator_tests.rs"]
mod tests;
