use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::{DependencyGraph, DependencyManifest, ProjectIndex};
use crate::asset::{AssetPath, META_SUFFIX};
use crate::error::{AssetGuardError, Result};

const VCS_DIR: &str = ".git";

/// Options for building a [`FsProjectIndex`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FsIndexOptions {
    /// Respect `.gitignore` rules while walking.
    pub gitignore: bool,
    /// Glob patterns (matched against project-relative paths) never enumerated.
    pub exclude: Vec<String>,
    /// Glob patterns designating entry points.
    pub root_patterns: Vec<String>,
    /// Entry points named explicitly.
    pub root_paths: Vec<String>,
    /// JSON dependency manifest; relative paths resolve against the project root.
    pub manifest: Option<PathBuf>,
    /// Project-relative files owned by the tool itself.
    pub skip: Vec<PathBuf>,
}

/// Project index backed by a directory tree on disk.
#[derive(Debug)]
pub struct FsProjectIndex {
    root: PathBuf,
    /// Enumerated paths mapped to "is a directory".
    entries: IndexMap<AssetPath, bool>,
    roots: IndexSet<AssetPath>,
    graph: DependencyGraph,
}

impl FsProjectIndex {
    /// Walk `root` and build the index.
    ///
    /// # Errors
    /// Returns an error if the root cannot be resolved, a glob pattern is
    /// invalid, or the dependency manifest cannot be loaded.
    pub fn build(root: &Path, options: &FsIndexOptions) -> Result<Self> {
        Self::build_with_progress(root, options, |_| {})
    }

    /// Like [`FsProjectIndex::build`], reporting every enumerated entry.
    ///
    /// # Errors
    /// See [`FsProjectIndex::build`].
    pub fn build_with_progress(
        root: &Path,
        options: &FsIndexOptions,
        mut on_entry: impl FnMut(&AssetPath),
    ) -> Result<Self> {
        let root = dunce::canonicalize(root).map_err(|e| AssetGuardError::FileAccess {
            path: root.to_path_buf(),
            source: e,
        })?;
        let exclude = build_glob_set(&options.exclude)?;
        let root_matcher = build_glob_set(&options.root_patterns)?;
        let skip: HashSet<AssetPath> = options
            .skip
            .iter()
            .map(|p| AssetPath::from_relative(p))
            .collect();

        let mut entries = IndexMap::new();
        for (path, is_dir) in walk(&root, options.gitignore) {
            let Ok(relative) = path.strip_prefix(&root) else {
                continue;
            };
            let asset = AssetPath::from_relative(relative);
            if asset.is_empty() || skip.contains(&asset) || exclude.is_match(asset.as_str()) {
                continue;
            }
            on_entry(&asset);
            entries.insert(asset, is_dir);
        }
        drop_owned_sidecars(&mut entries);

        let mut roots: IndexSet<AssetPath> = entries
            .iter()
            .filter(|(asset, is_dir)| !**is_dir && root_matcher.is_match(asset.as_str()))
            .map(|(asset, _)| asset.clone())
            .collect();
        roots.extend(options.root_paths.iter().map(|p| AssetPath::new(p)));

        let graph = match &options.manifest {
            Some(manifest) => {
                let manifest_path = if manifest.is_absolute() {
                    manifest.clone()
                } else {
                    root.join(manifest)
                };
                DependencyGraph::from(DependencyManifest::load(&manifest_path)?)
            }
            None => DependencyGraph::new(),
        };

        Ok(Self {
            root,
            entries,
            roots,
            graph,
        })
    }

    /// Canonical project root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of enumerated entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of direct dependency edges loaded from the manifest.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.len()
    }

    fn absolute(&self, path: &AssetPath) -> PathBuf {
        self.root.join(path.to_path())
    }
}

impl ProjectIndex for FsProjectIndex {
    fn all_assets(&self) -> Vec<AssetPath> {
        self.entries.keys().cloned().collect()
    }

    fn roots(&self) -> Vec<AssetPath> {
        self.roots.iter().cloned().collect()
    }

    fn closure(&self, root: &AssetPath) -> HashSet<AssetPath> {
        self.graph.closure(root)
    }

    fn is_directory(&self, path: &AssetPath) -> bool {
        self.entries
            .get(path)
            .copied()
            .unwrap_or_else(|| self.absolute(path).is_dir())
    }

    fn exists(&self, path: &AssetPath) -> bool {
        fs::symlink_metadata(self.absolute(path)).is_ok()
    }

    fn file_size(&self, path: &AssetPath) -> Option<u64> {
        fs::metadata(self.absolute(path))
            .ok()
            .filter(fs::Metadata::is_file)
            .map(|m| m.len())
    }

    /// Remove the file and, if present, its sidecar descriptor.
    ///
    /// Only a failure to remove the asset itself is an error.
    fn delete(&mut self, path: &AssetPath) -> std::io::Result<()> {
        fs::remove_file(self.absolute(path))?;
        self.entries.shift_remove(path);

        let sidecar = path.with_meta_suffix();
        let sidecar_path = self.absolute(&sidecar);
        if sidecar_path.is_file() {
            match fs::remove_file(&sidecar_path) {
                Ok(()) => debug!(path = %sidecar, "removed sidecar"),
                Err(e) => warn!(path = %sidecar, error = %e, "failed to remove sidecar"),
            }
        }
        self.entries.shift_remove(&sidecar);
        Ok(())
    }
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| AssetGuardError::InvalidPattern {
            pattern: pattern.clone(),
            source: e,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| AssetGuardError::InvalidPattern {
        pattern: "combined patterns".to_string(),
        source: e,
    })
}

/// Drop `x.meta` entries whose owner `x` is enumerated too.
///
/// A sidecar belongs to its asset: it is used, whitelisted and deleted
/// together with it and never listed on its own.
fn drop_owned_sidecars(entries: &mut IndexMap<AssetPath, bool>) {
    let owned: Vec<AssetPath> = entries
        .iter()
        .filter(|(_, is_dir)| !**is_dir)
        .filter_map(|(asset, _)| {
            let owner = asset.as_str().strip_suffix(META_SUFFIX)?;
            entries.contains_key(owner).then(|| asset.clone())
        })
        .collect();
    for sidecar in &owned {
        entries.shift_remove(sidecar);
    }
}

/// Walk `root` in file-name order, yielding `(path, is_dir)` pairs.
fn walk(root: &Path, gitignore: bool) -> Vec<(PathBuf, bool)> {
    if gitignore {
        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(false)
            .git_ignore(true)
            .require_git(false)
            .filter_entry(|e| e.file_name() != VCS_DIR)
            .sort_by_file_name(|a, b| a.cmp(b));
        builder
            .build()
            .filter_map(std::result::Result::ok)
            .map(|e| {
                let is_dir = e.file_type().is_some_and(|t| t.is_dir());
                (e.into_path(), is_dir)
            })
            .collect()
    } else {
        WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.file_name() != VCS_DIR)
            .filter_map(std::result::Result::ok)
            .map(|e| {
                let is_dir = e.file_type().is_dir();
                (e.into_path(), is_dir)
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "fs_tests.rs"]
mod tests;
