use std::collections::HashSet;
use std::io::{Error, ErrorKind};

use indexmap::{IndexMap, IndexSet};

use super::{DependencyGraph, ProjectIndex};
use crate::asset::AssetPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Directory,
    File { size: u64 },
}

/// In-memory project index for embedding hosts and tests.
///
/// Enumeration order is insertion order. Closures come from explicit
/// dependency edges; [`MemoryIndex::with_closure`] pins a root's closure
/// directly instead.
#[derive(Debug, Clone, Default)]
pub struct MemoryIndex {
    entries: IndexMap<AssetPath, EntryKind>,
    roots: IndexSet<AssetPath>,
    graph: DependencyGraph,
    pinned: IndexMap<AssetPath, HashSet<AssetPath>>,
    failing_deletes: HashSet<AssetPath>,
}

impl MemoryIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file of `size` bytes.
    #[must_use]
    pub fn with_file(mut self, path: &str, size: u64) -> Self {
        self.entries.insert(AssetPath::new(path), EntryKind::File { size });
        self
    }

    #[must_use]
    pub fn with_dir(mut self, path: &str) -> Self {
        self.entries
            .insert(AssetPath::new(path), EntryKind::Directory);
        self
    }

    #[must_use]
    pub fn with_root(mut self, path: &str) -> Self {
        self.roots.insert(AssetPath::new(path));
        self
    }

    /// Record a direct dependency edge.
    #[must_use]
    pub fn with_edge(mut self, from: &str, to: &str) -> Self {
        self.graph.add_edge(AssetPath::new(from), AssetPath::new(to));
        self
    }

    /// Fix the closure of `root` to exactly `paths`.
    #[must_use]
    pub fn with_closure(mut self, root: &str, paths: &[&str]) -> Self {
        self.pinned.insert(
            AssetPath::new(root),
            paths.iter().map(|p| AssetPath::new(p)).collect(),
        );
        self
    }

    /// Make deletes of `path` fail with a permission error.
    #[must_use]
    pub fn with_failing_delete(mut self, path: &str) -> Self {
        self.failing_deletes.insert(AssetPath::new(path));
        self
    }

    /// Add a file after construction (simulates an import).
    pub fn insert_file(&mut self, path: &str, size: u64) {
        self.entries.insert(AssetPath::new(path), EntryKind::File { size });
    }
}

impl ProjectIndex for MemoryIndex {
    fn all_assets(&self) -> Vec<AssetPath> {
        self.entries.keys().cloned().collect()
    }

    fn roots(&self) -> Vec<AssetPath> {
        self.roots.iter().cloned().collect()
    }

    fn closure(&self, root: &AssetPath) -> HashSet<AssetPath> {
        if let Some(pinned) = self.pinned.get(root) {
            return pinned.clone();
        }
        self.graph.closure(root)
    }

    fn is_directory(&self, path: &AssetPath) -> bool {
        matches!(self.entries.get(path), Some(EntryKind::Directory))
    }

    fn exists(&self, path: &AssetPath) -> bool {
        self.entries.contains_key(path)
    }

    fn file_size(&self, path: &AssetPath) -> Option<u64> {
        match self.entries.get(path) {
            Some(EntryKind::File { size }) => Some(*size),
            _ => None,
        }
    }

    fn delete(&mut self, path: &AssetPath) -> std::io::Result<()> {
        if self.failing_deletes.contains(path) {
            return Err(Error::new(
                ErrorKind::PermissionDenied,
                format!("{path} is read-only"),
            ));
        }
        if self.entries.shift_remove(path).is_none() {
            return Err(Error::new(ErrorKind::NotFound, format!("{path} not found")));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
