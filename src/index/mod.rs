//! Project index abstraction.
//!
//! The engine never looks inside asset files. Everything it knows about the
//! project (which paths exist, which are entry points, what each entry point
//! depends on) comes through [`ProjectIndex`].

mod fs;
mod graph;
mod memory;

pub use fs::{FsIndexOptions, FsProjectIndex};
pub use graph::{DependencyGraph, DependencyManifest};
pub use memory::MemoryIndex;

use std::collections::HashSet;

use crate::asset::AssetPath;

/// Collaborator that enumerates project assets and resolves dependencies.
pub trait ProjectIndex {
    /// All asset paths, files and directories, in the index's natural order.
    fn all_assets(&self) -> Vec<AssetPath>;

    /// Entry points that anchor reachability. May be empty.
    fn roots(&self) -> Vec<AssetPath>;

    /// Transitive dependencies of `root`, including `root` itself.
    ///
    /// An unreadable root yields an empty set rather than an error.
    fn closure(&self, root: &AssetPath) -> HashSet<AssetPath>;

    fn is_directory(&self, path: &AssetPath) -> bool;

    fn exists(&self, path: &AssetPath) -> bool;

    /// Size in bytes of a file that still exists, `None` otherwise.
    fn file_size(&self, path: &AssetPath) -> Option<u64>;

    /// Remove an asset from the underlying store.
    ///
    /// # Errors
    /// Returns the store's error if the asset cannot be removed.
    fn delete(&mut self, path: &AssetPath) -> std::io::Result<()>;
}
