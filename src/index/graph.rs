use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::asset::AssetPath;
use crate::error::{AssetGuardError, Result};

/// On-disk form of the dependency graph: each asset mapped to the assets it
/// references directly.
///
/// ```json
/// {
///   "Assets/Scenes/main.scene": ["Assets/Art/hero.png", "Assets/Prefabs/hero.prefab"],
///   "Assets/Prefabs/hero.prefab": ["Assets/Art/hero_normal.png"]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyManifest {
    pub edges: BTreeMap<String, Vec<String>>,
}

impl DependencyManifest {
    /// Load a manifest from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| AssetGuardError::FileAccess {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Direct dependency edges with transitive closure lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    edges: IndexMap<AssetPath, Vec<AssetPath>>,
}

impl DependencyGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `from` references `to`.
    pub fn add_edge(&mut self, from: AssetPath, to: AssetPath) {
        let targets = self.edges.entry(from).or_default();
        if !targets.contains(&to) {
            targets.push(to);
        }
    }

    /// Direct dependencies of `path`.
    #[must_use]
    pub fn direct(&self, path: &AssetPath) -> &[AssetPath] {
        self.edges.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Everything reachable from `root`, including `root`.
    ///
    /// Iterative depth-first walk; cycles terminate because each node is
    /// expanded once.
    #[must_use]
    pub fn closure(&self, root: &AssetPath) -> HashSet<AssetPath> {
        let mut seen = HashSet::new();
        let mut stack = vec![root.clone()];
        while let Some(node) = stack.pop() {
            if !seen.insert(node.clone()) {
                continue;
            }
            for dep in self.direct(&node) {
                if !seen.contains(dep) {
                    stack.push(dep.clone());
                }
            }
        }
        seen
    }
}

impl From<DependencyManifest> for DependencyGraph {
    fn from(manifest: DependencyManifest) -> Self {
        let mut graph = Self::new();
        for (from, targets) in manifest.edges {
            let from = AssetPath::new(&from);
            for to in targets {
                graph.add_edge(from.clone(), AssetPath::new(&to));
            }
        }
        graph
    }
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;
