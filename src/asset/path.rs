use std::borrow::Borrow;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Suffix of the sidecar descriptor that travels with every asset.
pub const META_SUFFIX: &str = ".meta";

/// Normalized, project-relative identifier of a resource file or directory.
///
/// Separators are always `/`. Ordering is plain lexicographic string order,
/// so a sorted collection of `AssetPath`s lists folders before their
/// siblings' contents the same way a file browser does.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetPath(String);

impl AssetPath {
    /// Normalize `raw` into an asset path.
    ///
    /// Backslashes become `/`, a leading `./` is dropped, repeated separators
    /// collapse and a trailing separator is removed.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let unified = raw.replace('\\', "/");
        let mut normalized = String::with_capacity(unified.len());
        for segment in unified.split('/') {
            if segment.is_empty() || (segment == "." && normalized.is_empty()) {
                continue;
            }
            if !normalized.is_empty() {
                normalized.push('/');
            }
            normalized.push_str(segment);
        }
        Self(normalized)
    }

    /// Build an asset path from a filesystem path relative to the project root.
    #[must_use]
    pub fn from_relative(path: &Path) -> Self {
        Self::new(&path.to_string_lossy())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The containing directory; the empty path for top-level entries.
    #[must_use]
    pub fn parent(&self) -> Self {
        self.0
            .rfind('/')
            .map_or_else(Self::default, |idx| Self(self.0[..idx].to_string()))
    }

    /// Final path component.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.0.rfind('/').map_or(&self.0, |idx| &self.0[idx + 1..])
    }

    /// Number of separators, i.e. how deeply nested the entry is.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.matches('/').count()
    }

    /// Path of the sidecar descriptor (`path + ".meta"`).
    #[must_use]
    pub fn with_meta_suffix(&self) -> Self {
        Self(format!("{}{META_SUFFIX}", self.0))
    }

    /// Literal string prefix test. Not segment-aware.
    #[must_use]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    /// True if any directory component (not the final name) equals `segment`.
    #[must_use]
    pub fn has_dir_segment(&self, segment: &str) -> bool {
        let mut components: Vec<&str> = self.0.split('/').collect();
        components.pop();
        components.contains(&segment)
    }

    /// Convert to a relative filesystem path.
    #[must_use]
    pub fn to_path(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str(".")
        } else {
            f.write_str(&self.0)
        }
    }
}

impl From<&str> for AssetPath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for AssetPath {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl AsRef<str> for AssetPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for AssetPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;
