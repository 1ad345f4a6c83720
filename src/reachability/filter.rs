use crate::asset::AssetPath;
use crate::index::ProjectIndex;

/// Structural exclusion applied before the whitelist.
pub trait AssetFilter {
    fn is_excluded(&self, path: &AssetPath) -> bool;
}

impl<F> AssetFilter for F
where
    F: Fn(&AssetPath) -> bool,
{
    fn is_excluded(&self, path: &AssetPath) -> bool {
        self(path)
    }
}

/// Rejects directories, anything under a tool-internal directory segment,
/// and anything outside the asset scope.
pub struct StructuralFilter<'a, I: ProjectIndex + ?Sized> {
    index: &'a I,
    internal_segments: Vec<String>,
    asset_scope: Option<String>,
}

impl<'a, I: ProjectIndex + ?Sized> StructuralFilter<'a, I> {
    #[must_use]
    pub const fn new(index: &'a I) -> Self {
        Self {
            index,
            internal_segments: Vec::new(),
            asset_scope: None,
        }
    }

    /// Directory names whose contents belong to tooling, e.g. `Editor`.
    #[must_use]
    pub fn with_internal_segments(mut self, segments: Vec<String>) -> Self {
        self.internal_segments = segments;
        self
    }

    /// Only paths starting with `scope` are candidates. Literal prefix.
    #[must_use]
    pub fn with_asset_scope(mut self, scope: Option<String>) -> Self {
        self.asset_scope = scope.filter(|s| !s.is_empty());
        self
    }
}

impl<I: ProjectIndex + ?Sized> AssetFilter for StructuralFilter<'_, I> {
    fn is_excluded(&self, path: &AssetPath) -> bool {
        if let Some(scope) = &self.asset_scope
            && !path.starts_with(scope)
        {
            return true;
        }
        if self
            .internal_segments
            .iter()
            .any(|segment| path.has_dir_segment(segment))
        {
            return true;
        }
        self.index.is_directory(path)
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
