//! Used/unused computation from entry points and dependency closures.

mod filter;

pub use filter::{AssetFilter, StructuralFilter};

use std::collections::HashSet;

use indexmap::IndexSet;
use serde::Serialize;
use tracing::debug;

use crate::aggregator::UnusedIndex;
use crate::asset::AssetPath;
use crate::index::ProjectIndex;
use crate::whitelist::Whitelist;

/// Counters describing one computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReachabilityStats {
    /// Distinct assets enumerated.
    pub total_assets: usize,
    /// Distinct paths named by any root's closure.
    pub used: usize,
    /// Enumerated assets outside every closure.
    pub candidates: usize,
    /// Candidates rejected by the structural filter.
    pub excluded: usize,
    /// Candidates exempted by the whitelist.
    pub whitelisted: usize,
}

/// Output of [`compute`]: the grouped unused set plus its counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reachability {
    pub index: UnusedIndex,
    pub stats: ReachabilityStats,
}

/// Derive the unused set.
///
/// `all_assets` is deduplicated keeping the first occurrence; the resulting
/// order is the order of `flat`. A root whose closure is empty contributes
/// nothing. With no roots every asset that passes the filter and the
/// whitelist is unused.
pub fn compute<C, F>(
    all_assets: &[AssetPath],
    roots: &[AssetPath],
    mut closure: C,
    exclusions: &F,
    whitelist: &Whitelist,
    previous_selection: Option<&AssetPath>,
) -> Reachability
where
    C: FnMut(&AssetPath) -> HashSet<AssetPath>,
    F: AssetFilter + ?Sized,
{
    let assets: IndexSet<&AssetPath> = all_assets.iter().collect();

    let mut used: HashSet<AssetPath> = HashSet::new();
    for root in roots {
        used.extend(closure(root));
    }

    let mut stats = ReachabilityStats {
        total_assets: assets.len(),
        used: used.len(),
        ..ReachabilityStats::default()
    };

    let mut unused = Vec::new();
    for path in assets {
        if used.contains(path) {
            continue;
        }
        stats.candidates += 1;
        if exclusions.is_excluded(path) {
            stats.excluded += 1;
        } else if whitelist.contains(path) {
            stats.whitelisted += 1;
        } else {
            unused.push(path.clone());
        }
    }

    debug!(
        total = stats.total_assets,
        roots = roots.len(),
        used = stats.used,
        candidates = stats.candidates,
        excluded = stats.excluded,
        whitelisted = stats.whitelisted,
        unused = unused.len(),
        "computed reachability"
    );

    Reachability {
        index: UnusedIndex::rebuild(unused, previous_selection),
        stats,
    }
}

/// [`compute`] with everything taken from a [`ProjectIndex`].
pub fn compute_for_index<I, F>(
    index: &I,
    exclusions: &F,
    whitelist: &Whitelist,
    previous_selection: Option<&AssetPath>,
) -> Reachability
where
    I: ProjectIndex + ?Sized,
    F: AssetFilter + ?Sized,
{
    compute(
        &index.all_assets(),
        &index.roots(),
        |root| index.closure(root),
        exclusions,
        whitelist,
        previous_selection,
    )
}

#[cfg(test)]
#[path = "reachability_tests.rs"]
mod tests;
