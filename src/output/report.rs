use serde::Serialize;

use crate::asset::AssetPath;
use crate::index::ProjectIndex;
use crate::reachability::ReachabilityStats;
use crate::session::{Session, UnusedStats};
use crate::whitelist::{Whitelist, WhitelistStorage};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetReport {
    pub path: AssetPath,
    /// `None` when the file vanished after the scan.
    pub size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderReport {
    pub key: AssetPath,
    pub depth: usize,
    pub assets: Vec<AssetReport>,
}

impl FolderReport {
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.assets.iter().filter_map(|a| a.size).sum()
    }
}

/// Snapshot of a session's unused set, ready for formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub summary: UnusedStats,
    pub scan: Option<ReachabilityStats>,
    pub selection: Option<AssetPath>,
    pub folders: Vec<FolderReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whitelist_warning: Option<String>,
    /// List assets of the selected folder only.
    #[serde(skip)]
    pub focused: bool,
}

impl ScanReport {
    #[must_use]
    pub fn from_session<I: ProjectIndex, S: WhitelistStorage>(session: &Session<I, S>) -> Self {
        let index = session.index();
        let folders = session
            .by_folder()
            .iter()
            .map(|(key, assets)| FolderReport {
                key: key.clone(),
                depth: key.depth(),
                assets: assets
                    .iter()
                    .map(|path| AssetReport {
                        path: path.clone(),
                        size: index.file_size(path),
                    })
                    .collect(),
            })
            .collect();

        Self {
            summary: session.stats(),
            scan: session.last_scan().copied(),
            selection: session.selection().cloned(),
            folders,
            whitelist_warning: session.storage_warning().map(ToString::to_string),
            focused: false,
        }
    }

    #[must_use]
    pub const fn with_focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    pub unused: UnusedStats,
    pub scan: Option<ReachabilityStats>,
    pub whitelist_entries: usize,
}

impl StatsReport {
    #[must_use]
    pub fn from_session<I: ProjectIndex, S: WhitelistStorage>(session: &Session<I, S>) -> Self {
        Self {
            unused: session.stats(),
            scan: session.last_scan().copied(),
            whitelist_entries: session.whitelist().len(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WhitelistReport {
    pub folders: Vec<String>,
    pub files: Vec<String>,
    pub memory_only: bool,
}

impl From<&Whitelist> for WhitelistReport {
    fn from(whitelist: &Whitelist) -> Self {
        Self {
            folders: whitelist.folders().map(str::to_string).collect(),
            files: whitelist.files().map(str::to_string).collect(),
            memory_only: whitelist.is_memory_only(),
        }
    }
}

/// Human-readable byte count, e.g. `1.5 KiB`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = UNITS[0];
    for &next in &UNITS[1..] {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = next;
    }
    format!("{value:.1} {unit}")
}
