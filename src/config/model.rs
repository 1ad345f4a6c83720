use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AssetGuardError;
use crate::index::FsIndexOptions;
use crate::session::SessionOptions;

/// Supported config version.
pub const CONFIG_VERSION: &str = "1";

/// Directory name that marks tool-internal code by default.
pub const DEFAULT_INTERNAL_SEGMENT: &str = "Editor";

/// Scanner configuration for physical file discovery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Respect .gitignore rules (default: true)
    #[serde(default = "default_true")]
    pub gitignore: bool,

    /// Glob patterns never enumerated, additive to .gitignore.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            gitignore: true,
            exclude: Vec::new(),
        }
    }
}

/// Entry points that anchor reachability [roots].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RootsConfig {
    /// Glob patterns; every matching file is a root.
    #[serde(default = "default_root_patterns")]
    pub patterns: Vec<String>,

    /// Project-relative paths that are roots regardless of patterns.
    #[serde(default)]
    pub paths: Vec<String>,
}

impl Default for RootsConfig {
    fn default() -> Self {
        Self {
            patterns: default_root_patterns(),
            paths: Vec::new(),
        }
    }
}

/// Where direct dependency edges come from [dependencies].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DependenciesConfig {
    /// JSON manifest mapping each path to the paths it references.
    #[serde(default)]
    pub manifest: Option<PathBuf>,
}

/// Structural exclusions [exclusions].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExclusionsConfig {
    /// Directory names whose contents are never reported.
    #[serde(default = "default_internal_segments")]
    pub internal_segments: Vec<String>,

    /// Literal prefix every reported path must start with, e.g. `Assets/`.
    #[serde(default)]
    pub asset_scope: Option<String>,
}

impl Default for ExclusionsConfig {
    fn default() -> Self {
        Self {
            internal_segments: default_internal_segments(),
            asset_scope: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WhitelistFormat {
    #[default]
    Json,
    Lines,
}

impl FromStr for WhitelistFormat {
    type Err = AssetGuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "lines" | "text" => Ok(Self::Lines),
            _ => Err(AssetGuardError::Config(format!(
                "Unknown whitelist format: {s}. Expected 'json' or 'lines'."
            ))),
        }
    }
}

/// Whitelist storage [whitelist].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WhitelistConfig {
    /// Storage file; defaults to a format-specific name in the project root.
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default)]
    pub format: WhitelistFormat,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Config schema version. Absent means current.
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub scanner: ScannerConfig,

    #[serde(default)]
    pub roots: RootsConfig,

    #[serde(default)]
    pub dependencies: DependenciesConfig,

    #[serde(default)]
    pub exclusions: ExclusionsConfig,

    #[serde(default)]
    pub whitelist: WhitelistConfig,
}

impl Config {
    /// Walk options for the filesystem index. `skip` is left to the caller,
    /// which knows where the tool's own files live.
    #[must_use]
    pub fn index_options(&self) -> FsIndexOptions {
        FsIndexOptions {
            gitignore: self.scanner.gitignore,
            exclude: self.scanner.exclude.clone(),
            root_patterns: self.roots.patterns.clone(),
            root_paths: self.roots.paths.clone(),
            manifest: self.dependencies.manifest.clone(),
            skip: Vec::new(),
        }
    }

    #[must_use]
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            internal_segments: self.exclusions.internal_segments.clone(),
            asset_scope: self.exclusions.asset_scope.clone(),
        }
    }
}

const fn default_true() -> bool {
    true
}

fn default_root_patterns() -> Vec<String> {
    vec!["**/*.unity".to_string()]
}

fn default_internal_segments() -> Vec<String> {
    vec![DEFAULT_INTERNAL_SEGMENT.to_string()]
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
