//! Project root discovery and default file locations.
//!
//! The whitelist and the config file live in the project root so they can be
//! committed alongside the assets they describe.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Name of the project-local configuration file.
pub const CONFIG_FILENAME: &str = ".asset-guard.toml";
const JSON_WHITELIST_FILENAME: &str = ".asset-guard-whitelist.json";
const LINES_WHITELIST_FILENAME: &str = ".asset-guard-whitelist";

/// Discover the project root by walking up from `start` looking for markers.
///
/// Markers (checked in order at each directory level):
///   1. `.git/` directory - git repository root
///   2. `.asset-guard.toml` - explicit asset-guard config
///
/// Returns `start` if no markers found.
/// If `start` cannot be canonicalized, returns it as-is.
#[must_use]
pub fn discover_project_root(start: &Path) -> PathBuf {
    let abs_start = dunce::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());

    for ancestor in abs_start.ancestors() {
        if ancestor.join(".git").is_dir() {
            return ancestor.to_path_buf();
        }
        if ancestor.join(CONFIG_FILENAME).is_file() {
            return ancestor.to_path_buf();
        }
    }

    abs_start
}

/// Default whitelist file name for the JSON record format.
#[must_use]
pub const fn default_json_whitelist_name() -> &'static str {
    JSON_WHITELIST_FILENAME
}

/// Default whitelist file name for the line-oriented format.
#[must_use]
pub const fn default_lines_whitelist_name() -> &'static str {
    LINES_WHITELIST_FILENAME
}

/// Get the config file path for the given project root.
#[must_use]
pub fn config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_FILENAME)
}

/// Ensure the parent directory exists for a given path.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Write `content` to `path` through a temporary sibling file and a rename,
/// so readers never observe a half-written file.
///
/// # Errors
/// Returns an error if the temp file cannot be created, written or renamed.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
