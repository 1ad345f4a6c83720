use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::asset::AssetPath;
use crate::cli::Cli;
use crate::config::{Config, ConfigLoader, FileConfigLoader, LoadResult, WhitelistFormat};
use crate::error::{AssetGuardError, Result};
use crate::index::FsProjectIndex;
use crate::output::{ColorMode, ScanProgress};
use crate::session::Session;
use crate::state::{
    CONFIG_FILENAME, default_json_whitelist_name, default_lines_whitelist_name,
    discover_project_root, ensure_parent_dir,
};
use crate::whitelist::{JsonWhitelistFile, LineWhitelistFile, WhitelistStorage};

/// Session over the project tree on disk.
pub type ProjectSession = Session<FsProjectIndex, Box<dyn WhitelistStorage>>;

/// Everything a command needs that is derived from global flags.
#[derive(Debug)]
pub struct CommandContext {
    pub project_root: PathBuf,
    pub config: Config,
    pub config_source: Option<PathBuf>,
    pub color: ColorMode,
    pub quiet: bool,
}

impl CommandContext {
    /// Resolve the project root and load the configuration.
    ///
    /// # Errors
    /// Returns an error if the project directory does not exist or the
    /// configuration cannot be loaded.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let project_root = resolve_project_root(cli.project.as_deref())?;
        let loaded = load_config(&project_root, cli.config.as_deref(), cli.no_config)?;
        debug!(
            root = %project_root.display(),
            config = ?loaded.source,
            "resolved project"
        );
        Ok(Self {
            project_root,
            config: loaded.config,
            config_source: loaded.source,
            color: cli.color.into(),
            quiet: cli.quiet,
        })
    }

    /// Whitelist file location, relative config paths resolved against the root.
    #[must_use]
    pub fn whitelist_path(&self) -> PathBuf {
        let default_name = match self.config.whitelist.format {
            WhitelistFormat::Json => default_json_whitelist_name(),
            WhitelistFormat::Lines => default_lines_whitelist_name(),
        };
        let path = self
            .config
            .whitelist
            .path
            .as_deref()
            .unwrap_or_else(|| Path::new(default_name));
        self.project_root.join(path)
    }

    #[must_use]
    pub fn storage(&self) -> Box<dyn WhitelistStorage> {
        let path = self.whitelist_path();
        match self.config.whitelist.format {
            WhitelistFormat::Json => Box::new(JsonWhitelistFile::new(path)),
            WhitelistFormat::Lines => Box::new(LineWhitelistFile::new(path)),
        }
    }

    /// Files the tool owns; they are never enumerated as assets.
    #[must_use]
    pub fn own_files(&self) -> Vec<PathBuf> {
        let mut files = vec![PathBuf::from(CONFIG_FILENAME)];
        let mut candidates = vec![self.whitelist_path()];
        candidates.extend(self.config_source.clone());
        if let Some(manifest) = &self.config.dependencies.manifest {
            candidates.push(self.project_root.join(manifest));
        }
        for path in candidates {
            if let Ok(relative) = path.strip_prefix(&self.project_root) {
                files.push(relative.to_path_buf());
            }
        }
        files
    }

    /// Walk the project tree, showing a spinner unless quiet.
    ///
    /// # Errors
    /// Returns an error if the tree cannot be walked, a pattern is invalid,
    /// or the dependency manifest cannot be read.
    pub fn build_index(&self) -> Result<FsProjectIndex> {
        let mut options = self.config.index_options();
        options.skip = self.own_files();

        let progress = ScanProgress::new(self.quiet);
        let index =
            FsProjectIndex::build_with_progress(&self.project_root, &options, |_| progress.inc());
        progress.finish();
        index
    }

    /// Build the index and open a session on it.
    ///
    /// # Errors
    /// See [`CommandContext::build_index`].
    pub fn open_session(&self) -> Result<ProjectSession> {
        let index = self.build_index()?;
        Ok(Session::open(
            index,
            self.storage(),
            self.config.session_options(),
        ))
    }

    /// Interpret a command-line path as a project-relative asset path.
    ///
    /// Absolute paths inside the project root are made relative; anything
    /// else is taken as already relative to the root.
    #[must_use]
    pub fn asset_path(&self, raw: &str) -> AssetPath {
        AssetPath::new(&self.relative_entry(raw))
    }

    /// Like [`CommandContext::asset_path`] but keeps a trailing `/`, which
    /// is significant for whitelist entries.
    #[must_use]
    pub fn relative_entry(&self, raw: &str) -> String {
        let path = Path::new(raw);
        if !path.is_absolute() {
            return raw.to_string();
        }
        let resolved = dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let Ok(relative) = resolved.strip_prefix(&self.project_root) else {
            return raw.to_string();
        };
        let mut entry = AssetPath::from_relative(relative).as_str().to_string();
        if raw.ends_with(['/', '\\']) && !entry.is_empty() {
            entry.push('/');
        }
        entry
    }
}

/// Use `project` if given, otherwise discover the root from the current directory.
///
/// # Errors
/// Returns an error if `project` does not exist or the current directory is unavailable.
pub fn resolve_project_root(project: Option<&Path>) -> Result<PathBuf> {
    match project {
        Some(dir) => dunce::canonicalize(dir).map_err(|source| AssetGuardError::FileAccess {
            path: dir.to_path_buf(),
            source,
        }),
        None => Ok(discover_project_root(&std::env::current_dir()?)),
    }
}

pub(crate) fn load_config(
    project_root: &Path,
    config_path: Option<&Path>,
    no_config: bool,
) -> Result<LoadResult> {
    if no_config {
        return Ok(LoadResult::default());
    }
    let loader = FileConfigLoader::new().with_project_root(project_root);
    config_path.map_or_else(|| loader.load(), |path| loader.load_from_path(path))
}

/// Write to `output_path`, or print unless quiet.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_output(output_path: Option<&Path>, content: &str, quiet: bool) -> Result<()> {
    if let Some(path) = output_path {
        ensure_parent_dir(path)?;
        fs::write(path, content)?;
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
