use std::path::PathBuf;

use thiserror::Error;

use crate::asset::AssetPath;

#[derive(Error, Debug)]
pub enum AssetGuardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to access file: {path}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Whitelist(#[from] WhitelistError),

    #[error(transparent)]
    Delete(#[from] DeleteError),
}

/// Durable whitelist read/write failure.
///
/// Never fatal: callers fall back to a memory-only whitelist and report it.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read whitelist {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write whitelist {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Whitelist {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Whitelist {path} has unsupported version {version}")]
    UnsupportedVersion { path: PathBuf, version: u32 },

    #[error("Whitelist storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WhitelistError {
    #[error("Malformed whitelist entry {entry:?}: {reason}")]
    Malformed { entry: String, reason: &'static str },
}

#[derive(Error, Debug)]
pub enum DeleteError {
    #[error("{0} is not listed as an unused asset")]
    NotIndexed(AssetPath),

    #[error("Failed to delete {path}")]
    Store {
        path: AssetPath,
        #[source]
        source: std::io::Error,
    },
}

impl DeleteError {
    /// The asset the failed delete was aimed at.
    #[must_use]
    pub const fn path(&self) -> &AssetPath {
        match self {
            Self::NotIndexed(path) | Self::Store { path, .. } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, AssetGuardError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
