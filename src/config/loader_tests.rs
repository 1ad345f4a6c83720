use std::collections::HashMap;
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};

use super::*;
use crate::config::WhitelistFormat;

struct MockFileSystem {
    files: HashMap<PathBuf, String>,
    current_dir: PathBuf,
    config_dir: Option<PathBuf>,
}

impl MockFileSystem {
    fn new() -> Self {
        Self {
            files: HashMap::new(),
            current_dir: PathBuf::from("/project"),
            config_dir: Some(PathBuf::from("/home/user/.config/asset-guard")),
        }
    }

    fn with_file(mut self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files.insert(path.into(), content.to_string());
        self
    }

    fn with_config_dir(mut self, path: Option<PathBuf>) -> Self {
        self.config_dir = path;
        self
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::new(ErrorKind::NotFound, "file not found"))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn current_dir(&self) -> std::io::Result<PathBuf> {
        Ok(self.current_dir.clone())
    }

    fn config_dir(&self) -> Option<PathBuf> {
        self.config_dir.clone()
    }
}

#[test]
fn returns_default_when_no_config_found() {
    let loader = FileConfigLoader::with_fs(MockFileSystem::new());

    let result = loader.load().unwrap();
    assert_eq!(result.config, Config::default());
    assert!(result.source.is_none());
}

#[test]
fn loads_local_config_from_current_directory() {
    let fs = MockFileSystem::new().with_file(
        "/project/.asset-guard.toml",
        "[exclusions]\nasset_scope = \"Assets/\"\n",
    );
    let loader = FileConfigLoader::with_fs(fs);

    let result = loader.load().unwrap();
    assert_eq!(
        result.config.exclusions.asset_scope.as_deref(),
        Some("Assets/")
    );
    assert_eq!(
        result.source,
        Some(PathBuf::from("/project/.asset-guard.toml"))
    );
}

#[test]
fn project_root_overrides_current_directory() {
    let fs = MockFileSystem::new()
        .with_file("/project/.asset-guard.toml", "[scanner]\ngitignore = true\n")
        .with_file("/game/.asset-guard.toml", "[scanner]\ngitignore = false\n");
    let loader = FileConfigLoader::with_fs(fs).with_project_root("/game");

    let result = loader.load().unwrap();
    assert!(!result.config.scanner.gitignore);
}

#[test]
fn loads_user_config_as_fallback() {
    let fs = MockFileSystem::new().with_file(
        "/home/user/.config/asset-guard/config.toml",
        "[whitelist]\nformat = \"lines\"\n",
    );
    let loader = FileConfigLoader::with_fs(fs);

    let result = loader.load().unwrap();
    assert_eq!(result.config.whitelist.format, WhitelistFormat::Lines);
}

#[test]
fn local_config_takes_priority_over_user_config() {
    let fs = MockFileSystem::new()
        .with_file("/project/.asset-guard.toml", "[roots]\npaths = [\"a\"]\n")
        .with_file(
            "/home/user/.config/asset-guard/config.toml",
            "[roots]\npaths = [\"b\"]\n",
        );
    let loader = FileConfigLoader::with_fs(fs);

    let result = loader.load().unwrap();
    assert_eq!(result.config.roots.paths, vec!["a".to_string()]);
}

#[test]
fn missing_user_config_dir_is_ignored() {
    let fs = MockFileSystem::new().with_config_dir(None);
    let loader = FileConfigLoader::with_fs(fs);
    assert!(loader.load().unwrap().source.is_none());
}

#[test]
fn load_from_path_reads_given_file() {
    let fs = MockFileSystem::new().with_file("/elsewhere/custom.toml", "version = \"1\"\n");
    let loader = FileConfigLoader::with_fs(fs);

    let result = loader.load_from_path(Path::new("/elsewhere/custom.toml")).unwrap();
    assert_eq!(result.config.version.as_deref(), Some("1"));
}

#[test]
fn load_from_missing_path_is_file_access_error() {
    let loader = FileConfigLoader::with_fs(MockFileSystem::new());

    let err = loader.load_from_path(Path::new("/nope.toml")).unwrap_err();
    assert!(matches!(err, AssetGuardError::FileAccess { .. }));
}

#[test]
fn invalid_toml_is_parse_error() {
    let fs = MockFileSystem::new().with_file("/project/.asset-guard.toml", "[scanner\n");
    let loader = FileConfigLoader::with_fs(fs);

    let err = loader.load().unwrap_err();
    assert!(matches!(err, AssetGuardError::TomlParse(_)));
}

#[test]
fn unsupported_version_is_rejected() {
    let fs = MockFileSystem::new().with_file("/project/.asset-guard.toml", "version = \"9\"\n");
    let loader = FileConfigLoader::with_fs(fs);

    let err = loader.load().unwrap_err();
    assert!(matches!(err, AssetGuardError::Config(_)));
    assert!(err.to_string().contains("Unsupported config version '9'"));
}
