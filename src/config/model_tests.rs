use std::path::PathBuf;

use super::*;

#[test]
fn default_config_values() {
    let config = Config::default();
    assert!(config.version.is_none());
    assert!(config.scanner.gitignore);
    assert!(config.scanner.exclude.is_empty());
    assert_eq!(config.roots.patterns, vec!["**/*.unity".to_string()]);
    assert_eq!(config.exclusions.internal_segments, vec!["Editor".to_string()]);
    assert!(config.exclusions.asset_scope.is_none());
    assert_eq!(config.whitelist.format, WhitelistFormat::Json);
}

#[test]
fn empty_toml_gives_defaults() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn parses_all_sections() {
    let content = r#"
version = "1"

[scanner]
gitignore = false
exclude = ["**/Library/**"]

[roots]
patterns = ["Scenes/**/*.scene"]
paths = ["Boot.scene"]

[dependencies]
manifest = "deps.json"

[exclusions]
internal_segments = ["Editor", "Gizmos"]
asset_scope = "Assets/"

[whitelist]
path = "keep.txt"
format = "lines"
"#;
    let config: Config = toml::from_str(content).unwrap();

    assert_eq!(config.version.as_deref(), Some("1"));
    assert!(!config.scanner.gitignore);
    assert_eq!(config.scanner.exclude, vec!["**/Library/**".to_string()]);
    assert_eq!(config.roots.paths, vec!["Boot.scene".to_string()]);
    assert_eq!(config.dependencies.manifest, Some(PathBuf::from("deps.json")));
    assert_eq!(config.exclusions.internal_segments.len(), 2);
    assert_eq!(config.exclusions.asset_scope.as_deref(), Some("Assets/"));
    assert_eq!(config.whitelist.path, Some(PathBuf::from("keep.txt")));
    assert_eq!(config.whitelist.format, WhitelistFormat::Lines);
}

#[test]
fn explicit_empty_internal_segments_disable_the_rule() {
    let config: Config = toml::from_str("[exclusions]\ninternal_segments = []\n").unwrap();
    assert!(config.exclusions.internal_segments.is_empty());
}

#[test]
fn unknown_whitelist_format_fails_to_parse() {
    let result: Result<Config, _> = toml::from_str("[whitelist]\nformat = \"yaml\"\n");
    assert!(result.is_err());
}

#[test]
fn whitelist_format_from_str() {
    assert_eq!("json".parse::<WhitelistFormat>().unwrap(), WhitelistFormat::Json);
    assert_eq!("LINES".parse::<WhitelistFormat>().unwrap(), WhitelistFormat::Lines);
    assert_eq!("text".parse::<WhitelistFormat>().unwrap(), WhitelistFormat::Lines);
    assert!("yaml".parse::<WhitelistFormat>().is_err());
}

#[test]
fn index_options_mirror_config() {
    let mut config = Config::default();
    config.scanner.exclude = vec!["**/*.tmp".to_string()];
    config.roots.paths = vec!["Main.scene".to_string()];
    config.dependencies.manifest = Some(PathBuf::from("deps.json"));

    let options = config.index_options();
    assert!(options.gitignore);
    assert_eq!(options.exclude, vec!["**/*.tmp".to_string()]);
    assert_eq!(options.root_patterns, vec!["**/*.unity".to_string()]);
    assert_eq!(options.root_paths, vec!["Main.scene".to_string()]);
    assert_eq!(options.manifest, Some(PathBuf::from("deps.json")));
    assert!(options.skip.is_empty());
}

#[test]
fn session_options_mirror_config() {
    let mut config = Config::default();
    config.exclusions.asset_scope = Some("Assets/".to_string());

    let options = config.session_options();
    assert_eq!(options.internal_segments, vec!["Editor".to_string()]);
    assert_eq!(options.asset_scope.as_deref(), Some("Assets/"));
}
