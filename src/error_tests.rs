use std::error::Error as _;
use std::path::PathBuf;

use super::*;

#[test]
fn error_display_config() {
    let err = AssetGuardError::Config("missing roots".to_string());
    assert_eq!(err.to_string(), "Configuration error: missing roots");
}

#[test]
fn error_display_file_access() {
    let err = AssetGuardError::FileAccess {
        path: PathBuf::from("deps.json"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
    };
    assert!(err.to_string().contains("deps.json"));
    assert!(err.source().is_some());
}

#[test]
fn malformed_whitelist_entry_names_entry_and_reason() {
    let err = WhitelistError::Malformed {
        entry: "   ".to_string(),
        reason: "entry is empty",
    };
    let message = err.to_string();
    assert!(message.contains("\"   \""));
    assert!(message.contains("entry is empty"));
}

#[test]
fn whitelist_error_is_transparent_in_crate_error() {
    let inner = WhitelistError::Malformed {
        entry: String::new(),
        reason: "entry is empty",
    };
    let expected = inner.to_string();
    let err: AssetGuardError = inner.into();
    assert_eq!(err.to_string(), expected);
}

#[test]
fn delete_error_not_indexed_display() {
    let err = DeleteError::NotIndexed(AssetPath::new("A/x.png"));
    assert_eq!(err.to_string(), "A/x.png is not listed as an unused asset");
    assert_eq!(err.path().as_str(), "A/x.png");
}

#[test]
fn delete_error_store_keeps_source() {
    let err = DeleteError::Store {
        path: AssetPath::new("A/x.png"),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    };
    assert_eq!(err.to_string(), "Failed to delete A/x.png");
    assert!(err.source().is_some());
    assert_eq!(err.path().as_str(), "A/x.png");
}

#[test]
fn storage_error_unsupported_version_display() {
    let err = StorageError::UnsupportedVersion {
        path: PathBuf::from(".asset-guard-whitelist.json"),
        version: 9,
    };
    assert!(err.to_string().contains("unsupported version 9"));
}

#[test]
fn io_error_converts() {
    let err: AssetGuardError = std::io::Error::other("boom").into();
    assert!(matches!(err, AssetGuardError::Io(_)));
    assert_eq!(err.to_string(), "IO error: boom");
}
