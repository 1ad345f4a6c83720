use std::fs;

use tempfile::TempDir;

use super::*;

fn sample_record() -> WhitelistRecord {
    let mut record = WhitelistRecord::default();
    record.folders.insert("Assets/Plugins/".to_string());
    record.files.insert("Assets/Art/logo.png".to_string());
    record
}

#[test]
fn record_entries_lists_folders_first() {
    let record = sample_record();
    let entries: Vec<&str> = record.entries().collect();
    assert_eq!(entries, vec!["Assets/Plugins/", "Assets/Art/logo.png"]);
    assert_eq!(record.len(), 2);
    assert!(!record.is_empty());
    assert_eq!(record.version(), 1);
}

#[test]
fn json_missing_file_loads_none() {
    let temp = TempDir::new().unwrap();
    let storage = JsonWhitelistFile::new(temp.path().join("whitelist.json"));
    assert!(storage.load().unwrap().is_none());
}

#[test]
fn json_save_and_load() {
    let temp = TempDir::new().unwrap();
    let storage = JsonWhitelistFile::new(temp.path().join("whitelist.json"));
    storage.save(&sample_record()).unwrap();

    let content = fs::read_to_string(storage.path()).unwrap();
    assert!(content.contains("\"folders\""));
    assert!(content.contains("\"files\""));

    assert_eq!(storage.load().unwrap(), Some(sample_record()));
}

#[test]
fn json_missing_lists_default_to_empty() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("whitelist.json");
    fs::write(&path, r#"{ "files": ["a.png"] }"#).unwrap();

    let record = JsonWhitelistFile::new(&path).load().unwrap().unwrap();
    assert!(record.folders.is_empty());
    assert!(record.files.contains("a.png"));
}

#[test]
fn json_invalid_content_is_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("whitelist.json");
    fs::write(&path, "{ not json").unwrap();

    let result = JsonWhitelistFile::new(&path).load();
    assert!(matches!(result, Err(StorageError::Parse { .. })));
}

#[test]
fn json_unknown_version_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("whitelist.json");
    fs::write(&path, r#"{ "version": 7, "folders": [], "files": [] }"#).unwrap();

    let result = JsonWhitelistFile::new(&path).load();
    assert!(matches!(
        result,
        Err(StorageError::UnsupportedVersion { version: 7, .. })
    ));
}

#[test]
fn json_unwritable_location_is_write_error() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("blocker");
    fs::write(&blocker, "file, not a directory").unwrap();

    let storage = JsonWhitelistFile::new(blocker.join("whitelist.json"));
    assert!(matches!(
        storage.save(&sample_record()),
        Err(StorageError::Write { .. })
    ));
}

#[test]
fn lines_save_and_load() {
    let temp = TempDir::new().unwrap();
    let storage = LineWhitelistFile::new(temp.path().join("whitelist"));
    storage.save(&sample_record()).unwrap();

    let content = fs::read_to_string(storage.path()).unwrap();
    assert!(content.starts_with('#'));
    assert!(content.contains("Assets/Plugins/\n"));

    let loaded = storage.load().unwrap().unwrap();
    let entries: Vec<&str> = loaded.entries().collect();
    assert_eq!(entries, vec!["Assets/Art/logo.png", "Assets/Plugins/"]);
    assert!(loaded.folders.is_empty());
}

#[test]
fn lines_ignore_comments_and_blank_lines() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("whitelist");
    fs::write(&path, "# comment\n\n  Assets/keep.png  \n").unwrap();

    let record = LineWhitelistFile::new(&path).load().unwrap().unwrap();
    assert_eq!(record.len(), 1);
    assert!(record.files.contains("Assets/keep.png"));
}

#[test]
fn lines_missing_file_loads_none() {
    let temp = TempDir::new().unwrap();
    let storage = LineWhitelistFile::new(temp.path().join("whitelist"));
    assert!(storage.load().unwrap().is_none());
}

#[test]
fn memory_storage_round_trip() {
    let storage = MemoryWhitelistStorage::new();
    assert!(storage.load().unwrap().is_none());
    storage.save(&sample_record()).unwrap();
    assert_eq!(storage.stored(), Some(sample_record()));
}

#[test]
fn failing_memory_storage_errors() {
    let storage = MemoryWhitelistStorage::failing();
    assert!(storage.load().is_err());
    assert!(storage.save(&sample_record()).is_err());
}

#[test]
fn boxed_storage_delegates() {
    let storage: Box<dyn WhitelistStorage> =
        Box::new(MemoryWhitelistStorage::with_record(sample_record()));
    assert_eq!(storage.load().unwrap(), Some(sample_record()));
    assert_eq!(storage.describe(), "in-memory whitelist");
}
