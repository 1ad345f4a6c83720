//! Integration tests for `init`, `stats` and general CLI behavior.

mod common;

use common::TestFixture;
use predicates::prelude::*;

#[test]
fn help_lists_commands() {
    asset_guard!()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scan"))
        .stdout(predicate::str::contains("whitelist"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("stats"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn version_flag() {
    asset_guard!()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("asset-guard"));
}

#[test]
fn missing_subcommand_fails() {
    asset_guard!().assert().failure();
}

#[test]
fn missing_project_directory_fails() {
    let fixture = TestFixture::new();

    asset_guard!()
        .current_dir(fixture.path())
        .args(["scan", "-C", "does-not-exist"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to access file"));
}

#[test]
fn stats_text() {
    let fixture = TestFixture::sample_project();

    asset_guard!()
        .current_dir(fixture.path())
        .args(["stats", "--color", "never"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unused:       2"))
        .stdout(predicate::str::contains("Folders:      2"))
        .stdout(predicate::str::contains("Reclaimable:  14 B"))
        .stdout(predicate::str::contains("Whitelist:    0 entries"));
}

#[test]
fn stats_json() {
    let fixture = TestFixture::sample_project();

    let output = asset_guard!()
        .current_dir(fixture.path())
        .args(["stats", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["unused"]["unused_count"], 2);
    assert_eq!(parsed["unused"]["total_bytes"], 14);
    assert!(parsed["scan"]["excluded"].as_u64().unwrap() > 0);
}

#[test]
fn quiet_suppresses_report() {
    let fixture = TestFixture::sample_project();

    asset_guard!()
        .current_dir(fixture.path())
        .args(["scan", "--quiet"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn init_creates_default_config_file() {
    let fixture = TestFixture::new();

    asset_guard!()
        .current_dir(fixture.path())
        .args(["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));

    let content = fixture.read(".asset-guard.toml");
    assert!(content.contains("[roots]"));
    assert!(content.contains("[whitelist]"));
}

#[test]
fn init_fails_if_config_exists() {
    let fixture = TestFixture::new();
    fixture.create_config("# existing config\n");

    asset_guard!()
        .current_dir(fixture.path())
        .args(["init"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_force_replaces_broken_config() {
    let fixture = TestFixture::new();
    fixture.create_config("version = \"99\"\n");

    asset_guard!()
        .current_dir(fixture.path())
        .args(["init", "--force"])
        .assert()
        .success();

    asset_guard!()
        .current_dir(fixture.path())
        .args(["scan"])
        .assert()
        .success();
}
