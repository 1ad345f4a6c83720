#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the asset-guard binary.
#[macro_export]
macro_rules! asset_guard {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("asset-guard"))
    };
}

/// Temporary project directory for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// A project with one scene using `hero.png`, leaving `old.png` and
    /// `Sfx/boom.wav` unused. Scene and images carry `.meta` sidecars.
    pub fn sample_project() -> Self {
        let fixture = Self::new();
        fixture.create_config(BASIC_CONFIG);
        fixture.create_file("Assets/Scenes/Main.unity", "scene");
        fixture.create_file("Assets/Scenes/Main.unity.meta", "meta");
        fixture.create_file("Assets/Art/hero.png", "hero");
        fixture.create_file("Assets/Art/hero.png.meta", "meta");
        fixture.create_file("Assets/Art/old.png", "0123456789");
        fixture.create_file("Assets/Art/old.png.meta", "meta");
        fixture.create_file("Assets/Sfx/boom.wav", "boom");
        fixture.create_file("Assets/Editor/Tool.cs", "class Tool {}");
        fixture.create_file("deps.json", SAMPLE_MANIFEST);
        fixture
    }

    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    pub fn create_dir(&self, relative_path: &str) {
        let path = self.dir.path().join(relative_path);
        fs::create_dir_all(&path).expect("Failed to create directory");
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn exists(&self, relative_path: &str) -> bool {
        self.dir.path().join(relative_path).exists()
    }

    pub fn read(&self, relative_path: &str) -> String {
        fs::read_to_string(self.dir.path().join(relative_path)).expect("Failed to read file")
    }

    pub fn create_config(&self, content: &str) {
        self.create_file(".asset-guard.toml", content);
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

pub const BASIC_CONFIG: &str = r#"
version = "1"

[scanner]
gitignore = false

[roots]
patterns = ["**/*.unity"]

[dependencies]
manifest = "deps.json"

[exclusions]
internal_segments = ["Editor"]
asset_scope = "Assets/"
"#;

pub const SAMPLE_MANIFEST: &str = r#"{
  "Assets/Scenes/Main.unity": ["Assets/Art/hero.png"]
}"#;
