//! Project fixture utilities

use std::path::PathBuf;

use tempfile::TempDir;

use package_sync::config::{DECLARATION_FILE, LOCK_FILE};

/// Path of a file under tests/fixtures
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Create a project directory with the given composer.json and, optionally, composer.lock
pub fn create_test_project(composer_json: &str, composer_lock: Option<&str>) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join(DECLARATION_FILE), composer_json).unwrap();
    if let Some(lock) = composer_lock {
        std::fs::write(temp_dir.path().join(LOCK_FILE), lock).unwrap();
    }
    temp_dir
}

/// Copy the fixture project into a temporary directory
pub fn copy_fixture_project() -> TempDir {
    let composer_json = std::fs::read_to_string(fixture(DECLARATION_FILE)).unwrap();
    let composer_lock = std::fs::read_to_string(fixture(LOCK_FILE)).unwrap();
    create_test_project(&composer_json, Some(&composer_lock))
}
