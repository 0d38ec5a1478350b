//! Common test utilities for Guru integration tests

#![allow(clippy::expect_used)]

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// A scratch area holding packages and install targets
pub struct TestEnv {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Root of the scratch area
    pub path: PathBuf,
}

impl TestEnv {
    /// Create a new test environment
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Create a package directory with a version manifest
    pub fn create_package(&self, name: &str) -> PathBuf {
        let package = self.path.join("packages").join(name);
        std::fs::create_dir_all(&package).expect("Failed to create package directory");
        std::fs::write(package.join("version"), "1.0.0\n").expect("Failed to write manifest");
        package
    }

    /// Write a file relative to the scratch area
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file relative to the scratch area
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists relative to the scratch area
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Install prefix inside the scratch area
    pub fn prefix(&self) -> PathBuf {
        self.path.join("prefix")
    }

    /// Root overlay target inside the scratch area
    pub fn root(&self) -> PathBuf {
        self.path.join("root")
    }

    /// `guru install` pointed at this environment's prefix and root
    pub fn install_cmd(&self) -> Command {
        let mut cmd = guru_cmd();
        cmd.current_dir(&self.path)
            .arg("--color")
            .arg("never")
            .arg("install")
            .arg("--prefix")
            .arg(self.prefix())
            .arg("--root")
            .arg(self.root());
        cmd
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Command for the real guru binary, isolated from the caller's environment
#[allow(deprecated)]
pub fn guru_cmd() -> Command {
    let mut cmd = Command::cargo_bin("guru").expect("guru binary should be built");
    cmd.env_remove("GURU_PREFIX")
        .env_remove("GURU_ROOT")
        .env_remove("GURU_MAN_DIR")
        .env_remove("GURU_COLOR")
        .env_remove("RUST_LOG");
    cmd
}
