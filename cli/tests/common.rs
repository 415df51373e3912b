//! # PackRS CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration test files (`archive.rs`,
//! `main_tests.rs`). Each file in `cli/tests/` is compiled as its own test
//! crate and runs the compiled `packrs` binary.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// # Get PackRS Command (`packrs_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `packrs` binary.
///
/// ## Panics
/// Panics if the `packrs` binary cannot be found via `Command::cargo_bin`.
pub fn packrs_cmd() -> Command {
    Command::cargo_bin("packrs").expect("Failed to find packrs binary for testing")
}

/// # Isolated Workspace (`Workspace`)
///
/// A temporary directory with an empty config file. Commands created through
/// `cmd()` run inside the directory and ignore any user or project config.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::write(dir.path().join("packrs-test.toml"), "").expect("Failed to write config");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes a file relative to the workspace, creating parent directories.
    pub fn write(&self, rel: &str, content: &[u8]) {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(path, content).expect("Failed to write test file");
    }

    pub fn read(&self, rel: &str) -> Vec<u8> {
        fs::read(self.path().join(rel)).expect("Failed to read test file")
    }

    /// Replaces the workspace config file.
    pub fn config(&self, toml: &str) {
        fs::write(self.path().join("packrs-test.toml"), toml).expect("Failed to write config");
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = packrs_cmd();
        cmd.current_dir(self.path())
            .env("PACKRS_CONFIG", self.path().join("packrs-test.toml"))
            .env_remove("PACKRS_CODEC")
            .env_remove("RUST_LOG");
        cmd
    }
}
