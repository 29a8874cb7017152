//! # Projgen CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Every test runs
//! the compiled `projgen` binary inside its own temporary source tree, with
//! `HOME` pointed into that tree so a real user configuration file can never
//! leak into the results.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A `projgen` command with a clean environment.
pub fn projgen_cmd() -> Command {
    let mut cmd = Command::cargo_bin("projgen").expect("Failed to find projgen binary for testing");
    cmd.env_remove("PROJGEN_ROOT")
        .env_remove("RUST_LOG")
        .env_remove("XDG_CONFIG_HOME");
    cmd
}

/// A `projgen` command running in `root`, isolated from the user's config.
pub fn projgen_in(root: &Path) -> Command {
    let mut cmd = projgen_cmd();
    cmd.current_dir(root).env("HOME", root);
    cmd
}

/// Creates a temporary tree holding an empty file for each relative path.
pub fn source_tree(paths: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    for relative in paths {
        let path = dir.path().join(relative);
        fs::create_dir_all(path.parent().expect("path has a parent"))
            .expect("Failed to create parent directories");
        fs::write(&path, "import SwiftUI\n").expect("Failed to write source file");
    }
    dir
}

/// Reads `<root>/<name>.xcodeproj/project.pbxproj`.
pub fn read_project(root: &Path, name: &str) -> String {
    fs::read_to_string(root.join(format!("{}.xcodeproj", name)).join("project.pbxproj"))
        .expect("Failed to read generated project.pbxproj")
}
