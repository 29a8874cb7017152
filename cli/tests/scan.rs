//! # Projgen CLI Scan Integration Tests
//!
//! File: cli/tests/scan.rs
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_scan_lists_sorted_sources() {
    let tree = source_tree(&[
        "Sources/Nested/Helper.swift",
        "Sources/Main.swift",
        "README.md",
    ]);
    projgen_in(tree.path())
        .arg("scan")
        .assert()
        .success()
        .stdout("Sources/Main.swift\nSources/Nested/Helper.swift\n2 source file(s) found.\n");
}

#[test]
fn test_scan_skips_git_and_build() {
    let tree = source_tree(&[
        "App.swift",
        ".git/objects/Blob.swift",
        "build/Derived.swift",
        "Feature/build/Nested.swift",
    ]);
    projgen_in(tree.path())
        .arg("scan")
        .assert()
        .success()
        .stdout("App.swift\n1 source file(s) found.\n");
}

#[test]
fn test_scan_tree() {
    let tree = source_tree(&["Core/AppState.swift", "FinoraApp.swift"]);
    projgen_in(tree.path())
        .args(["scan", "--tree"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("└── FinoraApp.swift")
                .and(predicate::str::contains("│   └── AppState.swift"))
                .and(predicate::str::contains("2 source file(s) found.")),
        );
}

#[test]
fn test_scan_uses_configured_extension() {
    let tree = source_tree(&["main.m", "App.swift"]);
    std::fs::write(tree.path().join(".projgen.toml"), "[scan]\nextension = \".m\"\n")
        .expect("Failed to write config");
    projgen_in(tree.path())
        .arg("scan")
        .assert()
        .success()
        .stdout("main.m\n1 source file(s) found.\n");
}
