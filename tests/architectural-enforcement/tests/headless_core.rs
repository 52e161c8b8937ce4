//! Integration Test: Headless Core
//!
//! **Policy**: `swifter-core` must not depend on terminal UI crates. Any
//! surface (terminal, web, desktop) drives the same controller, so drawing
//! concerns stay in the surface crates.

use std::fs;

use architectural_enforcement::{find_violations, workspace_root};

const UI_CRATES: [&str; 2] = ["ratatui", "crossterm"];

#[test]
fn test_core_manifest_has_no_ui_crates() {
    let manifest = fs::read_to_string(workspace_root().join("core").join("Cargo.toml"))
        .expect("core/Cargo.toml should be readable");

    for krate in UI_CRATES {
        assert!(
            !manifest.lines().any(|l| l.trim_start().starts_with(krate)),
            "core/Cargo.toml depends on {krate}"
        );
    }
}

#[test]
fn test_core_sources_do_not_use_ui_crates() {
    let violations = find_violations("core/src", |line| {
        UI_CRATES
            .iter()
            .any(|krate| line.text.contains(&format!("{krate}::")))
    });

    if !violations.is_empty() {
        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }
        panic!(
            "\nFound {} UI crate reference(s) in swifter-core.",
            violations.len()
        );
    }
}
