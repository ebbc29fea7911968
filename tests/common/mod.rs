//! Shared test helpers for integration tests
//!
//! This module provides common utilities used across all test files.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::OnceLock;

use assert_cmd::cargo;
use assert_cmd::Command;
use mlens::core::{Generator, ReseedPolicy};
use mlens::entities::MarketRecord;
use tempfile::TempDir;

/// Helper to get an mlens command isolated from the user's config and log level
pub fn mlens() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("mlens"));
    cmd.env_remove("MLENS_CONFIG")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", no_config_dir());
    cmd
}

fn no_config_dir() -> PathBuf {
    std::env::temp_dir().join("mlens-tests-without-config")
}

/// Write a config file into a fresh temp directory
pub fn write_config(yaml: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.yaml");
    std::fs::write(&path, yaml).unwrap();
    (tmp, path)
}

/// Run a command and parse its stdout as JSON
pub fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

/// The standard dataset under the default seed, generated once per test binary
pub fn dataset() -> &'static [MarketRecord] {
    static DATA: OnceLock<Vec<MarketRecord>> = OnceLock::new();
    DATA.get_or_init(|| {
        Generator::new(42, ReseedPolicy::EveryGeneration)
            .generate()
            .unwrap()
    })
}
