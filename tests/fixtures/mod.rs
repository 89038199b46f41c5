//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the lazyqr binary
pub fn lazyqr_bin() -> String {
    std::env::var("CARGO_BIN_EXE_lazyqr").unwrap_or_else(|_| "target/release/lazyqr".to_string())
}

/// Creates a Command with an isolated config directory.
///
/// Pass the same directory to several commands to share configuration.
pub fn isolated_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(lazyqr_bin());
    cmd.env("LAZYQR_CONFIG_DIR", config_dir);
    cmd.env_remove("RUST_LOG");
    cmd.args(args);
    cmd
}

/// Runs `args` against a fresh, empty config directory.
pub fn run_isolated(args: &[&str]) -> Output {
    let config_dir = TempDir::new().expect("Failed to create temp dir");
    isolated_command(args, config_dir.path())
        .output()
        .expect("Failed to execute command")
}

/// Stdout as text.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Stderr as text.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Parses stdout as JSON, failing the test with stderr on error.
pub fn json(output: &Output) -> serde_json::Value {
    serde_json::from_str(&stdout(output)).unwrap_or_else(|e| {
        panic!(
            "Should parse JSON output: {e}\nstdout: {}\nstderr: {}",
            stdout(output),
            stderr(output)
        )
    })
}

/// Writes a small solid-color PNG logo into `dir`.
pub fn write_logo(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    image::RgbaImage::from_pixel(16, 16, image::Rgba([220, 40, 40, 255]))
        .save(&path)
        .expect("Failed to write logo fixture");
    path
}
