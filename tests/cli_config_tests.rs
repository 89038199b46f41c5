//! End-to-end tests for `lazyqr config` commands.

use tempfile::TempDir;

mod fixtures;
use fixtures::*;

// ============================================================================
// Show Command Tests
// ============================================================================

#[test]
fn test_config_show_default() {
    let output = run_isolated(&["config", "show"]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "Show config should succeed. stderr: {}",
        stderr(&output)
    );

    let out = stdout(&output);
    assert!(out.contains("LazyQR Configuration"));
    assert!(out.contains("Output"));
}

#[test]
fn test_config_show_json_schema() {
    let output = run_isolated(&["config", "show", "--json"]);
    assert_eq!(output.status.code(), Some(0));

    let result = json(&output);
    assert!(result["paths"]["output_dir"].is_string());
    assert_eq!(result["defaults"]["data"], "https://example.com");
    assert_eq!(result["defaults"]["size"], 300);
    assert_eq!(result["defaults"]["margin"], 10);
    assert_eq!(result["defaults"]["error_correction"], "Q");
    assert_eq!(result["defaults"]["background"], "transparent");
    assert_eq!(result["defaults"]["logo_scale"], 0.4);
    assert_eq!(result["ui"]["theme"], "auto");
}

// ============================================================================
// Set Command Tests
// ============================================================================

#[test]
fn test_config_set_persists_values() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_dir = temp_dir.path();

    let output = isolated_command(
        &[
            "config",
            "set",
            "--theme",
            "light",
            "--size",
            "512",
            "--ecl",
            "h",
            "--background",
            "#FFFFFF",
            "--dot-style",
            "extra-rounded",
        ],
        config_dir,
    )
    .output()
    .expect("Failed to execute command");
    assert_eq!(
        output.status.code(),
        Some(0),
        "Setting values should succeed. stderr: {}",
        stderr(&output)
    );
    assert!(stdout(&output).contains("Configuration updated successfully."));
    assert!(config_dir.join("config.toml").exists());

    let output = isolated_command(&["config", "show", "--json"], config_dir)
        .output()
        .expect("Failed to execute command");
    let result = json(&output);
    assert_eq!(result["ui"]["theme"], "light");
    assert_eq!(result["defaults"]["size"], 512);
    assert_eq!(result["defaults"]["error_correction"], "H");
    assert_eq!(result["defaults"]["background"], "#ffffff");
    assert_eq!(result["defaults"]["dot_style"], "extra-rounded");
}

#[test]
fn test_config_set_creates_output_dir() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_dir = temp_dir.path().join("nested").join("exports");

    let output = isolated_command(
        &["config", "set", "--output-dir", output_dir.to_str().unwrap()],
        &temp_dir.path().join("config"),
    )
    .output()
    .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(output_dir.is_dir());
}

#[test]
fn test_config_set_without_options_fails() {
    let output = run_isolated(&["config", "set"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("At least one configuration option"));
}

#[test]
fn test_config_set_invalid_values_fail() {
    let output = run_isolated(&["config", "set", "--theme", "sepia"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid theme mode"));

    let output = run_isolated(&["config", "set", "--margin", "90"]);
    assert_eq!(output.status.code(), Some(1));

    let output = run_isolated(&["config", "set", "--dots-color", "transparent"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_config_set_invalid_leaves_file_untouched() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_dir = temp_dir.path();

    let output = isolated_command(&["config", "set", "--size", "400"], config_dir)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let before = std::fs::read_to_string(config_dir.join("config.toml")).unwrap();

    let output = isolated_command(&["config", "set", "--size", "4000"], config_dir)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let after = std::fs::read_to_string(config_dir.join("config.toml")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_corrupt_config_is_reported() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    std::fs::write(temp_dir.path().join("config.toml"), "[defaults\nsize = ").unwrap();

    let output = isolated_command(&["config", "show"], temp_dir.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to load configuration"));
}
