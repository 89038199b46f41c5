//! End-to-end tests for `lazyqr color`.

mod fixtures;
use fixtures::*;

#[test]
fn test_color_hex_human_output() {
    let output = run_isolated(&["color", "#FF0000"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("HEX:  #ff0000"), "{out}");
    assert!(out.contains("RGB:  rgb(255, 0, 0)"), "{out}");
    assert!(out.contains("CMYK: cmyk(0%, 100%, 100%, 0%)"), "{out}");
}

#[test]
fn test_color_rgb_json_output() {
    let output = run_isolated(&["color", "rgb(0, 128, 255)", "--json"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let result = json(&output);
    assert_eq!(result["hex"], "#0080ff");
    assert_eq!(result["rgb"]["r"], 0);
    assert_eq!(result["rgb"]["g"], 128);
    assert_eq!(result["rgb"]["b"], 255);
    assert_eq!(result["cmyk"]["c"], 100);
    assert_eq!(result["cmyk"]["k"], 0);
}

#[test]
fn test_color_cmyk_input() {
    let output = run_isolated(&["color", "cmyk(0, 0, 0, 100)", "--json"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(json(&output)["hex"], "#000000");
}

#[test]
fn test_color_out_of_range_is_clamped() {
    let output = run_isolated(&["color", "rgb(300, -20, 12)", "--json"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(json(&output)["hex"], "#ff000c");
}

#[test]
fn test_color_invalid_input_exits_with_validation_error() {
    let output = run_isolated(&["color", "not-a-color"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error: Invalid color"));
    assert!(stdout(&output).is_empty());
}
