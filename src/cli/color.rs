//! Color conversion command.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::models::color::{cmyk_to_rgb, hex_to_rgb, is_complete_hex};
use crate::models::RgbColor;
use clap::Args;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static RGB_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^rgb\(\s*(-?\d+)\s*,\s*(-?\d+)\s*,\s*(-?\d+)\s*\)$").expect("rgb pattern is valid")
});

static CMYK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^cmyk\(\s*(-?\d+)%?\s*,\s*(-?\d+)%?\s*,\s*(-?\d+)%?\s*,\s*(-?\d+)%?\s*\)$")
        .expect("cmyk pattern is valid")
});

/// Convert a color between hex, RGB and CMYK
#[derive(Debug, Clone, Args)]
pub struct ColorArgs {
    /// Color as #RRGGBB, RRGGBB, rgb(r, g, b) or cmyk(c, m, y, k)
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ColorOutput {
    hex: String,
    rgb: RgbOutput,
    cmyk: CmykOutput,
}

#[derive(Debug, Serialize)]
struct RgbOutput {
    r: u8,
    g: u8,
    b: u8,
}

#[derive(Debug, Serialize)]
struct CmykOutput {
    c: u8,
    m: u8,
    y: u8,
    k: u8,
}

impl ColorArgs {
    /// Execute the color command
    pub fn execute(&self) -> CliResult<()> {
        let rgb = parse_color(&self.value)?;
        let hex = rgb.to_hex();
        let cmyk = rgb.to_cmyk();

        if self.json {
            print_json(&ColorOutput {
                hex: hex.to_string(),
                rgb: RgbOutput {
                    r: rgb.r,
                    g: rgb.g,
                    b: rgb.b,
                },
                cmyk: CmykOutput {
                    c: cmyk.c,
                    m: cmyk.m,
                    y: cmyk.y,
                    k: cmyk.k,
                },
            })?;
        } else {
            println!("HEX:  {hex}");
            println!("RGB:  {rgb}");
            println!("CMYK: {cmyk}");
        }
        Ok(())
    }
}

/// Parses any of the accepted notations. Out-of-range channels are clamped.
fn parse_color(value: &str) -> CliResult<RgbColor> {
    let value = value.trim();

    if is_complete_hex(value) {
        return Ok(hex_to_rgb(value));
    }

    if let Some(caps) = RGB_PATTERN.captures(value) {
        let channel = |i: usize| int_capture(&caps[i]);
        return Ok(RgbColor::from_channels(channel(1), channel(2), channel(3)));
    }

    if let Some(caps) = CMYK_PATTERN.captures(value) {
        let channel = |i: usize| int_capture(&caps[i]);
        return Ok(cmyk_to_rgb(channel(1), channel(2), channel(3), channel(4)));
    }

    Err(CliError::validation(format!(
        "Invalid color '{value}'. Expected #RRGGBB, rgb(r, g, b) or cmyk(c, m, y, k)"
    )))
}

/// Captured digits saturate instead of overflowing.
fn int_capture(text: &str) -> i32 {
    text.parse::<i64>()
        .map_or(if text.starts_with('-') { i32::MIN } else { i32::MAX }, |v| {
            i32::try_from(v).unwrap_or(if v < 0 { i32::MIN } else { i32::MAX })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(parse_color("#FF8000").unwrap(), RgbColor::new(255, 128, 0));
        assert_eq!(parse_color("ff8000").unwrap(), RgbColor::new(255, 128, 0));
    }

    #[test]
    fn test_parse_rgb_clamps() {
        assert_eq!(parse_color("rgb(300, -5, 128)").unwrap(), RgbColor::new(255, 0, 128));
        assert_eq!(parse_color("RGB(1,2,3)").unwrap(), RgbColor::new(1, 2, 3));
    }

    #[test]
    fn test_parse_cmyk_with_percent_signs() {
        assert_eq!(parse_color("cmyk(0%, 100%, 100%, 0%)").unwrap(), RgbColor::new(255, 0, 0));
        assert_eq!(parse_color("cmyk(0,0,0,100)").unwrap(), RgbColor::new(0, 0, 0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_color("#abc").is_err());
        assert!(parse_color("transparent").is_err());
        assert!(parse_color("rgb(1,2)").is_err());
    }

    #[test]
    fn test_huge_numbers_saturate() {
        assert_eq!(
            parse_color("rgb(99999999999999999999, 0, 0)").unwrap(),
            RgbColor::new(255, 0, 0)
        );
    }
}
