//! Color representations and conversions between hex, RGB and CMYK.
//!
//! Every conversion here is total: out-of-range channels are clamped and
//! malformed hex degrades to black. Callers decide when a typed value is
//! complete enough to commit (see [`is_complete_hex`]).

// Allow intentional type casts for color math
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
// Exact comparison against 1.0 is the black-point check
#![allow(clippy::float_cmp)]

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Full six-digit hex pattern, `#` optional.
static HEX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?[0-9A-Fa-f]{6}$").expect("hex pattern is valid"));

/// Keyword used for the transparent background in config files and the CLI.
pub const TRANSPARENT_KEYWORD: &str = "transparent";

/// Stand-in shown in RGB/CMYK fields while the background is transparent.
pub const TRANSPARENT_STAND_IN: RgbColor = RgbColor::new(255, 255, 255);

/// RGB color value (0-255 per channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RgbColor {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl RgbColor {
    /// Creates a new `RgbColor` from individual channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Creates an `RgbColor` from unchecked integers, clamping each to 0-255.
    #[must_use]
    pub fn from_channels(r: i32, g: i32, b: i32) -> Self {
        Self::new(clamp_channel(r, 255), clamp_channel(g, 255), clamp_channel(b, 255))
    }

    /// Parses an `RgbColor` from a hex string, rejecting anything but six hex digits.
    ///
    /// Use [`hex_to_rgb`] when a best-effort value is wanted instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazyqr::models::RgbColor;
    ///
    /// assert_eq!(RgbColor::from_hex("#FF0000").unwrap(), RgbColor::new(255, 0, 0));
    /// assert!(RgbColor::from_hex("#ab").is_err());
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self> {
        let parsed: HexColor = hex.parse()?;
        Ok(parsed.to_rgb())
    }

    /// Formats the color as a normalized `#rrggbb` string.
    #[must_use]
    pub fn to_hex(&self) -> HexColor {
        rgb_to_hex(i32::from(self.r), i32::from(self.g), i32::from(self.b))
    }

    /// Converts to CMYK percentages.
    #[must_use]
    pub fn to_cmyk(&self) -> CmykColor {
        rgb_to_cmyk(*self)
    }

    /// Converts the color to a Ratatui Color for terminal rendering.
    #[must_use]
    pub const fn to_ratatui_color(&self) -> ratatui::style::Color {
        ratatui::style::Color::Rgb(self.r, self.g, self.b)
    }

    /// Returns the channel value for the given channel.
    #[must_use]
    pub const fn channel(&self, channel: RgbChannel) -> u8 {
        match channel {
            RgbChannel::Red => self.r,
            RgbChannel::Green => self.g,
            RgbChannel::Blue => self.b,
        }
    }

    /// Returns a copy with one channel replaced.
    #[must_use]
    pub const fn with_channel(mut self, channel: RgbChannel, value: u8) -> Self {
        match channel {
            RgbChannel::Red => self.r = value,
            RgbChannel::Green => self.g = value,
            RgbChannel::Blue => self.b = value,
        }
        self
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// CMYK color value (0-100 percent per channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CmykColor {
    /// Cyan (0-100)
    pub c: u8,
    /// Magenta (0-100)
    pub m: u8,
    /// Yellow (0-100)
    pub y: u8,
    /// Key / black (0-100)
    pub k: u8,
}

impl CmykColor {
    /// Creates a new `CmykColor`, clamping each channel to 100.
    #[must_use]
    pub const fn new(c: u8, m: u8, y: u8, k: u8) -> Self {
        const fn cap(v: u8) -> u8 {
            if v > 100 {
                100
            } else {
                v
            }
        }
        Self {
            c: cap(c),
            m: cap(m),
            y: cap(y),
            k: cap(k),
        }
    }

    /// Creates a `CmykColor` from unchecked integers, clamping each to 0-100.
    #[must_use]
    pub fn from_channels(c: i32, m: i32, y: i32, k: i32) -> Self {
        Self {
            c: clamp_channel(c, 100),
            m: clamp_channel(m, 100),
            y: clamp_channel(y, 100),
            k: clamp_channel(k, 100),
        }
    }

    /// Converts back to RGB.
    #[must_use]
    pub fn to_rgb(&self) -> RgbColor {
        cmyk_to_rgb(
            i32::from(self.c),
            i32::from(self.m),
            i32::from(self.y),
            i32::from(self.k),
        )
    }

    /// Returns the channel value for the given channel.
    #[must_use]
    pub const fn channel(&self, channel: CmykChannel) -> u8 {
        match channel {
            CmykChannel::Cyan => self.c,
            CmykChannel::Magenta => self.m,
            CmykChannel::Yellow => self.y,
            CmykChannel::Key => self.k,
        }
    }

    /// Returns a copy with one channel replaced (clamped to 100).
    #[must_use]
    pub fn with_channel(mut self, channel: CmykChannel, value: u8) -> Self {
        let value = value.min(100);
        match channel {
            CmykChannel::Cyan => self.c = value,
            CmykChannel::Magenta => self.m = value,
            CmykChannel::Yellow => self.y = value,
            CmykChannel::Key => self.k = value,
        }
        self
    }
}

impl fmt::Display for CmykColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cmyk({}%, {}%, {}%, {}%)", self.c, self.m, self.y, self.k)
    }
}

/// RGB channel selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RgbChannel {
    /// Red color channel
    Red,
    /// Green color channel
    Green,
    /// Blue color channel
    Blue,
}

impl RgbChannel {
    /// All channels in display order.
    pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];

    /// Short label used in the picker.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Red => "R",
            Self::Green => "G",
            Self::Blue => "B",
        }
    }
}

/// CMYK channel selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmykChannel {
    /// Cyan channel
    Cyan,
    /// Magenta channel
    Magenta,
    /// Yellow channel
    Yellow,
    /// Key (black) channel
    Key,
}

impl CmykChannel {
    /// All channels in display order.
    pub const ALL: [Self; 4] = [Self::Cyan, Self::Magenta, Self::Yellow, Self::Key];

    /// Short label used in the picker.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cyan => "C",
            Self::Magenta => "M",
            Self::Yellow => "Y",
            Self::Key => "K",
        }
    }
}

/// A normalized `#rrggbb` color string.
///
/// Only complete six-digit values can be constructed, so holding a
/// `HexColor` means the value is safe to hand to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Parses a complete hex color, returning `None` for partial or malformed input.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if !HEX_PATTERN.is_match(value) {
            return None;
        }
        let digits = value.strip_prefix('#').unwrap_or(value);
        Some(Self(format!("#{}", digits.to_ascii_lowercase())))
    }

    /// Returns the normalized string, always 7 characters.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts to RGB.
    #[must_use]
    pub fn to_rgb(&self) -> RgbColor {
        hex_to_rgb(&self.0)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for HexColor {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| {
            anyhow::anyhow!("Invalid hex color '{s}'. Expected 6 hex digits (#RRGGBB)")
        })
    }
}

impl TryFrom<String> for HexColor {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.0
    }
}

impl From<RgbColor> for HexColor {
    fn from(value: RgbColor) -> Self {
        value.to_hex()
    }
}

/// A committed color: opaque, or fully transparent.
///
/// Only the background slot accepts `Transparent`; it is kept apart from
/// the hex space so `"transparent"` never flows through hex parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColorValue {
    /// Solid background color
    Opaque(HexColor),
    /// No background; exported rasters carry alpha 0
    Transparent,
}

impl ColorValue {
    /// Returns true for the transparent variant.
    #[must_use]
    pub const fn is_transparent(&self) -> bool {
        matches!(self, Self::Transparent)
    }

    /// The opaque hex value, if any.
    #[must_use]
    pub const fn hex(&self) -> Option<&HexColor> {
        match self {
            Self::Opaque(hex) => Some(hex),
            Self::Transparent => None,
        }
    }

    /// RGB value shown in the editor. Transparent displays as white.
    #[must_use]
    pub fn display_rgb(&self) -> RgbColor {
        match self {
            Self::Opaque(hex) => hex.to_rgb(),
            Self::Transparent => TRANSPARENT_STAND_IN,
        }
    }

    /// RGBA value handed to the renderer (`#ffffff00` when transparent).
    #[must_use]
    pub fn to_rgba(&self) -> [u8; 4] {
        match self {
            Self::Opaque(hex) => {
                let rgb = hex.to_rgb();
                [rgb.r, rgb.g, rgb.b, 255]
            }
            Self::Transparent => [
                TRANSPARENT_STAND_IN.r,
                TRANSPARENT_STAND_IN.g,
                TRANSPARENT_STAND_IN.b,
                0,
            ],
        }
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Opaque(hex) => hex.fmt(f),
            Self::Transparent => f.write_str(TRANSPARENT_KEYWORD),
        }
    }
}

impl FromStr for ColorValue {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case(TRANSPARENT_KEYWORD) {
            return Ok(Self::Transparent);
        }
        s.parse::<HexColor>()
            .map(Self::Opaque)
            .map_err(|_| anyhow::anyhow!("Invalid background '{s}'. Expected #RRGGBB or 'transparent'"))
    }
}

impl TryFrom<String> for ColorValue {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ColorValue> for String {
    fn from(value: ColorValue) -> Self {
        value.to_string()
    }
}

impl From<HexColor> for ColorValue {
    fn from(value: HexColor) -> Self {
        Self::Opaque(value)
    }
}

/// Returns true once `value` is a complete six-digit hex color (`#` optional).
#[must_use]
pub fn is_complete_hex(value: &str) -> bool {
    HEX_PATTERN.is_match(value.trim())
}

/// Parses a hex color into RGB, falling back to black for malformed input.
///
/// # Examples
///
/// ```
/// use lazyqr::models::color::{hex_to_rgb, RgbColor};
///
/// assert_eq!(hex_to_rgb("ff0000"), RgbColor::new(255, 0, 0));
/// assert_eq!(hex_to_rgb("#ff0000"), RgbColor::new(255, 0, 0));
/// assert_eq!(hex_to_rgb("#ab"), RgbColor::new(0, 0, 0));
/// ```
#[must_use]
pub fn hex_to_rgb(hex: &str) -> RgbColor {
    let hex = hex.trim();
    if !HEX_PATTERN.is_match(hex) {
        return RgbColor::default();
    }
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    let byte = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).unwrap_or(0);
    RgbColor::new(byte(0..2), byte(2..4), byte(4..6))
}

/// Clamps each channel to 0-255 and formats as lowercase `#rrggbb`.
///
/// # Examples
///
/// ```
/// use lazyqr::models::color::rgb_to_hex;
///
/// assert_eq!(rgb_to_hex(300, -5, 128).as_str(), "#ff0080");
/// ```
#[must_use]
pub fn rgb_to_hex(r: i32, g: i32, b: i32) -> HexColor {
    let rgb = RgbColor::from_channels(r, g, b);
    HexColor(format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b))
}

/// Converts RGB to CMYK percentages.
///
/// Channels are rounded to the nearest percent. Percent steps are coarser
/// than 8-bit steps, so when the nearest value of a chromatic channel would
/// not convert back within one unit of the input, the neighbouring percent
/// that does is used.
#[must_use]
pub fn rgb_to_cmyk(rgb: RgbColor) -> CmykColor {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let k = 1.0 - r.max(g).max(b);
    if k == 1.0 {
        return CmykColor::new(0, 0, 0, 100);
    }

    let key = (k * 100.0).round() as u8;
    let chroma = |value: f64, original: u8| -> u8 {
        let nearest = ((1.0 - value - k) / (1.0 - k) * 100.0).round() as i32;
        let fits = |percent: i32| {
            (i32::from(channel_from_cmyk(percent, i32::from(key))) - i32::from(original)).abs() <= 1
        };
        if fits(nearest) {
            return clamp_channel(nearest, 100);
        }
        [nearest - 1, nearest + 1]
            .into_iter()
            .find(|&candidate| (0..=100).contains(&candidate) && fits(candidate))
            .map_or_else(|| clamp_channel(nearest, 100), |p| clamp_channel(p, 100))
    };

    CmykColor {
        c: chroma(r, rgb.r),
        m: chroma(g, rgb.g),
        y: chroma(b, rgb.b),
        k: key,
    }
}

/// Converts CMYK percentages to RGB, clamping inputs to 0-100.
///
/// # Examples
///
/// ```
/// use lazyqr::models::color::{cmyk_to_rgb, RgbColor};
///
/// assert_eq!(cmyk_to_rgb(0, 100, 100, 0), RgbColor::new(255, 0, 0));
/// assert_eq!(cmyk_to_rgb(0, 0, 0, 100), RgbColor::new(0, 0, 0));
/// ```
#[must_use]
pub fn cmyk_to_rgb(c: i32, m: i32, y: i32, k: i32) -> RgbColor {
    let k = i32::from(clamp_channel(k, 100));
    RgbColor::new(
        channel_from_cmyk(i32::from(clamp_channel(c, 100)), k),
        channel_from_cmyk(i32::from(clamp_channel(m, 100)), k),
        channel_from_cmyk(i32::from(clamp_channel(y, 100)), k),
    )
}

/// Parses a numeric form field leniently: leading digits count, anything
/// unparseable is 0, and the result is clamped to `0..=max`.
#[must_use]
pub fn parse_channel(text: &str, max: u8) -> u8 {
    parse_leading_int(text)
        .unwrap_or(0)
        .clamp(0, i64::from(max)) as u8
}

/// Reads an optional sign and the leading run of digits, ignoring whatever follows.
///
/// Returns `None` when there are no digits at all. Digit runs too long for
/// an `i64` saturate.
#[must_use]
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

fn channel_from_cmyk(percent: i32, key: i32) -> u8 {
    let value = 255.0 * (1.0 - f64::from(percent) / 100.0) * (1.0 - f64::from(key) / 100.0);
    value.round().clamp(0.0, 255.0) as u8
}

fn clamp_channel(value: i32, max: u8) -> u8 {
    value.clamp(0, i32::from(max)) as u8
}
