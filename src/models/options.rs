//! Closed enumerations for the renderer options.
//!
//! Each enum has a fixed wire name (used in config files, CLI flags and
//! JSON output) and parses case-insensitively. Unknown names are rejected
//! with an error listing the accepted values.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $what:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, $label:literal; )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every value in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Stable wire name.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }

            /// Human-readable label for the form.
            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            /// Next value, wrapping around.
            #[must_use]
            pub fn next(self) -> Self {
                let idx = Self::ALL.iter().position(|v| *v == self).unwrap_or(0);
                Self::ALL[(idx + 1) % Self::ALL.len()]
            }

            /// Previous value, wrapping around.
            #[must_use]
            pub fn previous(self) -> Self {
                let idx = Self::ALL.iter().position(|v| *v == self).unwrap_or(0);
                Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
            }

            /// Comma-separated list of accepted wire names.
            #[must_use]
            pub fn valid_names() -> String {
                Self::ALL
                    .iter()
                    .map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = anyhow::Error;

            fn from_str(s: &str) -> Result<Self> {
                let needle = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(needle))
                    .ok_or_else(|| {
                        anyhow::anyhow!(
                            "Invalid {} '{}'. Must be one of: {}",
                            $what,
                            s,
                            Self::valid_names()
                        )
                    })
            }
        }

        impl TryFrom<String> for $name {
            type Error = anyhow::Error;

            fn try_from(value: String) -> Result<Self> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }
    };
}

named_enum! {
    /// Redundancy level of the QR symbol, ordered from weakest to strongest.
    ErrorCorrectionLevel, "error correction level" {
        /// Recovers about 7% of damaged codewords
        Low => "L", "Low (L) - 7%";
        /// Recovers about 15%
        Medium => "M", "Medium (M) - 15%";
        /// Recovers about 25%
        Quartile => "Q", "Quartile (Q) - 25%";
        /// Recovers about 30%
        High => "H", "High (H) - 30%";
    }
}

impl Default for ErrorCorrectionLevel {
    fn default() -> Self {
        Self::Quartile
    }
}

named_enum! {
    /// Shape of ordinary data modules.
    DotStyle, "dot style" {
        /// Rounded squares
        Rounded => "rounded", "Rounded";
        /// Circles
        Dots => "dots", "Dots";
        /// Squares with two opposite corners cut round
        Classy => "classy", "Classy";
        /// Like classy with softer square corners
        ClassyRounded => "classy-rounded", "Classy Rounded";
        /// Plain squares
        Square => "square", "Square";
        /// Heavily rounded squares
        ExtraRounded => "extra-rounded", "Extra Rounded";
    }
}

impl Default for DotStyle {
    fn default() -> Self {
        Self::Square
    }
}

named_enum! {
    /// Shape of the outer 7x7 ring of each finder pattern.
    CornerSquareStyle, "corner square style" {
        /// Circular ring
        Dot => "dot", "Dot";
        /// Square ring
        Square => "square", "Square";
        /// Rounded square ring
        ExtraRounded => "extra-rounded", "Extra Rounded";
    }
}

impl Default for CornerSquareStyle {
    fn default() -> Self {
        Self::Square
    }
}

named_enum! {
    /// Shape of the 3x3 center of each finder pattern.
    CornerDotStyle, "corner dot style" {
        /// Filled circle
        Dot => "dot", "Dot";
        /// Filled square
        Square => "square", "Square";
    }
}

impl Default for CornerDotStyle {
    fn default() -> Self {
        Self::Square
    }
}

named_enum! {
    /// Output file format for export.
    ExportFormat, "export format" {
        /// Portable Network Graphics (keeps transparency)
        Png => "png", "PNG";
        /// Scalable Vector Graphics
        Svg => "svg", "SVG";
        /// JPEG (transparent areas become white)
        Jpeg => "jpeg", "JPEG";
        /// Lossless WebP
        Webp => "webp", "WEBP";
    }
}

impl Default for ExportFormat {
    fn default() -> Self {
        Self::Png
    }
}

impl ExportFormat {
    /// File extension without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        self.as_str()
    }

    /// MIME type of the encoded output.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml",
            Self::Jpeg => "image/jpeg",
            Self::Webp => "image/webp",
        }
    }

    /// Guesses the format from a file extension (`jpg` counts as JPEG).
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" => Some(Self::Jpeg),
            other => other.parse().ok(),
        }
    }
}
