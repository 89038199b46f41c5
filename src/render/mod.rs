//! Renderer boundary.
//!
//! The form never touches QR encoding or image codecs directly. It derives a
//! [`RenderConfig`] and hands it to a [`Renderer`], which owns whatever it
//! produces. [`StyledQrRenderer`] is the implementation shipped with the
//! application; tests use their own recording renderers.

pub mod grid;
pub mod shapes;
pub mod styled;
pub mod svg;

use anyhow::Result;

use crate::models::{
    CornerDotStyle, CornerSquareStyle, DotStyle, ErrorCorrectionLevel, ExportFormat, Logo,
};

pub use grid::{ModuleGrid, ModuleKind};
pub use styled::StyledQrRenderer;

/// Padding in pixels kept between the logo and the surrounding modules.
pub const DEFAULT_LOGO_MARGIN: u32 = 20;

/// Everything the renderer needs to draw one QR code.
///
/// Colors are straight RGBA; the background uses alpha 0 when transparent.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Payload to encode (byte mode)
    pub data: String,
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Blank border around the symbol in pixels
    pub margin: u32,
    /// Error correction strength
    pub error_correction: ErrorCorrectionLevel,
    /// Shape of data modules
    pub dot_style: DotStyle,
    /// Shape of the finder rings
    pub corner_square_style: CornerSquareStyle,
    /// Shape of the finder centers
    pub corner_dot_style: CornerDotStyle,
    /// Data module color
    pub dots_color: [u8; 4],
    /// Finder ring color
    pub corners_square_color: [u8; 4],
    /// Finder center color
    pub corners_dot_color: [u8; 4],
    /// Background fill
    pub background: [u8; 4],
    /// Optional embedded logo
    pub logo: Option<Logo>,
    /// Logo size as a fraction of the symbol (0.1-0.5)
    pub logo_scale: f32,
    /// Padding around the logo in pixels
    pub logo_margin: u32,
    /// Clear data modules behind the logo
    pub hide_background_dots: bool,
}

/// Encoded output of an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    /// Format of `bytes`
    pub format: ExportFormat,
    /// Encoded file contents
    pub bytes: Vec<u8>,
}

impl ExportedImage {
    /// File name for this export, e.g. `qr-code.png`.
    #[must_use]
    pub fn suggested_file_name(&self, stem: &str) -> String {
        format!("{stem}.{}", self.format.extension())
    }

    /// MIME type of the encoded bytes.
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// A QR code renderer.
///
/// `update` replaces the previous configuration wholesale; calling it twice
/// with the same config leaves the renderer in the same state. When `update`
/// fails the previously rendered output stays available.
pub trait Renderer {
    /// Apply a new configuration and redraw.
    fn update(&mut self, config: &RenderConfig) -> Result<()>;

    /// Encode the current drawing in the requested format.
    fn export(&self, format: ExportFormat) -> Result<ExportedImage>;

    /// Module grid of the current drawing, for terminal previews.
    fn preview(&self) -> Option<&ModuleGrid>;
}
