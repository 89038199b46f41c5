//! Module grid and pixel placement shared by the raster and SVG painters.

// Allow intentional casts for pixel math
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

use anyhow::{Context, Result};
use qrcode::{EcLevel, QrCode};

use super::RenderConfig;
use crate::models::ErrorCorrectionLevel;

/// Side of a finder pattern in modules.
pub const FINDER_SIZE: usize = 7;

/// Role of a single module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    /// Light module (background shows through)
    Light,
    /// Dark data, timing or alignment module
    Data,
    /// Dark module in a finder pattern's outer ring
    CornerSquare,
    /// Dark module in a finder pattern's 3x3 center
    CornerDot,
}

impl ModuleKind {
    /// True for anything that gets painted.
    #[must_use]
    pub const fn is_dark(self) -> bool {
        !matches!(self, Self::Light)
    }
}

/// Square grid of classified modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleGrid {
    width: usize,
    modules: Vec<ModuleKind>,
}

impl ModuleGrid {
    /// Encodes `data` and classifies every module.
    pub fn encode(data: &str, level: ErrorCorrectionLevel) -> Result<Self> {
        if data.is_empty() {
            anyhow::bail!("Nothing to encode: QR data is empty");
        }
        let code = QrCode::with_error_correction_level(data.as_bytes(), ec_level(level))
            .context(format!(
                "Failed to encode {} bytes at error correction level {}",
                data.len(),
                level
            ))?;
        let dark: Vec<bool> = code
            .to_colors()
            .into_iter()
            .map(|c| c == qrcode::Color::Dark)
            .collect();
        Ok(Self::from_dark_modules(code.width(), &dark))
    }

    /// Builds a grid from a row-major dark/light bitmap.
    #[must_use]
    pub fn from_dark_modules(width: usize, dark: &[bool]) -> Self {
        let modules = (0..width * width)
            .map(|idx| {
                let (x, y) = (idx % width, idx / width);
                if !dark.get(idx).copied().unwrap_or(false) {
                    return ModuleKind::Light;
                }
                match finder_local(width, x, y) {
                    Some((lx, ly)) if (2..=4).contains(&lx) && (2..=4).contains(&ly) => {
                        ModuleKind::CornerDot
                    }
                    Some(_) => ModuleKind::CornerSquare,
                    None => ModuleKind::Data,
                }
            })
            .collect();
        Self { width, modules }
    }

    /// Width (and height) in modules.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Module at `(x, y)`; anything outside the grid is light.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> ModuleKind {
        if x >= self.width || y >= self.width {
            return ModuleKind::Light;
        }
        self.modules[y * self.width + x]
    }

    /// Marks data modules inside the given module rectangle as light.
    ///
    /// Finder modules are never cleared.
    pub fn clear_data_modules(&mut self, x0: usize, y0: usize, x1: usize, y1: usize) {
        for y in y0..y1.min(self.width) {
            for x in x0..x1.min(self.width) {
                let idx = y * self.width + x;
                if self.modules[idx] == ModuleKind::Data {
                    self.modules[idx] = ModuleKind::Light;
                }
            }
        }
    }

    /// Top-left corners of the three finder patterns, in modules.
    #[must_use]
    pub fn finder_origins(&self) -> [(usize, usize); 3] {
        let far = self.width.saturating_sub(FINDER_SIZE);
        [(0, 0), (far, 0), (0, far)]
    }

    /// Count of modules with the given role.
    #[must_use]
    pub fn count(&self, kind: ModuleKind) -> usize {
        self.modules.iter().filter(|m| **m == kind).count()
    }
}

/// Coordinates inside a finder pattern, if `(x, y)` lies in one.
fn finder_local(width: usize, x: usize, y: usize) -> Option<(usize, usize)> {
    let far = width.checked_sub(FINDER_SIZE)?;
    let in_range = |v: usize, start: usize| v >= start && v < start + FINDER_SIZE;
    [(0, 0), (far, 0), (0, far)]
        .into_iter()
        .find(|&(fx, fy)| in_range(x, fx) && in_range(y, fy))
        .map(|(fx, fy)| (x - fx, y - fy))
}

const fn ec_level(level: ErrorCorrectionLevel) -> EcLevel {
    match level {
        ErrorCorrectionLevel::Low => EcLevel::L,
        ErrorCorrectionLevel::Medium => EcLevel::M,
        ErrorCorrectionLevel::Quartile => EcLevel::Q,
        ErrorCorrectionLevel::High => EcLevel::H,
    }
}

/// Pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width
    pub width: u32,
    /// Height
    pub height: u32,
}

/// Where the symbol and the logo land on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Side of one module in pixels
    pub module_px: u32,
    /// Left edge of module (0, 0)
    pub origin_x: u32,
    /// Top edge of module (0, 0)
    pub origin_y: u32,
    /// Square the logo is fitted into, without its margin
    pub logo_box: Option<PixelRect>,
}

impl Placement {
    /// Computes placement for `grid` on the canvas described by `config`.
    ///
    /// Modules get the largest whole-pixel size that fits inside the margin;
    /// the symbol is centered in what remains.
    #[must_use]
    pub fn compute(config: &RenderConfig, grid: &ModuleGrid, has_logo: bool) -> Self {
        let modules = grid.width().max(1) as u32;
        let inner_w = config.width.saturating_sub(config.margin * 2);
        let inner_h = config.height.saturating_sub(config.margin * 2);
        let module_px = (inner_w.min(inner_h) / modules).max(1);
        let symbol_px = module_px * modules;
        let origin_x = config.margin + inner_w.saturating_sub(symbol_px) / 2;
        let origin_y = config.margin + inner_h.saturating_sub(symbol_px) / 2;

        let logo_box = has_logo.then(|| {
            let side = ((symbol_px as f32) * config.logo_scale).round().max(1.0) as u32;
            PixelRect {
                x: origin_x + (symbol_px - side.min(symbol_px)) / 2,
                y: origin_y + (symbol_px - side.min(symbol_px)) / 2,
                width: side.min(symbol_px),
                height: side.min(symbol_px),
            }
        });

        Self {
            module_px,
            origin_x,
            origin_y,
            logo_box,
        }
    }

    /// Module rectangle `(x0, y0, x1, y1)` touched by the logo plus its margin.
    #[must_use]
    pub fn logo_module_span(&self, logo_margin: u32) -> Option<(usize, usize, usize, usize)> {
        let rect = self.logo_box?;
        let left = rect.x.saturating_sub(logo_margin).saturating_sub(self.origin_x);
        let top = rect.y.saturating_sub(logo_margin).saturating_sub(self.origin_y);
        let right = (rect.x + rect.width + logo_margin).saturating_sub(self.origin_x);
        let bottom = (rect.y + rect.height + logo_margin).saturating_sub(self.origin_y);
        let px = self.module_px;
        Some((
            (left / px) as usize,
            (top / px) as usize,
            right.div_ceil(px) as usize,
            bottom.div_ceil(px) as usize,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DEFAULT_LOGO_MARGIN;

    fn config(width: u32, margin: u32) -> RenderConfig {
        RenderConfig {
            data: "https://example.com".to_string(),
            width,
            height: width,
            margin,
            error_correction: ErrorCorrectionLevel::Quartile,
            dot_style: crate::models::DotStyle::Square,
            corner_square_style: crate::models::CornerSquareStyle::Square,
            corner_dot_style: crate::models::CornerDotStyle::Square,
            dots_color: [0, 0, 0, 255],
            corners_square_color: [0, 0, 0, 255],
            corners_dot_color: [0, 0, 0, 255],
            background: [255, 255, 255, 255],
            logo: None,
            logo_scale: 0.4,
            logo_margin: DEFAULT_LOGO_MARGIN,
            hide_background_dots: true,
        }
    }

    #[test]
    fn test_encode_classifies_finders() {
        let grid = ModuleGrid::encode("HELLO WORLD", ErrorCorrectionLevel::Low).unwrap();
        assert_eq!(grid.width(), 21);
        // Each finder: 24 ring modules, 9 center modules
        assert_eq!(grid.count(ModuleKind::CornerSquare), 3 * 24);
        assert_eq!(grid.count(ModuleKind::CornerDot), 3 * 9);
        assert_eq!(grid.get(0, 0), ModuleKind::CornerSquare);
        assert_eq!(grid.get(3, 3), ModuleKind::CornerDot);
        assert_eq!(grid.get(1, 1), ModuleKind::Light);
        assert_eq!(grid.get(17, 3), ModuleKind::CornerDot);
        assert_eq!(grid.get(99, 0), ModuleKind::Light);
    }

    #[test]
    fn test_higher_level_needs_more_modules() {
        let text = "The quick brown fox jumps over the lazy dog, twice over.";
        let low = ModuleGrid::encode(text, ErrorCorrectionLevel::Low).unwrap();
        let high = ModuleGrid::encode(text, ErrorCorrectionLevel::High).unwrap();
        assert!(high.width() > low.width());
    }

    #[test]
    fn test_empty_data_is_rejected() {
        assert!(ModuleGrid::encode("", ErrorCorrectionLevel::Low).is_err());
    }

    #[test]
    fn test_oversized_data_is_an_error() {
        let text = "x".repeat(4000);
        assert!(ModuleGrid::encode(&text, ErrorCorrectionLevel::High).is_err());
    }

    #[test]
    fn test_clear_keeps_finders() {
        let mut grid = ModuleGrid::encode("HELLO WORLD", ErrorCorrectionLevel::Low).unwrap();
        let finder_modules = grid.count(ModuleKind::CornerSquare) + grid.count(ModuleKind::CornerDot);
        grid.clear_data_modules(0, 0, 21, 21);
        assert_eq!(grid.count(ModuleKind::Data), 0);
        assert_eq!(
            grid.count(ModuleKind::CornerSquare) + grid.count(ModuleKind::CornerDot),
            finder_modules
        );
    }

    #[test]
    fn test_placement_centers_symbol() {
        let grid = ModuleGrid::encode("HELLO WORLD", ErrorCorrectionLevel::Low).unwrap();
        let placement = Placement::compute(&config(300, 10), &grid, false);
        // 280 / 21 = 13 px per module, 273 px symbol, 7 px slack split 3/4
        assert_eq!(placement.module_px, 13);
        assert_eq!(placement.origin_x, 13);
        assert_eq!(placement.origin_y, 13);
        assert!(placement.logo_box.is_none());
    }

    #[test]
    fn test_placement_logo_box_is_centered() {
        let grid = ModuleGrid::encode("HELLO WORLD", ErrorCorrectionLevel::Low).unwrap();
        let placement = Placement::compute(&config(300, 10), &grid, true);
        let rect = placement.logo_box.unwrap();
        // 40% of 273 px
        assert_eq!(rect.width, 109);
        assert_eq!(rect.x, 13 + (273 - 109) / 2);
        let (x0, y0, x1, y1) = placement.logo_module_span(0).unwrap();
        assert!(x0 > 0 && y0 > 0 && x1 < 21 && y1 < 21);
    }

    #[test]
    fn test_placement_tiny_canvas_uses_one_pixel_modules() {
        let grid = ModuleGrid::encode("HELLO WORLD", ErrorCorrectionLevel::Low).unwrap();
        let placement = Placement::compute(&config(10, 50), &grid, false);
        assert_eq!(placement.module_px, 1);
    }
}
