//! Raster renderer built on the `qrcode` and `image` crates.

// Allow intentional casts for pixel math
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

use std::io::Cursor;
use std::sync::Arc;

use anyhow::{Context, Result};
use image::{imageops, DynamicImage, ImageFormat, Rgba, RgbaImage};

use super::grid::{ModuleGrid, ModuleKind, PixelRect, Placement};
use super::shapes::{self, RoundedRect};
use super::{svg, ExportedImage, RenderConfig, Renderer};
use crate::models::{ExportFormat, Logo};

/// Decoded logo kept between updates.
///
/// Reused while the logo bytes stay the same; the resized copy is reused
/// while the logo box stays the same too.
#[derive(Debug, Clone)]
struct LogoCache {
    source: Logo,
    decoded: Arc<DynamicImage>,
    fitted: Option<(PixelRect, Arc<RgbaImage>)>,
}

impl LogoCache {
    fn decode(logo: &Logo, previous: Option<&Self>) -> Result<Self> {
        if let Some(cache) = previous.filter(|c| c.source == *logo) {
            return Ok(cache.clone());
        }
        let decoded = image::load_from_memory(&logo.bytes)
            .with_context(|| format!("Failed to decode logo '{}'", logo.name))?;
        Ok(Self {
            source: logo.clone(),
            decoded: Arc::new(decoded),
            fitted: None,
        })
    }

    fn fit(&mut self, rect: PixelRect) -> Arc<RgbaImage> {
        if let Some((cached_rect, fitted)) = &self.fitted {
            if *cached_rect == rect {
                return Arc::clone(fitted);
            }
        }
        let fitted = Arc::new(
            self.decoded
                .resize(rect.width, rect.height, imageops::FilterType::Lanczos3)
                .to_rgba8(),
        );
        self.fitted = Some((rect, Arc::clone(&fitted)));
        fitted
    }
}

/// Output of one successful update.
#[derive(Debug, Clone)]
struct Drawing {
    config: RenderConfig,
    grid: ModuleGrid,
    placement: Placement,
    image: RgbaImage,
    logo: Option<LogoCache>,
}

/// Draws styled QR codes into an RGBA canvas.
///
/// Failed updates leave the last good drawing in place.
#[derive(Debug, Clone, Default)]
pub struct StyledQrRenderer {
    drawing: Option<Drawing>,
}

impl StyledQrRenderer {
    /// Creates a renderer with nothing drawn yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { drawing: None }
    }

    /// The configuration of the current drawing.
    #[must_use]
    pub fn config(&self) -> Option<&RenderConfig> {
        self.drawing.as_ref().map(|d| &d.config)
    }

    /// The rendered canvas.
    #[must_use]
    pub fn image(&self) -> Option<&RgbaImage> {
        self.drawing.as_ref().map(|d| &d.image)
    }

    fn draw(config: &RenderConfig, previous: Option<&Drawing>) -> Result<Drawing> {
        if config.width == 0 || config.height == 0 {
            anyhow::bail!("Canvas size must be non-zero, got {}x{}", config.width, config.height);
        }

        let mut grid = ModuleGrid::encode(&config.data, config.error_correction)?;

        let mut logo = match &config.logo {
            Some(logo) => Some(LogoCache::decode(logo, previous.and_then(|d| d.logo.as_ref()))?),
            None => None,
        };

        let placement = Placement::compute(config, &grid, logo.is_some());
        if config.hide_background_dots {
            if let Some((x0, y0, x1, y1)) = placement.logo_module_span(config.logo_margin) {
                grid.clear_data_modules(x0, y0, x1, y1);
            }
        }

        let mut image = RgbaImage::from_pixel(config.width, config.height, Rgba(config.background));
        paint_modules(&mut image, config, &grid, &placement);

        if let (Some(cache), Some(rect)) = (logo.as_mut(), placement.logo_box) {
            let fitted = cache.fit(rect);
            let x = rect.x + (rect.width - fitted.width()) / 2;
            let y = rect.y + (rect.height - fitted.height()) / 2;
            imageops::overlay(&mut image, fitted.as_ref(), i64::from(x), i64::from(y));
        }

        Ok(Drawing {
            config: config.clone(),
            grid,
            placement,
            image,
            logo,
        })
    }
}

impl Renderer for StyledQrRenderer {
    fn update(&mut self, config: &RenderConfig) -> Result<()> {
        if self.config() == Some(config) {
            return Ok(());
        }
        let drawing = Self::draw(config, self.drawing.as_ref())?;
        tracing::debug!(
            modules = drawing.grid.width(),
            module_px = drawing.placement.module_px,
            "QR code redrawn"
        );
        self.drawing = Some(drawing);
        Ok(())
    }

    fn export(&self, format: ExportFormat) -> Result<ExportedImage> {
        let drawing = self
            .drawing
            .as_ref()
            .context("Nothing to export: no QR code has been rendered yet")?;

        let bytes = match format {
            ExportFormat::Svg => {
                svg::render_svg(&drawing.config, &drawing.grid, &drawing.placement).into_bytes()
            }
            ExportFormat::Png => encode(DynamicImage::ImageRgba8(drawing.image.clone()), ImageFormat::Png)?,
            ExportFormat::Webp => encode(DynamicImage::ImageRgba8(drawing.image.clone()), ImageFormat::WebP)?,
            ExportFormat::Jpeg => {
                let flat = flatten_over_white(&drawing.image);
                encode(DynamicImage::ImageRgb8(flat), ImageFormat::Jpeg)?
            }
        };

        Ok(ExportedImage { format, bytes })
    }

    fn preview(&self) -> Option<&ModuleGrid> {
        self.drawing.as_ref().map(|d| &d.grid)
    }
}

fn encode(image: DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, format)
        .with_context(|| format!("Failed to encode {format:?} image"))?;
    Ok(buffer.into_inner())
}

/// JPEG has no alpha channel; composite onto white first.
fn flatten_over_white(image: &RgbaImage) -> image::RgbImage {
    image::RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let Rgba([r, g, b, a]) = *image.get_pixel(x, y);
        let blend = |c: u8| {
            let alpha = u16::from(a);
            ((u16::from(c) * alpha + 255 * (255 - alpha) + 127) / 255) as u8
        };
        image::Rgb([blend(r), blend(g), blend(b)])
    })
}

/// Paints every dark module, sampling each pixel at its center.
fn paint_modules(image: &mut RgbaImage, config: &RenderConfig, grid: &ModuleGrid, placement: &Placement) {
    let scale = placement.module_px as f32;
    let (ox, oy) = (placement.origin_x as f32, placement.origin_y as f32);

    for y in 0..grid.width() {
        for x in 0..grid.width() {
            if grid.get(x, y) == ModuleKind::Data {
                let rect = shapes::data_module(config.dot_style, grid, x, y).transform(scale, ox, oy);
                fill(image, &rect, config.dots_color, |px, py| rect.contains(px, py));
            }
        }
    }

    let ring = shapes::corner_square(config.corner_square_style);
    let dot = shapes::corner_dot(config.corner_dot_style);
    for (fx, fy) in grid.finder_origins() {
        let dx = (fx as f32).mul_add(scale, ox);
        let dy = (fy as f32).mul_add(scale, oy);
        let placed = ring.transform(scale, dx, dy);
        fill(image, &placed.outer, config.corners_square_color, |px, py| {
            placed.contains(px, py)
        });
        let center = dot.transform(scale, dx, dy);
        fill(image, &center, config.corners_dot_color, |px, py| center.contains(px, py));
    }
}

/// Sets every pixel inside `bounds` whose center passes `inside`.
fn fill(image: &mut RgbaImage, bounds: &RoundedRect, color: [u8; 4], inside: impl Fn(f32, f32) -> bool) {
    let x0 = bounds.x.floor().max(0.0) as u32;
    let y0 = bounds.y.floor().max(0.0) as u32;
    let x1 = ((bounds.x + bounds.w).ceil() as u32).min(image.width());
    let y1 = ((bounds.y + bounds.h).ceil() as u32).min(image.height());
    for py in y0..y1 {
        for px in x0..x1 {
            if inside(px as f32 + 0.5, py as f32 + 0.5) {
                image.put_pixel(px, py, Rgba(color));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CornerDotStyle, CornerSquareStyle, DotStyle, ErrorCorrectionLevel, Logo};
    use crate::render::DEFAULT_LOGO_MARGIN;

    fn config() -> RenderConfig {
        RenderConfig {
            data: "https://example.com".to_string(),
            width: 300,
            height: 300,
            margin: 10,
            error_correction: ErrorCorrectionLevel::Quartile,
            dot_style: DotStyle::Square,
            corner_square_style: CornerSquareStyle::Square,
            corner_dot_style: CornerDotStyle::Square,
            dots_color: [0x22, 0x22, 0x22, 255],
            corners_square_color: [255, 0, 0, 255],
            corners_dot_color: [0, 0, 255, 255],
            background: [255, 255, 255, 0],
            logo: None,
            logo_scale: 0.4,
            logo_margin: DEFAULT_LOGO_MARGIN,
            hide_background_dots: true,
        }
    }

    fn png_logo() -> Logo {
        let img = RgbaImage::from_pixel(8, 8, Rgba([0, 200, 0, 255]));
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        Logo::from_bytes("logo.png", buffer.into_inner())
    }

    #[test]
    fn test_canvas_matches_requested_size() {
        let mut renderer = StyledQrRenderer::new();
        renderer.update(&config()).unwrap();
        let image = renderer.image().unwrap();
        assert_eq!(image.dimensions(), (300, 300));
    }

    #[test]
    fn test_transparent_background_and_corner_colors() {
        let mut renderer = StyledQrRenderer::new();
        renderer.update(&config()).unwrap();
        let image = renderer.image().unwrap();
        let placement = renderer.drawing.as_ref().unwrap().placement;

        assert_eq!(image.get_pixel(0, 0).0[3], 0);
        // Top-left module of the first finder is part of the ring
        let ring_px = image.get_pixel(placement.origin_x + 1, placement.origin_y + 1);
        assert_eq!(ring_px.0, [255, 0, 0, 255]);
        // Center of the finder is the corner dot
        let half = placement.module_px * 7 / 2;
        let dot_px = image.get_pixel(placement.origin_x + half, placement.origin_y + half);
        assert_eq!(dot_px.0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_failed_update_keeps_previous_drawing() {
        let mut renderer = StyledQrRenderer::new();
        renderer.update(&config()).unwrap();

        let mut broken = config();
        broken.data = String::new();
        assert!(renderer.update(&broken).is_err());
        assert_eq!(renderer.config().unwrap().data, "https://example.com");
        assert!(renderer.preview().is_some());
    }

    #[test]
    fn test_export_before_update_fails() {
        let renderer = StyledQrRenderer::new();
        assert!(renderer.export(ExportFormat::Png).is_err());
        assert!(renderer.preview().is_none());
    }

    #[test]
    fn test_png_export_decodes() {
        let mut renderer = StyledQrRenderer::new();
        renderer.update(&config()).unwrap();
        let exported = renderer.export(ExportFormat::Png).unwrap();
        let decoded = image::load_from_memory(&exported.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (300, 300));
        assert_eq!(exported.mime_type(), "image/png");
    }

    #[test]
    fn test_jpeg_export_flattens_transparency() {
        let mut renderer = StyledQrRenderer::new();
        renderer.update(&config()).unwrap();
        let exported = renderer.export(ExportFormat::Jpeg).unwrap();
        let decoded = image::load_from_memory(&exported.bytes).unwrap().to_rgb8();
        let corner = decoded.get_pixel(0, 0).0;
        assert!(corner.iter().all(|c| *c > 240));
    }

    #[test]
    fn test_webp_export_keeps_dimensions() {
        let mut renderer = StyledQrRenderer::new();
        renderer.update(&config()).unwrap();
        let exported = renderer.export(ExportFormat::Webp).unwrap();
        let decoded = image::load_from_memory(&exported.bytes).unwrap();
        assert_eq!(decoded.width(), 300);
    }

    #[test]
    fn test_svg_export_uses_all_colors() {
        let mut renderer = StyledQrRenderer::new();
        renderer.update(&config()).unwrap();
        let exported = renderer.export(ExportFormat::Svg).unwrap();
        let text = String::from_utf8(exported.bytes).unwrap();
        assert!(text.starts_with("<svg"));
        assert!(text.contains(r##"fill="#222222""##));
        assert!(text.contains(r##"fill="#ff0000""##));
        assert!(text.contains(r##"fill="#0000ff""##));
        // Transparent background: no backing rect
        assert!(!text.contains("<rect"));
    }

    #[test]
    fn test_logo_clears_modules_when_hiding() {
        let mut with_logo = config();
        with_logo.logo = Some(png_logo());
        with_logo.logo_margin = 0;

        let mut plain = StyledQrRenderer::new();
        plain.update(&config()).unwrap();
        let mut hidden = StyledQrRenderer::new();
        hidden.update(&with_logo).unwrap();
        let mut shown = StyledQrRenderer::new();
        with_logo.hide_background_dots = false;
        shown.update(&with_logo).unwrap();

        let data = |r: &StyledQrRenderer| r.preview().unwrap().count(ModuleKind::Data);
        assert!(data(&hidden) < data(&plain));
        assert_eq!(data(&shown), data(&plain));

        // Logo pixels land in the middle of the canvas
        let [r, g, b, a] = hidden.image().unwrap().get_pixel(150, 150).0;
        assert!(g > 150 && r < 50 && b < 50 && a == 255);
    }

    #[test]
    fn test_logo_in_svg_as_data_uri() {
        let mut with_logo = config();
        with_logo.logo = Some(png_logo());
        let mut renderer = StyledQrRenderer::new();
        renderer.update(&with_logo).unwrap();
        let text = String::from_utf8(renderer.export(ExportFormat::Svg).unwrap().bytes).unwrap();
        assert!(text.contains("href=\"data:image/png;base64,"));
    }

    #[test]
    fn test_logo_decoded_once_across_color_changes() {
        let mut first = config();
        first.logo = Some(png_logo());
        let mut second = first.clone();
        second.dots_color = [0x2c, 0x22, 0x22, 255];

        let mut renderer = StyledQrRenderer::new();
        renderer.update(&first).unwrap();
        let before = renderer.drawing.as_ref().unwrap().logo.clone().unwrap();
        renderer.update(&second).unwrap();
        let after = renderer.drawing.as_ref().unwrap().logo.clone().unwrap();

        assert!(Arc::ptr_eq(&before.decoded, &after.decoded));
        let (before_rect, before_fit) = before.fitted.unwrap();
        let (after_rect, after_fit) = after.fitted.unwrap();
        assert_eq!(before_rect, after_rect);
        assert!(Arc::ptr_eq(&before_fit, &after_fit));
    }

    #[test]
    fn test_logo_redecoded_when_replaced() {
        let mut first = config();
        first.logo = Some(png_logo());
        let mut second = first.clone();
        let mut other = png_logo();
        other.name = "other.png".into();
        second.logo = Some(other);

        let mut renderer = StyledQrRenderer::new();
        renderer.update(&first).unwrap();
        let before = renderer.drawing.as_ref().unwrap().logo.clone().unwrap();
        renderer.update(&second).unwrap();
        let after = renderer.drawing.as_ref().unwrap().logo.clone().unwrap();
        assert!(!Arc::ptr_eq(&before.decoded, &after.decoded));
        assert_eq!(after.source.name, "other.png");
    }

    #[test]
    fn test_undecodable_logo_is_an_error() {
        let mut with_logo = config();
        with_logo.logo = Some(Logo::from_bytes("logo.png", vec![1, 2, 3]));
        let mut renderer = StyledQrRenderer::new();
        assert!(renderer.update(&with_logo).is_err());
        assert!(renderer.preview().is_none());
    }

    #[test]
    fn test_flatten_over_white() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 0]));
        assert_eq!(flatten_over_white(&img).get_pixel(0, 0).0, [255, 255, 255]);
        let img = RgbaImage::from_pixel(1, 1, Rgba([10, 20, 30, 255]));
        assert_eq!(flatten_over_white(&img).get_pixel(0, 0).0, [10, 20, 30]);
    }
}
