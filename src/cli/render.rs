//! Headless QR code export.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::models::form::{MAX_LOGO_SCALE, MAX_MARGIN, MAX_SIZE, MIN_LOGO_SCALE, MIN_SIZE};
use crate::models::{
    ColorEdit, ColorTarget, ColorValue, CornerDotStyle, CornerSquareStyle, DotStyle,
    ErrorCorrectionLevel, ExportFormat, FormEvent, FormState, HexColor,
};
use crate::render::{Renderer, StyledQrRenderer};
use crate::services::{read_logo, ExportService};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::str::FromStr;

/// Render a QR code to a file
#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// Text or URL to encode (defaults to the configured payload)
    #[arg(short, long, value_name = "TEXT")]
    pub data: Option<String>,

    /// Output file (defaults to qr-code.<ext> in the configured output directory)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format: png, svg, jpeg or webp (inferred from --output when omitted)
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Image size in pixels (100-1000)
    #[arg(long, value_name = "PX")]
    pub size: Option<u32>,

    /// Margin in pixels (0-50)
    #[arg(long, value_name = "PX")]
    pub margin: Option<u32>,

    /// Error correction level: L, M, Q or H
    #[arg(long, value_name = "LEVEL")]
    pub ecl: Option<String>,

    /// Data module color (#RRGGBB)
    #[arg(long, value_name = "HEX")]
    pub dots_color: Option<String>,

    /// Background color (#RRGGBB or 'transparent')
    #[arg(long, value_name = "COLOR")]
    pub background: Option<String>,

    /// Finder ring color (#RRGGBB)
    #[arg(long, value_name = "HEX")]
    pub corners_square_color: Option<String>,

    /// Finder center color (#RRGGBB)
    #[arg(long, value_name = "HEX")]
    pub corners_dot_color: Option<String>,

    /// Data module shape
    #[arg(long, value_name = "STYLE")]
    pub dot_style: Option<String>,

    /// Finder ring shape
    #[arg(long, value_name = "STYLE")]
    pub corner_square_style: Option<String>,

    /// Finder center shape
    #[arg(long, value_name = "STYLE")]
    pub corner_dot_style: Option<String>,

    /// Image to place in the middle of the code
    #[arg(long, value_name = "FILE")]
    pub logo: Option<PathBuf>,

    /// Logo size relative to the code (0.1-0.5)
    #[arg(long, value_name = "SCALE")]
    pub logo_scale: Option<f32>,

    /// Keep modules visible behind the logo
    #[arg(long)]
    pub no_hide_background_dots: bool,

    /// Output result as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON summary of a finished export
#[derive(Debug, Serialize)]
struct RenderOutput {
    path: String,
    format: String,
    mime_type: String,
    bytes: usize,
    size: u32,
    modules: usize,
}

fn parse_arg<T>(value: Option<&String>) -> CliResult<Option<T>>
where
    T: FromStr<Err = anyhow::Error>,
{
    value
        .map(|v| v.parse::<T>().map_err(|e| CliError::validation(e.to_string())))
        .transpose()
}

impl RenderArgs {
    /// Execute the render command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        let mut form = FormState::new(&config.defaults);
        self.apply_to(&mut form)?;

        let format = self.resolve_format(&form)?;
        form.apply(FormEvent::SetExportFormat(format));

        let render_config = form.render_config();
        let mut renderer = StyledQrRenderer::new();
        renderer
            .update(&render_config)
            .map_err(|e| CliError::io(format!("Failed to render QR code: {e:#}")))?;
        let image = renderer
            .export(format)
            .map_err(|e| CliError::io(format!("Failed to export QR code: {e:#}")))?;

        let path = self
            .output
            .clone()
            .unwrap_or_else(|| ExportService::default_path(&config.paths.output_dir, &image));
        ExportService::write(&path, &image).map_err(|e| CliError::io(format!("{e:#}")))?;

        let modules = renderer.preview().map_or(0, |grid| grid.width());
        if self.json {
            print_json(&RenderOutput {
                path: path.display().to_string(),
                format: format.to_string(),
                mime_type: image.mime_type().to_string(),
                bytes: image.bytes.len(),
                size: render_config.width,
                modules,
            })?;
        } else {
            println!(
                "Exported {} ({}x{}, {modules} modules) to {}",
                format.label(),
                render_config.width,
                render_config.height,
                path.display()
            );
        }

        Ok(())
    }

    /// Feeds every given flag into the form as events.
    fn apply_to(&self, form: &mut FormState) -> CliResult<()> {
        if let Some(data) = &self.data {
            if data.is_empty() {
                return Err(CliError::validation("--data must not be empty"));
            }
            form.apply(FormEvent::SetData(data.clone()));
        }

        if let Some(size) = self.size {
            if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
                return Err(CliError::validation(format!(
                    "Invalid size {size}. Must be between {MIN_SIZE} and {MAX_SIZE}"
                )));
            }
            form.apply(FormEvent::SetSize(size.to_string()));
        }

        if let Some(margin) = self.margin {
            if margin > MAX_MARGIN {
                return Err(CliError::validation(format!(
                    "Invalid margin {margin}. Must be between 0 and {MAX_MARGIN}"
                )));
            }
            form.apply(FormEvent::SetMargin(margin.to_string()));
        }

        if let Some(scale) = self.logo_scale {
            if !(MIN_LOGO_SCALE..=MAX_LOGO_SCALE).contains(&scale) {
                return Err(CliError::validation(format!(
                    "Invalid logo scale {scale}. Must be between {MIN_LOGO_SCALE} and {MAX_LOGO_SCALE}"
                )));
            }
            form.apply(FormEvent::SetLogoScale(scale.to_string()));
        }

        if let Some(level) = parse_arg::<ErrorCorrectionLevel>(self.ecl.as_ref())? {
            form.apply(FormEvent::SetErrorCorrection(level));
        }
        if let Some(style) = parse_arg::<DotStyle>(self.dot_style.as_ref())? {
            form.apply(FormEvent::SetDotStyle(style));
        }
        if let Some(style) = parse_arg::<CornerSquareStyle>(self.corner_square_style.as_ref())? {
            form.apply(FormEvent::SetCornerSquareStyle(style));
        }
        if let Some(style) = parse_arg::<CornerDotStyle>(self.corner_dot_style.as_ref())? {
            form.apply(FormEvent::SetCornerDotStyle(style));
        }

        let opaque = [
            (ColorTarget::Dots, &self.dots_color),
            (ColorTarget::CornersSquare, &self.corners_square_color),
            (ColorTarget::CornersDot, &self.corners_dot_color),
        ];
        for (target, value) in opaque {
            if let Some(hex) = parse_arg::<HexColor>(value.as_ref())? {
                form.apply(FormEvent::EditColor(target, ColorEdit::Pick(hex)));
            }
        }

        if let Some(background) = parse_arg::<ColorValue>(self.background.as_ref())? {
            set_background(form, background);
        }

        if self.no_hide_background_dots {
            form.apply(FormEvent::SetHideBackgroundDots(false));
        }

        if let Some(path) = &self.logo {
            let logo = read_logo(path).map_err(|e| CliError::io(format!("{e:#}")))?;
            form.apply(FormEvent::SetLogo(logo));
        }

        Ok(())
    }

    fn resolve_format(&self, form: &FormState) -> CliResult<ExportFormat> {
        if let Some(format) = parse_arg::<ExportFormat>(self.format.as_ref())? {
            return Ok(format);
        }
        let inferred = self
            .output
            .as_ref()
            .and_then(|p| p.extension())
            .and_then(|ext| ext.to_str())
            .and_then(ExportFormat::from_extension);
        Ok(inferred.unwrap_or_else(|| form.export_format()))
    }
}

/// Drives the background slot to `value` through the same edits the picker uses.
fn set_background(form: &mut FormState, value: ColorValue) {
    let target = ColorTarget::Background;
    let edits = form.color_slot(target).edits_toward(&value);
    for edit in edits {
        form.apply(FormEvent::EditColor(target, edit));
    }
}
