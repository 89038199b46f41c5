//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::{Config, ThemeMode};
use crate::models::{ColorValue, DotStyle, ErrorCorrectionLevel, ExportFormat, HexColor};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug, Default)]
pub struct ConfigSetArgs {
    /// Directory exports are written to
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Theme mode (auto, light, or dark)
    #[arg(long, value_name = "MODE")]
    theme: Option<String>,

    /// Default payload
    #[arg(long, value_name = "TEXT")]
    data: Option<String>,

    /// Default image size in pixels (100-1000)
    #[arg(long, value_name = "PX")]
    size: Option<u32>,

    /// Default margin in pixels (0-50)
    #[arg(long, value_name = "PX")]
    margin: Option<u32>,

    /// Default error correction level (L, M, Q, H)
    #[arg(long, value_name = "LEVEL")]
    ecl: Option<String>,

    /// Default data module color (#RRGGBB)
    #[arg(long, value_name = "HEX")]
    dots_color: Option<String>,

    /// Default background (#RRGGBB or 'transparent')
    #[arg(long, value_name = "COLOR")]
    background: Option<String>,

    /// Default data module shape
    #[arg(long, value_name = "STYLE")]
    dot_style: Option<String>,

    /// Default export format (png, svg, jpeg, webp)
    #[arg(long, value_name = "FORMAT")]
    export_format: Option<String>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    paths: PathsOutput,
    defaults: DefaultsOutput,
    ui: UiOutput,
}

#[derive(Serialize, Debug)]
struct PathsOutput {
    output_dir: String,
}

#[derive(Serialize, Debug)]
struct DefaultsOutput {
    data: String,
    size: u32,
    margin: u32,
    error_correction: String,
    dots_color: String,
    background: String,
    corners_square_color: String,
    corners_dot_color: String,
    dot_style: String,
    corner_square_style: String,
    corner_dot_style: String,
    logo_scale: f64,
    hide_background_dots: bool,
    export_format: String,
}

#[derive(Serialize, Debug)]
struct UiOutput {
    theme: String,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            output_json(&config)?;
        } else {
            output_human_readable(&config);
        }

        Ok(())
    }
}

fn invalid(e: &anyhow::Error) -> CliError {
    CliError::validation(e.to_string())
}

impl ConfigSetArgs {
    fn is_empty(&self) -> bool {
        self.output_dir.is_none()
            && self.theme.is_none()
            && self.data.is_none()
            && self.size.is_none()
            && self.margin.is_none()
            && self.ecl.is_none()
            && self.dots_color.is_none()
            && self.background.is_none()
            && self.dot_style.is_none()
            && self.export_format.is_none()
    }

    /// Applies the given options to `config` without touching the disk.
    fn apply(&self, config: &mut Config) -> CliResult<()> {
        if let Some(theme) = &self.theme {
            config.ui.theme_mode = theme.parse::<ThemeMode>().map_err(|e| invalid(&e))?;
        }
        if let Some(data) = &self.data {
            config.defaults.data.clone_from(data);
        }
        if let Some(size) = self.size {
            config.defaults.size = size;
        }
        if let Some(margin) = self.margin {
            config.defaults.margin = margin;
        }
        if let Some(ecl) = &self.ecl {
            config.defaults.error_correction =
                ecl.parse::<ErrorCorrectionLevel>().map_err(|e| invalid(&e))?;
        }
        if let Some(color) = &self.dots_color {
            config.defaults.dots_color = color.parse::<HexColor>().map_err(|e| invalid(&e))?;
        }
        if let Some(background) = &self.background {
            config.defaults.background = background.parse::<ColorValue>().map_err(|e| invalid(&e))?;
        }
        if let Some(style) = &self.dot_style {
            config.defaults.dot_style = style.parse::<DotStyle>().map_err(|e| invalid(&e))?;
        }
        if let Some(format) = &self.export_format {
            config.defaults.export_format = format.parse::<ExportFormat>().map_err(|e| invalid(&e))?;
        }
        if let Some(path) = &self.output_dir {
            config.paths.output_dir.clone_from(path);
        }

        config.validate().map_err(|e| invalid(&e))
    }

    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        // At least one argument must be provided
        if self.is_empty() {
            return Err(CliError::validation(
                "At least one configuration option must be specified (see `config set --help`)",
            ));
        }

        // Load current configuration
        let mut config = Config::load().unwrap_or_default();
        self.apply(&mut config)?;

        // Create the output directory if it doesn't exist yet
        if let Some(path) = &self.output_dir {
            std::fs::create_dir_all(path).map_err(|e| {
                CliError::io(format!(
                    "Failed to create output directory {}: {e}",
                    path.display()
                ))
            })?;
        }

        // Save configuration
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

/// Output configuration in JSON format
fn output_json(config: &Config) -> CliResult<()> {
    let d = &config.defaults;
    let output = ConfigOutput {
        paths: PathsOutput {
            output_dir: config.paths.output_dir.to_string_lossy().to_string(),
        },
        defaults: DefaultsOutput {
            data: d.data.clone(),
            size: d.size,
            margin: d.margin,
            error_correction: d.error_correction.to_string(),
            dots_color: d.dots_color.to_string(),
            background: d.background.to_string(),
            corners_square_color: d.corners_square_color.to_string(),
            corners_dot_color: d.corners_dot_color.to_string(),
            dot_style: d.dot_style.to_string(),
            corner_square_style: d.corner_square_style.to_string(),
            corner_dot_style: d.corner_dot_style.to_string(),
            // Shortest decimal form, so 0.4 prints as 0.4
            logo_scale: d.logo_scale.to_string().parse().unwrap_or(f64::from(d.logo_scale)),
            hide_background_dots: d.hide_background_dots,
            export_format: d.export_format.to_string(),
        },
        ui: UiOutput {
            theme: config.ui.theme_mode.as_str().to_string(),
        },
    };

    print_json(&output)
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    let d = &config.defaults;
    println!("LazyQR Configuration");
    println!("====================");
    println!();

    println!("Paths:");
    println!("  Output Directory: {}", config.paths.output_dir.display());
    println!();

    println!("Defaults:");
    println!("  Data: {}", d.data);
    println!("  Size: {} px", d.size);
    println!("  Margin: {} px", d.margin);
    println!("  Error Correction: {}", d.error_correction.label());
    println!("  Dots Color: {}", d.dots_color);
    println!("  Background: {}", d.background);
    println!("  Corner Square Color: {}", d.corners_square_color);
    println!("  Corner Dot Color: {}", d.corners_dot_color);
    println!("  Dot Style: {}", d.dot_style);
    println!("  Corner Square Style: {}", d.corner_square_style);
    println!("  Corner Dot Style: {}", d.corner_dot_style);
    println!("  Logo Scale: {}", d.logo_scale);
    println!("  Hide Background Dots: {}", d.hide_background_dots);
    println!("  Export Format: {}", d.export_format);
    println!();

    println!("UI:");
    println!("  Theme Mode: {}", config.ui.theme_mode.as_str());
    println!();
}
