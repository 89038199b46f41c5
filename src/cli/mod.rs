//! CLI command handlers for LazyQR.
//!
//! Besides launching the designer, this module provides headless, scriptable
//! access to rendering, color conversion and configuration.

pub mod color;
pub mod common;
pub mod config;
pub mod render;
pub mod tui;

// Re-export types used by main.rs and tests
pub use color::ColorArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use render::RenderArgs;
pub use tui::TuiArgs;
