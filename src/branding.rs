//! Branding and application identity configuration.
//!
//! This module centralizes all branding-related strings (names, paths) to make
//! future rebranding easier. Change values here to rebrand the entire application.

/// The human-readable display name of the application.
///
/// Used in:
/// - Window titles
/// - Help text
/// - CLI `--version` output
pub const APP_DISPLAY_NAME: &str = "LazyQR";

/// The binary/executable name (lowercase, no spaces).
///
/// Used in:
/// - Cargo.toml package name
/// - Binary executable name
/// - Command examples in help text
pub const APP_BINARY_NAME: &str = "lazyqr";

/// The directory name for application data (config, logs).
///
/// Used in platform-specific paths:
/// - Linux: `~/.config/{APP_DATA_DIR}/`
/// - macOS: `~/Library/Application Support/{APP_DATA_DIR}/`
/// - Windows: `%APPDATA%\{APP_DATA_DIR}\`
pub const APP_DATA_DIR: &str = "LazyQR";

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "LAZYQR_CONFIG_DIR";

/// Log file written inside the config directory while the TUI runs.
pub const LOG_FILE_NAME: &str = "lazyqr.log";

/// Short description for package metadata and help text.
pub const APP_DESCRIPTION: &str = "Terminal QR code designer with live preview";
