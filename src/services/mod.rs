//! Service layer for file I/O around the form.
//!
//! Logo reads happen off the UI thread; exports are written synchronously
//! once the renderer has produced the bytes.

pub mod exporter;
pub mod logo_loader;

// Re-export commonly used types and functions
pub use exporter::ExportService;
pub use logo_loader::{read_logo, LogoLoader, LogoMessage};
