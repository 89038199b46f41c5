//! Export file I/O.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::render::ExportedImage;

/// File stem used for exports when no name is given.
pub const DEFAULT_EXPORT_STEM: &str = "qr-code";

/// Writes rendered exports to disk.
pub struct ExportService;

impl ExportService {
    /// Default destination for `image` inside `dir`, e.g. `dir/qr-code.png`.
    #[must_use]
    pub fn default_path(dir: &Path, image: &ExportedImage) -> PathBuf {
        dir.join(image.suggested_file_name(DEFAULT_EXPORT_STEM))
    }

    /// Writes `image` to `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub fn write(path: &Path, image: &ExportedImage) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        std::fs::write(path, &image.bytes)
            .with_context(|| format!("Failed to write export: {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            format = %image.format,
            bytes = image.bytes.len(),
            "QR code exported"
        );
        Ok(())
    }
}
