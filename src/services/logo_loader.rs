//! Background logo file reads.
//!
//! Each read runs on its own thread and reports back over a channel tagged
//! with the ticket the form issued for it. The form decides whether the
//! result still matters; the loader never drops anything itself.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;

use crate::models::{FormEvent, Logo, LogoTicket};

/// Largest logo file accepted, in bytes.
pub const MAX_LOGO_BYTES: u64 = 10 * 1024 * 1024;

/// Completion message sent by a load thread.
#[derive(Debug, Clone)]
pub enum LogoMessage {
    /// File read and recognized as an image
    Loaded {
        /// Ticket the load was started with
        ticket: LogoTicket,
        /// Loaded logo
        logo: Logo,
    },
    /// Read failed
    Failed {
        /// Ticket the load was started with
        ticket: LogoTicket,
        /// Human-readable reason
        error: String,
    },
}

impl LogoMessage {
    /// Converts into the form event that applies it.
    #[must_use]
    pub fn into_event(self) -> FormEvent {
        match self {
            Self::Loaded { ticket, logo } => FormEvent::LogoLoaded { ticket, logo },
            Self::Failed { ticket, .. } => FormEvent::LogoFailed { ticket },
        }
    }
}

/// Spawns logo reads and collects their results.
pub struct LogoLoader {
    sender: Sender<LogoMessage>,
    receiver: Receiver<LogoMessage>,
}

impl LogoLoader {
    /// Creates an idle loader.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }

    /// Starts reading `path` in the background.
    pub fn start(&self, ticket: LogoTicket, path: PathBuf) {
        let sender = self.sender.clone();
        tracing::debug!(ticket = ticket.id(), path = %path.display(), "Logo load started");
        thread::spawn(move || {
            let message = match read_logo(&path) {
                Ok(logo) => LogoMessage::Loaded { ticket, logo },
                Err(e) => LogoMessage::Failed {
                    ticket,
                    error: format!("{e:#}"),
                },
            };
            // Receiver gone means the app is shutting down
            let _ = sender.send(message);
        });
    }

    /// Returns every message that has arrived since the last poll.
    pub fn poll(&self) -> Vec<LogoMessage> {
        let mut messages = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(message) => messages.push(message),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        messages
    }
}

impl Default for LogoLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads a logo file synchronously.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is larger than
/// [`MAX_LOGO_BYTES`], or is not a raster format the renderer can decode.
pub fn read_logo(path: &Path) -> Result<Logo> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to read logo: {}", path.display()))?;
    if metadata.len() > MAX_LOGO_BYTES {
        anyhow::bail!(
            "Logo {} is too large ({} bytes, limit {MAX_LOGO_BYTES})",
            path.display(),
            metadata.len()
        );
    }

    let bytes = std::fs::read(path).with_context(|| format!("Failed to read logo: {}", path.display()))?;
    let format = image::guess_format(&bytes)
        .with_context(|| format!("Unsupported logo format: {}", path.display()))?;

    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string());
    Ok(Logo::with_mime_type(name, format.to_mime_type(), bytes))
}
