//! Embedded logo image and the slot that tracks in-flight loads.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt;

/// Logo image bytes as uploaded, with their MIME type.
#[derive(Clone, PartialEq, Eq)]
pub struct Logo {
    /// File name the logo was loaded from (for display)
    pub name: String,
    /// MIME type, e.g. `image/png`
    pub mime_type: String,
    /// Raw encoded image bytes
    pub bytes: Vec<u8>,
}

impl Logo {
    /// Wraps raw bytes, guessing the MIME type from `name`.
    #[must_use]
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime_type = mime_guess::from_path(&name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            name,
            mime_type,
            bytes,
        }
    }

    /// Wraps raw bytes whose MIME type is already known.
    #[must_use]
    pub fn with_mime_type(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Encodes the logo as a `data:` URI.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazyqr::models::Logo;
    ///
    /// let logo = Logo::from_bytes("mark.png", vec![1, 2, 3]);
    /// assert_eq!(logo.to_data_uri(), "data:image/png;base64,AQID");
    /// ```
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

impl fmt::Debug for Logo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logo")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Identifies one logo load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LogoTicket(u64);

impl LogoTicket {
    /// Raw ticket number (for logging).
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Holds the current logo plus at most one pending load.
///
/// Only the most recently issued ticket may complete. Clearing the logo or
/// starting another load supersedes older tickets, and their results are
/// dropped when they arrive.
#[derive(Debug, Clone, Default)]
pub struct LogoSlot {
    current: Option<Logo>,
    pending: Option<LogoTicket>,
    issued: u64,
}

impl LogoSlot {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The logo currently applied, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&Logo> {
        self.current.as_ref()
    }

    /// True while a load is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Issues a new ticket, superseding any load already in flight.
    pub fn begin_load(&mut self) -> LogoTicket {
        self.issued += 1;
        let ticket = LogoTicket(self.issued);
        self.pending = Some(ticket);
        ticket
    }

    /// Applies a finished load. Returns false if the ticket was superseded.
    pub fn complete(&mut self, ticket: LogoTicket, logo: Logo) -> bool {
        if self.pending != Some(ticket) {
            return false;
        }
        self.pending = None;
        self.current = Some(logo);
        true
    }

    /// Records a failed load. Returns false if the ticket was superseded.
    pub fn fail(&mut self, ticket: LogoTicket) -> bool {
        if self.pending != Some(ticket) {
            return false;
        }
        self.pending = None;
        true
    }

    /// Applies a logo immediately (used by the headless CLI).
    pub fn set(&mut self, logo: Logo) {
        self.pending = None;
        self.current = Some(logo);
    }

    /// Removes the logo and abandons any pending load.
    pub fn clear(&mut self) {
        self.pending = None;
        self.current = None;
    }
}
