//! Data models for colors, QR options, logos and the configuration form.
//!
//! Models are independent of the terminal UI and of the renderer
//! implementation.

pub mod color;
pub mod form;
pub mod logo;
pub mod options;

// Re-export all model types
pub use color::{CmykChannel, CmykColor, ColorValue, HexColor, RgbChannel, RgbColor};
pub use form::{ChoiceField, ColorEdit, ColorSlot, ColorTarget, FormDefaults, FormEvent, FormState};
pub use logo::{Logo, LogoSlot, LogoTicket};
pub use options::{CornerDotStyle, CornerSquareStyle, DotStyle, ErrorCorrectionLevel, ExportFormat};
