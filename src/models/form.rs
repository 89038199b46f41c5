//! QR configuration form state.
//!
//! [`FormState`] is the single owner of everything the user can edit. All
//! changes go through [`FormState::apply`]; nothing here ever fails. Bad
//! input is clamped, falls back to a default, or waits as an uncommitted
//! draft.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::color::{
    cmyk_to_rgb, parse_channel, parse_leading_int, CmykChannel, CmykColor, ColorValue, HexColor,
    RgbChannel, RgbColor, TRANSPARENT_STAND_IN,
};
use super::logo::{Logo, LogoSlot, LogoTicket};
use super::options::{CornerDotStyle, CornerSquareStyle, DotStyle, ErrorCorrectionLevel, ExportFormat};
use crate::render::{RenderConfig, DEFAULT_LOGO_MARGIN};

/// Smallest accepted output size in pixels.
pub const MIN_SIZE: u32 = 100;
/// Largest accepted output size in pixels.
pub const MAX_SIZE: u32 = 1000;
/// Size used when the size field holds no number.
pub const DEFAULT_SIZE: u32 = 300;
/// Largest accepted margin in pixels.
pub const MAX_MARGIN: u32 = 50;
/// Margin used when the margin field holds no number.
pub const DEFAULT_MARGIN: u32 = 10;
/// Smallest logo scale.
pub const MIN_LOGO_SCALE: f32 = 0.1;
/// Largest logo scale.
pub const MAX_LOGO_SCALE: f32 = 0.5;
/// Logo scale used when the field holds no number.
pub const DEFAULT_LOGO_SCALE: f32 = 0.4;
/// Maximum length of a hex draft, `#` included.
pub const HEX_DRAFT_LEN: usize = 7;

/// Starting values for a fresh form, usually read from the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDefaults {
    /// Payload text
    pub data: String,
    /// Output size in pixels
    pub size: u32,
    /// Margin in pixels
    pub margin: u32,
    /// Error correction level
    pub error_correction: ErrorCorrectionLevel,
    /// Data module color
    pub dots_color: HexColor,
    /// Background (hex or `transparent`)
    pub background: ColorValue,
    /// Finder ring color
    pub corners_square_color: HexColor,
    /// Finder center color
    pub corners_dot_color: HexColor,
    /// Data module shape
    pub dot_style: DotStyle,
    /// Finder ring shape
    pub corner_square_style: CornerSquareStyle,
    /// Finder center shape
    pub corner_dot_style: CornerDotStyle,
    /// Logo size relative to the symbol
    pub logo_scale: f32,
    /// Clear modules behind the logo
    pub hide_background_dots: bool,
    /// Export format
    pub export_format: ExportFormat,
}

impl Default for FormDefaults {
    fn default() -> Self {
        let ink = RgbColor::new(0x22, 0x22, 0x22).to_hex();
        Self {
            data: "https://example.com".to_string(),
            size: DEFAULT_SIZE,
            margin: DEFAULT_MARGIN,
            error_correction: ErrorCorrectionLevel::default(),
            dots_color: ink.clone(),
            background: ColorValue::Transparent,
            corners_square_color: ink.clone(),
            corners_dot_color: ink,
            dot_style: DotStyle::default(),
            corner_square_style: CornerSquareStyle::default(),
            corner_dot_style: CornerDotStyle::default(),
            logo_scale: DEFAULT_LOGO_SCALE,
            hide_background_dots: true,
            export_format: ExportFormat::default(),
        }
    }
}

impl FormDefaults {
    /// Checks numeric bounds.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first out-of-range value.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            anyhow::bail!("Size {} out of range. Must be between {MIN_SIZE} and {MAX_SIZE}", self.size);
        }
        if self.margin > MAX_MARGIN {
            anyhow::bail!("Margin {} out of range. Must be between 0 and {MAX_MARGIN}", self.margin);
        }
        if !(MIN_LOGO_SCALE..=MAX_LOGO_SCALE).contains(&self.logo_scale) {
            anyhow::bail!(
                "Logo scale {} out of range. Must be between {MIN_LOGO_SCALE} and {MAX_LOGO_SCALE}",
                self.logo_scale
            );
        }
        Ok(())
    }
}

/// Which color slot an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorTarget {
    /// Data modules
    Dots,
    /// Background
    Background,
    /// Finder rings
    CornersSquare,
    /// Finder centers
    CornersDot,
}

impl ColorTarget {
    /// All targets in form order.
    pub const ALL: [Self; 4] = [Self::Dots, Self::Background, Self::CornersSquare, Self::CornersDot];

    /// Field label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dots => "Dots Color",
            Self::Background => "Background",
            Self::CornersSquare => "Corner Square Color",
            Self::CornersDot => "Corner Dot Color",
        }
    }
}

/// One of the four ways to edit a color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorEdit {
    /// Typed hex text (may be partial)
    Hex(String),
    /// Typed value for one RGB channel
    Rgb(RgbChannel, String),
    /// Typed value for one CMYK channel
    Cmyk(CmykChannel, String),
    /// Complete color chosen from a picker
    Pick(HexColor),
    /// Switch between transparent and white
    ToggleTransparent,
}

/// A committed color plus whatever hex text is being typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorSlot {
    value: ColorValue,
    draft: Option<String>,
    allow_transparent: bool,
}

impl ColorSlot {
    /// Slot that only holds opaque colors.
    #[must_use]
    pub const fn opaque(hex: HexColor) -> Self {
        Self {
            value: ColorValue::Opaque(hex),
            draft: None,
            allow_transparent: false,
        }
    }

    /// Slot that may also be transparent.
    #[must_use]
    pub const fn with_transparency(value: ColorValue) -> Self {
        Self {
            value,
            draft: None,
            allow_transparent: true,
        }
    }

    /// The committed color.
    #[must_use]
    pub const fn value(&self) -> &ColorValue {
        &self.value
    }

    /// Whether the slot accepts [`ColorEdit::ToggleTransparent`].
    #[must_use]
    pub const fn allows_transparent(&self) -> bool {
        self.allow_transparent
    }

    /// Text for the hex field: the draft while typing, otherwise the value.
    #[must_use]
    pub fn hex_text(&self) -> String {
        self.draft.clone().unwrap_or_else(|| self.value.to_string())
    }

    /// True when hex text has been typed that is not a full color yet.
    #[must_use]
    pub const fn has_pending_draft(&self) -> bool {
        self.draft.is_some()
    }

    /// RGB shown in the editor (white while transparent).
    #[must_use]
    pub fn rgb(&self) -> RgbColor {
        self.value.display_rgb()
    }

    /// CMYK shown in the editor.
    #[must_use]
    pub fn cmyk(&self) -> CmykColor {
        self.rgb().to_cmyk()
    }

    /// Applies one edit. Returns true when the committed color changed.
    ///
    /// While transparent, only the toggle is accepted; the other inputs are
    /// hidden in that state.
    pub fn apply(&mut self, edit: ColorEdit) -> bool {
        if self.value.is_transparent() && edit != ColorEdit::ToggleTransparent {
            return false;
        }
        match edit {
            ColorEdit::Hex(text) => self.edit_hex(&text),
            ColorEdit::Rgb(channel, text) => {
                let rgb = self.rgb().with_channel(channel, parse_channel(&text, 255));
                self.commit(rgb.to_hex())
            }
            ColorEdit::Cmyk(channel, text) => {
                let cmyk = self.cmyk().with_channel(channel, parse_channel(&text, 100));
                let rgb = cmyk_to_rgb(
                    i32::from(cmyk.c),
                    i32::from(cmyk.m),
                    i32::from(cmyk.y),
                    i32::from(cmyk.k),
                );
                self.commit(rgb.to_hex())
            }
            ColorEdit::Pick(hex) => self.commit(hex),
            ColorEdit::ToggleTransparent => {
                if !self.allow_transparent {
                    return false;
                }
                self.draft = None;
                self.value = match self.value {
                    ColorValue::Transparent => ColorValue::Opaque(TRANSPARENT_STAND_IN.to_hex()),
                    ColorValue::Opaque(_) => ColorValue::Transparent,
                };
                true
            }
        }
    }

    fn edit_hex(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let mut draft = if text.starts_with('#') {
            text.to_string()
        } else {
            format!("#{text}")
        };
        if let Some((cut, _)) = draft.char_indices().nth(HEX_DRAFT_LEN) {
            draft.truncate(cut);
        }
        if let Some(hex) = HexColor::parse(&draft) {
            return self.commit(hex);
        }
        self.draft = Some(draft);
        false
    }

    /// Edits that take this slot to `target`, using the same inputs a user would.
    #[must_use]
    pub fn edits_toward(&self, target: &ColorValue) -> Vec<ColorEdit> {
        let mut edits = Vec::new();
        if self.value.is_transparent() != target.is_transparent() {
            edits.push(ColorEdit::ToggleTransparent);
        }
        if let ColorValue::Opaque(hex) = target {
            edits.push(ColorEdit::Pick(hex.clone()));
        }
        edits
    }

    fn commit(&mut self, hex: HexColor) -> bool {
        self.draft = None;
        let next = ColorValue::Opaque(hex);
        if self.value == next {
            return false;
        }
        self.value = next;
        true
    }
}

/// Enum-valued fields that can be cycled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChoiceField {
    /// Error correction level
    ErrorCorrection,
    /// Data module shape
    DotStyle,
    /// Finder ring shape
    CornerSquareStyle,
    /// Finder center shape
    CornerDotStyle,
    /// Export format
    ExportFormat,
}

/// Every change the form accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// Replace the payload
    SetData(String),
    /// Size field text
    SetSize(String),
    /// Margin field text
    SetMargin(String),
    /// Logo scale field text
    SetLogoScale(String),
    /// Pick an error correction level
    SetErrorCorrection(ErrorCorrectionLevel),
    /// Pick a dot style
    SetDotStyle(DotStyle),
    /// Pick a corner square style
    SetCornerSquareStyle(CornerSquareStyle),
    /// Pick a corner dot style
    SetCornerDotStyle(CornerDotStyle),
    /// Pick an export format
    SetExportFormat(ExportFormat),
    /// Step an enum field forward or back
    Cycle {
        /// Field to step
        field: ChoiceField,
        /// Direction
        forward: bool,
    },
    /// Set the hide-background-dots flag
    SetHideBackgroundDots(bool),
    /// Flip the hide-background-dots flag
    ToggleHideBackgroundDots,
    /// Edit one of the color slots
    EditColor(ColorTarget, ColorEdit),
    /// A logo load finished
    LogoLoaded {
        /// Ticket issued by [`FormState::begin_logo_load`]
        ticket: LogoTicket,
        /// Loaded image
        logo: Logo,
    },
    /// A logo load failed
    LogoFailed {
        /// Ticket issued by [`FormState::begin_logo_load`]
        ticket: LogoTicket,
    },
    /// Apply a logo immediately
    SetLogo(Logo),
    /// Remove the logo and drop any pending load
    ClearLogo,
}

/// Editable QR configuration.
#[derive(Debug, Clone)]
pub struct FormState {
    data: String,
    size_text: String,
    margin_text: String,
    logo_scale_text: String,
    error_correction: ErrorCorrectionLevel,
    dots: ColorSlot,
    background: ColorSlot,
    corners_square: ColorSlot,
    corners_dot: ColorSlot,
    dot_style: DotStyle,
    corner_square_style: CornerSquareStyle,
    corner_dot_style: CornerDotStyle,
    logo: LogoSlot,
    hide_background_dots: bool,
    export_format: ExportFormat,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(&FormDefaults::default())
    }
}

impl FormState {
    /// Builds a form from the given defaults.
    #[must_use]
    pub fn new(defaults: &FormDefaults) -> Self {
        Self {
            data: defaults.data.clone(),
            size_text: defaults.size.to_string(),
            margin_text: defaults.margin.to_string(),
            logo_scale_text: defaults.logo_scale.to_string(),
            error_correction: defaults.error_correction,
            dots: ColorSlot::opaque(defaults.dots_color.clone()),
            background: ColorSlot::with_transparency(defaults.background.clone()),
            corners_square: ColorSlot::opaque(defaults.corners_square_color.clone()),
            corners_dot: ColorSlot::opaque(defaults.corners_dot_color.clone()),
            dot_style: defaults.dot_style,
            corner_square_style: defaults.corner_square_style,
            corner_dot_style: defaults.corner_dot_style,
            logo: LogoSlot::new(),
            hide_background_dots: defaults.hide_background_dots,
            export_format: defaults.export_format,
        }
    }

    /// Applies one event. Returns true when anything changed.
    pub fn apply(&mut self, event: FormEvent) -> bool {
        match event {
            FormEvent::SetData(text) => replace(&mut self.data, text),
            FormEvent::SetSize(text) => replace(&mut self.size_text, text),
            FormEvent::SetMargin(text) => replace(&mut self.margin_text, text),
            FormEvent::SetLogoScale(text) => replace(&mut self.logo_scale_text, text),
            FormEvent::SetErrorCorrection(level) => replace(&mut self.error_correction, level),
            FormEvent::SetDotStyle(style) => replace(&mut self.dot_style, style),
            FormEvent::SetCornerSquareStyle(style) => replace(&mut self.corner_square_style, style),
            FormEvent::SetCornerDotStyle(style) => replace(&mut self.corner_dot_style, style),
            FormEvent::SetExportFormat(format) => replace(&mut self.export_format, format),
            FormEvent::Cycle { field, forward } => {
                self.cycle(field, forward);
                true
            }
            FormEvent::SetHideBackgroundDots(hide) => replace(&mut self.hide_background_dots, hide),
            FormEvent::ToggleHideBackgroundDots => {
                self.hide_background_dots = !self.hide_background_dots;
                true
            }
            FormEvent::EditColor(target, edit) => self.color_slot_mut(target).apply(edit),
            FormEvent::LogoLoaded { ticket, logo } => self.logo.complete(ticket, logo),
            FormEvent::LogoFailed { ticket } => self.logo.fail(ticket),
            FormEvent::SetLogo(logo) => {
                self.logo.set(logo);
                true
            }
            FormEvent::ClearLogo => {
                let had_any = self.logo.current().is_some() || self.logo.is_loading();
                self.logo.clear();
                had_any
            }
        }
    }

    fn cycle(&mut self, field: ChoiceField, forward: bool) {
        macro_rules! step {
            ($value:expr) => {
                $value = if forward { $value.next() } else { $value.previous() }
            };
        }
        match field {
            ChoiceField::ErrorCorrection => step!(self.error_correction),
            ChoiceField::DotStyle => step!(self.dot_style),
            ChoiceField::CornerSquareStyle => step!(self.corner_square_style),
            ChoiceField::CornerDotStyle => step!(self.corner_dot_style),
            ChoiceField::ExportFormat => step!(self.export_format),
        }
    }

    /// Issues a ticket for a logo load that is about to start.
    pub fn begin_logo_load(&mut self) -> LogoTicket {
        self.logo.begin_load()
    }

    /// Payload text.
    #[must_use]
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Raw text of the size field.
    #[must_use]
    pub fn size_text(&self) -> &str {
        &self.size_text
    }

    /// Effective size: leading integer of the field, or 300, clamped to 100-1000.
    #[must_use]
    pub fn size(&self) -> u32 {
        numeric_field(&self.size_text, DEFAULT_SIZE, MIN_SIZE, MAX_SIZE)
    }

    /// Raw text of the margin field.
    #[must_use]
    pub fn margin_text(&self) -> &str {
        &self.margin_text
    }

    /// Effective margin: leading integer of the field, or 10, clamped to 0-50.
    #[must_use]
    pub fn margin(&self) -> u32 {
        numeric_field(&self.margin_text, DEFAULT_MARGIN, 0, MAX_MARGIN)
    }

    /// Raw text of the logo scale field.
    #[must_use]
    pub fn logo_scale_text(&self) -> &str {
        &self.logo_scale_text
    }

    /// Effective logo scale, or 0.4, clamped to 0.1-0.5.
    #[must_use]
    pub fn logo_scale(&self) -> f32 {
        self.logo_scale_text
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .map_or(DEFAULT_LOGO_SCALE, |v| v.clamp(MIN_LOGO_SCALE, MAX_LOGO_SCALE))
    }

    /// Error correction level.
    #[must_use]
    pub const fn error_correction(&self) -> ErrorCorrectionLevel {
        self.error_correction
    }

    /// Data module shape.
    #[must_use]
    pub const fn dot_style(&self) -> DotStyle {
        self.dot_style
    }

    /// Finder ring shape.
    #[must_use]
    pub const fn corner_square_style(&self) -> CornerSquareStyle {
        self.corner_square_style
    }

    /// Finder center shape.
    #[must_use]
    pub const fn corner_dot_style(&self) -> CornerDotStyle {
        self.corner_dot_style
    }

    /// Whether modules behind the logo are cleared.
    #[must_use]
    pub const fn hide_background_dots(&self) -> bool {
        self.hide_background_dots
    }

    /// Selected export format.
    #[must_use]
    pub const fn export_format(&self) -> ExportFormat {
        self.export_format
    }

    /// Logo slot.
    #[must_use]
    pub const fn logo(&self) -> &LogoSlot {
        &self.logo
    }

    /// One of the four color slots.
    #[must_use]
    pub const fn color_slot(&self, target: ColorTarget) -> &ColorSlot {
        match target {
            ColorTarget::Dots => &self.dots,
            ColorTarget::Background => &self.background,
            ColorTarget::CornersSquare => &self.corners_square,
            ColorTarget::CornersDot => &self.corners_dot,
        }
    }

    fn color_slot_mut(&mut self, target: ColorTarget) -> &mut ColorSlot {
        match target {
            ColorTarget::Dots => &mut self.dots,
            ColorTarget::Background => &mut self.background,
            ColorTarget::CornersSquare => &mut self.corners_square,
            ColorTarget::CornersDot => &mut self.corners_dot,
        }
    }

    /// Derives the renderer input from the current state.
    #[must_use]
    pub fn render_config(&self) -> RenderConfig {
        let size = self.size();
        RenderConfig {
            data: self.data.clone(),
            width: size,
            height: size,
            margin: self.margin(),
            error_correction: self.error_correction,
            dot_style: self.dot_style,
            corner_square_style: self.corner_square_style,
            corner_dot_style: self.corner_dot_style,
            dots_color: self.dots.value().to_rgba(),
            corners_square_color: self.corners_square.value().to_rgba(),
            corners_dot_color: self.corners_dot.value().to_rgba(),
            background: self.background.value().to_rgba(),
            logo: self.logo.current().cloned(),
            logo_scale: self.logo_scale(),
            logo_margin: DEFAULT_LOGO_MARGIN,
            hide_background_dots: self.hide_background_dots,
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

fn numeric_field(text: &str, fallback: u32, min: u32, max: u32) -> u32 {
    match parse_leading_int(text) {
        Some(value) => u32::try_from(value.clamp(i64::from(min), i64::from(max))).unwrap_or(fallback),
        None => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(value: &str) -> HexColor {
        HexColor::parse(value).unwrap()
    }

    #[test]
    fn test_defaults_match_documented_values() {
        let form = FormState::default();
        assert_eq!(form.data(), "https://example.com");
        assert_eq!(form.size(), 300);
        assert_eq!(form.margin(), 10);
        assert_eq!(form.error_correction(), ErrorCorrectionLevel::Quartile);
        assert_eq!(form.color_slot(ColorTarget::Dots).value().to_string(), "#222222");
        assert!(form.color_slot(ColorTarget::Background).value().is_transparent());
        assert!((form.logo_scale() - 0.4).abs() < f32::EPSILON);
        assert!(form.hide_background_dots());
        assert_eq!(form.export_format(), ExportFormat::Png);
    }

    #[test]
    fn test_size_falls_back_and_clamps() {
        let mut form = FormState::default();
        form.apply(FormEvent::SetSize("abc".into()));
        assert_eq!(form.size(), 300);
        assert_eq!(form.size_text(), "abc");
        form.apply(FormEvent::SetSize("50".into()));
        assert_eq!(form.size(), 100);
        form.apply(FormEvent::SetSize("5000".into()));
        assert_eq!(form.size(), 1000);
        form.apply(FormEvent::SetSize("640px".into()));
        assert_eq!(form.size(), 640);
    }

    #[test]
    fn test_margin_zero_is_valid() {
        let mut form = FormState::default();
        form.apply(FormEvent::SetMargin("0".into()));
        assert_eq!(form.margin(), 0);
        form.apply(FormEvent::SetMargin("".into()));
        assert_eq!(form.margin(), 10);
        form.apply(FormEvent::SetMargin("99".into()));
        assert_eq!(form.margin(), 50);
    }

    #[test]
    fn test_logo_scale_bounds() {
        let mut form = FormState::default();
        form.apply(FormEvent::SetLogoScale("0.9".into()));
        assert!((form.logo_scale() - 0.5).abs() < f32::EPSILON);
        form.apply(FormEvent::SetLogoScale("NaN".into()));
        assert!((form.logo_scale() - 0.4).abs() < f32::EPSILON);
        form.apply(FormEvent::SetLogoScale("0.05".into()));
        assert!((form.logo_scale() - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn test_hex_draft_commits_when_complete() {
        let mut slot = ColorSlot::opaque(hex("#222222"));
        assert!(!slot.apply(ColorEdit::Hex("#ab".into())));
        assert_eq!(slot.hex_text(), "#ab");
        assert_eq!(slot.value().to_string(), "#222222");
        assert!(slot.has_pending_draft());

        assert!(slot.apply(ColorEdit::Hex("#abCDef".into())));
        assert_eq!(slot.value().to_string(), "#abcdef");
        assert!(!slot.has_pending_draft());
    }

    #[test]
    fn test_hex_without_hash_gets_prefixed() {
        let mut slot = ColorSlot::opaque(hex("#222222"));
        slot.apply(ColorEdit::Hex("ff".into()));
        assert_eq!(slot.hex_text(), "#ff");
        slot.apply(ColorEdit::Hex("00ff00".into()));
        assert_eq!(slot.value().to_string(), "#00ff00");
    }

    #[test]
    fn test_empty_hex_is_ignored_and_long_hex_truncated() {
        let mut slot = ColorSlot::opaque(hex("#222222"));
        assert!(!slot.apply(ColorEdit::Hex(String::new())));
        assert_eq!(slot.hex_text(), "#222222");
        assert!(slot.apply(ColorEdit::Hex("#1234567".into())));
        assert_eq!(slot.value().to_string(), "#123456");
    }

    #[test]
    fn test_rgb_edit_clamps_and_commits() {
        let mut slot = ColorSlot::opaque(hex("#000000"));
        assert!(slot.apply(ColorEdit::Rgb(RgbChannel::Red, "300".into())));
        assert_eq!(slot.value().to_string(), "#ff0000");
        slot.apply(ColorEdit::Rgb(RgbChannel::Green, "nope".into()));
        assert_eq!(slot.rgb(), RgbColor::new(255, 0, 0));
    }

    #[test]
    fn test_cmyk_edit_commits_through_rgb() {
        let mut slot = ColorSlot::opaque(hex("#ffffff"));
        assert!(slot.apply(ColorEdit::Cmyk(CmykChannel::Key, "100".into())));
        assert_eq!(slot.value().to_string(), "#000000");
    }

    #[test]
    fn test_rgb_edit_discards_partial_draft() {
        let mut slot = ColorSlot::opaque(hex("#000000"));
        slot.apply(ColorEdit::Hex("#12".into()));
        slot.apply(ColorEdit::Rgb(RgbChannel::Blue, "255".into()));
        assert_eq!(slot.hex_text(), "#0000ff");
    }

    #[test]
    fn test_toggle_transparent_roundtrip() {
        let mut form = FormState::default();
        let target = ColorTarget::Background;
        assert!(form.apply(FormEvent::EditColor(target, ColorEdit::ToggleTransparent)));
        assert_eq!(form.color_slot(target).value().to_string(), "#ffffff");
        assert!(form.apply(FormEvent::EditColor(target, ColorEdit::ToggleTransparent)));
        assert!(form.color_slot(target).value().is_transparent());
    }

    #[test]
    fn test_edits_toward_reach_target() {
        let mut slot = ColorSlot::with_transparency(ColorValue::Transparent);
        let target = ColorValue::Opaque(hex("#123456"));
        for edit in slot.edits_toward(&target) {
            slot.apply(edit);
        }
        assert_eq!(slot.value(), &target);

        let edits = slot.edits_toward(&ColorValue::Transparent);
        assert_eq!(edits, vec![ColorEdit::ToggleTransparent]);
    }

    #[test]
    fn test_toggle_ignored_for_opaque_only_slots() {
        let mut form = FormState::default();
        assert!(!form.apply(FormEvent::EditColor(ColorTarget::Dots, ColorEdit::ToggleTransparent)));
        assert_eq!(form.color_slot(ColorTarget::Dots).value().to_string(), "#222222");
    }

    #[test]
    fn test_edits_ignored_while_transparent() {
        let mut form = FormState::default();
        let target = ColorTarget::Background;
        assert!(!form.apply(FormEvent::EditColor(target, ColorEdit::Rgb(RgbChannel::Red, "10".into()))));
        assert!(!form.apply(FormEvent::EditColor(target, ColorEdit::Pick(hex("#123456")))));
        let slot = form.color_slot(target);
        assert!(slot.value().is_transparent());
        assert_eq!(slot.rgb(), RgbColor::new(255, 255, 255));
        assert_eq!(slot.cmyk(), CmykColor::new(0, 0, 0, 0));
        assert_eq!(slot.hex_text(), "transparent");
    }

    #[test]
    fn test_cycle_walks_declaration_order() {
        let mut form = FormState::default();
        form.apply(FormEvent::Cycle {
            field: ChoiceField::ErrorCorrection,
            forward: true,
        });
        assert_eq!(form.error_correction(), ErrorCorrectionLevel::High);
        form.apply(FormEvent::Cycle {
            field: ChoiceField::ExportFormat,
            forward: false,
        });
        assert_eq!(form.export_format(), ExportFormat::Webp);
    }

    #[test]
    fn test_superseded_logo_is_discarded() {
        let mut form = FormState::default();
        let first = form.begin_logo_load();
        let second = form.begin_logo_load();

        let stale = Logo::from_bytes("stale.png", vec![1]);
        assert!(!form.apply(FormEvent::LogoLoaded { ticket: first, logo: stale }));
        let fresh = Logo::from_bytes("fresh.png", vec![2]);
        assert!(form.apply(FormEvent::LogoLoaded { ticket: second, logo: fresh }));
        assert_eq!(form.render_config().logo.unwrap().name, "fresh.png");
    }

    #[test]
    fn test_clear_logo_beats_late_completion() {
        let mut form = FormState::default();
        let ticket = form.begin_logo_load();
        assert!(form.apply(FormEvent::ClearLogo));
        let late = Logo::from_bytes("late.png", vec![1]);
        assert!(!form.apply(FormEvent::LogoLoaded { ticket, logo: late }));
        assert!(form.render_config().logo.is_none());
        assert!(!form.apply(FormEvent::ClearLogo));
    }

    #[test]
    fn test_render_config_derivation() {
        let mut form = FormState::default();
        form.apply(FormEvent::SetSize("512".into()));
        form.apply(FormEvent::EditColor(ColorTarget::Dots, ColorEdit::Pick(hex("#ff0000"))));
        let config = form.render_config();
        assert_eq!((config.width, config.height), (512, 512));
        assert_eq!(config.margin, 10);
        assert_eq!(config.dots_color, [255, 0, 0, 255]);
        assert_eq!(config.corners_dot_color, [0x22, 0x22, 0x22, 255]);
        assert_eq!(config.background, [255, 255, 255, 0]);
        assert_eq!(config.logo_margin, DEFAULT_LOGO_MARGIN);
        assert!(config.hide_background_dots);
    }

    #[test]
    fn test_unchanged_values_report_no_change() {
        let mut form = FormState::default();
        assert!(!form.apply(FormEvent::SetData("https://example.com".into())));
        assert!(form.apply(FormEvent::SetData("hello".into())));
        assert!(!form.apply(FormEvent::SetDotStyle(DotStyle::Square)));
    }

    #[test]
    fn test_defaults_validate() {
        assert!(FormDefaults::default().validate().is_ok());
        let mut bad = FormDefaults::default();
        bad.size = 50;
        assert!(bad.validate().is_err());
        let mut bad = FormDefaults::default();
        bad.margin = 51;
        assert!(bad.validate().is_err());
        let mut bad = FormDefaults::default();
        bad.logo_scale = 0.75;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_defaults_deserialize_partial_toml() {
        let defaults: FormDefaults = toml::from_str("size = 640\nbackground = \"#FFFFFF\"").unwrap();
        assert_eq!(defaults.size, 640);
        assert_eq!(defaults.background.to_string(), "#ffffff");
        assert_eq!(defaults.margin, DEFAULT_MARGIN);
        assert!(toml::from_str::<FormDefaults>("dot_style = \"hexagon\"").is_err());
    }
}
