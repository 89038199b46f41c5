//! Left-hand field list of the main screen.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Theme;
use crate::models::{ChoiceField, ColorTarget, FormState};

/// Section heading in the field list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldGroup {
    /// Payload and symbol geometry
    Basic,
    /// Shapes and logo
    Style,
    /// Color slots
    Colors,
    /// Output settings
    Export,
}

impl FieldGroup {
    const fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Style => "Style",
            Self::Colors => "Colors",
            Self::Export => "Export",
        }
    }
}

/// One row of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Encoded text
    Data,
    /// Image size
    Size,
    /// Quiet margin
    Margin,
    /// An enum-valued field
    Choice(ChoiceField),
    /// A color slot
    Color(ColorTarget),
    /// Logo file
    Logo,
    /// Logo size relative to the symbol
    LogoScale,
    /// Clear modules behind the logo
    HideBackgroundDots,
}

/// Rows in display order.
pub const FIELDS: [FormField; 15] = [
    FormField::Data,
    FormField::Size,
    FormField::Margin,
    FormField::Choice(ChoiceField::ErrorCorrection),
    FormField::Choice(ChoiceField::DotStyle),
    FormField::Choice(ChoiceField::CornerSquareStyle),
    FormField::Choice(ChoiceField::CornerDotStyle),
    FormField::Logo,
    FormField::LogoScale,
    FormField::HideBackgroundDots,
    FormField::Color(ColorTarget::Dots),
    FormField::Color(ColorTarget::Background),
    FormField::Color(ColorTarget::CornersSquare),
    FormField::Color(ColorTarget::CornersDot),
    FormField::Choice(ChoiceField::ExportFormat),
];

const DATA_PREVIEW_CHARS: usize = 28;

impl FormField {
    /// Row label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Data => "Data",
            Self::Size => "Size",
            Self::Margin => "Margin",
            Self::Choice(ChoiceField::ErrorCorrection) => "Error Correction",
            Self::Choice(ChoiceField::DotStyle) => "Dot Style",
            Self::Choice(ChoiceField::CornerSquareStyle) => "Corner Square",
            Self::Choice(ChoiceField::CornerDotStyle) => "Corner Dot",
            Self::Choice(ChoiceField::ExportFormat) => "Format",
            Self::Color(target) => target.label(),
            Self::Logo => "Logo",
            Self::LogoScale => "Logo Scale",
            Self::HideBackgroundDots => "Hide Dots Behind Logo",
        }
    }

    /// Section the row is listed under.
    #[must_use]
    pub const fn group(self) -> FieldGroup {
        match self {
            Self::Data | Self::Size | Self::Margin | Self::Choice(ChoiceField::ErrorCorrection) => {
                FieldGroup::Basic
            }
            Self::Choice(ChoiceField::ExportFormat) => FieldGroup::Export,
            Self::Color(_) => FieldGroup::Colors,
            Self::Choice(_) | Self::Logo | Self::LogoScale | Self::HideBackgroundDots => {
                FieldGroup::Style
            }
        }
    }

    /// Whether Enter opens a text prompt for this row.
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Data | Self::Size | Self::Margin | Self::LogoScale)
    }

    /// Current value as shown in the list.
    #[must_use]
    pub fn value_text(self, form: &FormState) -> String {
        match self {
            Self::Data => {
                let data = form.data();
                if data.chars().count() > DATA_PREVIEW_CHARS {
                    let head: String = data.chars().take(DATA_PREVIEW_CHARS - 1).collect();
                    format!("{head}…")
                } else {
                    data.to_string()
                }
            }
            Self::Size => numeric(form.size_text(), &form.size().to_string(), " px"),
            Self::Margin => numeric(form.margin_text(), &form.margin().to_string(), " px"),
            Self::LogoScale => numeric(form.logo_scale_text(), &form.logo_scale().to_string(), ""),
            Self::Choice(ChoiceField::ErrorCorrection) => form.error_correction().label().to_string(),
            Self::Choice(ChoiceField::DotStyle) => form.dot_style().label().to_string(),
            Self::Choice(ChoiceField::CornerSquareStyle) => form.corner_square_style().label().to_string(),
            Self::Choice(ChoiceField::CornerDotStyle) => form.corner_dot_style().label().to_string(),
            Self::Choice(ChoiceField::ExportFormat) => form.export_format().label().to_string(),
            Self::Color(target) => form.color_slot(target).value().to_string(),
            Self::Logo => {
                let slot = form.logo();
                match (slot.current(), slot.is_loading()) {
                    (_, true) => "loading…".to_string(),
                    (Some(logo), false) => logo.name.clone(),
                    (None, false) => "none".to_string(),
                }
            }
            Self::HideBackgroundDots => {
                let state = if form.hide_background_dots() { "on" } else { "off" };
                state.to_string()
            }
        }
    }
}

/// Shows typed text, plus the value actually used when they differ.
fn numeric(text: &str, used: &str, unit: &str) -> String {
    if text.trim() == used {
        format!("{used}{unit}")
    } else {
        format!("{text} (using {used}{unit})")
    }
}

/// Lines for the field list plus the line index of the selected row.
#[must_use]
pub fn field_lines(form: &FormState, selected: usize, theme: &Theme) -> (Vec<Line<'static>>, usize) {
    let mut lines = Vec::new();
    let mut selected_line = 0;
    let mut group = None;

    for (index, field) in FIELDS.iter().enumerate() {
        if group != Some(field.group()) {
            if group.is_some() {
                lines.push(Line::from(""));
            }
            group = Some(field.group());
            lines.push(Line::from(Span::styled(
                field.group().label(),
                Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
            )));
        }

        let is_selected = index == selected;
        if is_selected {
            selected_line = lines.len();
        }
        let marker = if is_selected { "▶ " } else { "  " };
        let label_style = if is_selected {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text_secondary)
        };

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(theme.accent)),
            Span::styled(format!("{:<22}", field.label()), label_style),
        ];
        if let FormField::Color(target) = field {
            let value = form.color_slot(*target).value();
            let swatch = if value.is_transparent() {
                Span::styled("░░", Style::default().fg(theme.text_muted))
            } else {
                Span::styled("  ", Style::default().bg(value.display_rgb().to_ratatui_color()))
            };
            spans.push(swatch);
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(field.value_text(form), Style::default().fg(theme.text)));
        lines.push(Line::from(spans));
    }

    (lines, selected_line)
}

/// Field list widget
pub struct FormPanel;

impl FormPanel {
    /// Renders the list, scrolled so the selected row stays visible.
    pub fn render(f: &mut Frame, area: Rect, form: &FormState, selected: usize, theme: &Theme) {
        let (lines, selected_line) = field_lines(form, selected, theme);
        let visible = usize::from(area.height.saturating_sub(2));
        let scroll = (selected_line + 1).saturating_sub(visible);

        let panel = Paragraph::new(lines)
            .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0))
            .style(Style::default().bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" QR Settings ")
                    .border_style(Style::default().fg(theme.primary)),
            );
        f.render_widget(panel, area);
    }
}
