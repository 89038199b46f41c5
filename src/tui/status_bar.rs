//! Status bar widget for displaying status messages and help

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::color_picker::ColorPickerMode;
use super::form_panel::FormField;
use super::{ActiveComponent, AppState, Theme};

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar with contextual help
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let mut lines: Vec<Line> = Vec::new();

        // First line: error, status message, or nothing
        if let Some(error) = &state.error_message {
            lines.push(Line::from(vec![
                Span::styled("ERROR: ", Style::default().fg(theme.error).add_modifier(Modifier::BOLD)),
                Span::styled(error.as_str(), Style::default().fg(theme.text)),
            ]));
        } else {
            lines.push(Line::from(Span::styled(
                state.status_message.as_str(),
                Style::default().fg(theme.success),
            )));
        }

        lines.push(Line::from(vec![
            Span::styled("Output: ", Style::default().fg(theme.primary)),
            Span::styled(
                state.config.paths.output_dir.display().to_string(),
                Style::default().fg(theme.text_secondary),
            ),
            Span::styled("  Format: ", Style::default().fg(theme.primary)),
            Span::styled(
                state.form.export_format().label(),
                Style::default().fg(theme.text_secondary),
            ),
        ]));

        lines.push(Self::help_line(state, theme));

        let status = Paragraph::new(lines).style(Style::default().bg(theme.background)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Status ")
                .style(Style::default().bg(theme.background)),
        );
        f.render_widget(status, area);
    }

    /// Key hints for whatever currently has focus.
    fn help_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let hints: Vec<(&str, &str)> = match &state.active_component {
            Some(ActiveComponent::ColorPicker(picker)) if picker.mode() == ColorPickerMode::Hex => {
                vec![("0-9 a-f", "Type"), ("m", "Mode"), ("Enter", "Apply"), ("Esc", "Cancel")]
            }
            Some(ActiveComponent::ColorPicker(_)) => vec![
                ("←→", "±1"),
                ("↑↓", "±10"),
                ("Tab", "Channel"),
                ("m", "Mode"),
                ("Enter", "Apply"),
                ("Esc", "Cancel"),
            ],
            Some(ActiveComponent::TextInput(..)) => {
                vec![("Enter", "Confirm"), ("Ctrl+U", "Clear"), ("Esc", "Cancel")]
            }
            Some(ActiveComponent::HelpOverlay(_)) => vec![("↑↓", "Scroll"), ("Esc/?", "Close")],
            None => {
                let action = match state.selected_field() {
                    FormField::Color(_) => "Pick color",
                    FormField::Logo => "Choose file",
                    FormField::Choice(_) | FormField::HideBackgroundDots => "Change",
                    _ => "Edit",
                };
                vec![
                    ("↑↓", "Select"),
                    ("Enter", action),
                    ("e", "Export"),
                    ("l", "Logo"),
                    ("?", "Help"),
                    ("q", "Quit"),
                ]
            }
        };

        let mut spans = vec![Span::styled("Help: ", Style::default().fg(theme.primary))];
        for (i, (key, action)) in hints.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" | "));
            }
            spans.push(Span::styled(key.to_string(), Style::default().fg(theme.accent)));
            spans.push(Span::raw(": "));
            spans.push(Span::raw(action.to_string()));
        }
        Line::from(spans)
    }
}
