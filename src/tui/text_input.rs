//! Single-line text prompt used for form text fields and the logo path.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::component::{Component, ComponentEvent};
use super::{centered_rect, Theme};

/// Text prompt component
#[derive(Debug, Clone)]
pub struct TextInput {
    title: String,
    value: String,
    hint: String,
}

impl TextInput {
    /// Opens a prompt pre-filled with `value`.
    pub fn new(title: impl Into<String>, value: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            hint: hint.into(),
        }
    }

    /// Current text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Component for TextInput {
    type Event = ComponentEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match key.code {
            KeyCode::Esc => return Some(ComponentEvent::Cancelled),
            KeyCode::Enter => return Some(ComponentEvent::TextSubmitted(self.value.clone())),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => self.value.clear(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => self.value.push(c),
            KeyCode::Backspace => {
                self.value.pop();
            }
            _ => {}
        }
        None
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let area = centered_rect(60, 25, area);
        f.render_widget(Clear, area);
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let input = Paragraph::new(format!("{}_", self.value))
            .style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.accent)),
            );
        f.render_widget(input, chunks[0]);

        f.render_widget(
            Paragraph::new(self.hint.as_str()).style(Style::default().fg(theme.text_muted)),
            chunks[1],
        );

        let help = Line::from(vec![
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" Confirm  "),
            Span::styled("Ctrl+U", Style::default().fg(theme.accent)),
            Span::raw(" Clear  "),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::raw(" Cancel"),
        ]);
        f.render_widget(Paragraph::new(help), chunks[3]);
    }
}
