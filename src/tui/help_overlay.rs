//! Help overlay listing every keyboard shortcut, opened with '?'.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

use super::component::{Component, ComponentEvent};
use super::{centered_rect, Theme};

/// (section, [(keys, description)])
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "FORM",
        &[
            ("↑/k  ↓/j", "Select field"),
            ("←  →", "Cycle option / toggle flag"),
            ("Enter / Space", "Edit text, open color picker, change option"),
            ("Esc", "Dismiss the current message"),
        ],
    ),
    (
        "LOGO",
        &[
            ("l", "Load a logo from a file path"),
            ("x", "Remove the logo"),
        ],
    ),
    (
        "COLOR PICKER",
        &[
            ("m", "Switch RGB / CMYK / HEX input"),
            ("Tab  Shift+Tab", "Next / previous channel"),
            ("←  →", "Adjust channel by 1"),
            ("↑  ↓", "Adjust channel by 10"),
            ("0-9 a-f", "Type hex digits (HEX mode)"),
            ("Backspace / Del", "Erase one digit / clear (HEX mode)"),
            ("t", "Toggle transparent (background only)"),
            ("Enter", "Apply"),
            ("Esc", "Cancel"),
        ],
    ),
    (
        "TEXT PROMPTS",
        &[
            ("Enter", "Confirm"),
            ("Ctrl+U", "Clear"),
            ("Esc", "Cancel"),
        ],
    ),
    (
        "GOOGLE MAPS LINKS",
        &[
            ("1", "Open Google Maps and search for the place"),
            ("2", "Press Share"),
            ("3", "Copy link (https://maps.app.goo.gl/...)"),
            ("4", "Paste the link into the Data field"),
        ],
    ),
    (
        "SYSTEM",
        &[
            ("e", "Export with the selected format to the output directory"),
            ("?", "Toggle this help"),
            ("q / Ctrl+C", "Quit"),
        ],
    ),
];

const TIPS: &[&str] = &[
    "Higher error correction leaves more room for a logo.",
    "Partial hex input is kept but not applied until it has six digits.",
    "Invalid size, margin or scale text falls back to the default value.",
    "Short Maps links make a compact code that scans more easily.",
];

/// Help overlay component
#[derive(Debug, Clone, Default)]
pub struct HelpOverlay {
    scroll_offset: usize,
}

impl HelpOverlay {
    /// Creates an overlay scrolled to the top.
    #[must_use]
    pub const fn new() -> Self {
        Self { scroll_offset: 0 }
    }

    fn content(theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                "LazyQR - QR code designer",
                Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        for (title, bindings) in SECTIONS {
            lines.push(Line::from(Span::styled(
                format!("═══ {title} ═══"),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            )));
            for (keys, description) in *bindings {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {keys:<20}"), Style::default().fg(theme.success)),
                    Span::styled((*description).to_string(), Style::default().fg(theme.text)),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            "═══ TIPS ═══",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )));
        for tip in TIPS {
            lines.push(Line::from(Span::styled(
                format!("  • {tip}"),
                Style::default().fg(theme.text),
            )));
        }
        lines
    }

    fn total_lines() -> usize {
        SECTIONS.iter().map(|(_, b)| b.len() + 2).sum::<usize>() + TIPS.len() + 3
    }
}

impl Component for HelpOverlay {
    type Event = ComponentEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?' | 'q') => {
                return Some(ComponentEvent::Closed);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.scroll_offset + 1 < Self::total_lines() {
                    self.scroll_offset += 1;
                }
            }
            KeyCode::Home => self.scroll_offset = 0,
            KeyCode::End => self.scroll_offset = Self::total_lines().saturating_sub(1),
            _ => {}
        }
        None
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let modal = centered_rect(60, 80, area);
        f.render_widget(Clear, modal);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(modal);

        let visible_height = usize::from(chunks[0].height.saturating_sub(2));
        let paragraph = Paragraph::new(Self::content(theme))
            .block(
                Block::default()
                    .title(" Help - Keyboard Shortcuts ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.primary)),
            )
            .style(Style::default().fg(theme.text).bg(theme.background))
            .scroll((u16::try_from(self.scroll_offset).unwrap_or(u16::MAX), 0));
        f.render_widget(paragraph, chunks[0]);

        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .style(Style::default().fg(theme.primary));
        let mut scrollbar_state =
            ScrollbarState::new(Self::total_lines().saturating_sub(visible_height))
                .position(self.scroll_offset);
        f.render_stateful_widget(scrollbar, chunks[1], &mut scrollbar_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_line_count_matches_content() {
        assert_eq!(HelpOverlay::content(&Theme::dark()).len(), HelpOverlay::total_lines());
    }

    #[test]
    fn test_explains_sharing_a_maps_location() {
        let text: Vec<String> = HelpOverlay::content(&Theme::dark())
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
            .collect();
        let start = text.iter().position(|l| l.contains("GOOGLE MAPS LINKS")).unwrap();
        let steps = &text[start + 1..start + 5];
        assert!(steps[1].contains("Share"));
        assert!(steps[2].contains("maps.app.goo.gl"));
        assert!(steps[3].contains("Data"));
    }

    #[test]
    fn test_scroll_is_bounded() {
        let mut help = HelpOverlay::new();
        help.handle_input(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE));
        assert_eq!(help.scroll_offset, 0);
        help.handle_input(KeyEvent::new(KeyCode::End, KeyModifiers::NONE));
        help.handle_input(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        assert_eq!(help.scroll_offset, HelpOverlay::total_lines() - 1);
        assert_eq!(
            help.handle_input(KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE)),
            Some(ComponentEvent::Closed)
        );
    }
}
