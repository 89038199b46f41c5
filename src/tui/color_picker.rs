//! Color picker popup.
//!
//! Edits a copy of one form color slot through the same inputs the form
//! accepts (RGB channels, CMYK channels, hex text, transparency toggle).
//! Nothing reaches the form until the user confirms.

// Allow intentional type casts for gauge math
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Frame,
};

use super::component::{Component, ComponentEvent};
use super::{centered_rect, Theme};
use crate::models::color::is_complete_hex;
use crate::models::{CmykChannel, ColorEdit, ColorSlot, ColorTarget, RgbChannel};

/// Input mode of the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorPickerMode {
    /// Red/green/blue sliders
    #[default]
    Rgb,
    /// Cyan/magenta/yellow/key sliders
    Cmyk,
    /// Typed hex value
    Hex,
}

impl ColorPickerMode {
    const fn next(self) -> Self {
        match self {
            Self::Rgb => Self::Cmyk,
            Self::Cmyk => Self::Hex,
            Self::Hex => Self::Rgb,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Rgb => "RGB",
            Self::Cmyk => "CMYK",
            Self::Hex => "HEX",
        }
    }
}

/// Color picker component
#[derive(Debug, Clone)]
pub struct ColorPicker {
    target: ColorTarget,
    slot: ColorSlot,
    mode: ColorPickerMode,
    rgb_channel: usize,
    cmyk_channel: usize,
}

impl ColorPicker {
    /// Opens the picker on a copy of `slot`.
    #[must_use]
    pub const fn new(target: ColorTarget, slot: ColorSlot) -> Self {
        Self {
            target,
            slot,
            mode: ColorPickerMode::Rgb,
            rgb_channel: 0,
            cmyk_channel: 0,
        }
    }

    /// Current input mode.
    #[must_use]
    pub const fn mode(&self) -> ColorPickerMode {
        self.mode
    }

    /// The slot being edited.
    #[must_use]
    pub const fn slot(&self) -> &ColorSlot {
        &self.slot
    }

    fn next_channel(&mut self, forward: bool) {
        let (index, count) = match self.mode {
            ColorPickerMode::Rgb => (&mut self.rgb_channel, RgbChannel::ALL.len()),
            ColorPickerMode::Cmyk => (&mut self.cmyk_channel, CmykChannel::ALL.len()),
            ColorPickerMode::Hex => return,
        };
        *index = if forward {
            (*index + 1) % count
        } else {
            (*index + count - 1) % count
        };
    }

    /// Moves the active slider by `delta`; the slot clamps the result.
    fn nudge(&mut self, delta: i32) {
        let edit = match self.mode {
            ColorPickerMode::Rgb => {
                let channel = RgbChannel::ALL[self.rgb_channel];
                let value = i32::from(self.slot.rgb().channel(channel)) + delta;
                ColorEdit::Rgb(channel, value.to_string())
            }
            ColorPickerMode::Cmyk => {
                let channel = CmykChannel::ALL[self.cmyk_channel];
                let value = i32::from(self.slot.cmyk().channel(channel)) + delta;
                ColorEdit::Cmyk(channel, value.to_string())
            }
            ColorPickerMode::Hex => return,
        };
        self.slot.apply(edit);
    }

    fn type_hex(&mut self, key: KeyCode) {
        let mut text = self.slot.hex_text();
        match key {
            KeyCode::Char(c) if c.is_ascii_hexdigit() => text.push(c),
            KeyCode::Char('#') | KeyCode::Delete => text = "#".to_string(),
            KeyCode::Backspace => {
                text.pop();
            }
            _ => return,
        }
        self.slot.apply(ColorEdit::Hex(text));
    }

    fn confirm(&self) -> ComponentEvent {
        ComponentEvent::ColorSelected {
            target: self.target,
            value: self.slot.value().clone(),
        }
    }
}

impl Component for ColorPicker {
    type Event = ComponentEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match key.code {
            KeyCode::Esc => return Some(ComponentEvent::Cancelled),
            KeyCode::Enter => return Some(self.confirm()),
            KeyCode::Char('m' | 'M') => self.mode = self.mode.next(),
            KeyCode::Char('t' | 'T') => {
                self.slot.apply(ColorEdit::ToggleTransparent);
            }
            code if self.mode == ColorPickerMode::Hex => self.type_hex(code),
            KeyCode::Tab => self.next_channel(!key.modifiers.contains(KeyModifiers::SHIFT)),
            KeyCode::BackTab => self.next_channel(false),
            KeyCode::Up | KeyCode::Char('k') => self.nudge(10),
            KeyCode::Down | KeyCode::Char('j') => self.nudge(-10),
            KeyCode::Right | KeyCode::Char('l') => self.nudge(1),
            KeyCode::Left | KeyCode::Char('h') => self.nudge(-1),
            _ => {}
        }
        None
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let area = centered_rect(60, 70, area);
        f.render_widget(Clear, area);
        let block = Block::default()
            .title(format!(" {} ", self.target.label()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2), // Mode tabs
                Constraint::Length(8), // Sliders or hex entry
                Constraint::Length(4), // Preview
                Constraint::Length(1), // All representations
                Constraint::Min(0),
                Constraint::Length(2), // Instructions
            ])
            .split(inner);

        self.render_tabs(f, chunks[0], theme);
        if self.slot.value().is_transparent() {
            let note = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Background is transparent.",
                    Style::default().fg(theme.text),
                )),
                Line::from(Span::styled(
                    "Press t to switch to a solid color.",
                    Style::default().fg(theme.text_muted),
                )),
            ]);
            f.render_widget(note, chunks[1]);
        } else if self.mode == ColorPickerMode::Hex {
            self.render_hex_entry(f, chunks[1], theme);
        } else {
            self.render_sliders(f, chunks[1], theme);
        }
        self.render_swatch(f, chunks[2], theme);

        let rgb = self.slot.rgb();
        let summary = Line::from(vec![
            Span::styled(
                self.slot.value().to_string(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {rgb}  {}", self.slot.cmyk()),
                Style::default().fg(theme.text_secondary),
            ),
        ]);
        f.render_widget(Paragraph::new(summary), chunks[3]);

        let mut hints = Vec::new();
        if self.mode != ColorPickerMode::Hex {
            hints.extend([("↑↓", " ±10  "), ("←→", " ±1  "), ("Tab", " Channel  ")]);
        }
        hints.push(("m", " Mode  "));
        if self.slot.allows_transparent() {
            hints.push(("t", " Transparent  "));
        }
        hints.extend([("Enter", " Apply  "), ("Esc", " Cancel")]);
        let spans: Vec<Span> = hints
            .into_iter()
            .flat_map(|(key, action)| {
                [
                    Span::styled(key, Style::default().fg(theme.accent)),
                    Span::raw(action),
                ]
            })
            .collect();
        f.render_widget(Paragraph::new(Line::from(spans)), chunks[5]);
    }
}

impl ColorPicker {
    fn render_tabs(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let mut spans = Vec::new();
        for mode in [ColorPickerMode::Rgb, ColorPickerMode::Cmyk, ColorPickerMode::Hex] {
            let style = if mode == self.mode {
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(theme.text_muted)
            };
            spans.push(Span::styled(format!(" {} ", mode.label()), style));
        }
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_sliders(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let rows: Vec<(&str, u8, u8, Color, bool)> = match self.mode {
            ColorPickerMode::Rgb => {
                let rgb = self.slot.rgb();
                RgbChannel::ALL
                    .iter()
                    .enumerate()
                    .map(|(i, &ch)| {
                        let color = match ch {
                            RgbChannel::Red => Color::Red,
                            RgbChannel::Green => Color::Green,
                            RgbChannel::Blue => Color::Blue,
                        };
                        (ch.label(), rgb.channel(ch), 255, color, i == self.rgb_channel)
                    })
                    .collect()
            }
            ColorPickerMode::Cmyk => {
                let cmyk = self.slot.cmyk();
                CmykChannel::ALL
                    .iter()
                    .enumerate()
                    .map(|(i, &ch)| {
                        let color = match ch {
                            CmykChannel::Cyan => Color::Cyan,
                            CmykChannel::Magenta => Color::Magenta,
                            CmykChannel::Yellow => Color::Yellow,
                            CmykChannel::Key => Color::Gray,
                        };
                        (ch.label(), cmyk.channel(ch), 100, color, i == self.cmyk_channel)
                    })
                    .collect()
            }
            ColorPickerMode::Hex => return,
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(2); rows.len()])
            .split(area);

        for ((label, value, max, color, active), chunk) in rows.into_iter().zip(chunks.iter()) {
            let style = if active {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text_muted)
            };
            let gauge = Gauge::default()
                .gauge_style(style)
                .label(format!("{label}: {value:3}"))
                .percent((u16::from(value) * 100 / u16::from(max)).min(100));
            let row = Rect { height: 1, ..*chunk };
            f.render_widget(gauge, row);
        }
    }

    fn render_hex_entry(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let text = self.slot.hex_text();
        let (status, color) = if is_complete_hex(&text) {
            ("valid", theme.success)
        } else {
            ("incomplete, not applied", theme.warning)
        };
        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(" Hex: ", Style::default().fg(theme.text_muted)),
                Span::styled(
                    format!("{text}_"),
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(format!(" {status}"), Style::default().fg(color))),
            Line::from(Span::styled(
                " Type digits, Backspace to erase, Del to clear",
                Style::default().fg(theme.text_muted),
            )),
        ];
        f.render_widget(Paragraph::new(lines), area);
    }

    fn render_swatch(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default().title(" Preview ").borders(Borders::ALL);
        if self.slot.value().is_transparent() {
            let checker = "░▒".repeat(usize::from(area.width));
            let lines = vec![Line::from(checker.clone()), Line::from(checker)];
            f.render_widget(
                Paragraph::new(lines).style(Style::default().fg(theme.text_muted)).block(block),
                area,
            );
        } else {
            let rgb = self.slot.rgb();
            f.render_widget(block.style(Style::default().bg(rgb.to_ratatui_color())), area);
        }
    }
}
