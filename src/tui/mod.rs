//! Terminal user interface components and state management.
//!
//! This module contains the main TUI loop, `AppState` and the widgets of
//! the QR designer screen.

pub mod color_picker;
pub mod component;
pub mod form_panel;
pub mod handlers;
pub mod help_overlay;
pub mod preview;
pub mod status_bar;
pub mod text_input;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crate::branding::APP_DISPLAY_NAME;
use crate::config::Config;
use crate::models::{ColorTarget, FormEvent, FormState};
use crate::render::{Renderer, StyledQrRenderer};
use crate::services::{ExportService, LogoLoader, LogoMessage};

pub use color_picker::ColorPicker;
pub use component::{Component, ComponentEvent};
pub use form_panel::{FormField, FormPanel, FIELDS};
pub use help_overlay::HelpOverlay;
pub use preview::PreviewPanel;
pub use status_bar::StatusBar;
pub use text_input::TextInput;
pub use theme::Theme;

/// What a text prompt writes to when confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTarget {
    /// Payload
    Data,
    /// Size field
    Size,
    /// Margin field
    Margin,
    /// Logo scale field
    LogoScale,
    /// Path of a logo file to load
    LogoPath,
}

/// Active popup component
#[derive(Debug, Clone)]
pub enum ActiveComponent {
    /// Color picker for one slot
    ColorPicker(ColorPicker),
    /// Text prompt and where its result goes
    TextInput(TextInput, TextTarget),
    /// Help overlay
    HelpOverlay(HelpOverlay),
}

/// Application state - single source of truth
///
/// Widgets read from this state immutably; only the handlers change it.
pub struct AppState {
    // Core data
    /// Form being edited
    pub form: FormState,
    /// Renderer holding the last good drawing
    pub renderer: StyledQrRenderer,
    /// Background logo reads
    pub logo_loader: LogoLoader,
    /// Application configuration
    pub config: Config,

    // UI state
    /// Current UI theme
    pub theme: Theme,
    /// Index into [`FIELDS`] of the selected row
    pub selected: usize,
    /// Currently open popup (if any)
    pub active_component: Option<ActiveComponent>,
    /// Status bar message
    pub status_message: String,
    /// Current error message (if any)
    pub error_message: Option<String>,

    // Control flags
    /// Whether application should exit
    pub should_quit: bool,
}

impl AppState {
    /// Creates the state and draws the first preview.
    #[must_use]
    pub fn new(config: Config, form: FormState) -> Self {
        let theme = Theme::from_mode(config.ui.theme_mode);
        let mut state = Self {
            form,
            renderer: StyledQrRenderer::new(),
            logo_loader: LogoLoader::new(),
            config,
            theme,
            selected: 0,
            active_component: None,
            status_message: String::new(),
            error_message: None,
            should_quit: false,
        };
        state.refresh_preview();
        if state.config.ui.show_help_on_startup {
            state.open_help_overlay();
        }
        state
    }

    /// The selected form row.
    #[must_use]
    pub fn selected_field(&self) -> FormField {
        FIELDS[self.selected.min(FIELDS.len() - 1)]
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.error_message = None;
    }

    /// Set error message
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error_message = Some(error.into());
    }

    /// Clear status and error messages
    pub fn clear_messages(&mut self) {
        self.status_message.clear();
        self.error_message = None;
    }

    /// Applies a form event and redraws when something changed.
    pub fn apply(&mut self, event: FormEvent) -> bool {
        let changed = self.form.apply(event);
        if changed {
            self.refresh_preview();
        }
        changed
    }

    /// Pushes the current form into the renderer.
    ///
    /// On failure the previous preview stays and the error goes to the status bar.
    pub fn refresh_preview(&mut self) {
        match self.renderer.update(&self.form.render_config()) {
            Ok(()) => {
                if self.error_message.is_some() {
                    self.error_message = None;
                }
            }
            Err(e) => {
                tracing::warn!("Render failed: {e:#}");
                self.set_error(format!("Preview not updated: {e:#}"));
            }
        }
    }

    /// Exports the current drawing to the configured output directory.
    ///
    /// Refuses when the drawing no longer matches the form, so a failed
    /// render never exports the last good preview under new settings.
    pub fn export(&mut self) {
        let format = self.form.export_format();
        if self.renderer.config() != Some(&self.form.render_config()) {
            tracing::warn!("Export skipped: preview is out of date with the form");
            self.set_error("Nothing exported: the current settings could not be rendered");
            return;
        }
        let result = self.renderer.export(format).and_then(|image| {
            let path = ExportService::default_path(&self.config.paths.output_dir, &image);
            ExportService::write(&path, &image).map(|()| path)
        });
        match result {
            Ok(path) => self.set_status(format!("Exported {} to {}", format.label(), path.display())),
            Err(e) => {
                tracing::warn!("Export failed: {e:#}");
                self.set_error(format!("Export failed: {e:#}"));
            }
        }
    }

    /// Starts reading a logo file; newer requests supersede older ones.
    pub fn load_logo(&mut self, path: PathBuf) {
        let ticket = self.form.begin_logo_load();
        self.set_status(format!("Loading logo {}...", path.display()));
        self.logo_loader.start(ticket, path);
    }

    /// Applies finished logo reads.
    pub fn poll_logo(&mut self) {
        for message in self.logo_loader.poll() {
            let outcome = match &message {
                LogoMessage::Loaded { logo, .. } => Ok(logo.name.clone()),
                LogoMessage::Failed { error, .. } => Err(error.clone()),
            };
            // Stale tickets are rejected by the form
            if !self.form.apply(message.into_event()) {
                tracing::debug!("Discarded superseded logo result");
                continue;
            }
            match outcome {
                Ok(name) => {
                    self.set_status(format!("Logo loaded: {name}"));
                    self.refresh_preview();
                }
                Err(error) => self.set_error(format!("Failed to load logo: {error}")),
            }
        }
    }

    /// Open the color picker for `target`
    pub fn open_color_picker(&mut self, target: ColorTarget) {
        let picker = ColorPicker::new(target, self.form.color_slot(target).clone());
        self.active_component = Some(ActiveComponent::ColorPicker(picker));
    }

    /// Open a text prompt for `target`, pre-filled with the current value
    pub fn open_text_input(&mut self, target: TextTarget) {
        let (title, value, hint) = match target {
            TextTarget::Data => ("Data", self.form.data().to_string(), "Text or URL to encode"),
            TextTarget::Size => ("Size", self.form.size_text().to_string(), "Pixels, 100-1000"),
            TextTarget::Margin => ("Margin", self.form.margin_text().to_string(), "Pixels, 0-50"),
            TextTarget::LogoScale => (
                "Logo Scale",
                self.form.logo_scale_text().to_string(),
                "Fraction of the code, 0.1-0.5",
            ),
            TextTarget::LogoPath => ("Logo File", String::new(), "Path to a PNG, JPEG, GIF or WEBP image"),
        };
        let input = TextInput::new(title, value, hint);
        self.active_component = Some(ActiveComponent::TextInput(input, target));
    }

    /// Open the help overlay
    pub fn open_help_overlay(&mut self) {
        self.active_component = Some(ActiveComponent::HelpOverlay(HelpOverlay::new()));
    }

    /// Close the currently active component
    pub fn close_component(&mut self) {
        self.active_component = None;
    }
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        terminal.draw(|f| render(f, state))?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            // Resize events just trigger the next redraw
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handlers::handle_key_event(state, key)? {
                    break; // User quit
                }
            }
        }

        state.poll_logo();

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Sets up the terminal, runs the loop and always restores the terminal.
pub fn launch(state: &mut AppState) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_tui(state, &mut terminal);
    restore_terminal(terminal)?;
    result
}

/// Render the UI from current state
fn render(f: &mut Frame, state: &AppState) {
    // Fill entire screen with theme background color first
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Form and preview
            Constraint::Length(5), // Status bar
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], state);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);
    FormPanel::render(f, main[0], &state.form, state.selected, &state.theme);
    let preview = state.renderer.preview().zip(state.renderer.config());
    PreviewPanel::render(f, main[1], preview, &state.theme);

    StatusBar::render(f, chunks[2], state, &state.theme);

    if let Some(component) = &state.active_component {
        match component {
            ActiveComponent::ColorPicker(picker) => picker.render(f, f.area(), &state.theme),
            ActiveComponent::TextInput(input, _) => input.render(f, f.area(), &state.theme),
            ActiveComponent::HelpOverlay(help) => help.render(f, f.area(), &state.theme),
        }
    }
}

/// Render title bar with the app name and the logo state
fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let logo = match (state.form.logo().current(), state.form.logo().is_loading()) {
        (_, true) => " - loading logo".to_string(),
        (Some(logo), false) => format!(" - logo: {}", logo.name),
        (None, false) => String::new(),
    };
    let title = format!(" {APP_DISPLAY_NAME}{logo}");

    let title_widget = Paragraph::new(title)
        .style(
            Style::default()
                .fg(state.theme.primary)
                .bg(state.theme.background)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().bg(state.theme.background)),
        );

    f.render_widget(title_widget, area);
}

/// Helper to create a centered rectangle
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
