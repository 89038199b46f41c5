//! Component trait pattern for TUI popups.
//!
//! Popups own their state, handle their own keys and report back to
//! `AppState` through `ComponentEvent`s.

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::models::{ColorTarget, ColorValue};
use crate::tui::Theme;

/// A component that can be rendered and handle input.
pub trait Component {
    /// Event type this component can emit
    type Event;

    /// Handle keyboard input.
    ///
    /// Returns `Some(Event)` if the component wants to signal something to the parent.
    /// Returns `None` if input was handled internally without needing parent action.
    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event>;

    /// Render the component within `area`.
    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme);
}

/// Events emitted by popup components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentEvent {
    /// The color picker was confirmed
    ColorSelected {
        /// Slot being edited
        target: ColorTarget,
        /// Final value
        value: ColorValue,
    },
    /// A text prompt was confirmed
    TextSubmitted(String),
    /// User cancelled without making changes
    Cancelled,
    /// Component closed naturally (e.g. help overlay dismissed)
    Closed,
}
