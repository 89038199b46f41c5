//! Input handler modules for different TUI contexts.

pub mod main;
pub mod popups;

use anyhow::Result;
use crossterm::event::KeyEvent;

use crate::tui::AppState;

// Re-export handler functions
pub use main::handle_main_input;
pub use popups::handle_popup_input;

/// Routes a key press to the open popup, or to the main form.
///
/// Returns `Ok(true)` when the application should quit.
pub fn handle_key_event(state: &mut AppState, key: KeyEvent) -> Result<bool> {
    if state.active_component.is_some() {
        handle_popup_input(state, key)
    } else {
        handle_main_input(state, key)
    }
}
