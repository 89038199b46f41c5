//! Main form input handler.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::FormEvent;
use crate::tui::{AppState, FormField, TextTarget, FIELDS};

/// Handle input for the main form
pub fn handle_main_input(state: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.should_quit = true;
            Ok(true)
        }
        KeyCode::Char('q') => {
            state.should_quit = true;
            Ok(true)
        }
        KeyCode::Char('?') => {
            state.open_help_overlay();
            Ok(false)
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.selected = (state.selected + FIELDS.len() - 1) % FIELDS.len();
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.selected = (state.selected + 1) % FIELDS.len();
            Ok(false)
        }
        KeyCode::Left => {
            step_selected(state, false);
            Ok(false)
        }
        KeyCode::Right => {
            step_selected(state, true);
            Ok(false)
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            activate_selected(state);
            Ok(false)
        }
        KeyCode::Char('e') => {
            state.export();
            Ok(false)
        }
        KeyCode::Char('l') => {
            state.open_text_input(TextTarget::LogoPath);
            Ok(false)
        }
        KeyCode::Char('x') => {
            if state.apply(FormEvent::ClearLogo) {
                state.set_status("Logo removed");
            }
            Ok(false)
        }
        KeyCode::Esc => {
            state.clear_messages();
            Ok(false)
        }
        _ => Ok(false),
    }
}

/// Left/Right on a choice or flag row.
fn step_selected(state: &mut AppState, forward: bool) {
    match state.selected_field() {
        FormField::Choice(field) => {
            state.apply(FormEvent::Cycle { field, forward });
        }
        FormField::HideBackgroundDots => {
            state.apply(FormEvent::ToggleHideBackgroundDots);
        }
        _ => {}
    }
}

/// Enter on the selected row.
fn activate_selected(state: &mut AppState) {
    match state.selected_field() {
        FormField::Data => state.open_text_input(TextTarget::Data),
        FormField::Size => state.open_text_input(TextTarget::Size),
        FormField::Margin => state.open_text_input(TextTarget::Margin),
        FormField::LogoScale => state.open_text_input(TextTarget::LogoScale),
        FormField::Logo => state.open_text_input(TextTarget::LogoPath),
        FormField::Color(target) => state.open_color_picker(target),
        FormField::Choice(_) | FormField::HideBackgroundDots => step_selected(state, true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::{ChoiceField, ColorTarget, ErrorCorrectionLevel, FormState};
    use crate::tui::ActiveComponent;

    fn state() -> AppState {
        AppState::new(Config::default(), FormState::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn select(state: &mut AppState, field: FormField) {
        state.selected = FIELDS.iter().position(|f| *f == field).unwrap();
    }

    #[test]
    fn test_selection_wraps() {
        let mut state = state();
        handle_main_input(&mut state, key(KeyCode::Up)).unwrap();
        assert_eq!(state.selected, FIELDS.len() - 1);
        handle_main_input(&mut state, key(KeyCode::Char('j'))).unwrap();
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_arrows_cycle_choices() {
        let mut state = state();
        select(&mut state, FormField::Choice(ChoiceField::ErrorCorrection));
        let before = state.form.error_correction();
        handle_main_input(&mut state, key(KeyCode::Right)).unwrap();
        assert_ne!(state.form.error_correction(), before);
        handle_main_input(&mut state, key(KeyCode::Left)).unwrap();
        assert_eq!(state.form.error_correction(), before);
        assert_eq!(
            state.renderer.config().map(|c| c.error_correction),
            Some(ErrorCorrectionLevel::default())
        );
    }

    #[test]
    fn test_enter_opens_matching_popup() {
        let mut state = state();
        select(&mut state, FormField::Color(ColorTarget::CornersDot));
        handle_main_input(&mut state, key(KeyCode::Enter)).unwrap();
        assert!(matches!(
            state.active_component,
            Some(ActiveComponent::ColorPicker(_))
        ));

        state.close_component();
        select(&mut state, FormField::Margin);
        handle_main_input(&mut state, key(KeyCode::Enter)).unwrap();
        assert!(matches!(
            state.active_component,
            Some(ActiveComponent::TextInput(_, TextTarget::Margin))
        ));
    }

    #[test]
    fn test_space_toggles_hide_dots() {
        let mut state = state();
        select(&mut state, FormField::HideBackgroundDots);
        let before = state.form.hide_background_dots();
        handle_main_input(&mut state, key(KeyCode::Char(' '))).unwrap();
        assert_eq!(state.form.hide_background_dots(), !before);
    }

    #[test]
    fn test_quit_keys() {
        let mut state = state();
        assert!(handle_main_input(&mut state, key(KeyCode::Char('q'))).unwrap());
        assert!(state.should_quit);
        let mut state = self::state();
        assert!(handle_main_input(
            &mut state,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
        )
        .unwrap());
    }

    #[test]
    fn test_escape_clears_error() {
        let mut state = state();
        state.set_error("boom");
        handle_main_input(&mut state, key(KeyCode::Esc)).unwrap();
        assert!(state.error_message.is_none());
    }
}
