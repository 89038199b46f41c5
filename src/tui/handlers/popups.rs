//! Popup input handlers: color picker, text prompts and help.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;

use crate::models::{ColorTarget, ColorValue, FormEvent};
use crate::tui::{ActiveComponent, AppState, Component, ComponentEvent, TextTarget};

/// Handle input while a popup is open
pub fn handle_popup_input(state: &mut AppState, key: KeyEvent) -> Result<bool> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        state.should_quit = true;
        return Ok(true);
    }

    let event = match state.active_component.as_mut() {
        Some(ActiveComponent::ColorPicker(picker)) => picker.handle_input(key),
        Some(ActiveComponent::TextInput(input, _)) => input.handle_input(key),
        Some(ActiveComponent::HelpOverlay(help)) => help.handle_input(key),
        None => return Ok(false),
    };
    let Some(event) = event else {
        return Ok(false);
    };

    // Every component event ends the popup
    let closed = state.active_component.take();
    match event {
        ComponentEvent::ColorSelected { target, value } => apply_color(state, target, &value),
        ComponentEvent::TextSubmitted(text) => {
            if let Some(ActiveComponent::TextInput(_, target)) = closed {
                submit_text(state, target, text);
            }
        }
        ComponentEvent::Cancelled => state.set_status("Cancelled"),
        ComponentEvent::Closed => {}
    }
    Ok(false)
}

/// Replays the picker result onto the form slot.
fn apply_color(state: &mut AppState, target: ColorTarget, value: &ColorValue) {
    let edits = state.form.color_slot(target).edits_toward(value);
    let mut changed = false;
    for edit in edits {
        changed |= state.apply(FormEvent::EditColor(target, edit));
    }
    if changed {
        state.set_status(format!("{} set to {value}", target.label()));
    }
}

fn submit_text(state: &mut AppState, target: TextTarget, text: String) {
    let event = match target {
        TextTarget::Data => FormEvent::SetData(text),
        TextTarget::Size => FormEvent::SetSize(text),
        TextTarget::Margin => FormEvent::SetMargin(text),
        TextTarget::LogoScale => FormEvent::SetLogoScale(text),
        TextTarget::LogoPath => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                state.set_status("No logo file given");
            } else {
                state.load_logo(expand_home(trimmed));
            }
            return;
        }
    };
    if state.apply(event) {
        state.set_status("Updated");
    }
}

/// Expands a leading `~` to the home directory.
pub(crate) fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    } else if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::{ColorEdit, FormState};
    use crate::tui::color_picker::ColorPicker;

    fn state() -> AppState {
        AppState::new(Config::default(), FormState::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_text_prompt_updates_field() {
        let mut state = state();
        state.open_text_input(TextTarget::Size);
        for _ in 0..3 {
            handle_popup_input(&mut state, key(KeyCode::Backspace)).unwrap();
        }
        for c in "512".chars() {
            handle_popup_input(&mut state, key(KeyCode::Char(c))).unwrap();
        }
        handle_popup_input(&mut state, key(KeyCode::Enter)).unwrap();

        assert!(state.active_component.is_none());
        assert_eq!(state.form.size(), 512);
        assert_eq!(state.renderer.config().map(|c| c.width), Some(512));
    }

    #[test]
    fn test_cancelled_prompt_leaves_form_alone() {
        let mut state = state();
        state.open_text_input(TextTarget::Data);
        handle_popup_input(&mut state, key(KeyCode::Char('!'))).unwrap();
        handle_popup_input(&mut state, key(KeyCode::Esc)).unwrap();
        assert!(state.active_component.is_none());
        assert_eq!(state.form.data(), "https://example.com");
    }

    #[test]
    fn test_picker_commits_on_enter_only() {
        let mut state = state();
        state.open_color_picker(ColorTarget::Dots);
        // Red channel up by 10 from #222222
        handle_popup_input(&mut state, key(KeyCode::Up)).unwrap();
        assert_eq!(state.form.color_slot(ColorTarget::Dots).hex_text(), "#222222");

        handle_popup_input(&mut state, key(KeyCode::Enter)).unwrap();
        assert_eq!(state.form.color_slot(ColorTarget::Dots).hex_text(), "#2c2222");
        assert_eq!(state.renderer.config().map(|c| c.dots_color), Some([0x2c, 0x22, 0x22, 255]));
    }

    #[test]
    fn test_background_picker_can_make_opaque() {
        let mut state = state();
        let mut slot = state.form.color_slot(ColorTarget::Background).clone();
        assert!(slot.value().is_transparent());
        slot.apply(ColorEdit::ToggleTransparent);
        state.active_component = Some(ActiveComponent::ColorPicker(ColorPicker::new(
            ColorTarget::Background,
            slot,
        )));
        handle_popup_input(&mut state, key(KeyCode::Enter)).unwrap();

        let value = state.form.color_slot(ColorTarget::Background).value();
        assert!(!value.is_transparent());
        assert_eq!(state.renderer.config().map(|c| c.background[3]), Some(255));
    }

    #[test]
    fn test_ctrl_c_quits_from_popup() {
        let mut state = state();
        state.open_help_overlay();
        let quit = handle_popup_input(
            &mut state,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        )
        .unwrap();
        assert!(quit);
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("logo.png"), PathBuf::from("logo.png"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/logo.png"), home.join("logo.png"));
        }
    }
}
