//! Key mapping from terminal events to viewer actions.

use crate::types::ControlAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to viewer actions.
pub fn handle_key_event(key: KeyEvent) -> Option<ControlAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Enter => {
            Some(ControlAction::TogglePlay)
        }
        KeyCode::Char('m') | KeyCode::Char('M') => Some(ControlAction::CycleMode),
        KeyCode::Char('g') | KeyCode::Char('G') => Some(ControlAction::ToggleGridlines),
        _ => None,
    }
}

/// Check if key should quit the viewer.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
