use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::util::line_input::LineInput;

/// Letters already carry their case, so SHIFT is dropped from character
/// keys to keep match arms simple
pub(super) fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if matches!(key.code, KeyCode::Char(_)) {
        key.modifiers.remove(KeyModifiers::SHIFT);
    }
    key
}

/// Ctrl+C quits from any mode
pub(super) fn is_force_quit(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Apply a text-editing key to `input`. Returns false for keys that are
/// not editing keys, so the caller can handle them.
pub(super) fn edit_line(input: &mut LineInput, key: KeyEvent) -> bool {
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char(c)) => input.insert(c),
        (_, KeyCode::Backspace) => input.backspace(),
        (_, KeyCode::Delete) => input.delete(),
        (_, KeyCode::Left) => input.left(),
        (_, KeyCode::Right) => input.right(),
        (_, KeyCode::Home) | (KeyModifiers::CONTROL, KeyCode::Char('a')) => input.home(),
        (_, KeyCode::End) | (KeyModifiers::CONTROL, KeyCode::Char('e')) => input.end(),
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => input.clear(),
        _ => return false,
    }
    true
}
