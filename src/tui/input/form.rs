use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;
use crate::tui::form::{FieldInput, FormState};

use super::*;

/// Keys shared by the modal forms and the login/register screens.
/// Returns false for Enter and Esc, which each caller handles itself.
pub(super) fn edit_form(form: &mut FormState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => return false,
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        _ => {
            let on_choice = matches!(
                form.focused().map(|f| &f.input),
                Some(FieldInput::Choice { .. })
            );
            if on_choice {
                match key.code {
                    KeyCode::Left => form.cycle_choice(false),
                    KeyCode::Right | KeyCode::Char(' ') => form.cycle_choice(true),
                    _ => {}
                }
            } else if let Some(input) = form.focused_text_mut() {
                edit_line(input, key);
            }
        }
    }
    true
}

pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    let Some(form) = app.form.as_mut() else {
        app.cancel_form();
        return;
    };
    if edit_form(form, key) {
        return;
    }
    match key.code {
        KeyCode::Enter => app.submit_form(),
        KeyCode::Esc => app.cancel_form(),
        _ => {}
    }
}
