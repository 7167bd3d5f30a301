use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

use super::*;

pub(super) fn handle_auth(app: &mut App, key: KeyEvent) {
    let Some(form) = app.auth_form_mut() else {
        app.mode = Mode::Navigate;
        return;
    };
    if edit_form(form, key) {
        return;
    }
    match key.code {
        KeyCode::Enter => app.submit_auth(),
        // Hand the keyboard back to the sidebar
        KeyCode::Esc => app.mode = Mode::Navigate,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crate::model::route::Route;
    use crate::tui::app::Mode;
    use crate::tui::app::tests::test_app;
    use crate::tui::input::test_keys::*;
    use crossterm::event::KeyCode;

    #[test]
    fn register_mismatch_stays_on_form() {
        let (mut app, _dir) = test_app();
        app.navigate(Route::Register);
        for value in ["Ann", "ann@example.com", "one", "two"] {
            type_str(&mut app, value);
            press(&mut app, KeyCode::Tab);
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.route, Route::Register);
        assert_eq!(app.auth.error(), Some("Passwords do not match"));
        assert!(!app.auth.is_authenticated());
        // values survive for correction
        assert_eq!(app.register_form.value(0), "Ann");
    }

    #[test]
    fn login_then_logout() {
        let (mut app, _dir) = test_app();
        app.navigate(Route::Login);
        type_str(&mut app, "ann@example.com");
        press(&mut app, KeyCode::Down);
        type_str(&mut app, "secret");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.route, Route::Dashboard);
        assert_eq!(app.mode, Mode::Navigate);

        ch(&mut app, 'L');
        assert!(!app.auth.is_authenticated());
        assert_eq!(app.status_message.as_deref(), Some("Signed out"));
    }

    #[test]
    fn escape_returns_focus_to_sidebar() {
        let (mut app, _dir) = test_app();
        app.navigate(Route::Login);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
        ch(&mut app, '1');
        assert_eq!(app.route, Route::Home);
    }
}
