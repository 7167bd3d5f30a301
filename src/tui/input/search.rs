use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

use super::*;

/// Search filters live as the user types; Enter keeps the text, Esc clears it
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.mode = Mode::Navigate,
        KeyCode::Esc => {
            app.search_input.clear();
            app.set_search("");
            app.mode = Mode::Navigate;
        }
        _ => {
            if edit_line(&mut app.search_input, key) {
                let text = app.search_input.text().to_string();
                app.set_search(&text);
            }
        }
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
    fn typing_filters_immediately() {
        let (mut app, _dir) = test_app();
        app.navigate(Route::Tasks);
        ch(&mut app, '/');
        assert_eq!(app.mode, Mode::Search);
        type_str(&mut app, "DATA");
        assert_eq!(app.task_query.filter.search, "DATA");
        let titles: Vec<String> = app.task_page().items.iter().map(|t| t.title.clone()).collect();
        assert_eq!(titles, vec!["Database Schema", "Data Backfill"]);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.task_query.filter.search, "DATA");
    }

    #[test]
    fn escape_clears_search() {
        let (mut app, _dir) = test_app();
        app.navigate(Route::Tasks);
        ch(&mut app, '/');
        type_str(&mut app, "menu");
        press(&mut app, KeyCode::Esc);
        assert!(app.task_query.filter.search.is_empty());
        assert_eq!(app.task_page().total_items, 12);
    }

    #[test]
    fn reopening_search_keeps_text() {
        let (mut app, _dir) = test_app();
        app.navigate(Route::Tasks);
        ch(&mut app, '/');
        type_str(&mut app, "api");
        press(&mut app, KeyCode::Enter);
        ch(&mut app, '/');
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.task_query.filter.search, "ap");
    }
}
