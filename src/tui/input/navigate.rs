use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::route::Route;
use crate::ops::calendar::YearMonth;
use crate::ops::task_query::SortKey;
use crate::tui::app::{App, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Help overlay intercepts everything until closed
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return;
    }

    if app.sort_prefix {
        app.sort_prefix = false;
        if let KeyCode::Char(c) = key.code
            && let Some(sort_key) = sort_key_for(c)
        {
            app.toggle_sort(sort_key);
        }
        return;
    }

    if key.modifiers != KeyModifiers::NONE && key.code != KeyCode::BackTab {
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Tab => app.cycle_route(true),
        KeyCode::BackTab => app.cycle_route(false),
        KeyCode::Char(c @ '1'..='7') => {
            let idx = c as usize - '1' as usize;
            app.navigate(Route::ALL[idx]);
        }
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(-1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor_to_end(false),
        KeyCode::Char('G') | KeyCode::End => app.cursor_to_end(true),
        KeyCode::Char('L') => app.logout(),
        _ => match app.route {
            Route::Users | Route::Projects => {
                handle_list_key(app, key);
            }
            Route::Tasks => handle_tasks_key(app, key),
            Route::Login | Route::Register => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char('i')) {
                    app.mode = Mode::Auth;
                }
            }
            Route::Home | Route::Dashboard => {}
        },
    }
}

/// Add, edit and delete on any list screen. Returns whether the key was used.
fn handle_list_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('a') => app.open_add_form(),
        KeyCode::Char('e') | KeyCode::Enter => app.open_edit_form(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        _ => return false,
    }
    true
}

fn handle_tasks_key(app: &mut App, key: KeyEvent) {
    // The calendar replaces the table, so row actions are off while it shows
    if app.show_calendar {
        match key.code {
            KeyCode::Char('[') | KeyCode::Left => app.calendar_month = app.calendar_month.prev(),
            KeyCode::Char(']') | KeyCode::Right => app.calendar_month = app.calendar_month.next(),
            KeyCode::Char('t') => app.calendar_month = YearMonth::of(app.workspace.today),
            KeyCode::Char('a') => app.open_add_form(),
            KeyCode::Char('c') | KeyCode::Esc => app.show_calendar = false,
            _ => {}
        }
        return;
    }

    if handle_list_key(app, key) {
        return;
    }
    match key.code {
        KeyCode::Char('/') => {
            app.search_input.set(app.task_query.filter.search.clone());
            app.mode = Mode::Search;
        }
        KeyCode::Char('x') => app.cycle_status_filter(),
        KeyCode::Char('y') => app.cycle_priority_filter(),
        KeyCode::Char('z') => app.cycle_project_filter(),
        KeyCode::Char('X') => app.clear_filters(),
        KeyCode::Char('o') => app.sort_prefix = true,
        KeyCode::Char(']') | KeyCode::Right => app.next_page(),
        KeyCode::Char('[') | KeyCode::Left => app.prev_page(),
        KeyCode::Char('c') => app.show_calendar = !app.show_calendar,
        _ => {}
    }
}

/// Second key of the `o` sort prefix
fn sort_key_for(c: char) -> Option<SortKey> {
    match c {
        't' => Some(SortKey::Title),
        'd' => Some(SortKey::DueDate),
        'p' => Some(SortKey::Priority),
        's' => Some(SortKey::Status),
        _ => None,
    }
}
