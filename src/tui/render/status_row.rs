use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::route::Route;
use crate::tui::app::{App, Mode};
use crate::util::unicode::display_width;

/// Key hints for the current mode and screen
fn key_hint(app: &App) -> &'static str {
    if app.show_help {
        return "? close help";
    }
    match app.mode {
        Mode::Search => "Enter keep  Esc clear",
        Mode::Form => "Enter save  Esc cancel",
        Mode::Confirm => "y delete  n keep",
        Mode::Auth => "Enter submit  Esc sidebar",
        Mode::Navigate if app.sort_prefix => "sort by: t title  d due  p priority  s status",
        Mode::Navigate => match app.route {
            Route::Users | Route::Projects => "a add  e edit  d delete  ? help",
            Route::Tasks if app.show_calendar => "[ ] month  t today  c table  ? help",
            Route::Tasks => "/ search  x y z filter  o sort  [ ] page  ? help",
            Route::Login | Route::Register => "Enter type  ? help",
            Route::Home | Route::Dashboard => "1-7 screens  ? help  q quit",
        },
    }
}

/// Render the status row (bottom of screen): the search prompt or the last
/// message on the left, key hints on the right
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();
    let mut cursor_x = None;
    if app.mode == Mode::Search {
        spans.push(Span::styled(
            format!("/{}", app.search_input.text()),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
        cursor_x = Some(1 + app.search_input.cursor_col());
    } else if let Some(message) = &app.status_message {
        spans.push(Span::styled(
            format!(" {}", message),
            Style::default().fg(app.theme.secondary).bg(bg),
        ));
    }

    if !app.hide_key_hints {
        let hint = key_hint(app);
        let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
        let hint_width = display_width(hint) + 1;
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(
                format!("{} ", hint),
                Style::default().fg(app.theme.dim).bg(bg),
            ));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);

    if let Some(x) = cursor_x {
        let x = area.x + (x as u16).min(area.width.saturating_sub(1));
        frame.set_cursor_position((x, area.y));
    }
}
