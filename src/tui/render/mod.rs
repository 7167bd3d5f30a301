pub mod auth_view;
pub mod calendar_view;
pub mod confirm_popup;
pub mod dashboard_view;
pub mod form_popup;
pub mod help_overlay;
pub mod home_view;
pub mod projects_view;
pub mod sidebar;
pub mod status_row;
pub mod tasks_view;
pub mod users_view;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use regex::Regex;

use crate::model::route::Route;

use super::app::App;

/// Columns taken by the sidebar
pub const SIDEBAR_W: u16 = 22;

/// Main render function: dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: body | status row (1 row); body is sidebar | content
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_W), Constraint::Min(1)])
        .split(rows[0]);

    sidebar::render_sidebar(frame, app, cols[0]);
    render_content(frame, app, cols[1]);

    // Overlays, topmost last
    if let Some(form) = &app.form {
        form_popup::render_form_popup(frame, app, form, area);
    }
    if let Some(pending) = &app.pending_delete {
        confirm_popup::render_confirm_popup(frame, app, pending, area);
    }
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }

    status_row::render_status_row(frame, app, rows[1]);
}

/// The screen for the current route
pub fn render_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.route {
        Route::Home => home_view::render_home_view(frame, app, area),
        Route::Dashboard => dashboard_view::render_dashboard_view(frame, app, area),
        Route::Users => users_view::render_users_view(frame, app, area),
        Route::Projects => projects_view::render_projects_view(frame, app, area),
        Route::Tasks if app.show_calendar => calendar_view::render_calendar_view(frame, app, area),
        Route::Tasks => tasks_view::render_tasks_view(frame, app, area),
        Route::Login | Route::Register => auth_view::render_auth_view(frame, app, area),
    }
}

/// Bold screen heading plus a blank line
pub(super) fn heading_lines<'a>(app: &App, title: impl Into<String>) -> Vec<Line<'a>> {
    let style = Style::default()
        .fg(app.theme.text_bright)
        .bg(app.theme.background)
        .add_modifier(Modifier::BOLD);
    vec![
        Line::from(Span::styled(format!(" {}", title.into()), style)),
        Line::from(""),
    ]
}

/// One counter card on the Home and Dashboard screens
pub(super) struct StatCard<'a> {
    pub title: &'a str,
    pub value: usize,
    pub caption: &'a str,
    pub color: Color,
}

/// Lay the cards out side by side in equal columns
pub(super) fn render_stat_cards(frame: &mut Frame, app: &App, area: Rect, cards: &[StatCard]) {
    if cards.is_empty() {
        return;
    }
    let bg = app.theme.paper;
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, cards.len() as u32); cards.len()])
        .split(area);
    for (card, rect) in cards.iter().zip(cols.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border).bg(bg))
            .title(Span::styled(
                format!(" {} ", card.title),
                Style::default().fg(app.theme.dim).bg(bg),
            ))
            .style(Style::default().bg(bg));
        let lines = vec![
            Line::from(Span::styled(
                format!(" {}", card.value),
                Style::default()
                    .fg(card.color)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(" {}", card.caption),
                Style::default().fg(app.theme.dim).bg(bg),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), *rect);
    }
}

/// A popup rectangle of fixed size centered in `area`, clipped to fit
pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// Case-insensitive literal matcher for the task search text, None when the
/// search is blank
pub(super) fn search_regex(search: &str) -> Option<Regex> {
    let needle = search.trim();
    if needle.is_empty() {
        return None;
    }
    Regex::new(&format!("(?i){}", regex::escape(needle))).ok()
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let Some(re) = search_re else {
        spans.push(Span::styled(text.to_string(), base_style));
        return;
    };

    let mut last_end = 0;
    for m in re.find_iter(text) {
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(m.as_str().to_string(), highlight_style));
        last_end = m.end();
    }
    if last_end < text.len() || text.is_empty() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::tests::test_app;
    use test_helpers::*;

    #[test]
    fn highlight_splits_on_matches() {
        let re = search_regex(" data ");
        let mut spans = Vec::new();
        let hl = Style::default().add_modifier(Modifier::BOLD);
        push_highlighted_spans(&mut spans, "Data Backfill data", Style::default(), hl, re.as_ref());
        let parts: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(parts, vec!["Data", " Backfill ", "data"]);
        assert_eq!(spans[0].style, hl);
    }

    #[test]
    fn blank_search_has_no_regex() {
        assert!(search_regex("   ").is_none());
        // metacharacters are literal
        assert!(search_regex("a.b").unwrap().is_match("A.B"));
        assert!(!search_regex("a.b").unwrap().is_match("axb"));
    }

    #[test]
    fn popup_is_clipped_to_area() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered_rect_fixed(20, 4, area), Rect::new(10, 3, 20, 4));
        assert_eq!(centered_rect_fixed(60, 20, area), area);
    }

    #[test]
    fn full_frame_has_sidebar_content_and_status() {
        let (app, _dir) = test_app();
        let output = render_to_string(TERM_W, TERM_H, |frame, _area| render(frame, &app));
        assert!(output.contains("1 Home"));
        assert!(output.contains("Welcome"));
        // key hints on the last row
        let last = output.lines().last().unwrap_or_default();
        assert!(last.contains("? help"), "{last}");
    }

    #[test]
    fn overlays_draw_over_content() {
        let (mut app, _dir) = test_app();
        app.navigate(Route::Users);
        app.request_delete();
        let output = render_to_string(TERM_W, TERM_H, |frame, _area| render(frame, &app));
        assert!(output.contains("Delete user John Doe?"));

        app.cancel_delete();
        app.show_help = true;
        let output = render_to_string(TERM_W, TERM_H, |frame, _area| render(frame, &app));
        assert!(output.contains("Key Bindings"));
    }
}
