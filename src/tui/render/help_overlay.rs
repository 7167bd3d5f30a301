use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::route::Route;
use crate::tui::app::App;

use super::centered_rect_fixed;

const HELP_W: u16 = 56;
const KEY_COL: usize = 14;

const LIST_KEYS: &[(&str, &str)] = &[
    ("\u{2191}\u{2193}/jk", "Move cursor"),
    ("g/G", "Jump to top/bottom"),
    ("a", "Add"),
    ("e/Enter", "Edit selected"),
    ("d/Del", "Delete selected"),
];

const TASK_KEYS: &[(&str, &str)] = &[
    ("a/e/d", "Add, edit, delete"),
    ("/", "Search title and description"),
    ("x y z", "Cycle status, priority, project filter"),
    ("X", "Clear filters"),
    ("o t/d/p/s", "Sort by column (again to flip)"),
    ("[ ]", "Previous/next page"),
    ("c", "Toggle calendar"),
];

const CALENDAR_KEYS: &[(&str, &str)] = &[
    ("[ ]", "Previous/next month"),
    ("t", "Back to this month"),
    ("c", "Back to the task table"),
];

const AUTH_KEYS: &[(&str, &str)] = &[
    ("Enter/i", "Start typing"),
    ("Tab", "Next field"),
    ("Esc", "Back to the sidebar"),
];

const GLOBAL_KEYS: &[(&str, &str)] = &[
    ("1-7", "Go to screen N"),
    ("Tab/S-Tab", "Next/previous screen"),
    ("L", "Sign out"),
    ("?", "Toggle this help"),
    ("q", "Quit"),
    ("Ctrl+C", "Quit (any mode)"),
];

/// Bindings for the screen under the overlay, if it has any of its own
fn route_section(app: &App) -> Option<(String, &'static [(&'static str, &'static str)])> {
    let keys = match app.route {
        Route::Users | Route::Projects => LIST_KEYS,
        Route::Tasks if app.show_calendar => CALENDAR_KEYS,
        Route::Tasks => TASK_KEYS,
        Route::Login | Route::Register => AUTH_KEYS,
        Route::Home | Route::Dashboard => return None,
    };
    Some((app.route.title().to_string(), keys))
}

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.paper;
    let key_style = Style::default()
        .fg(app.theme.primary)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let section = |lines: &mut Vec<Line<'static>>, title: String, keys: &[(&'static str, &'static str)]| {
        lines.push(Line::from(Span::styled(format!(" {}", title), header_style)));
        for (key, desc) in keys {
            lines.push(Line::from(vec![
                Span::styled(format!(" {:<width$}", key, width = KEY_COL), key_style),
                Span::styled(*desc, desc_style),
            ]));
        }
    };

    let mut lines: Vec<Line<'static>> = vec![
        Line::from(Span::styled(" Key Bindings", header_style)),
        Line::from(""),
    ];
    if let Some((title, keys)) = route_section(app) {
        section(&mut lines, title, keys);
        lines.push(Line::from(""));
    }
    section(&mut lines, "Global".to_string(), GLOBAL_KEYS);

    let overlay_area = centered_rect_fixed(HELP_W, lines.len() as u16 + 2, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(
        Paragraph::new(lines).block(block).style(Style::default().bg(bg)),
        overlay_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::tests::test_app;
    use crate::tui::render::test_helpers::*;

    fn help(app: &App) -> String {
        render_to_string(TERM_W, TERM_H, |frame, area| {
            render_help_overlay(frame, app, area)
        })
    }

    #[test]
    fn tasks_help_lists_filter_keys() {
        let (mut app, _dir) = test_app();
        app.navigate(Route::Tasks);
        let output = help(&app);
        assert!(output.contains("Cycle status, priority, project filter"));
        assert!(output.contains("Go to screen N"));
    }

    #[test]
    fn calendar_help_replaces_table_keys() {
        let (mut app, _dir) = test_app();
        app.navigate(Route::Tasks);
        app.show_calendar = true;
        let output = help(&app);
        assert!(output.contains("Previous/next month"));
        assert!(!output.contains("Clear filters"));
    }

    #[test]
    fn home_help_is_global_only() {
        let (app, _dir) = test_app();
        let output = help(&app);
        assert!(!output.contains("Toggle calendar"));
        assert!(output.contains("Sign out"));
    }
}
