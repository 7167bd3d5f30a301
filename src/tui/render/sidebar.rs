use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::route::Route;
use crate::tui::app::{App, Mode};
use crate::util::unicode::truncate_to_width;

/// Render the navigation sidebar: app name, numbered routes, and who is
/// signed in at the bottom
pub fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.paper;
    let inner_w = area.width.saturating_sub(2) as usize;

    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled(" \u{25B6} ", Style::default().fg(app.theme.primary).bg(bg)),
            Span::styled(
                "Project Manager",
                Style::default()
                    .fg(app.theme.text_bright)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
    ];

    // Focus sits in the content while a form is open
    let sidebar_focused = app.mode == Mode::Navigate;
    for (i, route) in Route::ALL.iter().enumerate() {
        let current = *route == app.route;
        let style = if current {
            let s = Style::default()
                .fg(app.theme.primary)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD);
            if sidebar_focused { s } else { s.remove_modifier(Modifier::BOLD) }
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };
        let label = format!(" {} {}", i + 1, route.title());
        lines.push(Line::from(Span::styled(
            format!("{:<width$}", label, width = inner_w),
            style,
        )));
    }

    // Pad down so the account line sits on the last row
    let height = area.height as usize;
    while lines.len() < height.saturating_sub(1) {
        lines.push(Line::from(""));
    }
    let account = match app.auth.current_user() {
        Some(user) => Span::styled(
            format!(" {}", truncate_to_width(&user.name, inner_w.saturating_sub(1))),
            Style::default().fg(app.theme.secondary).bg(bg),
        ),
        None => Span::styled(" not signed in", Style::default().fg(app.theme.dim).bg(bg)),
    };
    lines.push(Line::from(account));

    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(app.theme.border).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::session::LoginCredentials;
    use crate::tui::app::tests::test_app;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn lists_routes_in_order() {
        let (app, _dir) = test_app();
        let output = render_to_string(22, 14, |frame, area| render_sidebar(frame, &app, area));
        let routes: Vec<&str> = output
            .lines()
            .filter_map(|l| l.trim_start().strip_prefix(char::is_numeric))
            .map(|rest| rest.trim_end_matches('\u{2502}').trim())
            .collect();
        assert_eq!(
            routes,
            vec!["Home", "Dashboard", "Users", "Projects", "Tasks", "Login", "Register"]
        );
        assert!(output.lines().last().unwrap_or_default().contains("not signed in"));
    }

    #[test]
    fn shows_signed_in_user() {
        let (mut app, _dir) = test_app();
        app.auth
            .login(&LoginCredentials {
                email: "ann@example.com".into(),
                password: "secret".into(),
            })
            .unwrap();
        let output = render_to_string(22, 14, |frame, area| render_sidebar(frame, &app, area));
        assert!(output.contains("Test User"));
        assert!(!output.contains("not signed in"));
    }
}
