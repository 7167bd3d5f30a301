use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

use super::{StatCard, heading_lines, render_stat_cards};

/// Render the landing screen: greeting, four counters, and where to go next
pub fn render_home_view(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // greeting
            Constraint::Length(4), // cards
            Constraint::Min(0),    // shortcuts
        ])
        .split(area);

    let title = match app.auth.current_user() {
        Some(user) => format!("Welcome back, {}", user.name),
        None => "Welcome to Project Manager".to_string(),
    };
    let mut lines = heading_lines(app, title);
    lines.insert(
        1,
        Line::from(Span::styled(
            " Manage your projects, tasks and team in one place",
            Style::default().fg(app.theme.dim).bg(app.theme.background),
        )),
    );
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(app.theme.background)),
        chunks[0],
    );

    let stats = app.workspace.home_stats();
    let active_users = format!("{} active", stats.active_users);
    render_stat_cards(
        frame,
        app,
        chunks[1],
        &[
            StatCard {
                title: "Users",
                value: stats.total_users,
                caption: &active_users,
                color: app.theme.primary,
            },
            StatCard {
                title: "Projects",
                value: stats.active_projects,
                caption: "active",
                color: app.theme.blue,
            },
            StatCard {
                title: "Completed",
                value: stats.completed_tasks,
                caption: "tasks",
                color: app.theme.green,
            },
            StatCard {
                title: "Upcoming",
                value: stats.upcoming_deadlines,
                caption: "next 7 days",
                color: app.theme.orange,
            },
        ],
    );

    let key = Style::default().fg(app.theme.primary).bg(app.theme.background);
    let desc = Style::default().fg(app.theme.text).bg(app.theme.background);
    let mut shortcuts = vec![Line::from("")];
    for (k, d) in [
        ("2", "Dashboard: project progress and overdue work"),
        ("5", "Tasks: search, filter, sort and the calendar"),
        ("6", "Login to keep your session between runs"),
    ] {
        shortcuts.push(Line::from(vec![
            Span::styled(format!(" {}  ", k), key),
            Span::styled(d, desc),
        ]));
    }
    frame.render_widget(
        Paragraph::new(shortcuts).style(Style::default().bg(app.theme.background)),
        chunks[2],
    );
}
