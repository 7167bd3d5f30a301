use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph};

use crate::tui::app::App;

use super::{StatCard, heading_lines, render_stat_cards};

/// Render the Dashboard: project counters, then a horizontal bar per project
/// showing how many of its tasks are completed
pub fn render_dashboard_view(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(heading_lines(app, "Dashboard"))
            .style(Style::default().bg(app.theme.background)),
        chunks[0],
    );

    let stats = app.workspace.dashboard_stats();
    render_stat_cards(
        frame,
        app,
        chunks[1],
        &[
            StatCard {
                title: "Projects",
                value: stats.total_projects,
                caption: "total",
                color: app.theme.primary,
            },
            StatCard {
                title: "Active",
                value: stats.active_projects,
                caption: "projects",
                color: app.theme.blue,
            },
            StatCard {
                title: "Completed",
                value: stats.completed_projects,
                caption: "projects",
                color: app.theme.green,
            },
            StatCard {
                title: "Overdue",
                value: stats.overdue_tasks,
                caption: "tasks",
                color: if stats.overdue_tasks > 0 {
                    app.theme.red
                } else {
                    app.theme.dim
                },
            },
        ],
    );

    render_progress_chart(frame, app, chunks[2]);
}

fn render_progress_chart(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(app.theme.border).bg(bg))
        .title(Span::styled(
            " Project progress ",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));

    let progress = app.workspace.project_progress();
    if progress.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            " No projects",
            Style::default().fg(app.theme.dim).bg(bg),
        )))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let bars: Vec<Bar> = progress
        .iter()
        .map(|p| {
            Bar::default()
                .label(Line::from(p.name.clone()))
                .value(u64::from(p.progress))
                .text_value(format!("{}%", p.progress))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(1)
        .max(100)
        .bar_style(Style::default().fg(app.theme.primary).bg(bg))
        .value_style(
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.primary),
        )
        .label_style(Style::default().fg(app.theme.text).bg(bg))
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}
