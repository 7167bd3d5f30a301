use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::tui::app::App;

/// Render the projects table. The task count is by project name, the same
/// link the progress chart uses.
pub fn render_projects_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let projects = app.workspace.projects.records();
    let tasks = app.workspace.tasks.records();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border).bg(bg))
        .title(Span::styled(
            format!(" Projects ({}) ", projects.len()),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));

    if projects.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            " No projects. Press a to add one.",
            Style::default().fg(app.theme.dim).bg(bg),
        )))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(["ID", "Name", "Status", "Tasks", "Description"]).style(
        Style::default()
            .fg(app.theme.dim)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = projects
        .iter()
        .enumerate()
        .map(|(i, project)| {
            let row_bg = if i == app.projects_cursor {
                app.theme.selection_bg
            } else {
                bg
            };
            let text = Style::default().fg(app.theme.text).bg(row_bg);
            let task_count = tasks.iter().filter(|t| t.project == project.name).count();
            Row::new(vec![
                Cell::from(Span::styled(project.id.to_string(), text.fg(app.theme.dim))),
                Cell::from(Span::styled(project.name.clone(), text)),
                Cell::from(Span::styled(
                    project.status.label(),
                    text.fg(app.theme.project_status_color(project.status)),
                )),
                Cell::from(Span::styled(format!("{:>5}", task_count), text)),
                Cell::from(Span::styled(
                    project.description.clone(),
                    text.fg(app.theme.dim),
                )),
            ])
            .style(Style::default().bg(row_bg))
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Length(24),
            Constraint::Length(10),
            Constraint::Length(5),
            Constraint::Fill(1),
        ],
    )
    .header(header)
    .block(block);
    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::tests::test_app;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn projects_show_status_and_task_count() {
        let (app, _dir) = test_app();
        let output = render_to_string(TERM_W, 10, |frame, area| {
            render_projects_view(frame, &app, area)
        });
        assert!(output.contains(" Projects (4) "));
        let api = line_with(&output, "API Integration");
        assert!(api.contains("On Hold"));
        assert!(api.contains("    3 "), "{api}");
        assert!(line_with(&output, "Database Migration").contains("Completed"));
    }
}
