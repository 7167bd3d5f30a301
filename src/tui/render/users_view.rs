use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::tui::app::App;

/// Render the users table with the cursor row highlighted
pub fn render_users_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let users = app.workspace.users.records();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border).bg(bg))
        .title(Span::styled(
            format!(" Users ({}) ", users.len()),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));

    if users.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            " No users. Press a to add one.",
            Style::default().fg(app.theme.dim).bg(bg),
        )))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(["ID", "Name", "Email", "Role", "Status"]).style(
        Style::default()
            .fg(app.theme.dim)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = users
        .iter()
        .enumerate()
        .map(|(i, user)| {
            let row_bg = if i == app.users_cursor {
                app.theme.selection_bg
            } else {
                bg
            };
            let text = Style::default().fg(app.theme.text).bg(row_bg);
            Row::new(vec![
                Cell::from(Span::styled(user.id.to_string(), text.fg(app.theme.dim))),
                Cell::from(Span::styled(user.name.clone(), text)),
                Cell::from(Span::styled(user.email.clone(), text)),
                Cell::from(Span::styled(user.role.as_str(), text)),
                Cell::from(Span::styled(
                    user.status.as_str(),
                    text.fg(app.theme.user_status_color(user.status)),
                )),
            ])
            .style(Style::default().bg(row_bg))
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Fill(2),
            Constraint::Fill(3),
            Constraint::Length(6),
            Constraint::Length(8),
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
    fn users_table_lists_seed_users() {
        let (app, _dir) = test_app();
        let output = render_to_string(TERM_W, 10, |frame, area| {
            render_users_view(frame, &app, area)
        });
        assert!(output.contains(" Users (3) "));
        let john = line_with(&output, "John Doe");
        assert!(john.contains("john@example.com"));
        assert!(john.contains("admin"));
        assert!(line_with(&output, "Bob Johnson").contains("inactive"));
    }

    #[test]
    fn empty_list_prompts_to_add() {
        let (mut app, _dir) = test_app();
        for id in 1..=3 {
            app.workspace.users.delete(id).unwrap();
        }
        let output = render_to_string(TERM_W, 6, |frame, area| {
            render_users_view(frame, &app, area)
        });
        assert!(output.contains("No users"));
    }
}
