use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::model::task::Task;
use crate::ops::task_query::{SortKey, TaskPage};
use crate::tui::app::App;

use super::{push_highlighted_spans, search_regex};

/// Render the Tasks screen: filter bar, the current page, and the page footer
pub fn render_tasks_view(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // filters + sort
            Constraint::Min(3),    // table
            Constraint::Length(1), // footer
        ])
        .split(area);

    let page = app.task_page();
    render_filter_bar(frame, app, chunks[0]);
    render_task_table(frame, app, &page, chunks[1]);
    render_footer(frame, app, &page, chunks[2]);
}

fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let label = Style::default().fg(app.theme.dim).bg(bg);
    let off = Style::default().fg(app.theme.text).bg(bg);
    let on = Style::default()
        .fg(app.theme.primary)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let filter = &app.task_query.filter;

    let search = filter.search.trim();
    let status = filter.statuses.first().map(|s| s.label().to_string());
    let priority = filter.priorities.first().map(|p| p.label().to_string());
    let project = filter.projects.first().cloned();

    let mut spans = vec![Span::styled(" Search: ", label)];
    if search.is_empty() {
        spans.push(Span::styled("\u{2013}", off));
    } else {
        spans.push(Span::styled(format!("\"{}\"", search), on));
    }
    for (name, value) in [("Status", status), ("Priority", priority), ("Project", project)] {
        spans.push(Span::styled(format!("  {}: ", name), label));
        match value {
            Some(v) => spans.push(Span::styled(v, on)),
            None => spans.push(Span::styled("All", off)),
        }
    }

    let sort = match app.task_query.sort {
        Some(spec) => Line::from(vec![
            Span::styled(" Sort: ", label),
            Span::styled(
                format!("{} {}", spec.key.label(), spec.direction.arrow()),
                on,
            ),
        ]),
        None => Line::from(vec![
            Span::styled(" Sort: ", label),
            Span::styled("list order", off),
        ]),
    };

    frame.render_widget(
        Paragraph::new(vec![Line::from(spans), sort]).style(Style::default().bg(bg)),
        area,
    );
}

/// Header cell text, with the sort arrow on the sorted column
fn header_label(app: &App, title: &'static str, key: Option<SortKey>) -> String {
    match (app.task_query.sort, key) {
        (Some(spec), Some(k)) if spec.key == k => format!("{} {}", title, spec.direction.arrow()),
        _ => title.to_string(),
    }
}

fn render_task_table(frame: &mut Frame, app: &App, page: &TaskPage, area: Rect) {
    let bg = app.theme.background;
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(app.theme.border).bg(bg))
        .style(Style::default().bg(bg));

    if page.items.is_empty() {
        let message = if page.total_items == 0 && app.task_query.filter.is_active() {
            " No tasks match the current filters (X clears them)"
        } else {
            " No tasks. Press a to add one."
        };
        let empty = Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(app.theme.dim).bg(bg),
        )))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new([
        header_label(app, "Title", Some(SortKey::Title)),
        header_label(app, "Status", Some(SortKey::Status)),
        header_label(app, "Priority", Some(SortKey::Priority)),
        header_label(app, "Project", None),
        header_label(app, "Assignee", None),
        header_label(app, "Due", Some(SortKey::DueDate)),
    ])
    .style(
        Style::default()
            .fg(app.theme.dim)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    );

    let search_re = search_regex(&app.task_query.filter.search);
    let rows: Vec<Row> = page
        .items
        .iter()
        .enumerate()
        .map(|(i, task)| task_row(app, task, i == app.tasks_cursor, search_re.as_ref()))
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Fill(3),
            Constraint::Length(11),
            Constraint::Length(8),
            Constraint::Fill(2),
            Constraint::Length(11),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(block);
    frame.render_widget(table, area);
}

fn task_row<'a>(app: &App, task: &'a Task, is_cursor: bool, search_re: Option<&regex::Regex>) -> Row<'a> {
    let row_bg = if is_cursor {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let text = Style::default().fg(app.theme.text).bg(row_bg);
    let highlight = Style::default()
        .fg(app.theme.background)
        .bg(app.theme.orange)
        .add_modifier(Modifier::BOLD);

    let mut title = Vec::new();
    push_highlighted_spans(&mut title, &task.title, text, highlight, search_re);

    let due = match task.due_date {
        Some(date) if task.is_overdue(app.workspace.today) => {
            Span::styled(date.to_string(), text.fg(app.theme.red))
        }
        Some(date) => Span::styled(date.to_string(), text),
        None => Span::styled("\u{2013}", text.fg(app.theme.dim)),
    };

    Row::new(vec![
        Cell::from(Line::from(title)),
        Cell::from(Span::styled(
            task.status.label().to_string(),
            text.fg(app.theme.task_status_color(&task.status)),
        )),
        Cell::from(Span::styled(
            task.priority.label().to_string(),
            text.fg(app.theme.priority_color(&task.priority)),
        )),
        Cell::from(Span::styled(task.project.as_str(), text)),
        Cell::from(Span::styled(task.assignee.as_str(), text.fg(app.theme.dim))),
        Cell::from(due),
    ])
    .style(Style::default().bg(row_bg))
}

fn render_footer(frame: &mut Frame, app: &App, page: &TaskPage, area: Rect) {
    let bg = app.theme.background;
    let noun = if page.total_items == 1 { "task" } else { "tasks" };
    let text = format!(
        " Page {} of {} \u{00B7} {} {}",
        page.page, page.total_pages, page.total_items, noun
    );
    frame.render_widget(
        Paragraph::new(Span::styled(text, Style::default().fg(app.theme.dim).bg(bg)))
            .style(Style::default().bg(bg)),
        area,
    );
}
