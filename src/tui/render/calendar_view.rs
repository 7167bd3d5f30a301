use chrono::Datelike;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::ops::calendar::{CalendarCell, month_grid};
use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
/// Seven cells of four columns plus the margin
const GRID_W: u16 = 30;

/// Render the month calendar for the Tasks screen: a Sunday-first grid with
/// days that have tasks due marked, and the month's tasks listed beside it
pub fn render_calendar_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let month = app.calendar_month;
    let tasks = app.workspace.tasks.records();
    let today = app.workspace.today;

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(GRID_W), Constraint::Min(0)])
        .split(area);

    let title_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(app.theme.dim).bg(bg);
    let plain = Style::default().fg(app.theme.text).bg(bg);

    let weekday_spans: Vec<Span> = std::iter::once(Span::styled(" ", dim))
        .chain(WEEKDAYS.iter().map(|d| Span::styled(format!("{:>3} ", d), dim)))
        .collect();
    let mut grid: Vec<Line> = vec![
        Line::from(Span::styled(format!(" {}", month.title()), title_style)),
        Line::from(""),
        Line::from(weekday_spans),
    ];

    for week in month_grid(tasks, month) {
        let mut spans = vec![Span::styled(" ", plain)];
        for cell in week {
            match cell {
                CalendarCell::Blank => spans.push(Span::styled("    ", plain)),
                CalendarCell::Day { day, tasks } => {
                    let is_today = month.contains(today) && today.day() == day;
                    let overdue = tasks.iter().any(|t| t.is_overdue(today));
                    let mut style = match (tasks.is_empty(), overdue) {
                        (true, _) => plain,
                        (false, true) => plain.fg(app.theme.red).add_modifier(Modifier::BOLD),
                        (false, false) => plain.fg(app.theme.primary).add_modifier(Modifier::BOLD),
                    };
                    if is_today {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    let mark = if tasks.is_empty() { ' ' } else { '\u{2022}' };
                    spans.push(Span::styled(format!("{:>3}", day), style));
                    spans.push(Span::styled(mark.to_string(), style.remove_modifier(Modifier::REVERSED)));
                }
            }
        }
        grid.push(Line::from(spans));
    }
    grid.push(Line::from(""));
    grid.push(Line::from(Span::styled(" [ ] month  t today  c table", dim)));

    frame.render_widget(Paragraph::new(grid).style(Style::default().bg(bg)), cols[0]);

    // Tasks due this month, by day then list order
    let list_w = cols[1].width.saturating_sub(2) as usize;
    let mut due: Vec<_> = tasks
        .iter()
        .filter(|t| t.due_date.is_some_and(|d| month.contains(d)))
        .collect();
    due.sort_by_key(|t| t.due_date);

    let mut lines: Vec<Line> = Vec::new();
    if due.is_empty() {
        lines.push(Line::from(Span::styled(" Nothing due this month", dim)));
    }
    for task in due {
        let day = task.due_date.map(|d| d.day()).unwrap_or_default();
        let color = if task.is_overdue(today) {
            app.theme.red
        } else {
            app.theme.task_status_color(&task.status)
        };
        let title = truncate_to_width(&task.title, list_w.saturating_sub(6));
        lines.push(Line::from(vec![
            Span::styled(format!(" {:>2}  ", day), Style::default().fg(color).bg(bg)),
            Span::styled(title, plain),
        ]));
    }

    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(Style::default().fg(app.theme.border).bg(bg))
        .title(Span::styled(" Due this month ", title_style))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), cols[1]);
}
