use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, PendingDelete};
use crate::util::unicode::truncate_to_width;

/// Render the delete confirmation popup
pub fn render_confirm_popup(frame: &mut Frame, app: &App, pending: &PendingDelete, area: Rect) {
    let bg = app.theme.paper;
    let popup_w: u16 = 48.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;

    let question = format!(
        " Delete {} {}?",
        pending.kind.noun().to_lowercase(),
        pending.label
    );
    let lines = vec![
        Line::from(Span::styled(
            truncate_to_width(&question, inner_w),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            " This cannot be undone.",
            Style::default().fg(app.theme.dim).bg(bg),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" y", Style::default().fg(app.theme.red).bg(bg)),
            Span::styled(" delete   ", Style::default().fg(app.theme.text).bg(bg)),
            Span::styled("n", Style::default().fg(app.theme.primary).bg(bg)),
            Span::styled(" keep", Style::default().fg(app.theme.text).bg(bg)),
        ]),
    ];

    let popup_h = lines.len() as u16 + 2;
    let popup = super::centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.red).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}
