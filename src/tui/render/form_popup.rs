use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::tui::form::{FieldInput, FormState};
use crate::util::unicode::{display_width, truncate_to_width};

use super::centered_rect_fixed;

const POPUP_W: u16 = 60;

/// Field rows for a form plus where the terminal cursor belongs, as
/// (row, column) relative to the first returned line. The cursor is only
/// placed when `active` and a text field has focus.
pub(super) fn field_lines<'a>(
    app: &App,
    form: &FormState,
    bg: Color,
    width: usize,
    active: bool,
) -> (Vec<Line<'a>>, Option<(usize, usize)>) {
    let label_w = form
        .fields
        .iter()
        .map(|f| display_width(f.label))
        .max()
        .unwrap_or(0);
    let value_w = width.saturating_sub(label_w + 5);

    let mut lines = Vec::new();
    let mut cursor = None;
    for (i, field) in form.fields.iter().enumerate() {
        let focused = active && i == form.focus;
        let label_style = if focused {
            Style::default()
                .fg(app.theme.primary)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.dim).bg(bg)
        };
        let value_style = Style::default()
            .fg(if focused { app.theme.text_bright } else { app.theme.text })
            .bg(if focused { app.theme.selection_bg } else { bg });

        let marker = if focused { "\u{203A}" } else { " " };
        let mut spans = vec![
            Span::styled(marker, label_style),
            Span::styled(format!("{:<w$}  ", field.label, w = label_w), label_style),
        ];
        match &field.input {
            FieldInput::Text(input) => {
                let shown = if field.masked {
                    "\u{2022}".repeat(input.text().chars().count())
                } else {
                    input.text().to_string()
                };
                spans.push(Span::styled(truncate_to_width(&shown, value_w), value_style));
                if focused {
                    let col = if field.masked {
                        input.text().chars().count()
                    } else {
                        input.cursor_col()
                    };
                    cursor = Some((i, 1 + label_w + 2 + col.min(value_w)));
                }
            }
            FieldInput::Choice { .. } => {
                let value = match field.value() {
                    "" => "none",
                    v => v,
                };
                let arrows = if focused { ("\u{2039} ", " \u{203A}") } else { ("  ", "  ") };
                spans.push(Span::styled(
                    format!("{}{}{}", arrows.0, truncate_to_width(value, value_w.saturating_sub(4)), arrows.1),
                    value_style,
                ));
            }
        }
        lines.push(Line::from(spans));
    }
    (lines, cursor)
}

/// Render the add/edit popup over the current screen
pub fn render_form_popup(frame: &mut Frame, app: &App, form: &FormState, area: Rect) {
    let bg = app.theme.paper;
    let inner_w = POPUP_W.saturating_sub(2) as usize;

    let mut lines: Vec<Line> = Vec::new();
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            Style::default().fg(app.theme.red).bg(bg),
        )));
        lines.push(Line::from(""));
    }
    let top = lines.len();
    let (fields, cursor) = field_lines(app, form, bg, inner_w, true);
    lines.extend(fields);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Tab next  \u{2190}\u{2192} choose  Enter save  Esc cancel",
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    let popup_h = lines.len() as u16 + 2;
    let popup = centered_rect_fixed(POPUP_W, popup_h, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.primary).bg(bg))
        .title(Span::styled(
            format!(" {} ", form.target.title()),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), popup);

    if let Some((row, col)) = cursor {
        let x = popup.x + 1 + col as u16;
        let y = popup.y + 1 + (top + row) as u16;
        if x < popup.right() && y < popup.bottom() {
            frame.set_cursor_position((x, y));
        }
    }
}
