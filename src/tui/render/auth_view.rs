use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::route::Route;
use crate::tui::app::{App, Mode};

use super::centered_rect_fixed;
use super::form_popup::field_lines;

const BOX_W: u16 = 52;

/// Render the Login or Register screen: a centered card with the form,
/// the last error from the server or validation, and a link to the other
/// screen
pub fn render_auth_view(frame: &mut Frame, app: &App, area: Rect) {
    let (form, title, subtitle, link) = match app.route {
        Route::Register => (
            &app.register_form,
            "Create Account",
            "Register to start managing projects",
            "Have an account? Press 6 to log in",
        ),
        _ => (
            &app.login_form,
            "Welcome Back",
            "Sign in to continue",
            "No account? Press 7 to register",
        ),
    };
    let bg = app.theme.paper;
    let active = app.mode == Mode::Auth;
    let inner_w = BOX_W.saturating_sub(2) as usize;

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            format!(" {}", title),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(" {}", subtitle),
            Style::default().fg(app.theme.dim).bg(bg),
        )),
        Line::from(""),
    ];
    if let Some(user) = app.auth.current_user() {
        lines.push(Line::from(Span::styled(
            format!(" Signed in as {}. L signs out.", user.name),
            Style::default().fg(app.theme.secondary).bg(bg),
        )));
        lines.push(Line::from(""));
    }
    if let Some(error) = app.auth.error() {
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            Style::default().fg(app.theme.red).bg(bg),
        )));
        lines.push(Line::from(""));
    }

    let top = lines.len();
    let (fields, cursor) = field_lines(app, form, bg, inner_w, active);
    lines.extend(fields);
    lines.push(Line::from(""));

    let hint = if active {
        " Tab next  Enter submit  Esc sidebar"
    } else {
        " Press Enter to fill in the form"
    };
    lines.push(Line::from(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg))));
    lines.push(Line::from(Span::styled(
        format!(" {}", link),
        Style::default().fg(app.theme.primary).bg(bg),
    )));

    let card = centered_rect_fixed(BOX_W, lines.len() as u16 + 2, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border).bg(bg))
        .title(Span::styled(
            format!(" {} ", form.target.title()),
            Style::default().fg(app.theme.primary).bg(bg),
        ))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), card);

    if let Some((row, col)) = cursor {
        let x = card.x + 1 + col as u16;
        let y = card.y + 1 + (top + row) as u16;
        if x < card.right() && y < card.bottom() {
            frame.set_cursor_position((x, y));
        }
    }
}
