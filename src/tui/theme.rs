use ratatui::style::Color;

use crate::model::UiConfig;
use crate::model::project::ProjectStatus;
use crate::model::task::{Priority, TaskStatus};
use crate::model::user::UserStatus;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    /// Cards, popups and the sidebar
    pub paper: Color,
    pub text: Color,
    pub text_bright: Color,
    pub dim: Color,
    pub primary: Color,
    pub secondary: Color,
    pub border: Color,
    pub selection_bg: Color,
    pub red: Color,
    pub orange: Color,
    pub green: Color,
    pub blue: Color,
    pub grey: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x1E, 0x1E, 0x1E),
            paper: Color::Rgb(0x24, 0x24, 0x24),
            text: Color::Rgb(0xE0, 0xE0, 0xE0),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            dim: Color::Rgb(0x88, 0x88, 0x88),
            primary: Color::Rgb(0x64, 0x6C, 0xFF),
            secondary: Color::Rgb(0x4C, 0xAF, 0x50),
            border: Color::Rgb(0x3A, 0x3A, 0x3A),
            selection_bg: Color::Rgb(0x33, 0x33, 0x33),
            red: Color::Rgb(0xF4, 0x43, 0x36),
            orange: Color::Rgb(0xFF, 0x98, 0x00),
            green: Color::Rgb(0x4C, 0xAF, 0x50),
            blue: Color::Rgb(0x21, 0x96, 0xF3),
            grey: Color::Rgb(0x66, 0x66, 0x66),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from `[ui.colors]`, falling back to defaults.
    /// Unknown slots and malformed values are skipped.
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(slot = %key, %value, "ignoring malformed color");
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "paper" => theme.paper = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "dim" => theme.dim = color,
                "primary" => theme.primary = color,
                "secondary" => theme.secondary = color,
                "border" => theme.border = color,
                "selection_bg" => theme.selection_bg = color,
                "red" => theme.red = color,
                "orange" => theme.orange = color,
                "green" => theme.green = color,
                "blue" => theme.blue = color,
                "grey" => theme.grey = color,
                _ => {}
            }
        }

        theme
    }

    pub fn task_status_color(&self, status: &TaskStatus) -> Color {
        match status {
            TaskStatus::InProgress => self.blue,
            TaskStatus::Completed => self.green,
            TaskStatus::Todo => self.red,
            TaskStatus::Other(_) => self.grey,
        }
    }

    pub fn priority_color(&self, priority: &Priority) -> Color {
        match priority {
            Priority::High => self.red,
            Priority::Medium => self.orange,
            Priority::Low => self.green,
            Priority::Other(_) => self.grey,
        }
    }

    pub fn project_status_color(&self, status: ProjectStatus) -> Color {
        match status {
            ProjectStatus::Active => self.primary,
            ProjectStatus::Completed => self.green,
            ProjectStatus::OnHold => self.orange,
        }
    }

    pub fn user_status_color(&self, status: UserStatus) -> Color {
        match status {
            UserStatus::Active => self.green,
            UserStatus::Inactive => self.grey,
        }
    }
}
