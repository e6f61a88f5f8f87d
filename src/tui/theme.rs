use ratatui::style::{Color, Modifier, Style};

pub const BG: Color = Color::Rgb(16, 20, 24);
pub const SURFACE: Color = Color::Rgb(24, 30, 36);
pub const BORDER: Color = Color::Rgb(48, 60, 70);
pub const TEXT: Color = Color::Rgb(220, 226, 230);
pub const TEXT_DIM: Color = Color::Rgb(120, 134, 144);
pub const TEXT_OFF: Color = Color::Rgb(64, 74, 82);
pub const ACCENT: Color = Color::Rgb(86, 182, 194);
pub const GREEN: Color = Color::Rgb(120, 190, 120);
pub const AMBER: Color = Color::Rgb(222, 170, 80);
pub const RED: Color = Color::Rgb(214, 96, 86);

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn border() -> Style {
    Style::default().fg(BORDER)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Controls that cannot be used right now (first/last week).
pub fn disabled() -> Style {
    Style::default().fg(TEXT_OFF)
}

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn green() -> Style {
    Style::default().fg(GREEN)
}

pub fn amber() -> Style {
    Style::default().fg(AMBER)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}
