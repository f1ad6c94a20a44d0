use ratatui::style::{Color, Modifier, Style};

pub const BG: Color = Color::Rgb(12, 14, 13);
pub const SURFACE: Color = Color::Rgb(22, 26, 24);
pub const BORDER: Color = Color::Rgb(44, 52, 48);
pub const TEXT: Color = Color::Rgb(228, 232, 230);
pub const TEXT_DIM: Color = Color::Rgb(120, 130, 125);
pub const GREEN: Color = Color::Rgb(74, 200, 120);
pub const STREAK: Color = Color::Rgb(245, 130, 40);
pub const RED: Color = Color::Rgb(200, 70, 60);
pub const FILL: Color = Color::Rgb(40, 90, 60);

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn green() -> Style {
    Style::default().fg(GREEN)
}

pub fn streak() -> Style {
    Style::default().fg(STREAK)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn border(focused: bool) -> Style {
    if focused {
        green()
    } else {
        Style::default().fg(BORDER)
    }
}

pub fn selected() -> Style {
    Style::default().fg(TEXT).bg(FILL).add_modifier(Modifier::BOLD)
}
