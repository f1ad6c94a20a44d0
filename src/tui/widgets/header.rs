use chrono::NaiveDate;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::tui::theme;
use crate::utils::format::pretty_date;

pub fn render(frame: &mut Frame, area: Rect, display_name: &str, today: NaiveDate) {
    let title_line = Line::from(vec![
        Span::styled("75 ", theme::bold()),
        Span::styled("HARD", theme::green().add_modifier(Modifier::BOLD)),
    ]);

    let sub_line = Line::from(vec![
        Span::styled(display_name, theme::dim()),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(pretty_date(today), theme::dim()),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::green())
        .style(theme::base());

    let paragraph = Paragraph::new(vec![title_line, sub_line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
