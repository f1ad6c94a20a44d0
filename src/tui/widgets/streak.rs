use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::challenge::CHALLENGE_DAYS;
use crate::models::ProgressSummary;
use crate::tui::theme;
use crate::utils::format::{day_label, progress_bar};

pub fn render(frame: &mut Frame, area: Rect, summary: &ProgressSummary) {
    let block = Block::default()
        .title(Span::styled(" Current Streak ", theme::streak()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface());

    let streak_style = if summary.streak > 0 {
        theme::streak().add_modifier(Modifier::BOLD)
    } else {
        theme::dim()
    };

    let streak_line = Line::from(vec![
        Span::styled("  🔥 ", streak_style),
        Span::styled(format!("{}", summary.streak), streak_style),
        Span::styled(" DAYS", theme::dim()),
    ]);

    let bar_width = (area.width as usize).saturating_sub(24).clamp(10, 50);
    let progress_line = Line::from(vec![
        Span::styled(format!("  {:<14}", day_label(summary.day_number)), theme::dim()),
        Span::styled(
            progress_bar(summary.day_number, CHALLENGE_DAYS, bar_width),
            theme::green(),
        ),
        Span::styled(format!("  {}%", summary.percent), theme::green().add_modifier(Modifier::BOLD)),
    ]);

    let stats_line = Line::from(vec![Span::styled(
        format!(
            "  Day {}  ·  {} remaining  ·  streak {}",
            summary.day_number, summary.days_remaining, summary.streak
        ),
        theme::dim(),
    )]);

    let mut text = vec![streak_line, Line::from(""), progress_line, stats_line];
    if let Some(milestone) = summary.milestone {
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            format!("  🏆 {}", milestone.message()),
            theme::streak(),
        )));
    }

    let paragraph = Paragraph::new(text).block(block);
    frame.render_widget(paragraph, area);
}
