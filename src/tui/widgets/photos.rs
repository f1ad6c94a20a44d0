use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::models::ProgressPhoto;
use crate::tui::theme;
use crate::utils::format::pretty_date;

pub fn render(frame: &mut Frame, area: Rect, photos: &[ProgressPhoto], focused_idx: usize) {
    let block = Block::default()
        .title(Span::styled(" PROGRESS PHOTOS ", theme::bold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(true))
        .style(theme::surface());

    if photos.is_empty() {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled("  No progress photos yet", theme::dim())),
            Line::from(Span::styled(
                "  Start documenting your transformation with `hard75 photo add <file>`",
                theme::dim(),
            )),
        ];
        frame.render_widget(Paragraph::new(text).block(block), area);
        return;
    }

    let items: Vec<ListItem> = photos
        .iter()
        .enumerate()
        .map(|(i, photo)| {
            let line = Line::from(vec![
                Span::styled(format!("  Day {:<4}", photo.day_number), theme::green()),
                Span::styled(format!("{:<18}", pretty_date(photo.photo_date)), theme::dim()),
                Span::styled(photo.photo_url.as_str(), theme::dim()),
            ]);
            let item = ListItem::new(line);
            if i == focused_idx {
                item.style(theme::selected())
            } else {
                item
            }
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
