use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
    Frame,
};

use crate::models::{CheckinRecord, Task};
use crate::tui::theme;
use crate::utils::format::tasks_done;

pub fn render(frame: &mut Frame, area: Rect, record: &CheckinRecord, focused_idx: usize) {
    let done_count = record.completed_count();
    let count_style = if record.is_complete() {
        theme::green().add_modifier(Modifier::BOLD)
    } else {
        theme::dim()
    };

    let block = Block::default()
        .title(Line::from(vec![
            Span::styled(" TODAY'S TASKS ", theme::bold()),
            Span::styled(format!("{} ", tasks_done(done_count, Task::COUNT)), count_style),
        ]))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(true))
        .style(theme::surface());

    let items: Vec<ListItem> = Task::all()
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let done = record.get(*task);
            let (icon, icon_style) = if done {
                ("●", theme::green())
            } else {
                ("○", theme::dim())
            };
            let label_style = if done {
                theme::dim().add_modifier(Modifier::CROSSED_OUT)
            } else {
                theme::bold()
            };

            let line = Line::from(vec![
                Span::styled(format!("  {} ", icon), icon_style),
                Span::styled(format!("{:<30}", task.label()), label_style),
                Span::styled(task.description(), theme::dim()),
            ]);

            let item = ListItem::new(line);
            if i == focused_idx {
                item.style(theme::selected())
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
