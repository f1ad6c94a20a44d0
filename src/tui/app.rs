use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use log::warn;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use rusqlite::Connection;
use std::time::Duration;

use crate::config::AppConfig;
use crate::db::repository::{CheckinRepo, PhotoRepo};
use crate::models::{ChallengeProfile, CheckinRecord, ProgressPhoto, ProgressSummary, Task, User};
use crate::services;
use crate::storage::PhotoStore;
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::{checklist, header, photos, statusbar, streak};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Dashboard,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tab {
    Tasks,
    Photos,
}

pub struct App {
    pub view: View,
    pub tab: Tab,
    pub focus_idx: usize,
    pub should_quit: bool,
    /// Last failed action, shown in the status bar until the next key.
    pub error: Option<String>,

    config: AppConfig,
    store: PhotoStore,
    user: User,

    // Cached state (refreshed after every action)
    pub today: NaiveDate,
    pub profile: Option<ChallengeProfile>,
    pub checkin: CheckinRecord,
    pub summary: ProgressSummary,
    pub photos: Vec<ProgressPhoto>,
}

impl App {
    pub fn new(config: AppConfig, store: PhotoStore, user: User) -> Self {
        let today = config.today();
        App {
            view: View::Dashboard,
            tab: Tab::Tasks,
            focus_idx: 0,
            should_quit: false,
            error: None,
            config,
            store,
            user,
            today,
            profile: None,
            checkin: CheckinRecord::empty(today),
            summary: ProgressSummary::default(),
            photos: Vec::new(),
        }
    }

    pub fn load(&mut self, conn: &Connection) -> Result<()> {
        self.today = self.config.today();

        let (profile, summary) = services::load_progress(conn, self.user.id, self.today)?;
        self.profile = Some(profile);
        self.summary = summary;

        self.checkin = CheckinRepo::get_for_date(conn, self.user.id, self.today)?
            .unwrap_or_else(|| CheckinRecord::empty(self.today));

        self.photos = PhotoRepo::list(conn, self.user.id)?;
        if self.tab == Tab::Photos {
            self.focus_idx = self.focus_idx.min(self.photos.len().saturating_sub(1));
        }
        Ok(())
    }

    /// Reload once the calendar date rolls over.
    pub fn tick(&mut self, conn: &Connection) {
        if self.config.today() != self.today {
            let result = self.load(conn);
            self.report(result);
        }
    }

    fn report(&mut self, result: Result<()>) {
        if let Err(e) = result {
            warn!("dashboard action failed: {:#}", e);
            self.error = Some(e.to_string());
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, conn: &Connection) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.error = None;

        match self.view {
            View::Help => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                    self.view = View::Dashboard;
                }
            }
            View::Dashboard => self.handle_dashboard_key(key, conn),
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent, conn: &Connection) {
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.view = View::Help;
            }
            KeyCode::Tab => {
                self.tab = match self.tab {
                    Tab::Tasks => Tab::Photos,
                    Tab::Photos => Tab::Tasks,
                };
                self.focus_idx = 0;
            }
            KeyCode::Up => {
                self.focus_idx = self.focus_idx.saturating_sub(1);
            }
            KeyCode::Down => {
                let max = match self.tab {
                    Tab::Tasks => Task::COUNT - 1,
                    Tab::Photos => self.photos.len().saturating_sub(1),
                };
                if self.focus_idx < max {
                    self.focus_idx += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.tab == Tab::Tasks {
                    let result = self.toggle_focused_task(conn);
                    self.report(result);
                }
            }
            KeyCode::Char('D') => {
                if self.tab == Tab::Photos {
                    let result = self.delete_focused_photo(conn);
                    self.report(result);
                }
            }
            _ => {}
        }
    }

    fn toggle_focused_task(&mut self, conn: &Connection) -> Result<()> {
        let Some(task) = Task::all().get(self.focus_idx).copied() else {
            return Ok(());
        };
        // Never write to a day the dashboard has already moved past.
        if self.config.today() != self.today {
            self.load(conn)?;
        }
        CheckinRepo::toggle_task(conn, self.user.id, self.today, task)?;
        self.load(conn)
    }

    fn delete_focused_photo(&mut self, conn: &Connection) -> Result<()> {
        let Some(photo_id) = self.photos.get(self.focus_idx).map(|p| p.id) else {
            return Ok(());
        };
        services::remove_photo(conn, &self.store, self.user.id, photo_id)?;
        self.load(conn)
    }

    pub fn draw(&self, frame: &mut Frame) {
        self.draw_dashboard(frame);
        if self.view == View::Help {
            self.draw_help_overlay(frame);
        }
    }

    fn draw_dashboard(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let streak_height = if self.summary.milestone.is_some() { 9 } else { 6 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),             // header
                Constraint::Length(streak_height), // streak card
                Constraint::Length(1),             // tabs
                Constraint::Min(0),                // tab content
                Constraint::Length(1),             // status bar
            ])
            .split(area);

        let display_name = self
            .profile
            .as_ref()
            .map(|p| p.display_name.as_str())
            .unwrap_or(crate::models::DEFAULT_DISPLAY_NAME);
        header::render(frame, chunks[0], display_name, self.today);
        streak::render(frame, chunks[1], &self.summary);
        self.draw_tabs(frame, chunks[2]);

        match self.tab {
            Tab::Tasks => checklist::render(frame, chunks[3], &self.checkin, self.focus_idx),
            Tab::Photos => photos::render(frame, chunks[3], &self.photos, self.focus_idx),
        }

        statusbar::render(frame, chunks[4], self.error.as_deref());
    }

    fn draw_tabs(&self, frame: &mut Frame, area: Rect) {
        let style_for = |tab: Tab| {
            if self.tab == tab {
                theme::selected()
            } else {
                theme::dim()
            }
        };
        let line = Line::from(vec![
            Span::styled("  Daily Tasks  ", style_for(Tab::Tasks)),
            Span::styled("  ", theme::dim()),
            Span::styled(format!("  Progress Photos ({})  ", self.photos.len()), style_for(Tab::Photos)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();
        let width = (area.width / 2).max(40).min(area.width);
        let height = (area.height / 2).max(12).min(area.height);
        let popup_area = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
        .intersection(area);

        frame.render_widget(Clear, popup_area);

        let bindings = [
            ("[↑ ↓]        ", "Navigate items"),
            ("[Enter/Space]", "Toggle focused task"),
            ("[Tab]        ", "Switch tasks / photos"),
            ("[D]          ", "Delete focused photo"),
            ("[?]          ", "Toggle help"),
            ("[Esc]        ", "Quit"),
        ];

        let mut help_text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::green().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (key, label) in bindings {
            help_text.push(Line::from(vec![
                Span::styled(format!("  {}  ", key), theme::green()),
                Span::styled(label, theme::dim()),
            ]));
        }
        help_text.push(Line::from(""));
        help_text.push(Line::from(Span::styled(
            "  A day counts toward the streak only when all 7 tasks are done.",
            theme::dim(),
        )));

        let block = Block::default()
            .title(Span::styled(" Help ", theme::green()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::green())
            .style(theme::surface());

        frame.render_widget(Paragraph::new(help_text).block(block), popup_area);
    }
}

/// Run the TUI event loop.
pub fn run(conn: Connection, config: AppConfig, store: PhotoStore, user: User) -> Result<()> {
    let mut app = App::new(config, store, user);
    app.load(&conn)?;

    let mut terminal = ratatui::init();
    let events = EventHandler::new(Duration::from_secs(30));

    let result = (|| -> Result<()> {
        loop {
            terminal.draw(|frame| app.draw(frame))?;

            match events.next()? {
                Event::Key(key) => {
                    app.handle_key(key, &conn);
                    if app.should_quit {
                        return Ok(());
                    }
                }
                Event::Resize => {}
                Event::Tick => app.tick(&conn),
            }
        }
    })();

    ratatui::restore();
    result
}
