use anyhow::{anyhow, bail, Result};
use chrono::NaiveDate;
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use log::warn;
use rusqlite::Connection;
use serde::Serialize;
use std::io::{self, BufRead, IsTerminal, Write};
use std::str::FromStr;

use crate::auth;
use crate::cli::args::PhotoCommands;
use crate::config::AppConfig;
use crate::db::repository::{format_date, parse_date, CheckinRepo, PhotoRepo, ProfileRepo};
use crate::models::{CheckinRecord, Task};
use crate::services;
use crate::storage::PhotoStore;
use crate::utils::format::{day_label, pretty_date, progress_bar, tasks_done};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const ORANGE: &str = "\x1b[38;2;240;120;40m";

// ─── Account ─────────────────────────────────────────────────────────────────

pub fn handle_signup(conn: &Connection, email: &str, name: Option<&str>) -> Result<()> {
    let password = prompt_password("  Password: ")?;
    let confirm = prompt_password("  Confirm password: ")?;
    if password != confirm {
        bail!("Passwords do not match");
    }

    let user = auth::sign_up(conn, email, &password, name)?;
    println_colored!(GREEN, "  ✓ Signup successful for {}. You can now login.", user.email);
    Ok(())
}

pub fn handle_login(conn: &Connection, config: &mut AppConfig, email: Option<&str>) -> Result<()> {
    let email = match email {
        Some(e) => e.to_string(),
        None if !config.account.default_email.is_empty() => config.account.default_email.clone(),
        None => prompt("  Email: ")?,
    };
    let password = prompt_password("  Password: ")?;

    let user = auth::sign_in(conn, &email, &password)?;
    println_colored!(GREEN, "  ✓ Signed in as {}", user.email);

    if config.account.default_email.is_empty() {
        config.account.default_email = user.email;
        if let Err(e) = config.save() {
            warn!("could not remember login email: {:#}", e);
        }
    }
    Ok(())
}

pub fn handle_logout(conn: &Connection) -> Result<()> {
    auth::sign_out(conn)?;
    println_colored!(DIM, "  Signed out");
    Ok(())
}

// ─── Challenge ───────────────────────────────────────────────────────────────

pub fn handle_start(
    conn: &Connection,
    config: &AppConfig,
    date: Option<&str>,
    name: Option<&str>,
) -> Result<()> {
    let user = auth::require_user(conn)?;
    let start = match date {
        Some(s) => parse_start_date(s)?,
        None => config.today(),
    };

    ProfileRepo::set_start_date(conn, user.id, Some(start))?;
    if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
        ProfileRepo::set_display_name(conn, user.id, name)?;
    }
    println_colored!(GREEN, "  ✓ Challenge starts {}", pretty_date(start));
    Ok(())
}

fn parse_start_date(s: &str) -> Result<NaiveDate> {
    parse_date(s.trim()).map_err(|_| anyhow!("Invalid date '{}'. Use YYYY-MM-DD", s))
}

pub fn handle_tasks(conn: &Connection, config: &AppConfig) -> Result<()> {
    let user = auth::require_user(conn)?;
    let today = config.today();
    let record = CheckinRepo::get_for_date(conn, user.id, today)?
        .unwrap_or_else(|| CheckinRecord::empty(today));

    print_checklist(&record);
    Ok(())
}

pub fn handle_check(conn: &Connection, config: &AppConfig, task_str: &str) -> Result<()> {
    let task = Task::from_str(task_str).map_err(|_| {
        anyhow!(
            "Unknown task '{}'. Use: diet, water, reading, workout1, workout2-outdoor, progress-photo, no-alcohol",
            task_str
        )
    })?;
    let user = auth::require_user(conn)?;
    let today = config.today();

    let record = CheckinRepo::toggle_task(conn, user.id, today, task)?;
    if record.get(task) {
        println_colored!(GREEN, "  ✓ {} — done", task.label());
    } else {
        println_colored!(DIM, "  ○ {} — unmarked", task.label());
    }

    if record.is_complete() {
        println_colored!(ORANGE, "  All 7 tasks done today!");
    } else {
        println_colored!(
            DIM,
            "  {} tasks done today",
            tasks_done(record.completed_count(), Task::COUNT)
        );
    }
    Ok(())
}

fn print_checklist(record: &CheckinRecord) {
    let done = record.completed_count();
    println!();
    if record.is_complete() {
        println_colored!(GREEN, "  TODAY'S TASKS  {}", tasks_done(done, Task::COUNT));
    } else {
        println_colored!(BOLD, "  TODAY'S TASKS  {}", tasks_done(done, Task::COUNT));
    }
    println!();
    for task in Task::all() {
        if record.get(task) {
            println_colored!(GREEN, "  ● {:<30} {}", task.label(), task.description());
        } else {
            println_colored!(DIM, "  ○ {:<30} {}", task.label(), task.description());
        }
    }
    println!();
}

// ─── Stats ───────────────────────────────────────────────────────────────────

pub fn handle_stats(conn: &Connection, config: &AppConfig) -> Result<()> {
    let user = auth::require_user(conn)?;
    let today = config.today();
    let (profile, summary) = services::load_progress(conn, user.id, today)?;

    println!();
    println_colored!(ORANGE, "  75 HARD — {}", profile.display_name);
    println!();

    let streak_color = if summary.streak > 0 { ORANGE } else { DIM };
    println_colored!(streak_color, "  Current streak:  {} days", summary.streak);

    println!(
        "  {}  {}  {}%",
        day_label(summary.day_number),
        progress_bar(summary.day_number, crate::challenge::CHALLENGE_DAYS, 20),
        summary.percent
    );
    println!("  Remaining:       {} days", summary.days_remaining);

    match profile.start_date {
        Some(start) => println_colored!(DIM, "  Started:         {}", pretty_date(start)),
        None => println_colored!(AMBER, "  Not started yet. Run `hard75 start` to begin."),
    }

    if let Some(milestone) = summary.milestone {
        println!();
        println_colored!(ORANGE, "  🏆 {}", milestone.message());
    }
    println!();
    Ok(())
}

// ─── Photos ──────────────────────────────────────────────────────────────────

pub fn handle_photo(
    conn: &Connection,
    config: &AppConfig,
    store: &PhotoStore,
    action: &PhotoCommands,
) -> Result<()> {
    let user = auth::require_user(conn)?;

    match action {
        PhotoCommands::Add { file } => {
            let photo = services::add_photo(conn, store, user.id, file, config.today())?;
            println_colored!(GREEN, "  ✓ Saved progress photo — Day {}", photo.day_number);
            println_colored!(DIM, "  {}", photo.photo_url);
        }
        PhotoCommands::List => {
            let photos = PhotoRepo::list(conn, user.id)?;
            println!();
            if photos.is_empty() {
                println_colored!(DIM, "  No progress photos yet");
                println_colored!(DIM, "  Start documenting your transformation!");
            } else {
                println_colored!(BOLD, "  PROGRESS PHOTOS ({})", photos.len());
                println!();
                for photo in &photos {
                    println!(
                        "  #{:<4} Day {:<3} {}  {}",
                        photo.id,
                        photo.day_number,
                        format_date(photo.photo_date),
                        photo.photo_url
                    );
                }
            }
            println!();
        }
        PhotoCommands::Remove { id } => {
            let photo = services::remove_photo(conn, store, user.id, *id)?;
            println_colored!(RED, "  ✗ Removed Day {} photo", photo.day_number);
        }
    }
    Ok(())
}

// ─── Export ──────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Export {
    email: String,
    display_name: String,
    start_date: Option<NaiveDate>,
    checkins: Vec<CheckinRecord>,
}

pub fn handle_export(conn: &Connection) -> Result<()> {
    let user = auth::require_user(conn)?;
    let profile = ProfileRepo::get(conn, user.id)?;

    let export = Export {
        email: user.email,
        display_name: profile
            .as_ref()
            .map(|p| p.display_name.clone())
            .unwrap_or_default(),
        start_date: profile.and_then(|p| p.start_date),
        checkins: CheckinRepo::all(conn, user.id)?,
    };
    println!("{}", serde_json::to_string_pretty(&export)?);
    Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().lock().read_line(&mut buf)?;
    Ok(buf.trim_end_matches('\n').trim_end_matches('\r').to_string())
}

/// Read a password without echoing it. Falls back to a plain prompt when
/// stdin is not a terminal.
fn prompt_password(message: &str) -> Result<String> {
    if !io::stdin().is_terminal() {
        return prompt(message);
    }

    print!("{}", message);
    io::stdout().flush()?;

    terminal::enable_raw_mode()?;
    let result = read_hidden();
    terminal::disable_raw_mode()?;
    println!();
    result
}

fn read_hidden() -> Result<String> {
    let mut buf = String::new();
    loop {
        if let CEvent::Key(key) = event::read()? {
            match apply_password_key(&mut buf, key) {
                PasswordInput::Pending => {}
                PasswordInput::Submit => return Ok(buf),
                PasswordInput::Cancel => bail!("Cancelled"),
            }
        }
    }
}

#[derive(Debug, PartialEq)]
enum PasswordInput {
    Pending,
    Submit,
    Cancel,
}

fn apply_password_key(buf: &mut String, key: KeyEvent) -> PasswordInput {
    if key.kind == KeyEventKind::Release {
        return PasswordInput::Pending;
    }
    match key.code {
        KeyCode::Enter => PasswordInput::Submit,
        KeyCode::Esc => PasswordInput::Cancel,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            PasswordInput::Cancel
        }
        KeyCode::Backspace => {
            buf.pop();
            PasswordInput::Pending
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            buf.push(c);
            PasswordInput::Pending
        }
        _ => PasswordInput::Pending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn hidden_password_keys() {
        let mut buf = String::new();
        for c in "secrex".chars() {
            assert_eq!(apply_password_key(&mut buf, key(KeyCode::Char(c))), PasswordInput::Pending);
        }
        apply_password_key(&mut buf, key(KeyCode::Backspace));
        apply_password_key(&mut buf, KeyEvent::new(KeyCode::Char('T'), KeyModifiers::SHIFT));
        assert_eq!(apply_password_key(&mut buf, key(KeyCode::Enter)), PasswordInput::Submit);
        assert_eq!(buf, "secreT");
    }

    #[test]
    fn hidden_password_cancel_and_release() {
        let mut buf = String::new();
        let mut release = key(KeyCode::Char('a'));
        release.kind = KeyEventKind::Release;
        assert_eq!(apply_password_key(&mut buf, release), PasswordInput::Pending);
        assert!(buf.is_empty());

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(apply_password_key(&mut buf, ctrl_c), PasswordInput::Cancel);
        assert!(buf.is_empty());
        assert_eq!(apply_password_key(&mut buf, key(KeyCode::Esc)), PasswordInput::Cancel);
    }

    #[test]
    fn start_date_must_be_iso() {
        assert_eq!(
            parse_start_date(" 2024-03-10 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
        );
        assert!(parse_start_date("03/10/2024").is_err());
        assert!(parse_start_date("2024-02-30").is_err());
    }
}
