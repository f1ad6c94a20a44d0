mod auth;
mod challenge;
mod cli;
mod config;
mod db;
mod error;
mod models;
mod services;
mod storage;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use rusqlite::Connection;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use db::migrations::run_migrations;
use storage::PhotoStore;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;

    // Ensure data directory exists and open DB
    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;
    debug!("database at {:?}", db_path);

    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    // Run migrations on every startup
    run_migrations(&conn)?;

    let store = PhotoStore::new(AppConfig::photos_dir()?, &config.photos.base_url);
    store.initialize().context("Preparing photo storage")?;

    match cli.command {
        Some(Commands::Signup { email, name }) => {
            handlers::handle_signup(&conn, &email, name.as_deref())?;
        }
        Some(Commands::Login { email }) => {
            handlers::handle_login(&conn, &mut config, email.as_deref())?;
        }
        Some(Commands::Logout) => {
            handlers::handle_logout(&conn)?;
        }
        Some(Commands::Start { date, name }) => {
            handlers::handle_start(&conn, &config, date.as_deref(), name.as_deref())?;
        }
        Some(Commands::Tasks) => {
            handlers::handle_tasks(&conn, &config)?;
        }
        Some(Commands::Check { task }) => {
            handlers::handle_check(&conn, &config, &task)?;
        }
        Some(Commands::Stats) => {
            handlers::handle_stats(&conn, &config)?;
        }
        Some(Commands::Photo { action }) => {
            handlers::handle_photo(&conn, &config, &store, &action)?;
        }
        Some(Commands::Export) => {
            handlers::handle_export(&conn)?;
        }

        // No subcommand → launch TUI
        None => {
            let user = auth::require_user(&conn)?;
            tui::app::run(conn, config, store, user)?;
        }
    }

    Ok(())
}
