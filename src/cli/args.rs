use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hard75", version, author, about = "A terminal companion for the 75-day discipline challenge")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account
    Signup {
        /// Email address
        email: String,
        /// Name shown on the dashboard
        #[arg(long)]
        name: Option<String>,
    },
    /// Sign in
    Login {
        /// Email address (defaults to account.default_email from config)
        email: Option<String>,
    },
    /// Sign out
    Logout,
    /// Start (or restart) the 75-day challenge
    Start {
        /// Start date as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Change the name shown on the dashboard
        #[arg(long)]
        name: Option<String>,
    },
    /// Show today's checklist
    Tasks,
    /// Toggle one of today's tasks
    Check {
        /// Task name (diet, water, reading, workout1, workout2-outdoor, progress-photo, no-alcohol)
        task: String,
    },
    /// Show streak and challenge progress
    Stats,
    /// Progress photo gallery
    Photo {
        #[command(subcommand)]
        action: PhotoCommands,
    },
    /// Dump all check-ins as JSON to stdout
    Export,
}

#[derive(Subcommand, Debug)]
pub enum PhotoCommands {
    /// Add a progress photo
    Add {
        /// Image file to upload
        file: PathBuf,
    },
    /// List progress photos
    List,
    /// Remove a progress photo by id
    Remove {
        /// Photo id (see `hard75 photo list`)
        id: i64,
    },
}
