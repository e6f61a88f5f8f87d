use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hearth", version, author, about = "A terminal companion for the family organiser")]
pub struct Cli {
    /// Schedule to open the TUI on (science, grammar)
    #[arg(long, default_value = "science")]
    pub schedule: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show one week of a study schedule (defaults to the week containing today)
    Week {
        /// Schedule name (science, grammar)
        schedule: String,
        /// Find the week containing this date instead of today (YYYY-MM-DD)
        #[arg(long, conflicts_with = "index")]
        date: Option<String>,
        /// Show the week at this position (0-based)
        #[arg(long)]
        index: Option<usize>,
        /// Read the schedule from a local JSON file
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// List every week of a study schedule
    Weeks {
        /// Schedule name (science, grammar)
        schedule: String,
        /// Read the schedule from a local JSON file
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Show the task board grouped by assignee
    Tasks {
        /// Read tasks from a local JSON file instead of the server
        #[arg(long)]
        file: Option<PathBuf>,
        /// Act as this user
        #[arg(long)]
        user: Option<String>,
        /// Act with this role (admin, user, readonly)
        #[arg(long)]
        role: Option<String>,
    },
    /// Show or create the configuration file
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}
