mod board;
mod cli;
mod config;
mod feed;
mod models;
mod schedule;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use std::str::FromStr;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use models::Feed;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;

    match cli.command {
        Some(Commands::Week {
            schedule,
            date,
            index,
            file,
        }) => {
            handlers::handle_week(&config, &schedule, date.as_deref(), index, file.as_deref())?;
        }
        Some(Commands::Weeks { schedule, file }) => {
            handlers::handle_weeks(&config, &schedule, file.as_deref())?;
        }
        Some(Commands::Tasks { file, user, role }) => {
            handlers::handle_tasks(&config, file.as_deref(), user.as_deref(), role.as_deref())?;
        }
        Some(Commands::Config { init }) => {
            handlers::handle_config(&config, init)?;
        }

        // No subcommand → launch TUI
        None => {
            let feed = Feed::from_str(&cli.schedule)?;
            tui::app::run(config, feed)?;
        }
    }

    Ok(())
}
