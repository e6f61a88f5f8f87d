use anyhow::{anyhow, bail, Context, Result};
use chrono::{Local, NaiveDate};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::board::build_board;
use crate::config::{AppConfig, Session};
use crate::feed::{open_source, FeedSource, FileSource, HttpSource, resolve_url};
use crate::models::{Feed, GrammarPayload, SciencePayload, Task, Topic, WeekPayload};
use crate::schedule::{ScheduleLoader, WeekScheduleNavigator};
use crate::tui::widgets::schedule::{placeholder_text, secondary_text};
use crate::utils::format::progress_bar;

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
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const ACCENT: &str = "\x1b[38;2;86;182;194m";

// ─── Schedules ───────────────────────────────────────────────────────────────

fn schedule_source(config: &AppConfig, feed: Feed, file: Option<&Path>) -> Result<Box<dyn FeedSource>> {
    if let Some(path) = file {
        return Ok(Box::new(FileSource::new(path)));
    }
    let timeout = Duration::from_secs(config.server.timeout_secs);
    open_source(&config.server.base_url, timeout, config.schedules.path_for(feed))
        .context("Preparing schedule request")
}

fn load_schedule<P: DeserializeOwned>(
    config: &AppConfig,
    feed: Feed,
    file: Option<&Path>,
) -> Result<WeekScheduleNavigator<P>> {
    let loader = ScheduleLoader::new(schedule_source(config, feed, file)?);
    let mut nav = WeekScheduleNavigator::new();
    nav.load(&loader)
        .with_context(|| format!("Loading the {} schedule from {}", feed, loader.describe()))?;
    Ok(nav)
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| anyhow!("'{}' is not a date. Use YYYY-MM-DD", s))
}

pub fn handle_week(
    config: &AppConfig,
    schedule: &str,
    date: Option<&str>,
    index: Option<usize>,
    file: Option<&Path>,
) -> Result<()> {
    let feed = Feed::from_str(schedule)?;
    let today = match date {
        Some(d) => parse_date(d)?,
        None => Local::now().date_naive(),
    };
    match feed {
        Feed::Science => {
            let nav = load_schedule::<SciencePayload>(config, feed, file)?;
            show_week(nav, feed, today, index)
        }
        Feed::Grammar => {
            let nav = load_schedule::<GrammarPayload>(config, feed, file)?;
            show_week(nav, feed, today, index)
        }
    }
}

fn show_week<P: WeekPayload>(
    mut nav: WeekScheduleNavigator<P>,
    feed: Feed,
    today: NaiveDate,
    index: Option<usize>,
) -> Result<()> {
    println!();
    if nav.is_empty() {
        println_colored!(DIM, "  {}", placeholder_text(false));
        println!();
        return Ok(());
    }

    match index {
        Some(i) => {
            if !nav.select(i) {
                bail!("Week {} is out of range (0..{})", i, nav.len());
            }
        }
        None => {
            if let Err(e) = nav.jump_to_current_week(today) {
                println_colored!(AMBER, "  {} ({})", e, today);
                println!();
                return Ok(());
            }
        }
    }

    print_week(&nav, feed);
    Ok(())
}

fn print_week<P: WeekPayload>(nav: &WeekScheduleNavigator<P>, feed: Feed) {
    let Some(week) = nav.current_week() else {
        return;
    };

    println_colored!(
        ACCENT,
        "  {} — {}  (week {}/{})",
        feed,
        week.span(),
        nav.current_index() + 1,
        nav.len()
    );
    println!();

    if week.payload.topic_count() == 0 {
        println_colored!(DIM, "  Nothing scheduled");
    }
    for section in week.payload.sections() {
        for raw in section.entries {
            let topic = Topic::parse(raw);
            println_colored!(BOLD, "  {}", topic.title);
            println_colored!(DIM, "    {}", secondary_text(section.label, &topic));
        }
    }
    println!();
}

pub fn handle_weeks(config: &AppConfig, schedule: &str, file: Option<&Path>) -> Result<()> {
    let feed = Feed::from_str(schedule)?;
    let today = Local::now().date_naive();
    match feed {
        Feed::Science => {
            let mut nav = load_schedule::<SciencePayload>(config, feed, file)?;
            list_weeks(&mut nav, feed, today);
        }
        Feed::Grammar => {
            let mut nav = load_schedule::<GrammarPayload>(config, feed, file)?;
            list_weeks(&mut nav, feed, today);
        }
    }
    Ok(())
}

fn list_weeks<P: WeekPayload>(nav: &mut WeekScheduleNavigator<P>, feed: Feed, today: NaiveDate) {
    println!();
    println_colored!(ACCENT, "  {} ({} weeks)", feed, nav.len());
    println!();
    if nav.is_empty() {
        println_colored!(DIM, "  {}", placeholder_text(false));
        println!();
        return;
    }

    let current = nav.jump_to_current_week(today).ok();
    for (i, week) in nav.weeks().iter().enumerate() {
        let line = format!(
            "  {:>3}  {:<16}  {} topics",
            i,
            week.span(),
            week.payload.topic_count()
        );
        if current == Some(i) {
            println_colored!(GREEN, "{}  ← this week", line);
        } else {
            println!("{}", line);
        }
    }
    println!();
}

// ─── Tasks ───────────────────────────────────────────────────────────────────

fn task_source(config: &AppConfig, session: &Session, file: Option<&Path>) -> Result<Box<dyn FeedSource>> {
    if let Some(path) = file {
        return Ok(Box::new(FileSource::new(path)));
    }
    if !config.tasks.file.trim().is_empty() {
        return Ok(Box::new(FileSource::new(config.tasks.file.trim())));
    }
    let url = resolve_url(&config.server.base_url, &config.tasks.path);
    let source = HttpSource::new(url, Duration::from_secs(config.server.timeout_secs))
        .context("Preparing task request")?
        .with_bearer(session.token.clone());
    Ok(Box::new(source))
}

pub fn handle_tasks(
    config: &AppConfig,
    file: Option<&Path>,
    user: Option<&str>,
    role: Option<&str>,
) -> Result<()> {
    let session = Session::resolve(&config.session, user, role);
    let source = task_source(config, &session, file)?;
    let body = source
        .fetch()
        .with_context(|| format!("Fetching tasks from {}", source.describe()))?;
    let tasks: Vec<Task> = serde_json::from_str(&body).context("Parsing tasks")?;

    let board = build_board(&tasks, &session);

    println!();
    println_colored!(
        DIM,
        "  {} · {}",
        session.username.as_deref().unwrap_or("anonymous"),
        session.role.as_str()
    );
    println!();
    if board.is_empty() {
        println_colored!(DIM, "  No tasks to show");
        println!();
        return Ok(());
    }

    for group in &board {
        let percent = group.completion_percent();
        let bar_color = if percent == 100 { GREEN } else { AMBER };
        print!("  {}{:<14}\x1b[0m", BOLD, group.name);
        println_colored!(
            bar_color,
            "{}  {}/{}  {}%",
            progress_bar(percent, 20),
            group.done(),
            group.tasks.len(),
            percent
        );
        for task in &group.tasks {
            if task.completed {
                println_colored!(DIM, "    ✓ {}  #{}", task.title, task.id);
            } else {
                println!("    ○ {}  {}#{}\x1b[0m", task.title, DIM, task.id);
            }
            if let Some(notes) = task.notes.as_deref().filter(|n| !n.is_empty()) {
                println_colored!(DIM, "      {}", notes);
            }
            if let Some(link) = task.link_url.as_deref().filter(|l| !l.is_empty()) {
                println_colored!(DIM, "      {}", link);
            }
        }
        println!();
    }

    Ok(())
}

// ─── Config ──────────────────────────────────────────────────────────────────

pub fn handle_config(config: &AppConfig, init: bool) -> Result<()> {
    let path = AppConfig::config_path()?;
    if init {
        if path.exists() {
            println!("Config already exists at {:?}", path);
        } else {
            AppConfig::default().save_to(&path)?;
            println_colored!(GREEN, "  ✓ Wrote default config to {:?}", path);
        }
        return Ok(());
    }

    println!();
    println_colored!(ACCENT, "  {:?}", path);
    println!();
    for line in config.to_toml()?.lines() {
        println!("  {}", line);
    }
    println!();
    Ok(())
}
