use anyhow::Result;
use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use crossterm::execute;
use log::debug;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    DefaultTerminal, Frame,
};
use serde::de::DeserializeOwned;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use crate::config::AppConfig;
use crate::feed::{open_source, FeedError};
use crate::models::{Feed, GrammarPayload, SciencePayload, WeekRecord};
use crate::schedule::{ScheduleLoader, SwipeTracker, WeekScheduleNavigator};
use crate::tui::events::{Event, EventHandler, Loaded};
use crate::tui::theme;
use crate::tui::widgets::{header, schedule, statusbar};

/// Ticks a notice stays in the status bar (250ms each).
const NOTICE_TICKS: u8 = 16;

/// Run `$body` against the navigator of the schedule on screen.
macro_rules! active_nav {
    ($app:expr, $nav:ident => $body:expr) => {
        match $app.feed {
            Feed::Science => {
                let $nav = &mut $app.science;
                $body
            }
            Feed::Grammar => {
                let $nav = &mut $app.grammar;
                $body
            }
        }
    };
}

pub struct App {
    pub config: AppConfig,
    pub feed: Feed,
    pub today: NaiveDate,
    pub should_quit: bool,
    pub show_help: bool,
    /// Blocking message (load failures); any key dismisses it.
    pub alert: Option<String>,
    /// Non-blocking message shown in the status bar for a few ticks.
    pub notice: Option<String>,
    notice_ticks: u8,

    pub science: WeekScheduleNavigator<SciencePayload>,
    pub grammar: WeekScheduleNavigator<GrammarPayload>,
    pub swipe: SwipeTracker,
    /// Bumped on every load; results carrying an older value are dropped.
    pub generation: u64,
}

impl App {
    pub fn new(config: AppConfig, feed: Feed) -> Self {
        let swipe = SwipeTracker::new(config.schedules.swipe_threshold);
        App {
            config,
            feed,
            today: Local::now().date_naive(),
            should_quit: false,
            show_help: false,
            alert: None,
            notice: None,
            notice_ticks: 0,
            science: WeekScheduleNavigator::new(),
            grammar: WeekScheduleNavigator::new(),
            swipe,
            generation: 0,
        }
    }

    /// Start fetching the schedule on screen in the background.
    pub fn start_load(&mut self, tx: Sender<Event>) {
        self.generation += 1;
        active_nav!(self, nav => nav.begin_load());

        let generation = self.generation;
        let feed = self.feed;
        let base_url = self.config.server.base_url.clone();
        let timeout = Duration::from_secs(self.config.server.timeout_secs);
        let location = self.config.schedules.path_for(feed).to_string();
        debug!("loading {} (generation {})", feed.as_str(), generation);

        thread::spawn(move || {
            let loaded = match feed {
                Feed::Science => Loaded::Science {
                    generation,
                    result: fetch_weeks(&base_url, timeout, &location),
                },
                Feed::Grammar => Loaded::Grammar {
                    generation,
                    result: fetch_weeks(&base_url, timeout, &location),
                },
            };
            let _ = tx.send(Event::Loaded(loaded));
        });
    }

    /// Leave the current schedule for `feed`. The old schedule's state is
    /// dropped and the new one is fetched fresh.
    pub fn switch_to(&mut self, feed: Feed, tx: Sender<Event>) {
        self.feed = feed;
        self.science = WeekScheduleNavigator::new();
        self.grammar = WeekScheduleNavigator::new();
        self.swipe = SwipeTracker::new(self.config.schedules.swipe_threshold);
        self.start_load(tx);
    }

    pub fn handle_loaded(&mut self, loaded: Loaded) {
        if loaded.generation() != self.generation {
            debug!(
                "dropping stale load (generation {}, current {})",
                loaded.generation(),
                self.generation
            );
            return;
        }
        let outcome = match loaded {
            Loaded::Science { result, .. } => self.science.finish_load(result),
            Loaded::Grammar { result, .. } => self.grammar.finish_load(result),
        };
        if let Err(e) = outcome {
            self.alert = Some(format!("Could not load the {} schedule: {}", self.feed, e));
        }
    }

    pub fn tick(&mut self) {
        self.today = Local::now().date_naive();
        if self.notice_ticks > 0 {
            self.notice_ticks -= 1;
            if self.notice_ticks == 0 {
                self.notice = None;
            }
        }
    }

    fn set_notice(&mut self, text: impl Into<String>) {
        self.notice = Some(text.into());
        self.notice_ticks = NOTICE_TICKS;
    }

    pub fn prev_week(&mut self) -> bool {
        active_nav!(self, nav => nav.prev_week())
    }

    pub fn next_week(&mut self) -> bool {
        active_nav!(self, nav => nav.next_week())
    }

    pub fn jump_to_current_week(&mut self) {
        let today = self.today;
        if let Err(e) = active_nav!(self, nav => nav.jump_to_current_week(today)) {
            self.set_notice(e.to_string());
        }
    }

    pub fn current_index(&self) -> usize {
        match self.feed {
            Feed::Science => self.science.current_index(),
            Feed::Grammar => self.grammar.current_index(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, tx: &Sender<Event>) {
        // Some terminals also report release and repeat events
        if key.kind != KeyEventKind::Press {
            return;
        }
        if self.alert.is_some() {
            self.alert = None;
            return;
        }
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('p') => {
                self.prev_week();
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n') => {
                self.next_week();
            }
            KeyCode::Char('t') | KeyCode::Enter => {
                self.jump_to_current_week();
            }
            KeyCode::Tab => {
                self.switch_to(self.feed.next(), tx.clone());
            }
            KeyCode::Char('r') => {
                self.start_load(tx.clone());
            }
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let blocked = self.alert.is_some() || self.show_help;
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if !blocked => {
                self.swipe.press(mouse.column as i32);
            }
            // Every release ends the drag, even one a popup swallows
            MouseEventKind::Up(MouseButton::Left) => {
                let released = self.swipe.release(mouse.column as i32);
                if let Some(swipe) = released.filter(|_| !blocked) {
                    active_nav!(self, nav => nav.apply_swipe(swipe));
                    debug!("swipe {:?} -> week {}", swipe, self.current_index());
                }
            }
            _ => {}
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // header
                Constraint::Min(0),    // schedule
                Constraint::Length(1), // status bar
            ])
            .split(area);

        header::render(frame, chunks[0], self.feed, self.today);
        match self.feed {
            Feed::Science => schedule::render(frame, chunks[1], &self.science, self.today),
            Feed::Grammar => schedule::render(frame, chunks[1], &self.grammar, self.today),
        }
        statusbar::render(frame, chunks[2], self.notice.as_deref());

        if self.show_help {
            self.draw_help_overlay(frame);
        }
        if let Some(alert) = &self.alert {
            draw_alert(frame, alert);
        }
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let popup_area = centered(frame.area(), 2, 12);
        frame.render_widget(Clear, popup_area);

        let rows = [
            ("[← / h]      ", "Previous week"),
            ("[→ / l]      ", "Next week"),
            ("[t] / Enter  ", "Jump to current week"),
            ("[drag]       ", "Swipe between weeks"),
            ("[Tab]        ", "Switch schedule"),
            ("[r]          ", "Reload"),
            ("[?]          ", "Toggle help"),
            ("[Esc] / [q]  ", "Quit"),
        ];
        let mut help_text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::accent().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (key, label) in rows {
            help_text.push(Line::from(vec![
                Span::styled(format!("  {}", key), theme::accent()),
                Span::styled(label, theme::dim()),
            ]));
        }

        let block = Block::default()
            .title(Span::styled(" Help ", theme::accent()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::accent())
            .style(theme::surface());

        frame.render_widget(Paragraph::new(help_text).block(block), popup_area);
    }
}

fn draw_alert(frame: &mut Frame, message: &str) {
    let popup_area = centered(frame.area(), 2, 7);
    frame.render_widget(Clear, popup_area);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  ✗ {}", message), theme::red())),
        Line::from(""),
        Line::from(Span::styled("  [any key] close", theme::dim())),
    ];
    let block = Block::default()
        .title(Span::styled(" Error ", theme::red()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::red())
        .style(theme::surface());

    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
        popup_area,
    );
}

/// A box half the screen wide, `height` rows tall, centred.
fn centered(area: Rect, width_div: u16, height: u16) -> Rect {
    let width = area.width / width_div;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn fetch_weeks<P: DeserializeOwned>(
    base_url: &str,
    timeout: Duration,
    location: &str,
) -> Result<Vec<WeekRecord<P>>, FeedError> {
    let source = open_source(base_url, timeout, location)?;
    ScheduleLoader::new(source).load()
}

fn event_loop(terminal: &mut DefaultTerminal, app: &mut App, events: &EventHandler) -> Result<()> {
    loop {
        terminal.draw(|frame| app.draw(frame))?;

        match events.next()? {
            Event::Key(key) => {
                app.handle_key(key, &events.sender());
                if app.should_quit {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            Event::Tick => app.tick(),
            Event::Loaded(loaded) => app.handle_loaded(loaded),
        }
    }
}

/// Run the TUI event loop.
pub fn run(config: AppConfig, feed: Feed) -> Result<()> {
    let mut app = App::new(config, feed);
    let events = EventHandler::new(250);
    app.start_load(events.sender());

    let mut terminal = ratatui::init();
    execute!(std::io::stdout(), crossterm::event::EnableMouseCapture)?;

    let result = event_loop(&mut terminal, &mut app, &events);

    let _ = execute!(std::io::stdout(), crossterm::event::DisableMouseCapture);
    ratatui::restore();
    result
}
