pub mod ui;

use chrono::{Local, NaiveTime};
use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

use rondo::catalog::Catalog;
use rondo::celebration::Celebration;
use rondo::config::{Config, ConfigStore, FileConfigStore};
use rondo::runner::{SessionRunner, SessionStatus};
use rondo::runtime::{EventSource, SessionEvent, TerminalEvents};
use rondo::schedule;
use rondo::sequence::SequenceBuilder;
use rondo::session::{default_warm_up, SessionConfig, SessionError};

const TICK_RATE_MS: u64 = 100;
/// UI ticks per one-second step of the session runner
const TICKS_PER_SECOND: u64 = 1000 / TICK_RATE_MS;

/// terminal circuit-training timer
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal circuit-training timer. Pick a category or name exercises, set work/rest durations and rounds, then follow the countdown from warm-up to cool-down. Use --schedule to print the session plan instead of running it."
)]
pub struct Cli {
    /// seconds of work per exercise
    #[clap(short = 'w', long)]
    work: Option<u32>,

    /// seconds of rest between exercises
    #[clap(short = 'r', long)]
    rest: Option<u32>,

    /// number of rounds through the circuit
    #[clap(short = 'n', long)]
    rounds: Option<u32>,

    /// exercise category to fill the circuit from
    #[clap(short = 'c', long, value_enum)]
    category: Option<Category>,

    /// exercise to include instead of the category list (repeat the flag)
    #[clap(short = 'e', long = "exercise")]
    exercises: Vec<String>,

    /// seconds of cool-down stretching at the end
    #[clap(long)]
    cool_down: Option<u32>,

    /// leave out the warm-up block
    #[clap(long)]
    skip_warm_up: bool,

    /// session start time as HH:MM for the plan (defaults to now)
    #[clap(long)]
    start: Option<String>,

    /// print the session plan and exit instead of running the timer
    #[clap(long)]
    schedule: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
pub enum Category {
    Strength,
    Core,
    Mobility,
}

impl Category {
    fn as_catalog(&self) -> Catalog {
        Catalog::new(&self.to_string().to_lowercase())
    }
}

/// effective settings after merging the saved config and CLI flags
#[derive(Debug, Clone)]
pub struct RuntimeSettings {
    pub work_secs: u32,
    pub rest_secs: u32,
    pub rounds: u32,
    pub category: Category,
    pub cool_down_secs: u32,
    pub skip_warm_up: bool,
    /// explicit circuit; empty means take the category's exercises
    pub exercises: Vec<String>,
}

impl RuntimeSettings {
    fn resolve(cli: &Cli, saved: &Config) -> Self {
        let category = cli
            .category
            .or_else(|| Category::from_str(&saved.category, true).ok())
            .unwrap_or(Category::Strength);

        Self {
            work_secs: cli.work.unwrap_or(saved.work_secs),
            rest_secs: cli.rest.unwrap_or(saved.rest_secs),
            rounds: cli.rounds.unwrap_or(saved.rounds),
            category,
            cool_down_secs: cli.cool_down.unwrap_or(saved.cool_down_secs),
            skip_warm_up: cli.skip_warm_up || saved.skip_warm_up,
            exercises: cli.exercises.clone(),
        }
    }

    fn exercise_list(&self) -> Vec<String> {
        if self.exercises.is_empty() {
            self.category.as_catalog().exercise_names()
        } else {
            self.exercises.clone()
        }
    }

    pub fn to_session_config(&self) -> SessionConfig {
        SessionConfig {
            exercises: self.exercise_list(),
            work_secs: self.work_secs,
            rest_secs: self.rest_secs,
            rounds: self.rounds,
            warm_up: if self.skip_warm_up {
                Vec::new()
            } else {
                default_warm_up()
            },
            cool_down_secs: self.cool_down_secs,
        }
    }

    fn to_config(&self) -> Config {
        Config {
            work_secs: self.work_secs,
            rest_secs: self.rest_secs,
            rounds: self.rounds,
            category: self.category.to_string().to_lowercase(),
            cool_down_secs: self.cool_down_secs,
            skip_warm_up: self.skip_warm_up,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Session,
    Summary,
    Schedule,
}

#[derive(Debug, PartialEq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub settings: RuntimeSettings,
    pub runner: SessionRunner,
    pub catalog: Catalog,
    /// wall-clock moment the plan is anchored to
    pub origin: NaiveTime,
    pub state: AppState,
    pub celebration: Celebration,
    pub schedule_scroll: usize,
    subticks: u64,
}

impl App {
    pub fn new(settings: RuntimeSettings, origin: NaiveTime) -> Result<Self, SessionError> {
        let sequence = SequenceBuilder::new(settings.to_session_config()).build()?;
        let runner = SessionRunner::new(sequence)?;
        let catalog = settings.category.as_catalog();

        Ok(Self {
            settings,
            runner,
            catalog,
            origin,
            state: AppState::Session,
            celebration: Celebration::idle(),
            schedule_scroll: 0,
            subticks: 0,
        })
    }

    /// rebuild the runner for another pass with the same settings
    pub fn reset(&mut self) -> Result<(), SessionError> {
        let sequence = SequenceBuilder::new(self.settings.to_session_config()).build()?;
        self.runner = SessionRunner::new(sequence)?;
        self.state = AppState::Session;
        self.celebration = Celebration::idle();
        self.schedule_scroll = 0;
        self.subticks = 0;
        Ok(())
    }

    fn start_session(&mut self) -> Result<(), SessionError> {
        if self.runner.status() == SessionStatus::NotStarted {
            self.subticks = 0;
            self.runner.start()?;
        }
        Ok(())
    }

    /// one UI tick: advance animations always, the session clock once
    /// every `TICKS_PER_SECOND` ticks while running
    pub fn on_tick(&mut self, width: u16, height: u16) -> Result<(), SessionError> {
        self.celebration.on_tick();

        if self.runner.status() != SessionStatus::Running {
            return Ok(());
        }

        self.subticks += 1;
        if self.subticks < TICKS_PER_SECOND {
            return Ok(());
        }
        self.subticks = 0;

        self.runner.tick()?;
        if self.runner.is_finished() {
            self.state = AppState::Summary;
            self.celebration.begin(width, height);
        }
        Ok(())
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Result<KeyOutcome, SessionError> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(KeyOutcome::Quit);
        }
        if key.code == KeyCode::Esc {
            return Ok(KeyOutcome::Quit);
        }

        match self.state {
            AppState::Session => match key.code {
                KeyCode::Char(' ') => self.start_session()?,
                KeyCode::Char('s') => {
                    self.schedule_scroll = 0;
                    self.state = AppState::Schedule;
                }
                _ => {}
            },
            AppState::Summary => match key.code {
                KeyCode::Char('r') => self.reset()?,
                KeyCode::Char('s') => {
                    self.schedule_scroll = 0;
                    self.state = AppState::Schedule;
                }
                _ => {}
            },
            AppState::Schedule => match key.code {
                KeyCode::Char('b') | KeyCode::Backspace => {
                    self.state = if self.runner.is_finished() {
                        AppState::Summary
                    } else {
                        AppState::Session
                    };
                }
                KeyCode::Up => {
                    self.schedule_scroll = self.schedule_scroll.saturating_sub(1);
                }
                KeyCode::Down => {
                    // clamped against the row count in the render pass
                    self.schedule_scroll += 1;
                }
                KeyCode::PageUp => {
                    self.schedule_scroll = self.schedule_scroll.saturating_sub(10);
                }
                KeyCode::PageDown => {
                    self.schedule_scroll += 10;
                }
                KeyCode::Home => {
                    self.schedule_scroll = 0;
                }
                _ => {}
            },
        }

        Ok(KeyOutcome::Continue)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let store = FileConfigStore::new();
    let settings = RuntimeSettings::resolve(&cli, &store.load());

    let origin = match cli.start.as_deref() {
        Some(text) => match parse_start_time(text) {
            Some(time) => time,
            None => exit_with_config_error(format!("--start expects HH:MM, got '{}'", text)),
        },
        None => Local::now().time(),
    };

    if cli.schedule {
        let sequence = match SequenceBuilder::new(settings.to_session_config()).build() {
            Ok(sequence) => sequence,
            Err(e) => exit_with_config_error(e.to_string()),
        };
        print!("{}", schedule::render_table(&sequence, origin));
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(
            ErrorKind::Io,
            "stdin must be a tty (use --schedule for plain output)",
        )
        .exit();
    }

    let mut app = match App::new(settings, origin) {
        Ok(app) => app,
        Err(e) => exit_with_config_error(e.to_string()),
    };

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = TerminalEvents::spawn(Duration::from_millis(TICK_RATE_MS));
    let res = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    let _ = store.save(&app.settings.to_config());

    res
}

fn run_app<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &E,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui(app, f))?;

    loop {
        match events.next_event()? {
            SessionEvent::Tick => {
                let size = terminal.size().unwrap_or_default();
                app.on_tick(size.width, size.height)?;

                // redraw only while something on screen is moving
                if app.runner.status() == SessionStatus::Running || app.celebration.is_active() {
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            SessionEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            SessionEvent::Key(key) => {
                if app.on_key(key)? == KeyOutcome::Quit {
                    break;
                }
                terminal.draw(|f| ui(app, f))?;
            }
        }
    }

    Ok(())
}

fn parse_start_time(text: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(text, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
        .ok()
}

fn exit_with_config_error(message: String) -> ! {
    let mut cmd = Cli::command();
    cmd.error(ErrorKind::ValueValidation, message).exit()
}

fn ui(app: &mut App, f: &mut Frame) {
    ui::screen::current_screen(&app.state).render(app, f);
}
