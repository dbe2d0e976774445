mod ui;

use breathe::{
    app_dirs::AppDirs,
    catalog::{find_exercise, ExerciseProfile, CATALOG, DURATION_CHOICES},
    config::{Config, ConfigStore, FileConfigStore},
    logging::init_logging,
    runtime::{BreathEvent, BreathEventSource, CrosstermEventSource, FixedTicker, Runner, Ticker},
    SessionConfig, SessionEngine,
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use itertools::Itertools;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin, Write},
};

/// calm guided-breathing tui
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A calm terminal companion for guided breathing: pick an exercise, pick a session length, and follow the circle through inhale, hold and exhale."
)]
pub struct Cli {
    /// exercise to practice, e.g. "Box Breathing" (see --list)
    #[clap(short = 'e', long)]
    exercise: Option<String>,

    /// session length in minutes
    #[clap(short = 'd', long, value_parser = clap::value_parser!(u32).range(1..))]
    duration: Option<u32>,

    /// print the available exercises and exit
    #[clap(long)]
    list: bool,
}

#[derive(Debug)]
pub struct App {
    pub engine: SessionEngine,
    pub selected: usize,
    pub duration_minutes: u32,
    /// last rejected operation, shown until the next successful start
    pub status: Option<String>,
}

impl App {
    pub fn new(exercise: &str, duration_minutes: u32) -> Self {
        let selected = CATALOG.iter().position(|p| p.id == exercise).unwrap_or(0);
        Self {
            engine: SessionEngine::new(),
            selected,
            duration_minutes,
            status: None,
        }
    }

    /// Command line flags win over the saved config; a stale config entry
    /// falls back to the defaults, an unknown flag value is an error.
    pub fn from_settings(cli: &Cli, cfg: &Config) -> Result<Self, String> {
        let exercise = match &cli.exercise {
            Some(name) => find_exercise(CATALOG, name)
                .ok_or_else(|| {
                    format!(
                        "unknown exercise '{}', expected one of: {}",
                        name,
                        CATALOG.iter().map(|p| p.id).join(", ")
                    )
                })?
                .id,
            None => find_exercise(CATALOG, &cfg.exercise)
                .map(|p| p.id)
                .unwrap_or(CATALOG[0].id),
        };

        let duration = cli
            .duration
            .or(Some(cfg.duration_minutes).filter(|&m| m > 0))
            .unwrap_or(DURATION_CHOICES[0]);

        Ok(Self::new(exercise, duration))
    }

    pub fn selected_profile(&self) -> &'static ExerciseProfile {
        &CATALOG[self.selected]
    }

    pub fn to_config(&self) -> Config {
        Config {
            exercise: self.selected_profile().id.to_string(),
            duration_minutes: self.duration_minutes,
        }
    }

    pub fn toggle_session(&mut self) {
        if self.engine.is_running() {
            self.engine.stop();
            return;
        }

        let config = SessionConfig::new(self.selected_profile().id, self.duration_minutes);
        match self.engine.start(config) {
            Ok(_) => self.status = None,
            Err(err) => {
                tracing::warn!(%err, "could not start session");
                self.status = Some(err.to_string());
            }
        }
    }

    pub fn on_tick(&mut self) {
        if self.engine.is_running() {
            if let Err(err) = self.engine.tick() {
                tracing::warn!(%err, "tick rejected");
            }
        }
    }

    // settings only change between sessions

    pub fn select_next(&mut self) {
        if !self.engine.is_running() {
            self.selected = (self.selected + 1) % CATALOG.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.engine.is_running() {
            self.selected = (self.selected + CATALOG.len() - 1) % CATALOG.len();
        }
    }

    pub fn toggle_duration(&mut self) {
        if self.engine.is_running() {
            return;
        }
        self.duration_minutes = match DURATION_CHOICES
            .iter()
            .position(|&m| m == self.duration_minutes)
        {
            Some(idx) => DURATION_CHOICES[(idx + 1) % DURATION_CHOICES.len()],
            None => DURATION_CHOICES[0],
        };
    }

    /// Applies a key press. Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_session(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Tab | KeyCode::Char('d') => self.toggle_duration(),
            _ => {}
        }
        false
    }
}

fn print_exercises<W: Write>(out: &mut W) -> io::Result<()> {
    for profile in CATALOG {
        writeln!(
            out,
            "{:<14} {:<8} {}",
            profile.id,
            profile.timings.iter().join("-"),
            profile.description
        )?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.list {
        print_exercises(&mut io::stdout())?;
        return Ok(());
    }

    let store = FileConfigStore::new();
    let mut app = match App::from_settings(&cli, &store.load()) {
        Ok(app) => app,
        Err(msg) => Cli::command().error(ErrorKind::InvalidValue, msg).exit(),
    };

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = AppDirs::log_path() {
        if let Err(err) = init_logging(&path) {
            eprintln!("logging disabled: {err}");
        }
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    let result = start_tui(&mut terminal, &mut app, &mut runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    app.engine.stop();
    if let Err(err) = store.save(&app.to_config()) {
        tracing::warn!(%err, path = %store.path().display(), "could not save config");
    }

    result
}

fn start_tui<B: Backend, E: BreathEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &mut Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui(app, f))?;

    loop {
        // the trigger only runs while a session does
        runner.set_armed(app.engine.is_running());

        match runner.step() {
            BreathEvent::Tick => app.on_tick(),
            BreathEvent::Resize => {}
            BreathEvent::Key(key) => {
                if app.handle_key(key) {
                    break;
                }
            }
            BreathEvent::Disconnected => break,
        }

        terminal.draw(|f| ui(app, f))?;
    }

    runner.disarm();
    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
