mod app;
mod clock;
mod domain;
mod input;
mod notifications;
mod persistence;
mod pomodoro;
mod ticker;
mod tracker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use clock::SystemClock;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{compute_stats, format_time, sorted_tasks};
use notifications::DesktopNotifier;
use persistence::{
    ensure_data_dir, get_data_dir, init_local_data_dir, load_settings, log_file,
    parse_break_interval, settings_file, tasks_file, JsonFileRepository, Settings,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracker::{TaskStore, Tracker};

#[derive(Parser)]
#[command(name = "stint")]
#[command(about = "A terminal task timer with break reminders and a Pomodoro", long_about = None)]
struct Cli {
    /// Use this data directory instead of .stint or ~/.stint
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Minutes of continuous work before a break reminder (this session only)
    #[arg(long, allow_hyphen_values = true)]
    break_interval: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .stint directory in the current directory
    Init,
    /// Print the dashboard stats and task list
    Summary,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let current_dir = std::env::current_dir().context("Could not determine current directory")?;
            let data_dir = init_local_data_dir(&current_dir)?;
            println!("Initialized stint directory: {}", data_dir.display());
            println!();
            println!("Stint will now use this local directory for task storage.");
            println!("Run 'stint' to start tracking tasks.");
            Ok(())
        }
        Some(Commands::Summary) => {
            let data_dir = get_data_dir(cli.data_dir.as_deref())?;
            print_summary(&data_dir);
            Ok(())
        }
        None => run_tui(cli.data_dir.as_deref(), cli.break_interval.as_deref()),
    }
}

/// Send tracing output to the log file; the terminal belongs to the UI
fn init_logging(data_dir: &Path) -> Result<()> {
    let path = log_file(data_dir);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stint=info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_settings_or_default(path: &Path) -> Settings {
    match load_settings(path) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(error = %e, path = %path.display(), "could not read settings, using defaults");
            Settings::default()
        }
    }
}

fn print_summary(data_dir: &Path) {
    let store = TaskStore::open(Box::new(JsonFileRepository::new(tasks_file(data_dir))));
    let tasks = store.tasks();
    let now = chrono::Utc::now();
    let stats = compute_stats(tasks, None, now);

    println!("Data directory: {}", data_dir.display());
    println!("Total time: {}", format_time(stats.total_time_spent));
    println!("Open:       {}", stats.active_count);
    println!("Completed:  {}", stats.completed_count);
    println!();
    for task in sorted_tasks(tasks) {
        let mark = if task.completed { "x" } else { " " };
        println!("[{}] {}  {}", mark, format_time(task.accumulated_secs), task.name);
    }
}

fn run_tui(data_dir_override: Option<&Path>, break_interval: Option<&str>) -> Result<()> {
    let data_dir = ensure_data_dir(data_dir_override)?;
    init_logging(&data_dir)?;
    tracing::info!(data_dir = %data_dir.display(), "starting");

    let settings_path = settings_file(&data_dir);
    let mut settings = load_settings_or_default(&settings_path);
    if let Some(input) = break_interval {
        settings.break_interval_minutes = parse_break_interval(input);
    }

    let store = TaskStore::open(Box::new(JsonFileRepository::new(tasks_file(&data_dir))));
    let tracker = Tracker::new(
        store,
        settings.break_interval_minutes,
        Box::new(SystemClock),
        Box::new(DesktopNotifier),
    );
    let mut app = AppState::new(tracker, settings, settings_path);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Bank the running task and save on exit
    if let Err(e) = app.shutdown() {
        tracing::error!(error = %e, "final save failed");
        eprintln!("Error saving state: {:#}", e);
    }

    if let Err(err) = &result {
        tracing::error!(error = %err, "exiting after error");
    }
    tracing::info!("stopped");
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let poll_rate = ticker::poll_duration();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(poll_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    match input::handle_key(app, key) {
                        Ok(true) => return Ok(()),
                        Ok(false) => app.status_message = None,
                        Err(e) => report_error(app, &e),
                    }
                }
            }
        }

        // Tick the tracker and the Pomodoro
        if let Err(e) = app.tick() {
            report_error(app, &e);
        }
    }
}

/// Persistence failures don't stop the app; the in-memory state stays
/// authoritative and the next save retries.
fn report_error(app: &mut AppState, error: &anyhow::Error) {
    tracing::error!(error = %error, "operation failed");
    app.status_message = Some(format!("Error: {:#}", error));
}
