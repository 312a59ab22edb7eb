use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use connect_four::config::{AppConfig, ConfigSource};
use connect_four::error::SessionError;
use connect_four::headless::{parse_moves, run_script};
use connect_four::ui::App;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{warn, Level};

/// Log file name used by the terminal UI when `--log` is not given.
const DEFAULT_LOG_FILE: &str = "connect-four.log";

/// Play Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "connect-four", about = "Two-player Connect Four in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect-four.toml")]
    config: PathBuf,

    /// Write logs to this file. Defaults to connect-four.log in the temp
    /// directory for the terminal UI, and to stderr with --moves
    #[arg(long)]
    log: Option<PathBuf>,

    /// Play these 1-based columns without a UI and print the final state as JSON,
    /// e.g. "4,4,5,3"
    #[arg(long)]
    moves: Option<String>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let (config, source) = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    let level = config.logging.level()?;
    let target = log_target(cli.log.as_deref(), cli.moves.is_some());
    init_logging(level, &target)?;

    if source == ConfigSource::Defaults {
        warn!(path = %cli.config.display(), "config file not found, using defaults");
    }

    match cli.moves {
        Some(script) => {
            let moves = parse_moves(&script)?;
            let snapshot = run_script(&moves, &config);
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        None => {
            run_tui(&config).context("running terminal UI")?;
        }
    }

    Ok(())
}

/// Where log output goes.
#[derive(Debug, PartialEq, Eq)]
enum LogTarget {
    File(PathBuf),
    Stderr,
}

/// An explicit `--log` wins. Headless runs own no screen, so they log to
/// stderr; the terminal UI owns the screen, so it logs to a file in the
/// temp directory.
fn log_target(log_path: Option<&Path>, headless: bool) -> LogTarget {
    match log_path {
        Some(path) => LogTarget::File(path.to_path_buf()),
        None if headless => LogTarget::Stderr,
        None => LogTarget::File(std::env::temp_dir().join(DEFAULT_LOG_FILE)),
    }
}

fn init_logging(level: Level, target: &LogTarget) -> Result<(), SessionError> {
    let builder = tracing_subscriber::fmt().with_max_level(level);
    match target {
        LogTarget::File(path) => {
            let file = File::create(path).map_err(|source| SessionError::LogFile {
                path: path.clone(),
                source,
            })?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        LogTarget::Stderr => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

fn run_tui(config: &AppConfig) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture);
    let _ = terminal.show_cursor();

    res
}
