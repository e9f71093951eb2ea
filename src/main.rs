use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use connect_four::ai::{clock_seed, Agent, HeuristicAgent};
use connect_four::config::{AppConfig, FrontendKind, LoggingConfig, UiConfig};
use connect_four::controller::Controller;
use connect_four::ui::{App, ConsoleFrontend};

/// Play Connect Four against the computer.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four against the computer")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Use line-based console I/O instead of the full-screen UI
    #[arg(long)]
    plain: bool,

    /// Fixed seed for the computer's random moves
    #[arg(long)]
    seed: Option<u64>,

    /// Override the log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    log_level: Option<String>,

    /// Append logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    // Load configuration
    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if cli.plain {
        config.ui.frontend = FrontendKind::Plain;
    }
    if let Some(seed) = cli.seed {
        config.ai.seed = Some(seed);
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(file) = cli.log_file {
        config.logging.file = Some(file);
    }
    config.validate().context("invalid command line override")?;

    init_logging(&config.logging, config.ui.frontend)?;

    let seed = config.ai.seed.unwrap_or_else(clock_seed);
    info!(seed, frontend = ?config.ui.frontend, "starting");
    let mut controller = Controller::new(HeuristicAgent::from_seed(seed));

    match config.ui.frontend {
        FrontendKind::Plain => {
            let mut frontend = ConsoleFrontend::stdio(config.ui.clone());
            controller.run(&mut frontend)?;
        }
        FrontendKind::Tui => run_tui(&mut controller, config.ui.clone())?,
    }

    let score = controller.score();
    if score.games() > 0 {
        println!(
            "Final score: you {} - {} computer, {} drawn",
            score.human_wins, score.automated_wins, score.draws
        );
    }
    Ok(())
}

fn run_tui<A: Agent>(controller: &mut Controller<A>, options: UiConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    let mut app = App::new(terminal, options);
    let res = controller.run(&mut app);

    // Restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(app.terminal_mut().backend_mut(), LeaveAlternateScreen);
    let _ = app.terminal_mut().show_cursor();

    res?;
    Ok(())
}

/// Route `tracing` output to the log file, or to stderr in plain mode.
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(config: &LoggingConfig, frontend: FrontendKind) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match (&config.file, frontend) {
        (Some(path), _) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        (None, FrontendKind::Plain) => builder.with_writer(io::stderr).init(),
        // stderr would tear the full-screen UI
        (None, FrontendKind::Tui) => {}
    }
    Ok(())
}
