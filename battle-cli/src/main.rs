use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use battle_core::{Session, SessionConfig, DEFAULT_COMPETITOR_1, DEFAULT_COMPETITOR_2};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod command;
mod terminal;

use terminal::TerminalSurface;

#[derive(Debug, Parser)]
#[command(name = "battle-cli")]
#[command(about = "Score rap battles round by round", long_about = None)]
struct Cli {
    /// Starting name for competitor 1
    #[arg(long, value_name = "NAME", default_value = DEFAULT_COMPETITOR_1)]
    mc1: String,

    /// Starting name for competitor 2
    #[arg(long, value_name = "NAME", default_value = DEFAULT_COMPETITOR_2)]
    mc2: String,

    /// Write logs to this file instead of stderr (RUST_LOG sets the level)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Skip the banner and first render
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file: {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .with_ansi(false)
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let config = SessionConfig {
        competitor1: cli.mc1,
        competitor2: cli.mc2,
    };
    tracing::info!(?config, "starting session");

    let mut session = Session::new(&config);
    let stdin = io::stdin();
    let mut surface = TerminalSurface::new(stdin.lock(), io::stdout().lock());
    terminal::run(&mut session, &mut surface, !cli.quiet).context("terminal session failed")?;

    tracing::info!(saved = session.ledger().len(), "session ended");
    Ok(())
}
