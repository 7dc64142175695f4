//! Ocean tic-tac-toe - terminal front end.

#![warn(missing_docs)]

mod cli;
mod tui;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use ocean_tictactoe::{GameConfig, SessionController};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = GameConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    let config = cli.overrides.apply(config);

    match cli.command.unwrap_or_default() {
        Command::Play { print_history } => run_play(config, print_history).await,
        Command::Config => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}

/// Run the terminal UI against a fresh session.
async fn run_play(config: GameConfig, print_history: bool) -> Result<()> {
    init_tracing(config.log_file())?;
    info!(?config, "Starting Ocean tic-tac-toe");

    let rng = match config.rng_seed() {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_os_rng(),
    };
    let (handle, controller) = SessionController::spawn(&config, rng);

    let result = tui::run_tui(handle.clone()).await;

    let final_state = handle.snapshot();
    handle.shutdown();
    controller.await.context("Session controller panicked")?;
    result?;

    info!(
        games = final_state.history().len(),
        "Session finished"
    );
    if print_history {
        let json = serde_json::to_string_pretty(final_state.history())
            .context("Failed to serialize history")?;
        println!("{json}");
    }
    Ok(())
}

/// Sends tracing output to a file so it never draws over the UI.
#[instrument]
fn init_tracing(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized
    Ok(())
}
