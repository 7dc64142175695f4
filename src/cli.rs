//! Command-line interface for ocean_tictactoe.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ocean_tictactoe::{GameConfig, Mode, Theme};
use tracing::instrument;

/// Ocean tic-tac-toe - play in the terminal against a friend or the computer
#[derive(Parser, Debug)]
#[command(name = "ocean_tictactoe")]
#[command(about = "Tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults are used if it does not exist)
    #[arg(short, long, global = true, default_value = "ocean_tictactoe.toml")]
    pub config: PathBuf,

    /// Settings that override the config file
    #[command(flatten)]
    pub overrides: Overrides,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Print the game history as JSON after quitting
        #[arg(long)]
        print_history: bool,
    },

    /// Print the effective configuration as TOML
    Config,
}

impl Default for Command {
    fn default() -> Self {
        Command::Play {
            print_history: false,
        }
    }
}

/// Per-run overrides for [`GameConfig`] fields.
#[derive(Args, Debug, Clone, Default)]
pub struct Overrides {
    /// Starting mode: pvp or pvc
    #[arg(long, global = true)]
    pub mode: Option<Mode>,

    /// Starting theme: light or dark
    #[arg(long, global = true)]
    pub theme: Option<Theme>,

    /// Computer reply delay in milliseconds
    #[arg(long, global = true)]
    pub delay_ms: Option<u64>,

    /// Seed for the computer's moves
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Log file path
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

impl Overrides {
    /// Applies every override that was given on the command line.
    #[instrument(skip(config))]
    pub fn apply(self, mut config: GameConfig) -> GameConfig {
        if let Some(mode) = self.mode {
            config = config.with_mode(mode);
        }
        if let Some(theme) = self.theme {
            config = config.with_theme(theme);
        }
        if let Some(delay_ms) = self.delay_ms {
            config = config.with_computer_delay_ms(delay_ms);
        }
        if let Some(seed) = self.seed {
            config = config.with_rng_seed(Some(seed));
        }
        if let Some(log_file) = self.log_file {
            config = config.with_log_file(log_file);
        }
        config
    }
}
