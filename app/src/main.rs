//! Parking Ring - Terminal Application
//!
//! This is the main entry point for the terminal front end.
//! It provides a prompt for parking, releasing, finding and removing cars.

mod commands;
mod render;
mod repl;
mod state;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use parking_ring::Config;

use repl::Repl;
use state::AppState;

/// Circular-queue parking lot in the terminal.
#[derive(Parser)]
#[command(name = "parking-ring", version, about, long_about = None)]
struct Cli {
    /// Number of slots when the lot opens (minimum 4).
    #[arg(long)]
    capacity: Option<usize>,

    /// TOML config file. Overrides --preset.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Built-in settings to start from.
    #[arg(long, value_enum, default_value_t = Preset::Standard)]
    preset: Preset,

    /// Clear without asking for confirmation.
    #[arg(long, short = 'y')]
    yes: bool,

    /// Run commands from a file instead of the prompt.
    #[arg(long)]
    script: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Preset {
    Standard,
    Compact,
    Large,
}

impl Preset {
    fn config(self) -> Config {
        match self {
            Self::Standard => Config::default(),
            Self::Compact => Config::compact(),
            Self::Large => Config::large(),
        }
    }
}

impl Cli {
    fn build_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => self.preset.config(),
        };

        if let Some(capacity) = self.capacity {
            config.initial_capacity = capacity;
        }
        if self.yes {
            config.confirm_clear = false;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    parking_ring::init_logging();

    let cli = Cli::parse();
    let config = cli.build_config()?;
    let state = AppState::new(config).context("invalid configuration")?;

    match &cli.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            log::info!("Running script {}", path.display());
            Repl::new(state, BufReader::new(file), io::stdout().lock())
                .scripted()
                .run()?;
        }
        None => {
            Repl::new(state, io::stdin().lock(), io::stdout().lock()).run()?;
        }
    }

    Ok(())
}
