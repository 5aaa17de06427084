//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::store::resolve_data_dir;
use crate::types::Mode;

const LOG_FILE: &str = "tui-snake.log";

#[derive(Parser, Debug)]
#[command(name = "tui-snake")]
#[command(version, about = "Terminal Snake with Classic, Time Attack and Survival modes")]
pub struct Cli {
    /// Start a run in this mode right away (classic, time-attack, survival)
    #[arg(long, value_parser = parse_mode)]
    pub mode: Option<Mode>,

    /// Directory for settings, scores and achievements
    #[arg(long, env = "SNAKE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory holding the .wav sound assets
    #[arg(long, env = "SNAKE_ASSETS_DIR", default_value = "assets")]
    pub assets_dir: PathBuf,

    /// Log file (defaults to tui-snake.log in the data directory)
    #[arg(long, env = "SNAKE_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Seed for a reproducible game
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable sound
    #[arg(long)]
    pub mute: bool,
}

fn parse_mode(s: &str) -> Result<Mode, String> {
    Mode::from_str(s)
        .ok_or_else(|| format!("unknown mode '{s}' (expected classic, time-attack or survival)"))
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub mode: Option<Mode>,
    pub data_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub log_file: PathBuf,
    pub seed: Option<u64>,
    pub mute: bool,
}

impl AppConfig {
    pub fn from_cli(cli: Cli) -> Self {
        let data_dir = resolve_data_dir(cli.data_dir);
        let log_file = cli.log_file.unwrap_or_else(|| data_dir.join(LOG_FILE));
        Self {
            mode: cli.mode,
            data_dir,
            assets_dir: cli.assets_dir,
            log_file,
            seed: cli.seed,
            mute: cli.mute,
        }
    }
}
