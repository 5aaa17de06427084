//! Terminal Snake runner.
//!
//! Opens the records under the data directory, sets up file logging and sound,
//! then hands the terminal to the menu loop.

use anyhow::Result;
use clap::Parser;

use tui_snake::app::App;
use tui_snake::config::{AppConfig, Cli};
use tui_snake::store::Records;
use tui_snake::term::TerminalRenderer;
use tui_snake::{audio, logging};

fn main() -> Result<()> {
    let config = AppConfig::from_cli(Cli::parse());

    if let Err(err) = logging::init(&config.log_file) {
        eprintln!("warning: logging disabled: {err:#}");
    }
    tracing::info!(
        data_dir = %config.data_dir.display(),
        mode = ?config.mode,
        seed = ?config.seed,
        "starting"
    );

    let mut records = Records::open(&config.data_dir);
    let audio = audio::open(&config.assets_dir, config.mute);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = App::new(&config, &mut records, audio, &mut term).run();

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        tracing::error!(error = %format!("{err:#}"), "exited with error");
    }
    result
}
