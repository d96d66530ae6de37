//! Console host for Pixel Jeopardy.
//!
//! Wires a file-backed [`GameStore`] to standard input: each line is a
//! command (`help` lists them), replies go to standard output, and logs go
//! to standard error.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from the path given as the first argument, or
//!    `jeopardy-config.yaml` in the working directory, or defaults
//! 2. Initialize structured logging (tracing)
//! 3. Open the data directory
//! 4. Resume the saved game, if any
//! 5. Read commands until `quit` or end of input
//!
//! [`GameStore`]: jeopardy_core::GameStore

mod console;
mod error;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use jeopardy_core::{CueLogger, FileStorage, GameStore, JeopardyConfig, StoreOptions};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::console::{Console, Reply};
use crate::error::HostError;

/// Default configuration file name.
const CONFIG_FILE: &str = "jeopardy-config.yaml";

fn main() -> Result<(), HostError> {
    // 1. Load configuration. Logging is not up yet, so report where it came
    //    from once it is.
    let (config, source) = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config);
    info!(
        source = %source.display(),
        data_dir = %config.storage.data_dir.display(),
        max_rounds = ?config.game.max_rounds,
        "jeopardy-host starting"
    );

    // 3. Open the data directory.
    let storage = FileStorage::open(&config.storage.data_dir)?;

    // 4. Resume the saved game.
    let mut store = GameStore::open(storage, StoreOptions::from(&config));
    store.add_listener(Box::new(CueLogger));
    info!(
        rounds = store.rounds().len(),
        ready = store.all_questions_filled().ready,
        "Game loaded"
    );

    // 5. Command loop.
    let mut console = Console::new(store);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", console.render())?;

    for line in stdin.lock().lines() {
        let line = line?;
        match console.handle(&line) {
            Ok(Reply::Quit) => break,
            Ok(Reply::Text(text)) if text.is_empty() => {}
            Ok(Reply::Text(text)) => writeln!(stdout, "{text}")?,
            Err(e) => writeln!(stdout, "{}", console::describe_error(&e))?,
        }
        stdout.flush()?;
    }

    let scores = console.store().scores();
    info!(
        player1 = scores.player1,
        player2 = scores.player2,
        "jeopardy-host stopped"
    );
    Ok(())
}

/// Resolve and load the configuration file.
///
/// An explicit path must exist; the default file is optional.
fn load_config() -> Result<(JeopardyConfig, PathBuf), HostError> {
    if let Some(path) = std::env::args_os().nth(1) {
        let path = PathBuf::from(path);
        let config = JeopardyConfig::from_file(&path)?;
        return Ok((config, path));
    }

    let default_path = Path::new(CONFIG_FILE);
    if default_path.exists() {
        Ok((JeopardyConfig::from_file(default_path)?, default_path.to_path_buf()))
    } else {
        Ok((JeopardyConfig::parse("")?, PathBuf::from("<defaults>")))
    }
}

/// `RUST_LOG` wins over the configured level when set.
fn init_logging(config: &JeopardyConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(io::stderr)
            .init();
    }
}
