//! Command line configuration and logging setup.

use std::{fs::OpenOptions, path::PathBuf, sync::Mutex};

use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use tracing::{warn, Level};

use crate::storage::{JsonFileStore, MemoryStore, Store};

/// Side length used when none is given.
pub const DEFAULT_SIDE: u16 = 7;

/// Smallest side length offered to players.
pub const MIN_PLAYABLE_SIDE: u16 = 5;

/// Largest side length offered to players.
pub const MAX_PLAYABLE_SIDE: u16 = 12;

/// Command line arguments.
#[derive(Clone, Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Rows of the first maze.
    #[arg(
        long,
        default_value_t = DEFAULT_SIDE,
        value_parser = clap::value_parser!(u16)
            .range(i64::from(MIN_PLAYABLE_SIDE)..=i64::from(MAX_PLAYABLE_SIDE))
    )]
    pub rows: u16,
    /// Columns of the first maze.
    #[arg(
        long,
        default_value_t = DEFAULT_SIDE,
        value_parser = clap::value_parser!(u16)
            .range(i64::from(MIN_PLAYABLE_SIDE)..=i64::from(MAX_PLAYABLE_SIDE))
    )]
    pub cols: u16,
    /// Seed for maze generation, random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Directory holding best scores and history.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    /// Keep scores in memory only.
    #[arg(long)]
    pub no_persist: bool,
    /// File receiving log output; nothing is logged without it.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    /// Log debug events as well.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            rows: DEFAULT_SIDE,
            cols: DEFAULT_SIDE,
            seed: None,
            data_dir: None,
            no_persist: false,
            log_file: None,
            verbose: false,
        }
    }
}

impl Cli {
    /// Seed to use, drawing one from entropy if none was given.
    #[must_use]
    pub fn seed_or_random(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Opens the configured score store.
    ///
    /// A data directory that cannot be created falls back to an in-memory store, since scores are
    /// best-effort.
    #[must_use]
    pub fn open_store(&self) -> Box<dyn Store> {
        if self.no_persist {
            return Box::new(MemoryStore::new());
        }

        let directory = self
            .data_dir
            .clone()
            .unwrap_or_else(JsonFileStore::default_directory);
        match JsonFileStore::open(&directory) {
            Ok(store) => Box::new(store),
            Err(err) => {
                warn!(%err, directory = %directory.display(), "scores will not be saved");
                Box::new(MemoryStore::new())
            }
        }
    }
}

/// Installs the log subscriber.
///
/// The terminal belongs to the interface, so logs are only written when a file is given.
///
/// # Errors
///
/// - [`std::io::Error`] if the log file cannot be opened.
/// - A subscriber was already installed.
pub fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .try_init()
        .map_err(|err| eyre!("failed to install log subscriber: {err}"))
}
