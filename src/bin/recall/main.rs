//! recall - terminal sound-sequence memory game
//!
//! Run with: cargo run -- --preset classic

mod app;
mod audio;
mod cli;
mod ui;

use std::{fs::OpenOptions, path::Path, sync::Mutex};

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing_subscriber::EnvFilter;

use app::App;
use cli::Cli;

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(&cli.log_file)?;

    App::new(&cli)?.run()
}

/// The terminal belongs to the UI, so logs go to a file.
fn init_tracing(log_path: &Path) -> EyreResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .wrap_err_with(|| format!("failed to open log file {}", log_path.display()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
