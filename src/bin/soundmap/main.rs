//! soundmap - walk a map and hear the bird, the car and the bell around you
//!
//! Run with: cargo run
//!
//! Arrow keys (or WASD) move the listener, space recomputes the spatial
//! cues in place, R resets, Q quits. Logs go to `soundmap.log`; set
//! `RUST_LOG=soundmap=debug` to see every recompute.

mod app;
mod position;
mod ui;

use std::{fs::File, sync::Mutex, time::Duration};

use app::SoundMap;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use soundmap::config::POSITION_TASK_INTERVAL_MS;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

const LOG_FILE: &str = "soundmap.log";

fn setup_logging() -> EyreResult<()> {
    // The terminal belongs to the UI, so logs go to a file.
    let file = File::create(LOG_FILE).wrap_err_with(|| format!("failed to create {LOG_FILE}"))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .compact()
        .finish()
        .init();
    Ok(())
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    setup_logging()?;

    SoundMap::new()
        .position_interval(Duration::from_millis(POSITION_TASK_INTERVAL_MS))
        .run()
}
