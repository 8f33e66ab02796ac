//! Logger setup.
//!
//! The game owns the terminal, so records can never go to stderr. Logging is
//! enabled only when a file is configured; `RUST_LOG` picks the level
//! (default `info`).

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

use crate::core::GameEvent;

/// Install the global logger writing to `path`, or do nothing for `None`.
pub fn init(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("install logger")?;
    Ok(())
}

/// Log one gameplay event at the level it deserves.
pub fn log_event(event: &GameEvent) {
    match event {
        GameEvent::GameOver { score } => log::info!("game over, final score {}", score),
        GameEvent::Restarted { episode } => log::info!("restart, episode {}", episode),
        GameEvent::PuzzleStarted(kind) => log::debug!("puzzle started: {}", kind.as_str()),
        GameEvent::PuzzleSolved(kind) => log::info!("puzzle solved: {}", kind.as_str()),
        GameEvent::PuzzleFailed(kind) => log::info!("puzzle failed: {}", kind.as_str()),
        GameEvent::PuzzleExpired(kind) => log::info!("puzzle expired: {}", kind.as_str()),
        GameEvent::ShapeCaught(kind) => log::debug!("caught {}", kind.as_str()),
        GameEvent::WrongCatch(kind) => log::info!("wrong catch: {}", kind.as_str()),
        GameEvent::TargetMissed(kind) => log::info!("missed target {}", kind.as_str()),
        GameEvent::Paused => log::debug!("paused"),
        GameEvent::Resumed => log::debug!("resumed"),
    }
}
