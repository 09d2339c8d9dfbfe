//! Log sink configuration
//!
//! Assembles the process-wide subscriber from three sinks: the primary log
//! file, a dated log file under `logs/`, and the colorized console. File
//! sinks are truncated at start and use plain formatting.

use crate::system::System;
use anyhow::{Context as _, Result};
use chrono::{DateTime, Local};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::{EnvFilter, fmt};

/// Directory (relative to the working directory) that holds dated log files
pub const LOGS_DIR: &str = "logs";

/// File name of the dated log for a run started at `start`
#[must_use]
pub fn dated_log_name(start: &DateTime<Local>) -> String {
    return start.format("dv_%Y_%m_%d_%H_%M.log").to_string();
}

/// Install the log subscriber for this invocation
///
/// Creates `logs/` (with parents) when absent. The minimum severity is
/// DEBUG when `debug` is set and INFO otherwise; `RUST_LOG` overrides both.
///
/// # Errors
///
/// Returns an error when a log file cannot be created or a subscriber is
/// already installed.
pub fn init(
    system: &dyn System,
    debug: bool,
    logfile: &Path,
    start: &DateTime<Local>,
) -> Result<()> {
    system
        .create_dir_all(Path::new(LOGS_DIR))
        .with_context(|| format!("Failed to create the {LOGS_DIR} directory"))?;

    let primary = File::create(logfile)
        .with_context(|| format!("Failed to create log file: {}", logfile.display()))?;

    let dated_path = Path::new(LOGS_DIR).join(dated_log_name(start));
    let dated = File::create(&dated_path)
        .with_context(|| format!("Failed to create log file: {}", dated_path.display()))?;

    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(primary)),
        )
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(dated)),
        )
        .with(fmt::layer().with_target(false))
        .try_init()
        .context("Failed to install the log subscriber")?;

    Ok(())
}
