//! `rbuild` - A CLI launcher for compiling and simulating HDL test benches
//!
//! The launcher validates that the project environment is set up
//! (`RBUILD_ROOT` present, working directory inside `<root>/run`), wires the
//! log output up to the console and two log files, and dispatches to a
//! registered sub-command.
//!
//! ## Usage
//!
//! ```sh
//! rbuild compile --defines WAVES GATE_SIM
//! ```
//!
//! Run `rbuild --help` for the full flag reference.

pub mod build;
pub mod cli;
pub mod error;
pub mod launcher;
pub mod logging;
pub mod operations;
pub mod system;
pub mod utils;

use anyhow::Result;
use chrono::Local;
use clap::Parser as _;
use cli::Args;
use error::RbuildError;
use launcher::RunContext;
use std::path::Path;
use system::System;
use tracing::{debug, info};

/// Main entry point for the rbuild library
///
/// Runs the launcher sequence: environment check, argument parse,
/// working-directory check, logging configuration, sub-command dispatch.
pub fn run(system: &dyn System) -> Result<()> {
    let start = Local::now();

    let root = launcher::require_root(system)?;
    let args = Args::parse();
    let ctx = launcher::check_run_directory(system, &root)?;

    logging::init(system, args.debug, Path::new(&args.logfile), &start)?;
    debug!("Project root: {}", ctx.root.display());

    dispatch(&args, &ctx)
}

/// Dispatch parsed arguments to the selected sub-command
///
/// Preconditions and logging must already be in place. Sub-command errors
/// propagate to the caller untouched.
pub fn dispatch(args: &Args, ctx: &RunContext<'_>) -> Result<()> {
    if args.print_settings {
        return Err(
            RbuildError::unimplemented("--print_settings is not implemented yet").into(),
        );
    }

    match &args.command {
        Some(command) => {
            info!("Running sub-command: {}", command.name());
            command.execute(ctx)
        }
        None => {
            info!("No sub-command given. Use --help to list the available sub-commands.");
            Ok(())
        }
    }
}
