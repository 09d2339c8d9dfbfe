//! # rbuild
//!
//! `rbuild` is the command-line launcher for compiling, simulating, and
//! otherwise building HDL test benches for projects laid out under an
//! `RBUILD_ROOT` tree.
//!
//! ## Usage
//!
//! ```sh
//! cd $RBUILD_ROOT/run/my_test
//! rbuild compile --verbose
//! ```
//!
//! The tool must be invoked from inside `<RBUILD_ROOT>/run`; log output goes
//! to the console, to `dv_log.log` (override with `--logfile`/`-a`), and to
//! a dated file under `logs/`.

use rbuild::error::RbuildError;
use rbuild::system::RealSystem;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    let system = RealSystem::new();

    match rbuild::run(&system) {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            // Precondition failures happen before the log sinks exist, so
            // fall back to a console-only subscriber when none is installed
            let _ = tracing_subscriber::fmt()
                .with_target(false)
                .with_env_filter(EnvFilter::new("info"))
                .try_init();

            error!("{:#}", err);
            std::process::exit(
                err.downcast_ref::<RbuildError>()
                    .map_or(1, RbuildError::exit_code),
            );
        }
    }
}
