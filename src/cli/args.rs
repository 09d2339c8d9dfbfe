use crate::launcher::RunContext;
use crate::operations::compile::CompileOperation;
use clap::{Parser, Subcommand};

/// Command-line arguments for rbuild
#[derive(Parser, Debug, Clone)]
#[command(name = "rbuild")]
#[command(about = "A CLI launcher for compiling and simulating HDL test benches")]
#[command(long_about = None)]
#[command(version)]
pub struct Args {
    /// Enable debug-level log output
    #[arg(long)]
    pub debug: bool,

    /// Print the resolved project settings and exit
    #[arg(long = "print_settings")]
    pub print_settings: bool,

    /// Path of the primary log file
    #[arg(short = 'a', long, value_name = "PATH", default_value = "dv_log.log")]
    pub logfile: String,

    /// Sub-command to run after setup
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Registered sub-commands
///
/// New sub-commands add a variant here plus an operation implementing
/// [`Execute`]; the launcher dispatch does not change.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Compile the test bench and DUT for simulation
    Compile(CompileArgs),
}

/// Interface every sub-command operation implements
pub trait Execute {
    /// Run the sub-command against the validated run context
    fn execute(&self, ctx: &RunContext<'_>) -> anyhow::Result<()>;
}

impl Command {
    /// The name the sub-command was registered under
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match *self {
            Self::Compile(_) => "compile",
        }
    }

    /// Invoke the sub-command's operation with the parsed arguments
    pub fn execute(&self, ctx: &RunContext<'_>) -> anyhow::Result<()> {
        match self {
            Self::Compile(args) => CompileOperation::new(args.clone()).execute(ctx),
        }
    }
}

/// Arguments for the `compile` sub-command
#[derive(clap::Args, Debug, Clone, Default)]
pub struct CompileArgs {
    /// Print additional verbose information to the command line
    #[arg(short, long)]
    pub verbose: bool,

    /// Only construct and check the build tree, don't actually compile
    #[arg(long = "build_tree")]
    pub build_tree: bool,

    /// Force an overwrite of a pre-existing compile
    #[arg(short, long)]
    pub force: bool,

    /// A list of defines to use during the elaboration stage of the compile
    #[arg(long, num_args = 1.., value_name = "DEFINE")]
    pub defines: Vec<String>,
}
