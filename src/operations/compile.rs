//! The `compile` sub-command
//!
//! Builds the `.bld` dependency tree rooted at `<root>/tb/tb_top.bld`, then
//! drives the Vivado simulator tool chain through two stages: parsing every
//! source with `xvlog`/`xvhdl` and elaborating the design with `xelab`.

use crate::build::tree::BuildTree;
use crate::build::builder::build_tree;
use crate::cli::args::{CompileArgs, Execute};
use crate::error::RbuildError;
use crate::launcher::RunContext;
use crate::operations::shell::run_cmd;
use anyhow::Result;
use std::path::Path;
use tracing::{error, info};

/// Root build file, relative to the project root
pub const ROOT_BLD_FILE: &str = "tb/tb_top.bld";

/// Directory the simulator writes its compiled output to, relative to the
/// working directory
pub const COMPILE_OUTPUT_DIR: &str = "xsim.dir";

/// Top-level module elaborated for simulation
const TOP_MODULE: &str = "tb_top";

/// The command used to compile the test-bench and DUT for simulation
pub struct CompileOperation {
    args: CompileArgs,
}

impl CompileOperation {
    /// Create a new compile operation from its parsed arguments
    #[must_use]
    pub const fn new(args: CompileArgs) -> Self {
        Self { args }
    }

    /// Parse all of the files in the build tree
    fn parse(&self, ctx: &RunContext<'_>, tree: &BuildTree) -> Result<()> {
        let include_args = include_args(tree);
        let mut success = true;

        for node in tree.traverse() {
            for src in &node.src {
                let cmd = parser_command(src, &ctx.root, &include_args);

                if run_cmd(&cmd)? != 0 {
                    error!("Error parsing: {}", src.display());
                    success = false;
                }
            }
        }

        if !success {
            error!("Stopping due to parsing errors.");
            return Err(RbuildError::command("Stopping due to parsing errors.").into());
        }

        Ok(())
    }

    /// Elaborate the design for simulation
    fn elaborate(&self, tree: &BuildTree) -> Result<()> {
        let cmd = elaborate_command(tree, &self.args.defines);

        if run_cmd(&cmd)? != 0 {
            error!("Error performing elaboration.");
            return Err(RbuildError::command("Error performing elaboration.").into());
        }

        Ok(())
    }
}

impl Execute for CompileOperation {
    fn execute(&self, ctx: &RunContext<'_>) -> Result<()> {
        let root_bld = ctx.root.join(ROOT_BLD_FILE);
        let tree = build_tree(ctx.system, &[root_bld])?;

        if self.args.verbose {
            info!("Build tree generated:");
            for line in tree.stringify().lines() {
                info!("{line}");
            }
        }

        if self.args.build_tree {
            return Ok(());
        }

        if !self.args.force && ctx.system.exists(Path::new(COMPILE_OUTPUT_DIR)) {
            return Err(RbuildError::command(format!(
                "A previous compile exists ({COMPILE_OUTPUT_DIR}). Use --force to overwrite it."
            ))
            .into());
        }

        self.parse(ctx, &tree)?;
        self.elaborate(&tree)?;

        log_success_banner("Test-bench Compiled Successfully!");

        Ok(())
    }
}

/// The `-i <dir>` arguments for every include directory in the tree
#[must_use]
pub fn include_args(tree: &BuildTree) -> String {
    let dirs: Vec<String> = tree
        .include_dirs()
        .iter()
        .map(|dir| format!("-i {}", dir.display()))
        .collect();

    dirs.join(" ")
}

/// The parse-stage command line for one source file
///
/// SystemVerilog and Verilog sources go through `xvlog -sv`, everything
/// else through `xvhdl`. Sources underneath the project root additionally
/// link against the UVM library.
#[must_use]
pub fn parser_command(src: &Path, root: &Path, include_args: &str) -> String {
    let tool = match src.extension().and_then(|ext| ext.to_str()) {
        Some("sv" | "v") => "xvlog -sv",
        _ => "xvhdl",
    };

    let mut parts = vec![tool.to_owned()];

    if src.starts_with(root) {
        parts.push("-L uvm".to_owned());
    }

    if !include_args.is_empty() {
        parts.push(include_args.to_owned());
    }

    parts.push(src.display().to_string());

    parts.join(" ")
}

/// The elaborate-stage command line for the whole tree
#[must_use]
pub fn elaborate_command(tree: &BuildTree, defines: &[String]) -> String {
    let mut parts = vec![format!("xelab {TOP_MODULE}")];

    let include_args = include_args(tree);
    if !include_args.is_empty() {
        parts.push(include_args);
    }

    parts.push("-L uvm --debug all -O0".to_owned());

    for define in defines {
        parts.push(format!("-d {define}"));
    }

    parts.join(" ")
}

fn log_success_banner(msg: &str) {
    let bar = "#".repeat(msg.len() + 4);

    info!("{bar}");
    info!("# {msg} #");
    info!("{bar}");
}
