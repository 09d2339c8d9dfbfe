//! Launcher precondition checks and the per-invocation run context
//!
//! Every sub-command runs against a [`RunContext`] that is only constructed
//! after the environment and working-directory checks have passed.

use crate::error::RbuildError;
use crate::system::System;
use crate::utils::path::is_descendant_of;
use anyhow::{Context as _, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable that points at the project root
///
/// Set by the project setup script before rbuild is invoked.
pub const ROOT_ENV_VAR: &str = "RBUILD_ROOT";

/// Name of the directory tree under the root that rbuild must run from
pub const RUN_DIR_NAME: &str = "run";

/// Validated context handed to sub-command operations
pub struct RunContext<'a> {
    /// Canonicalized project root from [`ROOT_ENV_VAR`]
    pub root: PathBuf,

    /// The working directory the tool was invoked from
    pub cwd: PathBuf,

    /// System handle for environment and filesystem access
    pub system: &'a dyn System,
}

// The system handle carries no inspectable state
impl fmt::Debug for RunContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunContext")
            .field("root", &self.root)
            .field("cwd", &self.cwd)
            .finish_non_exhaustive()
    }
}

/// Check that the root environment variable is set and return its value
///
/// # Errors
///
/// Returns [`RbuildError::Environment`] when the variable is absent.
pub fn require_root(system: &dyn System) -> Result<PathBuf> {
    match system.env_var(ROOT_ENV_VAR) {
        Ok(value) => Ok(PathBuf::from(value)),
        Err(_) => Err(RbuildError::environment(format!(
            "{ROOT_ENV_VAR} is not set. Run the project setup script before using rbuild."
        ))
        .into()),
    }
}

/// Check that the working directory is a descendant of `<root>/run`
///
/// Canonicalizes both sides so symlinked or relative invocations are judged
/// by real path identity.
///
/// # Errors
///
/// Returns [`RbuildError::Directory`] when the check fails.
pub fn check_run_directory<'a>(system: &'a dyn System, root: &Path) -> Result<RunContext<'a>> {
    let cwd = system
        .current_dir()
        .context("Failed to determine the current working directory")?;

    let run_dir = root.join(RUN_DIR_NAME);

    if !is_descendant_of(system, &cwd, &run_dir)? {
        return Err(RbuildError::directory(format!(
            "rbuild must be run from inside {} (current directory: {})",
            run_dir.display(),
            cwd.display()
        ))
        .into());
    }

    // The ancestry check passed, so the root resolves
    let root = system
        .canonicalize(root)
        .with_context(|| format!("Failed to resolve project root: {}", root.display()))?;

    Ok(RunContext { root, cwd, system })
}
