//! Shell command execution with logged output

use anyhow::{Context as _, Result};
use std::process::{Command, Stdio};
use tracing::info;

/// Run the provided string as a shell command
///
/// Logs the invocation and every line of the command's output through the
/// logger, then returns the command's exit code.
///
/// # Errors
///
/// Returns an error only when the shell itself cannot be spawned; a
/// non-zero exit code is reported through the return value.
pub fn run_cmd(cmd: &str) -> Result<i32> {
    info!("Running cmd: {cmd}");

    let (shell, shell_args) = get_shell_command();

    let output = Command::new(&shell)
        .args(&shell_args)
        .arg(cmd)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .with_context(|| format!("Failed to execute command: {cmd}"))?;

    for line in String::from_utf8_lossy(&output.stdout).lines() {
        info!("{line}");
    }

    for line in String::from_utf8_lossy(&output.stderr).lines() {
        info!("{line}");
    }

    return Ok(output.status.code().unwrap_or(-1));
}

/// Get the appropriate shell command for the current platform
fn get_shell_command() -> (String, Vec<String>) {
    if cfg!(target_os = "windows") {
        return ("cmd".to_owned(), vec!["/C".to_owned()]);
    } else {
        return ("sh".to_owned(), vec!["-c".to_owned()]);
    }
}
