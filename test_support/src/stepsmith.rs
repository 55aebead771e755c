//! Helpers for invoking the built `stepsmith` binary in tests.
//!
//! These utilities use `assert_cmd` to locate the current workspace's
//! `stepsmith` executable and run it in a controlled working directory,
//! capturing stdout/stderr for assertions.

use anyhow::{Context, Result};
use assert_cmd::Command;
use camino::Utf8Path;

/// Captured output from a `stepsmith` invocation.
#[derive(Debug)]
pub struct StepsmithRun {
    /// Captured stdout (lossy UTF-8).
    pub stdout: String,
    /// Captured stderr (lossy UTF-8).
    pub stderr: String,
    /// Whether the command exited successfully.
    pub success: bool,
}

/// Run `stepsmith` in `current_dir` with the supplied args.
///
/// # Errors
///
/// Returns an error when `stepsmith` cannot be located or the process cannot
/// be spawned.
pub fn run_stepsmith_in(current_dir: &Utf8Path, args: &[&str]) -> Result<StepsmithRun> {
    let mut cmd = Command::cargo_bin("stepsmith").context("locate stepsmith binary")?;
    let output = cmd
        .current_dir(current_dir)
        .args(args)
        .output()
        .context("run stepsmith command")?;
    Ok(StepsmithRun {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        success: output.status.success(),
    })
}
