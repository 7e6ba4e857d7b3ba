// SPDX-License-Identifier: MIT
//! Shared subprocess runner for the git and hosting CLIs.
//!
//! Exit codes are interpreted only as zero/nonzero; no individual timeout is
//! imposed — a hang in an external tool stalls the run, by contract.

use std::path::Path;

/// Run `program args...` in `work_dir` and wait for it.
///
/// Returns the trimmed stdout on success. On a nonzero exit (or a spawn
/// failure) returns a single message carrying the exit code and whatever the
/// tool printed, stderr preferred.
pub async fn run_tool(
    program: &str,
    args: &[&str],
    work_dir: &Path,
) -> Result<String, String> {
    let output = tokio::process::Command::new(program)
        .args(args)
        .current_dir(work_dir)
        .output()
        .await
        .map_err(|e| format!("failed to invoke `{program}`: {e}"))?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let printed = if stderr.is_empty() { stdout } else { stderr };
        Err(format!(
            "`{program} {}` failed (exit {}): {printed}",
            args.join(" "),
            output.status.code().unwrap_or(-1)
        ))
    }
}
