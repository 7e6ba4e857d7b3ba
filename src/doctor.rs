// SPDX-License-Identifier: MIT
//! doctor.rs — pre-flight tool checks for `repoforge doctor` and stage 1.
//!
//! Self-contained: runs before anything touches the working tree, so a
//! missing tool is caught before any commit or network call is attempted.

use std::process::Command;

/// The result of a single diagnostic check.
pub struct CheckResult {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

/// Presence flags for the external tools, computed once at start.
///
/// git, node, and npm are mandatory; gh is optional — its absence degrades
/// the run to "no pull requests".
#[derive(Debug, Clone, Copy)]
pub struct ToolAvailability {
    pub git: bool,
    pub node: bool,
    pub npm: bool,
    pub gh: bool,
}

impl ToolAvailability {
    /// The first missing mandatory tool, if any, with an install hint.
    pub fn missing_mandatory(&self) -> Option<(&'static str, &'static str)> {
        if !self.git {
            Some(("git", "https://git-scm.com/downloads"))
        } else if !self.node {
            Some(("node", "https://nodejs.org"))
        } else if !self.npm {
            Some(("npm", "npm ships with Node.js — reinstall Node"))
        } else {
            None
        }
    }
}

/// Run all tool checks and return the per-check rows plus the summary flags.
pub fn run_doctor() -> (Vec<CheckResult>, ToolAvailability) {
    let git = version_check("git installed", "git");
    let node = version_check("node installed", "node");
    let npm = version_check("npm installed", "npm");
    let gh = version_check("gh CLI installed", "gh");

    let avail = ToolAvailability {
        git: git.passed,
        node: node.passed,
        npm: npm.passed,
        gh: gh.passed,
    };
    (vec![git, node, npm, gh], avail)
}

/// Probe a tool with `--version`; passing means callable and exiting zero.
fn version_check(name: &'static str, program: &str) -> CheckResult {
    match Command::new(program).arg("--version").output() {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout)
                .lines()
                .next()
                .unwrap_or("unknown version")
                .trim()
                .to_string();
            CheckResult {
                name,
                passed: true,
                detail: version,
            }
        }
        _ => CheckResult {
            name,
            passed: false,
            detail: "not found in PATH".to_string(),
        },
    }
}

// ─── Output ───────────────────────────────────────────────────────────────────

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

/// Print a formatted table of check results to stdout.
pub fn print_doctor_results(results: &[CheckResult]) {
    println!();
    println!("{BOLD}repoforge doctor — pre-flight checks{RESET}");
    println!("{}", "─".repeat(60));

    for r in results {
        let (symbol, color) = if r.passed { ("✓", GREEN) } else { ("✗", RED) };
        println!("  {color}{symbol}{RESET}  {:<24}  {}", r.name, r.detail);
    }

    println!("{}", "─".repeat(60));

    let failed = results.iter().filter(|r| !r.passed).count();
    if failed == 0 {
        println!("{GREEN}All checks passed.{RESET}");
    } else {
        println!("{RED}{failed} check(s) failed. See above for details.{RESET}");
    }
    println!();
}
