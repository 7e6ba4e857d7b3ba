//! Per-step results for everything after bootstrap.
//!
//! Every external call from remote linkage onward returns a [`StepOutcome`]
//! instead of propagating an error, so the driver decides uniformly:
//! log-and-continue, never abort.

use tracing::warn;

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Result of one external call (push, PR creation, bucket request, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The call succeeded.
    Completed { detail: String },
    /// The call was not attempted (missing opt-in, missing tool, no-op).
    Skipped { reason: String },
    /// The call failed; advisory only.
    Failed { message: String },
}

impl StepOutcome {
    pub fn completed(detail: impl Into<String>) -> Self {
        Self::Completed {
            detail: detail.into(),
        }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            reason: reason.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Print the outcome for the operator and mirror failures to the log.
    ///
    /// Failures are warnings by design: every step has a manual fallback,
    /// which the caller bakes into `message`.
    pub fn report(&self, step: &str, quiet: bool) {
        match self {
            Self::Completed { detail } => {
                if !quiet {
                    println!("  {GREEN}✓{RESET}  {step} — {detail}");
                }
            }
            Self::Skipped { reason } => {
                if !quiet {
                    println!("  {DIM}•{RESET}  {step} — {reason}");
                }
            }
            Self::Failed { message } => {
                warn!(step, %message, "step failed (continuing)");
                println!("  {YELLOW}⚠{RESET}  {step} — {message}");
            }
        }
    }
}
