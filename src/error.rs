//! Fatal precondition errors.
//!
//! Only stages 1–2 (tooling check, repository bootstrap) can fail the run.
//! Everything later degrades to a [`crate::outcome::StepOutcome`] warning.

use thiserror::Error;

/// A failure that halts the whole run with exit code 1.
#[derive(Debug, Error)]
pub enum FatalError {
    /// A mandatory external tool is not callable.
    #[error("required tool `{tool}` is not available ({detail}) — install it and re-run ({hint})")]
    MissingTool {
        tool: &'static str,
        detail: String,
        hint: &'static str,
    },

    /// The current directory could not be made into a git working tree.
    #[error("current directory is not a git working tree: {0}")]
    NotAWorkTree(String),

    /// Staging or committing the initial snapshot failed.
    #[error("could not commit the working tree snapshot: {0}")]
    SnapshotCommit(String),

    /// The operator declined to continue in degraded mode.
    #[error("aborted: {0}")]
    Declined(String),
}
