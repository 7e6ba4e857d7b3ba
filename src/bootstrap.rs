//! Stage 2 — repository bootstrap.
//!
//! Ensures the working tree is a git repository with its current contents
//! committed. Idempotent: re-running on a clean tree creates no commit.
//! This is the last stage where failure is fatal.

use tracing::info;

use crate::error::FatalError;
use crate::git::GitCli;
use crate::outcome::StepOutcome;

pub const SNAPSHOT_COMMIT_MESSAGE: &str = "chore: initial project snapshot";

/// Make the working tree a committed git repository.
///
/// Staging is `add -A`: anything not covered by existing ignore rules is
/// committed. Keeping secrets out is the operator's `.gitignore`, not this
/// function.
pub async fn ensure_repository(git: &GitCli) -> Result<StepOutcome, FatalError> {
    if !git.is_work_tree().await {
        info!(dir = %git.work_dir().display(), "no repository here, running git init");
        git.init()
            .await
            .map_err(FatalError::NotAWorkTree)?;
    }

    // init can succeed while leaving us outside a work tree (e.g. bare
    // repository, broken GIT_DIR); re-verify before touching the index.
    if !git.is_work_tree().await {
        return Err(FatalError::NotAWorkTree(
            "git does not recognize this directory as a working tree".to_string(),
        ));
    }

    let status = git
        .status_porcelain()
        .await
        .map_err(FatalError::SnapshotCommit)?;
    if status.is_empty() {
        return Ok(StepOutcome::skipped(
            "working tree clean, nothing to commit",
        ));
    }

    git.add_all().await.map_err(FatalError::SnapshotCommit)?;
    git.commit(SNAPSHOT_COMMIT_MESSAGE)
        .await
        .map_err(FatalError::SnapshotCommit)?;
    Ok(StepOutcome::completed("working tree snapshot committed"))
}
