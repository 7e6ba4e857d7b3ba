//! Wrapper over the GitHub `gh` CLI.
//!
//! The hosting CLI is optional: when it is absent the run degrades to "no
//! hosted repo creation, no pull requests" and every caller gets a
//! [`crate::outcome::StepOutcome::Skipped`] instead.

use std::path::{Path, PathBuf};

use crate::exec::run_tool;

/// A pull request about to be submitted. Constructed and sent in one step.
#[derive(Debug, Clone)]
pub struct PullRequestDraft {
    pub base: String,
    pub head: String,
    pub title: String,
    pub body: String,
}

/// Handle on the `gh` CLI, bound to one working tree.
#[derive(Debug, Clone)]
pub struct GhCli {
    work_dir: PathBuf,
}

impl GhCli {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    async fn run(&self, args: &[&str]) -> Result<String, String> {
        run_tool("gh", args, &self.work_dir).await
    }

    /// Whether `owner/name` exists on the hosting platform (as visible to
    /// the authenticated user).
    pub async fn repo_exists(&self, slug: &str) -> bool {
        self.run(&["repo", "view", slug]).await.is_ok()
    }

    /// Create a public hosted repository sourced from `work_dir`.
    pub async fn repo_create(&self, slug: &str) -> Result<String, String> {
        self.run(&["repo", "create", slug, "--public", "--source", "."])
            .await
    }

    /// Whether an open pull request already exists for `branch`.
    ///
    /// Used to keep re-runs idempotent: a marker branch with no new commits
    /// should not accumulate duplicate PRs.
    pub async fn open_pr_exists(&self, branch: &str) -> bool {
        matches!(
            self.run(&["pr", "list", "--head", branch, "--state", "open"]).await,
            Ok(out) if !out.is_empty()
        )
    }

    /// Submit a pull request. Duplicate/permission errors surface as Err and
    /// are swallowed by the caller as warnings.
    pub async fn pr_create(&self, draft: &PullRequestDraft) -> Result<String, String> {
        self.run(&[
            "pr",
            "create",
            "--base",
            &draft.base,
            "--head",
            &draft.head,
            "--title",
            &draft.title,
            "--body",
            &draft.body,
        ])
        .await
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }
}
