//! Thin wrapper over the operator's `git` CLI.
//!
//! Remote operations (push, fetch) must go through the operator's own git so
//! their SSH keys and credential helpers apply; local operations use the
//! same binary for one consistent view of the tree.

use std::path::{Path, PathBuf};

use crate::exec::run_tool;

/// Handle on one working tree. All commands run with it as cwd.
#[derive(Debug, Clone)]
pub struct GitCli {
    work_dir: PathBuf,
}

impl GitCli {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Run `git args...`; Ok(stdout) on exit zero, Err(message) otherwise.
    pub async fn run(&self, args: &[&str]) -> Result<String, String> {
        run_tool("git", args, &self.work_dir).await
    }

    pub async fn init(&self) -> Result<String, String> {
        self.run(&["init"]).await
    }

    /// Whether cwd is inside a git working tree.
    pub async fn is_work_tree(&self) -> bool {
        matches!(
            self.run(&["rev-parse", "--is-inside-work-tree"]).await,
            Ok(out) if out == "true"
        )
    }

    /// Porcelain status; empty string means a clean tree.
    pub async fn status_porcelain(&self) -> Result<String, String> {
        self.run(&["status", "--porcelain"]).await
    }

    pub async fn add_all(&self) -> Result<String, String> {
        self.run(&["add", "-A"]).await
    }

    pub async fn commit(&self, message: &str) -> Result<String, String> {
        self.run(&["commit", "-m", message]).await
    }

    /// Name of the currently checked-out branch.
    pub async fn current_branch(&self) -> Result<String, String> {
        self.run(&["rev-parse", "--abbrev-ref", "HEAD"]).await
    }

    pub async fn branch_exists(&self, branch: &str) -> bool {
        self.run(&["rev-parse", "--verify", "--quiet", branch])
            .await
            .is_ok()
    }

    /// Create `branch` from the current HEAD without switching to it.
    pub async fn create_branch(&self, branch: &str) -> Result<String, String> {
        self.run(&["branch", branch]).await
    }

    /// Create `branch` starting at `base` and switch to it.
    pub async fn checkout_new(&self, branch: &str, base: &str) -> Result<String, String> {
        self.run(&["checkout", "-b", branch, base]).await
    }

    pub async fn checkout(&self, branch: &str) -> Result<String, String> {
        self.run(&["checkout", branch]).await
    }

    pub async fn remote_url(&self, remote: &str) -> Result<String, String> {
        self.run(&["remote", "get-url", remote]).await
    }

    pub async fn remote_add(&self, remote: &str, url: &str) -> Result<String, String> {
        self.run(&["remote", "add", remote, url]).await
    }

    /// Push `branch` to `remote` with upstream tracking.
    pub async fn push_tracking(&self, remote: &str, branch: &str) -> Result<String, String> {
        self.run(&["push", "-u", remote, branch]).await
    }
}
