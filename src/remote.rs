//! Stage 3 — remote linkage.
//!
//! Ensures a hosted repository, the `origin` remote, and the primary branch,
//! then pushes it. From here on nothing is fatal: each sub-step reports a
//! [`StepOutcome`] and the run continues.

use crate::git::GitCli;
use crate::hosting::GhCli;
use crate::outcome::StepOutcome;

pub const REMOTE_NAME: &str = "origin";

/// The hosted repository. Immutable once confirmed by the operator.
#[derive(Debug, Clone)]
pub struct RepositoryTarget {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub name: String,
}

impl RepositoryTarget {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// `owner/name` form used by the hosting CLI.
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Conventional SSH remote URL.
    pub fn ssh_url(&self) -> String {
        format!("git@github.com:{}/{}.git", self.owner, self.name)
    }
}

/// Outcomes of the four linkage sub-steps, in execution order.
pub struct LinkageReport {
    pub hosted_repo: StepOutcome,
    pub remote_link: StepOutcome,
    pub primary_branch: StepOutcome,
    pub push: StepOutcome,
}

impl LinkageReport {
    pub fn report(&self, quiet: bool) {
        self.hosted_repo.report("hosted repository", quiet);
        self.remote_link.report("remote link", quiet);
        self.primary_branch.report("primary branch", quiet);
        self.push.report("push primary", quiet);
    }
}

/// Ensure hosted repo, `origin`, and the primary branch; push the latter.
pub async fn ensure_linkage(
    git: &GitCli,
    gh: Option<&GhCli>,
    target: &RepositoryTarget,
    primary: &str,
) -> LinkageReport {
    let hosted_repo = ensure_hosted_repo(gh, target).await;
    let remote_link = ensure_remote_link(git, target).await;
    let primary_branch = ensure_primary_branch(git, primary).await;

    let push = match git.push_tracking(REMOTE_NAME, primary).await {
        Ok(_) => StepOutcome::completed(format!("{primary} pushed to {REMOTE_NAME}")),
        Err(e) => StepOutcome::failed(format!(
            "{e} — push manually once you have access: git push -u {REMOTE_NAME} {primary}"
        )),
    };

    LinkageReport {
        hosted_repo,
        remote_link,
        primary_branch,
        push,
    }
}

async fn ensure_hosted_repo(gh: Option<&GhCli>, target: &RepositoryTarget) -> StepOutcome {
    let Some(gh) = gh else {
        return StepOutcome::skipped("hosting CLI unavailable — create the repository manually");
    };
    let slug = target.slug();
    if gh.repo_exists(&slug).await {
        return StepOutcome::completed(format!("{slug} already exists"));
    }
    match gh.repo_create(&slug).await {
        Ok(_) => StepOutcome::completed(format!("{slug} created (public)")),
        Err(e) => StepOutcome::failed(format!(
            "{e} — create it manually at https://github.com/new"
        )),
    }
}

async fn ensure_remote_link(git: &GitCli, target: &RepositoryTarget) -> StepOutcome {
    // Never overwrite an existing remote, whatever it points at.
    if let Ok(url) = git.remote_url(REMOTE_NAME).await {
        return StepOutcome::skipped(format!("{REMOTE_NAME} already set to {url}"));
    }
    match git.remote_add(REMOTE_NAME, &target.ssh_url()).await {
        Ok(_) => StepOutcome::completed(format!("{REMOTE_NAME} -> {}", target.ssh_url())),
        Err(e) => StepOutcome::failed(format!(
            "{e} — add it manually: git remote add {REMOTE_NAME} {}",
            target.ssh_url()
        )),
    }
}

async fn ensure_primary_branch(git: &GitCli, primary: &str) -> StepOutcome {
    if !git.branch_exists(primary).await {
        if let Err(e) = git.create_branch(primary).await {
            return StepOutcome::failed(format!("cannot create branch {primary}: {e}"));
        }
    }
    match git.checkout(primary).await {
        Ok(_) => StepOutcome::completed(format!("on {primary}")),
        Err(e) => StepOutcome::failed(format!("cannot switch to {primary}: {e}")),
    }
}
