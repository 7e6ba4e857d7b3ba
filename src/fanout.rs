//! Stage 4 — branch fan-out.
//!
//! For each planned branch: create-or-resume from the primary branch, commit
//! a marker file, push, open a pull request, and return to the primary
//! branch. Each branch is self-contained; one branch's failure never aborts
//! the rest.

use std::path::Path;

use chrono::Utc;
use tracing::warn;

use crate::git::GitCli;
use crate::hosting::{GhCli, PullRequestDraft};
use crate::outcome::StepOutcome;
use crate::plan::{BranchPlan, PR_CHECKLIST_BODY};

/// Outcomes of the four per-branch sub-steps.
pub struct BranchReport {
    pub branch: String,
    pub create: StepOutcome,
    pub mark: StepOutcome,
    pub push: StepOutcome,
    pub request: StepOutcome,
}

impl BranchReport {
    pub fn report(&self, quiet: bool) {
        if !quiet {
            println!("{}", self.branch);
        }
        self.create.report("create", quiet);
        self.mark.report("mark", quiet);
        self.push.report("push", quiet);
        self.request.report("pull request", quiet);
    }

    fn unreachable(branch: &str, create: StepOutcome) -> Self {
        let skip = || StepOutcome::skipped("branch unavailable");
        Self {
            branch: branch.to_string(),
            create,
            mark: skip(),
            push: skip(),
            request: skip(),
        }
    }
}

/// Process every planned branch in order, always forking from `primary`.
pub async fn run(
    git: &GitCli,
    gh: Option<&GhCli>,
    plan: &[BranchPlan],
    primary: &str,
) -> Vec<BranchReport> {
    let mut reports = Vec::with_capacity(plan.len());
    for entry in plan {
        reports.push(process_branch(git, gh, entry, primary).await);

        // Return to the primary branch so the next entry forks from the
        // known base, never from this one.
        if let Err(e) = git.checkout(primary).await {
            warn!(branch = %entry.branch, error = %e, "could not return to primary branch");
        }
    }
    reports
}

async fn process_branch(
    git: &GitCli,
    gh: Option<&GhCli>,
    entry: &BranchPlan,
    primary: &str,
) -> BranchReport {
    // a. Create from primary, or resume the existing branch.
    let create = match git.checkout_new(&entry.branch, primary).await {
        Ok(_) => StepOutcome::completed(format!("created from {primary}")),
        Err(_) => match git.checkout(&entry.branch).await {
            Ok(_) => StepOutcome::completed("resumed existing branch".to_string()),
            Err(e) => StepOutcome::failed(format!("cannot create or resume: {e}")),
        },
    };
    if create.is_failure() {
        return BranchReport::unreachable(&entry.branch, create);
    }

    // b. Marker commit.
    let mark = mark_branch(git, entry).await;

    // c. Push with upstream tracking.
    let push = match git.push_tracking(crate::remote::REMOTE_NAME, &entry.branch).await {
        Ok(_) => StepOutcome::completed("pushed with upstream tracking".to_string()),
        Err(e) => StepOutcome::failed(format!("{e} — push manually when access allows")),
    };

    // d. Pull request.
    let request = open_request(gh, entry, primary).await;

    BranchReport {
        branch: entry.branch.clone(),
        create,
        mark,
        push,
        request,
    }
}

/// Write the timestamped marker file and commit it.
///
/// The marker's only purpose is a non-empty, committable diff; an unchanged
/// marker (re-run within the same second) makes the commit a tolerated no-op.
async fn mark_branch(git: &GitCli, entry: &BranchPlan) -> StepOutcome {
    let marker_path = git.work_dir().join(&entry.marker_file);
    let content = format!(
        "Scaffolded branch {} at {}\n",
        entry.branch,
        Utc::now().to_rfc2822()
    );
    if let Err(e) = tokio::fs::write(&marker_path, content).await {
        return StepOutcome::failed(format!("cannot write {}: {e}", entry.marker_file));
    }

    if let Err(e) = git.run(&["add", &entry.marker_file]).await {
        return StepOutcome::failed(format!("cannot stage {}: {e}", entry.marker_file));
    }
    match git.commit(&entry.commit_message).await {
        Ok(_) => StepOutcome::completed(format!("{} committed", entry.marker_file)),
        Err(e) if e.contains("nothing to commit") || e.contains("nothing added to commit") => {
            StepOutcome::skipped("marker unchanged, nothing to commit".to_string())
        }
        Err(e) => StepOutcome::failed(format!("commit failed: {e}")),
    }
}

async fn open_request(gh: Option<&GhCli>, entry: &BranchPlan, primary: &str) -> StepOutcome {
    let Some(gh) = gh else {
        return StepOutcome::skipped("hosting CLI unavailable — open the PR manually");
    };
    if gh.open_pr_exists(&entry.branch).await {
        return StepOutcome::skipped("open pull request already exists");
    }
    let draft = PullRequestDraft {
        base: primary.to_string(),
        head: entry.branch.clone(),
        title: entry.pr_title.clone(),
        body: resolve_body(gh.work_dir(), entry).await,
    };
    match gh.pr_create(&draft).await {
        Ok(url) => StepOutcome::completed(if url.is_empty() {
            "pull request opened".to_string()
        } else {
            url
        }),
        Err(e) => StepOutcome::failed(format!(
            "{e} — open it manually: gh pr create --base {primary} --head {}",
            entry.branch
        )),
    }
}

/// PR body: the branch's template file if present, else the fixed checklist.
pub async fn resolve_body(work_dir: &Path, entry: &BranchPlan) -> String {
    let path = work_dir.join(&entry.template_path);
    match tokio::fs::read_to_string(&path).await {
        Ok(body) => body,
        Err(_) => PR_CHECKLIST_BODY.to_string(),
    }
}
