//! The static branch fan-out table.
//!
//! Nine fixed branches cover the provisioning workflow stages. Everything
//! derivable from a branch name (marker file, template path, commit message,
//! PR title) is computed once here, so the fan-out loop is pure iteration
//! over data.

use std::path::{Path, PathBuf};

/// The provisioning branches, in fan-out order. Never mutated at runtime.
pub const BRANCHES: [&str; 9] = [
    "feature/project-setup",
    "feature/database-schema",
    "feature/core-pages",
    "feature/components",
    "feature/file-uploads",
    "feature/pdf-email",
    "feature/audit-log",
    "feature/testing",
    "feature/documentation",
];

/// Fallback pull-request body when no per-branch template file exists.
pub const PR_CHECKLIST_BODY: &str = "## Checklist\n\n\
- [ ] Implementation complete\n\
- [ ] Tests added\n\
- [ ] Documentation updated\n\
- [ ] Ready for review\n";

/// Everything the fan-out loop needs for one branch.
#[derive(Debug, Clone)]
pub struct BranchPlan {
    /// Branch name, e.g. `feature/audit-log`.
    pub branch: String,
    /// Marker file at the working-tree root, e.g. `scaffold-feature-audit-log.md`.
    pub marker_file: String,
    /// Optional PR body template, e.g. `templates/pr/feature-audit-log.md`.
    pub template_path: PathBuf,
    pub commit_message: String,
    pub pr_title: String,
}

/// Branch name with path separators replaced by hyphens.
fn flatten(branch: &str) -> String {
    branch.replace('/', "-")
}

/// Build the full fan-out table once.
pub fn build_plan(templates_dir: &Path) -> Vec<BranchPlan> {
    BRANCHES
        .iter()
        .map(|&branch| {
            let flat = flatten(branch);
            BranchPlan {
                branch: branch.to_string(),
                marker_file: format!("scaffold-{flat}.md"),
                template_path: templates_dir.join(format!("{flat}.md")),
                commit_message: format!("chore: scaffold {branch}"),
                pr_title: format!("Scaffold: {branch}"),
            }
        })
        .collect()
}
