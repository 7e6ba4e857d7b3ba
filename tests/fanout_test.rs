//! Integration tests for the branch fan-out (real `git` binary, local bare
//! repository standing in for the hosted remote).

use repoforge::fanout;
use repoforge::git::GitCli;
use repoforge::plan::{build_plan, BRANCHES};
use std::path::Path;
use tempfile::TempDir;

/// Working tree with one commit on `main` and `origin` pointing at a local
/// bare repository, so pushes really happen.
async fn scaffold_repo(tmp: &TempDir) -> GitCli {
    let work = tmp.path().join("work");
    let bare = tmp.path().join("origin.git");
    std::fs::create_dir_all(&work).unwrap();
    std::fs::create_dir_all(&bare).unwrap();

    let origin = GitCli::new(&bare);
    origin.run(&["init", "--bare"]).await.expect("bare init");

    let git = GitCli::new(&work);
    git.run(&["init", "-b", "main"]).await.expect("git init");
    git.run(&["config", "user.email", "test@example.com"])
        .await
        .unwrap();
    git.run(&["config", "user.name", "Test"]).await.unwrap();
    std::fs::write(work.join("README.md"), "# test\n").unwrap();
    git.add_all().await.unwrap();
    git.commit("Initial commit").await.unwrap();
    git.remote_add("origin", bare.to_str().unwrap())
        .await
        .unwrap();
    git
}

#[tokio::test]
async fn all_nine_branches_are_created_marked_and_pushed() {
    let tmp = TempDir::new().unwrap();
    let git = scaffold_repo(&tmp).await;
    let plan = build_plan(Path::new("templates/pr"));

    let reports = fanout::run(&git, None, &plan, "main").await;
    assert_eq!(reports.len(), 9);

    for (report, branch) in reports.iter().zip(BRANCHES) {
        assert_eq!(report.branch, branch);
        assert!(report.create.is_completed(), "{branch}: {:?}", report.create);
        assert!(report.mark.is_completed(), "{branch}: {:?}", report.mark);
        assert!(report.push.is_completed(), "{branch}: {:?}", report.push);
        // No hosting CLI in tests: the request step degrades to a skip.
        assert!(
            matches!(report.request, repoforge::StepOutcome::Skipped { .. }),
            "{branch}: {:?}",
            report.request
        );
        assert!(git.branch_exists(branch).await, "{branch} missing locally");
        assert!(
            git.branch_exists(&format!("origin/{branch}")).await,
            "{branch} missing on the remote"
        );
    }
}

#[tokio::test]
async fn every_branch_forks_from_primary_not_its_predecessor() {
    let tmp = TempDir::new().unwrap();
    let git = scaffold_repo(&tmp).await;
    let plan = build_plan(Path::new("templates/pr"));
    let main_tip = git.run(&["rev-parse", "main"]).await.unwrap();

    fanout::run(&git, None, &plan, "main").await;

    // Each branch carries exactly one marker commit whose parent is the
    // primary tip — never another feature branch.
    for branch in BRANCHES {
        let parent = git
            .run(&["rev-parse", &format!("{branch}~1")])
            .await
            .unwrap();
        assert_eq!(parent, main_tip, "{branch} did not fork from main");
    }
}

#[tokio::test]
async fn fanout_returns_to_the_primary_branch() {
    let tmp = TempDir::new().unwrap();
    let git = scaffold_repo(&tmp).await;
    let plan = build_plan(Path::new("templates/pr"));

    fanout::run(&git, None, &plan, "main").await;
    assert_eq!(git.current_branch().await.unwrap(), "main");
}

#[tokio::test]
async fn rerun_resumes_existing_branches() {
    let tmp = TempDir::new().unwrap();
    let git = scaffold_repo(&tmp).await;
    let plan = build_plan(Path::new("templates/pr"));

    fanout::run(&git, None, &plan, "main").await;
    let reports = fanout::run(&git, None, &plan, "main").await;

    for report in &reports {
        // Second run: branch creation falls back to resuming.
        assert!(
            report.create.is_completed(),
            "{}: {:?}",
            report.branch,
            report.create
        );
        // The marker is rewritten with a fresh timestamp, so the commit is
        // either a new one or a tolerated no-op — never a failure.
        assert!(
            !report.mark.is_failure(),
            "{}: {:?}",
            report.branch,
            report.mark
        );
    }
    assert_eq!(git.current_branch().await.unwrap(), "main");
}

#[tokio::test]
async fn marker_files_land_at_the_tree_root_with_timestamps() {
    let tmp = TempDir::new().unwrap();
    let git = scaffold_repo(&tmp).await;
    let plan = build_plan(Path::new("templates/pr"));

    fanout::run(&git, None, &plan, "main").await;

    git.checkout("feature/pdf-email").await.unwrap();
    let marker = git.work_dir().join("scaffold-feature-pdf-email.md");
    assert!(marker.exists());
    let content = std::fs::read_to_string(&marker).unwrap();
    assert!(
        content.contains("feature/pdf-email"),
        "marker names its branch: {content}"
    );
}
