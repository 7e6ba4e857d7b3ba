//! Integration tests for remote linkage (degraded mode: no hosting CLI).

use repoforge::git::GitCli;
use repoforge::remote::{ensure_linkage, RepositoryTarget};
use repoforge::StepOutcome;
use tempfile::TempDir;

async fn repo_with_commit(dir: &std::path::Path, initial_branch: &str) -> GitCli {
    let git = GitCli::new(dir);
    git.run(&["init", "-b", initial_branch]).await.unwrap();
    git.run(&["config", "user.email", "test@example.com"])
        .await
        .unwrap();
    git.run(&["config", "user.name", "Test"]).await.unwrap();
    std::fs::write(dir.join("README.md"), "# test\n").unwrap();
    git.add_all().await.unwrap();
    git.commit("Initial commit").await.unwrap();
    git
}

#[tokio::test]
async fn linkage_pushes_primary_to_an_existing_remote() {
    let tmp = TempDir::new().unwrap();
    let work = tmp.path().join("work");
    let bare = tmp.path().join("origin.git");
    std::fs::create_dir_all(&work).unwrap();
    std::fs::create_dir_all(&bare).unwrap();
    GitCli::new(&bare).run(&["init", "--bare"]).await.unwrap();

    let git = repo_with_commit(&work, "main").await;
    git.remote_add("origin", bare.to_str().unwrap())
        .await
        .unwrap();

    let target = RepositoryTarget::new("acme", "widgets");
    let report = ensure_linkage(&git, None, &target, "main").await;

    // Degraded mode: hosted-repo creation is skipped, never failed.
    assert!(matches!(report.hosted_repo, StepOutcome::Skipped { .. }));
    // An existing remote is never overwritten.
    assert!(matches!(report.remote_link, StepOutcome::Skipped { .. }));
    assert!(report.primary_branch.is_completed());
    assert!(report.push.is_completed(), "{:?}", report.push);
    assert_eq!(git.current_branch().await.unwrap(), "main");
}

#[tokio::test]
async fn missing_primary_branch_is_created_from_current_state() {
    let tmp = TempDir::new().unwrap();
    let work = tmp.path().join("work");
    let bare = tmp.path().join("origin.git");
    std::fs::create_dir_all(&work).unwrap();
    std::fs::create_dir_all(&bare).unwrap();
    GitCli::new(&bare).run(&["init", "--bare"]).await.unwrap();

    // Repository born on a non-primary branch.
    let git = repo_with_commit(&work, "trunk").await;
    git.remote_add("origin", bare.to_str().unwrap())
        .await
        .unwrap();

    let target = RepositoryTarget::new("acme", "widgets");
    let report = ensure_linkage(&git, None, &target, "main").await;

    assert!(report.primary_branch.is_completed(), "{:?}", report.primary_branch);
    assert_eq!(git.current_branch().await.unwrap(), "main");
    assert!(report.push.is_completed(), "{:?}", report.push);
}

#[tokio::test]
async fn remote_link_is_added_when_absent() {
    let tmp = TempDir::new().unwrap();
    let git = repo_with_commit(tmp.path(), "main").await;
    // Fail the SSH transport immediately instead of waiting on a network
    // that tests do not have. Repo-local, so parallel tests are unaffected.
    git.run(&["config", "core.sshCommand", "false"])
        .await
        .unwrap();

    let target = RepositoryTarget::new("acme", "widgets");
    let report = ensure_linkage(&git, None, &target, "main").await;

    assert!(report.remote_link.is_completed(), "{:?}", report.remote_link);
    let url = git.remote_url("origin").await.unwrap();
    assert_eq!(url, "git@github.com:acme/widgets.git");
    // Pushing to the conventional SSH URL cannot succeed in tests; the
    // failure must stay a warning, not an error.
    assert!(report.push.is_failure());
}
