//! Integration tests for repository bootstrap (real `git` binary).

use repoforge::bootstrap::{ensure_repository, SNAPSHOT_COMMIT_MESSAGE};
use repoforge::git::GitCli;
use repoforge::StepOutcome;
use tempfile::TempDir;

/// Fresh working tree with local identity so commits work anywhere.
async fn prepared_git(dir: &std::path::Path) -> GitCli {
    let git = GitCli::new(dir);
    git.run(&["init", "-b", "main"]).await.expect("git init");
    git.run(&["config", "user.email", "test@example.com"])
        .await
        .unwrap();
    git.run(&["config", "user.name", "Test"]).await.unwrap();
    git
}

#[tokio::test]
async fn bootstrap_initializes_a_plain_directory() {
    let tmp = TempDir::new().unwrap();
    let git = GitCli::new(tmp.path());
    assert!(!git.is_work_tree().await);

    // No identity configured yet and nothing to commit: init path only.
    let outcome = ensure_repository(&git).await.expect("bootstrap");
    assert!(git.is_work_tree().await);
    assert!(matches!(outcome, StepOutcome::Skipped { .. }));
}

#[tokio::test]
async fn dirty_tree_gets_one_snapshot_commit() {
    let tmp = TempDir::new().unwrap();
    let git = prepared_git(tmp.path()).await;
    std::fs::write(tmp.path().join("app.js"), "console.log('hi')\n").unwrap();
    std::fs::write(tmp.path().join("notes.txt"), "todo\n").unwrap();

    let outcome = ensure_repository(&git).await.expect("bootstrap");
    assert!(outcome.is_completed(), "{outcome:?}");

    let count = git.run(&["rev-list", "--count", "HEAD"]).await.unwrap();
    assert_eq!(count, "1");
    let subject = git.run(&["log", "-1", "--format=%s"]).await.unwrap();
    assert_eq!(subject, SNAPSHOT_COMMIT_MESSAGE);
}

#[tokio::test]
async fn rerun_on_clean_tree_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let git = prepared_git(tmp.path()).await;
    std::fs::write(tmp.path().join("app.js"), "x\n").unwrap();

    ensure_repository(&git).await.expect("first run");
    let before = git.run(&["rev-list", "--count", "HEAD"]).await.unwrap();

    let outcome = ensure_repository(&git).await.expect("second run");
    assert!(matches!(outcome, StepOutcome::Skipped { .. }));
    let after = git.run(&["rev-list", "--count", "HEAD"]).await.unwrap();
    assert_eq!(before, after, "clean re-run must not create commits");
}

#[tokio::test]
async fn ignore_rules_are_respected_by_the_snapshot() {
    let tmp = TempDir::new().unwrap();
    let git = prepared_git(tmp.path()).await;
    std::fs::write(tmp.path().join(".gitignore"), ".env\n").unwrap();
    std::fs::write(tmp.path().join(".env"), "SECRET=1\n").unwrap();
    std::fs::write(tmp.path().join("index.js"), "ok\n").unwrap();

    ensure_repository(&git).await.expect("bootstrap");

    let tracked = git.run(&["ls-files"]).await.unwrap();
    assert!(tracked.contains("index.js"));
    assert!(
        !tracked.contains(".env\n") && !tracked.ends_with(".env"),
        "ignored secret file must not be committed: {tracked}"
    );
}
