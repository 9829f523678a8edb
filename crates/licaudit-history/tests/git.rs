//! GitHistory against real repositories built with the `git` executable.
//!
//! Every test returns early when `git` is not installed.

use std::fs;
use std::path::Path;
use std::process::Command;

use licaudit_history::{GitHistory, History, HistoryError, HistoryExt};

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args([
            "-c",
            "user.name=Test User",
            "-c",
            "user.email=test@example.com",
            "-c",
            "commit.gpgsign=false",
            "-c",
            "tag.gpgsign=false",
        ])
        .args(args)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .output()
        .expect("spawn git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn commit_file(dir: &Path, file: &str, contents: &str, author: &str, message: &str) -> String {
    fs::write(dir.join(file), contents).unwrap();
    git(dir, &["add", file]);
    git(dir, &["commit", "-q", "--author", author, "-m", message]);
    git(dir, &["rev-parse", "HEAD"])
}

#[test]
fn test_reads_linear_history() {
    if !git_available() {
        return;
    }
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();
    git(dir, &["init", "-q"]);

    let root = commit_file(dir, "a.txt", "one\n", "Alice <alice@example.com>", "root");
    let head = commit_file(
        dir,
        "a.txt",
        "one\ntwo\nthree\n",
        "Bob Smith <bob@example.com>",
        "second\n\n\u{a9}: hello",
    );

    let history = GitHistory::open(dir).unwrap();
    let id = history.resolve("HEAD").unwrap();
    assert_eq!(id.as_str(), head);

    let commit = history.commit(&id).unwrap();
    assert_eq!(commit.author.name, "Bob Smith");
    assert_eq!(commit.author.email, "bob@example.com");
    assert!(commit.message.contains("\u{a9}: hello"));
    assert_eq!(commit.first_parent().unwrap().as_str(), root);
    assert_eq!(history.added_lines(&commit).unwrap(), Some(2));

    let root = history.commit(commit.first_parent().unwrap()).unwrap();
    assert!(root.is_root());
    assert_eq!(history.added_lines(&root).unwrap(), None);
}

#[test]
fn test_resolve_rejects_unknown_and_non_commit_revisions() {
    if !git_available() {
        return;
    }
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();
    git(dir, &["init", "-q"]);

    let history = GitHistory::open(dir).unwrap();
    assert!(matches!(
        history.resolve("HEAD"),
        Err(HistoryError::RevisionNotFound(_))
    ));

    commit_file(dir, "a.txt", "x\n", "A <a@x>", "root");
    let tree = git(dir, &["rev-parse", "HEAD^{tree}"]);
    assert!(matches!(
        history.resolve(&tree),
        Err(HistoryError::NotACommit { kind, .. }) if kind == "tree"
    ));
    assert!(matches!(
        history.resolve("--all"),
        Err(HistoryError::RevisionNotFound(_))
    ));
}

#[test]
fn test_binary_changes_add_no_lines() {
    if !git_available() {
        return;
    }
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();
    git(dir, &["init", "-q"]);

    commit_file(dir, "a.txt", "x\n", "A <a@x>", "root");
    fs::write(dir.join("blob.bin"), [0u8, 1, 2, 0, 255, 0, 10, 0]).unwrap();
    git(dir, &["add", "blob.bin"]);
    git(dir, &["commit", "-q", "-m", "binary"]);

    let history = GitHistory::open(dir).unwrap();
    let head = history.commit(&history.resolve("HEAD").unwrap()).unwrap();
    assert_eq!(history.added_lines(&head).unwrap(), Some(0));
}

#[test]
fn test_open_rejects_plain_directory() {
    if !git_available() {
        return;
    }
    let tmp = tempfile::tempdir().unwrap();
    let plain = tmp.path().join("plain");
    fs::create_dir(&plain).unwrap();
    assert!(matches!(
        GitHistory::open(&plain),
        Err(HistoryError::RepositoryNotFound { .. })
    ));
    assert!(matches!(
        GitHistory::open(tmp.path().join("missing")),
        Err(HistoryError::RepositoryNotFound { .. })
    ));
}
