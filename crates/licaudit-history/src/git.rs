//! Git implementation of the History trait.
//!
//! Runs the `git` executable against a repository and parses its plumbing
//! output. Commits are read as raw objects (`git cat-file commit`) and tree
//! diffs come from `git diff-tree --numstat`.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use licaudit_core::Signature;
use tracing::{debug, trace};

use crate::error::{HistoryError, Result};
use crate::traits::History;
use crate::types::{Commit, CommitId, DiffLine, TreeId};

/// A repository accessed through the `git` executable.
#[derive(Debug, Clone)]
pub struct GitHistory {
    /// The repository directory passed to every command as `--git-dir`.
    git_dir: PathBuf,
}

impl GitHistory {
    /// Open the repository at `path`.
    ///
    /// `path` may be a working tree (its `.git` entry is used) or a bare
    /// repository. Fails if git does not recognize it as a repository.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let repo = std::fs::canonicalize(path).map_err(|e| HistoryError::RepositoryNotFound {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let dot_git = repo.join(".git");
        let git_dir = if dot_git.exists() { dot_git } else { repo };

        let history = Self { git_dir };
        if history.try_run(&["rev-parse", "--git-dir"])?.is_none() {
            return Err(HistoryError::RepositoryNotFound {
                path: path.to_path_buf(),
                reason: "not a git repository".to_string(),
            });
        }

        debug!(git_dir = %history.git_dir.display(), "opened repository");
        Ok(history)
    }

    /// The repository directory in use.
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new("git");
        cmd.arg("--git-dir")
            .arg(&self.git_dir)
            .args(args)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null());
        cmd
    }

    /// Run git, returning stdout, or `None` if git exited unsuccessfully.
    fn try_run(&self, args: &[&str]) -> Result<Option<Vec<u8>>> {
        trace!(?args, "running git");
        let output = self.command(args).output()?;
        if output.status.success() {
            Ok(Some(output.stdout))
        } else {
            trace!(
                ?args,
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "git exited unsuccessfully"
            );
            Ok(None)
        }
    }

    /// Run git, failing on a non-zero exit.
    fn run(&self, args: &[&str]) -> Result<Vec<u8>> {
        let output = self.command(args).output()?;
        if !output.status.success() {
            return Err(HistoryError::Git {
                command: args.join(" "),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output.stdout)
    }
}

impl History for GitHistory {
    fn resolve(&self, revision: &str) -> Result<CommitId> {
        let oid = self
            .try_run(&["rev-parse", "--verify", "--quiet", "--end-of-options", revision])?
            .ok_or_else(|| HistoryError::RevisionNotFound(revision.to_string()))?;
        let oid = String::from_utf8_lossy(&oid).trim().to_string();

        let kind = self.run(&["cat-file", "-t", &oid])?;
        let kind = String::from_utf8_lossy(&kind).trim().to_string();
        if kind != "commit" {
            return Err(HistoryError::NotACommit {
                revision: revision.to_string(),
                kind,
            });
        }

        CommitId::from_hex(&oid)
    }

    fn commit(&self, id: &CommitId) -> Result<Commit> {
        let raw = self
            .try_run(&["cat-file", "commit", id.as_str()])?
            .ok_or_else(|| HistoryError::ObjectNotFound(id.to_string()))?;
        parse_commit_object(id, &raw)
    }

    fn diff_lines(&self, old: &TreeId, new: &TreeId) -> Result<Vec<DiffLine>> {
        let out = self.run(&[
            "diff-tree",
            "-r",
            "--numstat",
            "--no-renames",
            old.as_str(),
            new.as_str(),
        ])?;
        parse_numstat(&String::from_utf8_lossy(&out))
    }
}

/// Parse a raw commit object as printed by `git cat-file commit`.
///
/// Headers run up to the first blank line; the rest is the message.
/// Continuation lines of multi-line headers (`gpgsig`, `mergetag`) start
/// with a space and are skipped.
pub fn parse_commit_object(id: &CommitId, raw: &[u8]) -> Result<Commit> {
    let text = String::from_utf8_lossy(raw);
    let (header, message) = text.split_once("\n\n").unwrap_or((&text, ""));

    let mut tree = None;
    let mut parents = Vec::new();
    let mut author = None;

    for line in header.lines() {
        if line.starts_with(' ') {
            continue;
        }
        let (key, value) = line.split_once(' ').unwrap_or((line, ""));
        match key {
            "tree" => tree = Some(TreeId::from_hex(value)?),
            "parent" => parents.push(CommitId::from_hex(value)?),
            "author" if author.is_none() => author = Some(parse_signature(value)?),
            _ => {}
        }
    }

    let tree = tree.ok_or_else(|| HistoryError::Malformed {
        what: "commit object",
        detail: format!("{id} has no tree header"),
    })?;
    let author = author.ok_or_else(|| HistoryError::Malformed {
        what: "commit object",
        detail: format!("{id} has no author header"),
    })?;

    Ok(Commit {
        id: id.clone(),
        tree,
        parents,
        author,
        message: message.to_string(),
    })
}

/// Parse `Name <email> timestamp tz` from an author header.
fn parse_signature(value: &str) -> Result<Signature> {
    let malformed = || HistoryError::Malformed {
        what: "author line",
        detail: value.to_string(),
    };

    let open = value.find('<').ok_or_else(malformed)?;
    let close = value[open..].find('>').map(|i| open + i).ok_or_else(malformed)?;

    Ok(Signature::new(
        value[..open].trim(),
        &value[open + 1..close],
    ))
}

/// Parse `git diff-tree --numstat` output into added/deleted line runs.
///
/// Binary files report `-` for both counts and contribute no lines.
pub fn parse_numstat(out: &str) -> Result<Vec<DiffLine>> {
    let mut lines = Vec::new();

    for entry in out.lines().filter(|l| !l.is_empty()) {
        let mut fields = entry.splitn(3, '\t');
        let (Some(added), Some(deleted), Some(path)) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(HistoryError::Malformed {
                what: "numstat entry",
                detail: entry.to_string(),
            });
        };

        if added == "-" && deleted == "-" {
            debug!(path, "binary change contributes no lines");
            continue;
        }

        let parse = |count: &str| {
            count.parse::<usize>().map_err(|_| HistoryError::Malformed {
                what: "numstat entry",
                detail: entry.to_string(),
            })
        };
        let (added, deleted) = (parse(added)?, parse(deleted)?);

        if added > 0 {
            lines.push(DiffLine::added(added));
        }
        if deleted > 0 {
            lines.push(DiffLine::deleted(deleted));
        }
    }

    Ok(lines)
}
