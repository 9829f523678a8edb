//! Audit outcomes: per-commit verdicts, findings, and the run report.

use std::fmt;

use licaudit_history::{Commit, CommitId};
use serde::Serialize;

/// Why a commit was, or was not, accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// The commit licenses itself under an accepted licence.
    CurrentGrant,

    /// The author is covered by a retroactive grant or completeness
    /// declaration.
    CoveredAuthor,

    /// Too small to carry a copyright interest.
    Trivial { added_lines: usize },

    /// No licence could be proven.
    Unauthorized,
}

impl Verdict {
    pub fn is_authorized(&self) -> bool {
        !matches!(self, Verdict::Unauthorized)
    }
}

/// A commit whose licence could not be proven.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub commit: CommitId,
    pub author_name: String,
    pub author_email: String,
}

impl Finding {
    pub fn for_commit(commit: &Commit) -> Self {
        Self {
            commit: commit.id.clone(),
            author_name: commit.author.name.clone(),
            author_email: commit.author.email.clone(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "licence unprovable: {} ({} <{}>)",
            self.commit, self.author_name, self.author_email
        )
    }
}

/// How many commits received each verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VerdictCounts {
    pub current_grant: usize,
    pub covered_author: usize,
    pub trivial: usize,
    pub unauthorized: usize,
}

impl VerdictCounts {
    pub fn record(&mut self, verdict: &Verdict) {
        match verdict {
            Verdict::CurrentGrant => self.current_grant += 1,
            Verdict::CoveredAuthor => self.covered_author += 1,
            Verdict::Trivial { .. } => self.trivial += 1,
            Verdict::Unauthorized => self.unauthorized += 1,
        }
    }
}

/// Result of walking one history.
///
/// Findings are ordered as the commits were visited, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    /// Commits visited.
    pub commits_checked: usize,

    /// Verdict tallies.
    pub verdicts: VerdictCounts,

    /// Unauthorized commits.
    pub findings: Vec<Finding>,
}

impl AuditReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the verdict for one commit.
    pub fn record(&mut self, commit: &Commit, verdict: &Verdict) {
        self.commits_checked += 1;
        self.verdicts.record(verdict);
        if !verdict.is_authorized() {
            self.findings.push(Finding::for_commit(commit));
        }
    }

    /// Whether every commit was authorized or exempt.
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}
