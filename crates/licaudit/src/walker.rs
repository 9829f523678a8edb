//! First-parent history walk.
//!
//! The walk starts at one commit and follows `parents[0]` until it reaches
//! a root commit. Merged side branches are never visited; their changes are
//! accounted for by the merge commit on the primary line.

use licaudit_history::{Commit, CommitId, History, Result as HistoryResult};
use tracing::info;

use crate::auditor::{judge, Auditor};
use crate::error::Result;
use crate::report::AuditReport;

/// Iterator over the first-parent chain, newest first.
///
/// Yields an error, and then stops, if a commit cannot be loaded.
pub struct FirstParentWalk<'h, H: History> {
    history: &'h H,
    next: Option<CommitId>,
}

impl<'h, H: History> FirstParentWalk<'h, H> {
    /// Walk from `start` down to the root.
    pub fn new(history: &'h H, start: CommitId) -> Self {
        Self {
            history,
            next: Some(start),
        }
    }
}

impl<H: History> Iterator for FirstParentWalk<'_, H> {
    type Item = HistoryResult<Commit>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.take()?;
        match self.history.commit(&id) {
            Ok(commit) => {
                self.next = commit.first_parent().cloned();
                Some(Ok(commit))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

impl<H: History> Auditor<H> {
    /// Audit every commit on the first-parent chain from `start`.
    ///
    /// Any failure to read the history aborts the walk.
    pub fn audit_from(&mut self, start: CommitId) -> Result<AuditReport> {
        let (history, state, trivial_line_limit) = self.parts();
        let mut report = AuditReport::new();

        for commit in FirstParentWalk::new(history, start) {
            let commit = commit?;
            let audit = judge(history, state, trivial_line_limit, &commit)?;
            report.record(&commit, &audit.verdict);
        }

        info!(
            commits = report.commits_checked,
            findings = report.findings.len(),
            covered = state.covered().len(),
            "audit complete"
        );
        Ok(report)
    }

    /// Resolve `revision` and audit from there.
    pub fn audit_revision(&mut self, revision: &str) -> Result<AuditReport> {
        let start = self.history().resolve(revision)?;
        self.audit_from(start)
    }
}
