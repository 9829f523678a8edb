//! History trait: the abstract interface for repository access.
//!
//! This trait allows the auditor to be backend-agnostic. Implementations
//! include the git executable (primary) and in-memory (for tests).

use crate::error::Result;
use crate::types::{count_added, Commit, CommitId, DiffLine, TreeId};

/// The History trait: synchronous interface for repository access.
///
/// # Design Notes
///
/// - **Blocking**: all methods run to completion; the audit is a strict
///   sequential fold, so there is nothing to gain from async here.
/// - **Errors are fatal**: an `Err` means the repository could not be read.
pub trait History {
    /// Resolve a revision string (branch, tag, `HEAD`, full id) to a commit.
    ///
    /// Fails if the revision is unknown or names something other than a
    /// commit.
    fn resolve(&self, revision: &str) -> Result<CommitId>;

    /// Load a commit by id.
    fn commit(&self, id: &CommitId) -> Result<Commit>;

    /// Diff two trees, reporting runs of added and deleted lines.
    fn diff_lines(&self, old: &TreeId, new: &TreeId) -> Result<Vec<DiffLine>>;
}

impl<H: History + ?Sized> History for &H {
    fn resolve(&self, revision: &str) -> Result<CommitId> {
        (**self).resolve(revision)
    }

    fn commit(&self, id: &CommitId) -> Result<Commit> {
        (**self).commit(id)
    }

    fn diff_lines(&self, old: &TreeId, new: &TreeId) -> Result<Vec<DiffLine>> {
        (**self).diff_lines(old, new)
    }
}

/// Extension trait with operations composed from [`History`].
pub trait HistoryExt: History {
    /// Lines added by `commit` relative to its first parent.
    ///
    /// Returns `None` for a root commit, which has nothing to diff against.
    fn added_lines(&self, commit: &Commit) -> Result<Option<usize>>;
}

impl<H: History + ?Sized> HistoryExt for H {
    fn added_lines(&self, commit: &Commit) -> Result<Option<usize>> {
        let Some(parent_id) = commit.first_parent() else {
            return Ok(None);
        };

        let parent = self.commit(parent_id)?;
        let lines = self.diff_lines(&parent.tree, &commit.tree)?;
        Ok(Some(count_added(&lines)))
    }
}
