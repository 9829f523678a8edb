//! In-memory implementation of the History trait.
//!
//! This is primarily for testing. Commits and trees are content-addressed
//! with SHA-256 so identical inputs always yield identical ids, and diffs
//! count lines as multisets per path rather than running a full diff.

use std::collections::{BTreeMap, HashMap};

use licaudit_core::Signature;
use sha2::{Digest, Sha256};

use crate::error::{HistoryError, Result};
use crate::traits::History;
use crate::types::{Commit, CommitId, DiffLine, TreeId};

/// File contents of one tree: path -> lines.
pub type TreeFiles = BTreeMap<String, Vec<String>>;

/// In-memory history.
#[derive(Debug, Default, Clone)]
pub struct MemoryHistory {
    /// Commits indexed by id.
    commits: HashMap<CommitId, Commit>,

    /// Trees indexed by id.
    trees: HashMap<TreeId, TreeFiles>,

    /// Named references: `HEAD`, branch names, tags.
    refs: HashMap<String, CommitId>,
}

impl MemoryHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a tree built from `(path, contents)` pairs.
    pub fn insert_tree<P, C>(&mut self, files: impl IntoIterator<Item = (P, C)>) -> TreeId
    where
        P: Into<String>,
        C: AsRef<str>,
    {
        let files: TreeFiles = files
            .into_iter()
            .map(|(path, contents)| {
                let lines = contents.as_ref().lines().map(String::from).collect();
                (path.into(), lines)
            })
            .collect();

        let mut hasher = Sha256::new();
        hasher.update(b"tree\0");
        for (path, lines) in &files {
            hasher.update(path.as_bytes());
            hasher.update(b"\0");
            for line in lines {
                hasher.update(line.as_bytes());
                hasher.update(b"\n");
            }
            hasher.update(b"\0");
        }
        let id = TreeId::from_digest(&hasher.finalize());

        self.trees.insert(id.clone(), files);
        id
    }

    /// Store a commit and return its id.
    pub fn insert_commit(
        &mut self,
        tree: TreeId,
        parents: Vec<CommitId>,
        author: Signature,
        message: impl Into<String>,
    ) -> CommitId {
        let message = message.into();

        let mut hasher = Sha256::new();
        hasher.update(b"commit\0");
        hasher.update(tree.as_str().as_bytes());
        for parent in &parents {
            hasher.update(b"\0parent ");
            hasher.update(parent.as_str().as_bytes());
        }
        hasher.update(b"\0author ");
        hasher.update(author.composite().as_bytes());
        hasher.update(b"\0\0");
        hasher.update(message.as_bytes());
        let id = CommitId::from_digest(&hasher.finalize());

        self.commits.insert(
            id.clone(),
            Commit {
                id: id.clone(),
                tree,
                parents,
                author,
                message,
            },
        );
        id
    }

    /// Point a named reference at a commit.
    pub fn set_ref(&mut self, name: impl Into<String>, id: CommitId) {
        self.refs.insert(name.into(), id);
    }

    /// Number of stored commits.
    pub fn commit_count(&self) -> usize {
        self.commits.len()
    }
}

impl History for MemoryHistory {
    fn resolve(&self, revision: &str) -> Result<CommitId> {
        if let Some(id) = self.refs.get(revision) {
            return Ok(id.clone());
        }

        if let Ok(id) = CommitId::from_hex(revision) {
            if self.commits.contains_key(&id) {
                return Ok(id);
            }
        }

        if let Ok(id) = TreeId::from_hex(revision) {
            if self.trees.contains_key(&id) {
                return Err(HistoryError::NotACommit {
                    revision: revision.to_string(),
                    kind: "tree".to_string(),
                });
            }
        }

        Err(HistoryError::RevisionNotFound(revision.to_string()))
    }

    fn commit(&self, id: &CommitId) -> Result<Commit> {
        self.commits
            .get(id)
            .cloned()
            .ok_or_else(|| HistoryError::ObjectNotFound(id.to_string()))
    }

    fn diff_lines(&self, old: &TreeId, new: &TreeId) -> Result<Vec<DiffLine>> {
        let old_files = self
            .trees
            .get(old)
            .ok_or_else(|| HistoryError::ObjectNotFound(old.to_string()))?;
        let new_files = self
            .trees
            .get(new)
            .ok_or_else(|| HistoryError::ObjectNotFound(new.to_string()))?;

        let empty = Vec::new();
        let mut paths: Vec<&String> = old_files.keys().chain(new_files.keys()).collect();
        paths.sort();
        paths.dedup();

        let mut lines = Vec::new();
        for path in paths {
            let before = old_files.get(path).unwrap_or(&empty);
            let after = new_files.get(path).unwrap_or(&empty);

            let added = multiset_excess(after, before);
            let deleted = multiset_excess(before, after);
            if added > 0 {
                lines.push(DiffLine::added(added));
            }
            if deleted > 0 {
                lines.push(DiffLine::deleted(deleted));
            }
        }

        Ok(lines)
    }
}

/// Number of lines in `a` not matched by an equal line in `b`.
fn multiset_excess(a: &[String], b: &[String]) -> usize {
    let mut counts: HashMap<&str, isize> = HashMap::new();
    for line in b {
        *counts.entry(line.as_str()).or_default() += 1;
    }

    let mut excess = 0;
    for line in a {
        let count = counts.entry(line.as_str()).or_default();
        if *count > 0 {
            *count -= 1;
        } else {
            excess += 1;
        }
    }
    excess
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::HistoryExt;
    use crate::types::count_added;
    use proptest::prelude::*;

    fn author() -> Signature {
        Signature::new("Alice", "alice@example.com")
    }

    #[test]
    fn test_content_addressed_ids() {
        let mut h1 = MemoryHistory::new();
        let mut h2 = MemoryHistory::new();
        let t1 = h1.insert_tree([("a.txt", "one\ntwo\n")]);
        let t2 = h2.insert_tree([("a.txt", "one\ntwo\n")]);
        assert_eq!(t1, t2);

        let c1 = h1.insert_commit(t1, vec![], author(), "init");
        let c2 = h2.insert_commit(t2, vec![], author(), "init");
        assert_eq!(c1, c2);
    }

    #[test]
    fn test_resolve_ref_and_id() {
        let mut history = MemoryHistory::new();
        let tree = history.insert_tree([("a", "x")]);
        let id = history.insert_commit(tree.clone(), vec![], author(), "init");
        history.set_ref("HEAD", id.clone());

        assert_eq!(history.resolve("HEAD").unwrap(), id);
        assert_eq!(history.resolve(id.as_str()).unwrap(), id);
        assert!(matches!(
            history.resolve("main"),
            Err(HistoryError::RevisionNotFound(_))
        ));
        assert!(matches!(
            history.resolve(tree.as_str()),
            Err(HistoryError::NotACommit { .. })
        ));
    }

    #[test]
    fn test_diff_counts_added_and_deleted() {
        let mut history = MemoryHistory::new();
        let old = history.insert_tree([("a", "1\n2\n3\n"), ("gone", "x\n")]);
        let new = history.insert_tree([("a", "1\n3\n4\n5\n"), ("new", "y\nz\n")]);

        let lines = history.diff_lines(&old, &new).unwrap();
        assert_eq!(count_added(&lines), 4);
        let deleted: usize = lines
            .iter()
            .filter(|l| l.origin == crate::types::LineOrigin::Deletion)
            .map(|l| l.num_lines)
            .sum();
        assert_eq!(deleted, 2);
    }

    #[test]
    fn test_added_lines_relative_to_first_parent() {
        let mut history = MemoryHistory::new();
        let t0 = history.insert_tree([("a", "1\n")]);
        let root = history.insert_commit(t0, vec![], author(), "root");
        let t1 = history.insert_tree([("a", "1\n2\n3\n")]);
        let child = history.insert_commit(t1, vec![root.clone()], author(), "child");

        let root = history.commit(&root).unwrap();
        let child = history.commit(&child).unwrap();
        assert_eq!(history.added_lines(&root).unwrap(), None);
        assert_eq!(history.added_lines(&child).unwrap(), Some(2));
    }

    #[test]
    fn test_missing_objects() {
        let history = MemoryHistory::new();
        let id = CommitId::from_hex(&"a".repeat(64)).unwrap();
        assert!(matches!(history.commit(&id), Err(HistoryError::ObjectNotFound(_))));
    }

    proptest! {
        #[test]
        fn test_multiset_excess_balances_lengths(
            a in prop::collection::vec("[a-c]{0,2}", 0..20),
            b in prop::collection::vec("[a-c]{0,2}", 0..20),
        ) {
            let added = multiset_excess(&a, &b);
            let deleted = multiset_excess(&b, &a);
            prop_assert!(added <= a.len());
            prop_assert_eq!(a.len() as isize - added as isize, b.len() as isize - deleted as isize);
        }

        #[test]
        fn test_appending_lines_adds_exactly_those(
            base in prop::collection::vec("[a-z]{1,6}", 0..10),
            extra in prop::collection::vec("[a-z]{1,6}", 0..10),
        ) {
            let mut grown = base.clone();
            grown.extend(extra.iter().cloned());
            prop_assert_eq!(multiset_excess(&grown, &base), extra.len());
            prop_assert_eq!(multiset_excess(&base, &grown), 0);
        }
    }
}
