//! Repository object types.

use serde::{Deserialize, Serialize};
use std::fmt;

use licaudit_core::Signature;

use crate::error::{HistoryError, Result};

fn is_object_id(s: &str) -> bool {
    // SHA-1 and SHA-256 object formats.
    (s.len() == 40 || s.len() == 64) && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// The content identifier of a commit, as lower-case hex.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommitId(String);

impl CommitId {
    /// Parse a full-length hex object id.
    pub fn from_hex(s: &str) -> Result<Self> {
        if !is_object_id(s) {
            return Err(HistoryError::InvalidObjectId(s.to_string()));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    pub(crate) fn from_digest(digest: &[u8]) -> Self {
        Self(hex::encode(digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for log output.
    pub fn short(&self) -> &str {
        &self.0[..12]
    }
}

impl fmt::Debug for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommitId({})", self.short())
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CommitId {
    type Error = HistoryError;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

impl From<CommitId> for String {
    fn from(id: CommitId) -> Self {
        id.0
    }
}

/// The content identifier of a tree, as lower-case hex.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TreeId(String);

impl TreeId {
    /// Parse a full-length hex object id.
    pub fn from_hex(s: &str) -> Result<Self> {
        if !is_object_id(s) {
            return Err(HistoryError::InvalidObjectId(s.to_string()));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    pub(crate) fn from_digest(digest: &[u8]) -> Self {
        Self(hex::encode(digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TreeId({})", &self.0[..12])
    }
}

impl fmt::Display for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TreeId {
    type Error = HistoryError;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

impl From<TreeId> for String {
    fn from(id: TreeId) -> Self {
        id.0
    }
}

/// A commit, as far as the auditor cares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Content identifier, used in findings.
    pub id: CommitId,

    /// Root tree of the commit.
    pub tree: TreeId,

    /// Parent commits; the first is the primary ancestry line.
    pub parents: Vec<CommitId>,

    /// Who wrote the change.
    pub author: Signature,

    /// Raw commit message.
    pub message: String,
}

impl Commit {
    pub fn parent_count(&self) -> usize {
        self.parents.len()
    }

    /// The parent on the primary ancestry line.
    pub fn first_parent(&self) -> Option<&CommitId> {
        self.parents.first()
    }

    /// Whether this is an initial commit.
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}

/// Kind of line in a diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineOrigin {
    Addition,
    Deletion,
    Context,
}

/// A run of diff lines sharing one origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    pub origin: LineOrigin,
    pub num_lines: usize,
}

impl DiffLine {
    pub const fn added(num_lines: usize) -> Self {
        Self {
            origin: LineOrigin::Addition,
            num_lines,
        }
    }

    pub const fn deleted(num_lines: usize) -> Self {
        Self {
            origin: LineOrigin::Deletion,
            num_lines,
        }
    }
}

/// Total added lines across a diff.
pub fn count_added(lines: &[DiffLine]) -> usize {
    lines
        .iter()
        .filter(|line| line.origin == LineOrigin::Addition)
        .map(|line| line.num_lines)
        .sum()
}
