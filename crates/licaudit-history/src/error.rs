//! Error types for the history module.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading repository history.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The path is not a repository the backend can open.
    #[error("couldn't open repository: {path}: {reason}")]
    RepositoryNotFound { path: PathBuf, reason: String },

    /// The revision does not resolve to any object.
    #[error("couldn't find revision {0:?} - are there any commits?")]
    RevisionNotFound(String),

    /// The revision resolves, but not to a commit.
    #[error("revision {revision:?} does not specify a commit (found {kind})")]
    NotACommit { revision: String, kind: String },

    /// A commit or tree id is not present in the repository.
    #[error("object not found: {0}")]
    ObjectNotFound(String),

    /// Text that should be an object id is not one.
    #[error("invalid object id: {0:?}")]
    InvalidObjectId(String),

    /// Backend output could not be parsed.
    #[error("malformed {what}: {detail}")]
    Malformed { what: &'static str, detail: String },

    /// The git executable reported failure.
    #[error("git {command} failed ({status}): {stderr}")]
    Git {
        command: String,
        status: String,
        stderr: String,
    },

    /// I/O error, e.g. the git executable could not be spawned.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for history operations.
pub type Result<T> = std::result::Result<T, HistoryError>;
