//! Error types for licaudit.

use std::path::PathBuf;

use licaudit_core::CoreError;
use licaudit_history::HistoryError;
use thiserror::Error;

/// Errors that abort an audit.
///
/// Anything that merely makes a commit unprovable is a finding, not an
/// error; see [`crate::AuditReport`].
#[derive(Debug, Error)]
pub enum AuditError {
    /// Core parsing error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Repository access error.
    #[error("{0}")]
    History(#[from] HistoryError),

    /// No licence directory was configured and none was found.
    #[error("couldn't find a licence directory (searched {}); use --licence-path", display_paths(.searched))]
    LicencePathMissing { searched: Vec<PathBuf> },

    /// The configured licence directory is not a directory.
    #[error("licence path is not a directory: {0}")]
    LicencePathInvalid(PathBuf),

    /// A named licence file could not be read.
    #[error("couldn't read licence {name:?} from {path}: {source}")]
    LicenceUnreadable {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "nothing".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for audit operations.
pub type Result<T> = std::result::Result<T, AuditError>;
