//! Audit configuration.

use std::path::PathBuf;

/// Default revision the walk starts from.
pub const DEFAULT_REVISION: &str = "HEAD";

/// Largest number of added lines a commit may carry and still be exempt.
pub const DEFAULT_TRIVIAL_LINE_LIMIT: usize = 3;

/// Configuration for one audit run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
    /// Repository to audit: a working tree or a bare repository.
    pub repository: PathBuf,

    /// Revision to start the walk from.
    pub revision: String,

    /// Directory holding `COPYING.<NAME>` licence texts. Searched for when
    /// unset.
    pub licence_path: Option<PathBuf>,

    /// Accepted licences: short names or 64-digit hex hashes.
    pub licences: Vec<String>,

    /// Commits adding at most this many lines are exempt.
    pub trivial_line_limit: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            repository: PathBuf::from("."),
            revision: DEFAULT_REVISION.to_string(),
            licence_path: None,
            licences: Vec::new(),
            trivial_line_limit: DEFAULT_TRIVIAL_LINE_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuditConfig::default();
        assert_eq!(config.repository, PathBuf::from("."));
        assert_eq!(config.revision, "HEAD");
        assert_eq!(config.licence_path, None);
        assert!(config.licences.is_empty());
        assert_eq!(config.trivial_line_limit, 3);
    }
}
