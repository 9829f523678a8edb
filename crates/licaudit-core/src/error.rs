//! Error types for licaudit Core.

use thiserror::Error;

/// Core errors that can occur while interpreting declaration text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid licence hash {value:?}: expected 64 hex characters, got {len}")]
    InvalidHashLength { value: String, len: usize },

    #[error("invalid licence hash {value:?}: {reason}")]
    InvalidHash { value: String, reason: String },
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
