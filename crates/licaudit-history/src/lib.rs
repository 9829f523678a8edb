//! # licaudit History
//!
//! Version-control access for licaudit. Provides a trait-based interface
//! over the few repository operations the auditor needs, with a git-backed
//! and an in-memory implementation.
//!
//! ## Overview
//!
//! The auditor never talks to a repository directly. It asks a [`History`]
//! to resolve a revision, load commits, and diff trees. The primary
//! implementation is [`GitHistory`], with [`MemoryHistory`] for tests.
//!
//! ## Key Types
//!
//! - [`History`] - The synchronous trait for repository access
//! - [`HistoryExt`] - Convenience operations built on [`History`]
//! - [`GitHistory`] - Runs the `git` executable against a repository
//! - [`MemoryHistory`] - Content-addressed in-memory commits and trees
//! - [`Commit`] - Tree, parents, author, and message of one commit
//! - [`DiffLine`] - A run of added, deleted, or context lines
//!
//! ## Usage
//!
//! ```rust,no_run
//! use licaudit_history::{GitHistory, History};
//!
//! let history = GitHistory::open(".").unwrap();
//! let head = history.resolve("HEAD").unwrap();
//! let commit = history.commit(&head).unwrap();
//! println!("{} by {}", commit.id, commit.author);
//! ```
//!
//! ## Design Notes
//!
//! - **Blocking**: every call completes or fails; there is no cancellation
//! - **First parent**: callers follow `parents[0]`; merges are not traversed
//! - **Failures are fatal**: errors mean the history is unreadable, not that
//!   a commit is unlicensed

pub mod error;
pub mod git;
pub mod memory;
pub mod traits;
pub mod types;

pub use error::{HistoryError, Result};
pub use git::GitHistory;
pub use memory::MemoryHistory;
pub use traits::{History, HistoryExt};
pub use types::{count_added, Commit, CommitId, DiffLine, LineOrigin, TreeId};
