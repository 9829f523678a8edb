//! # licaudit
//!
//! Audits the licence provenance of a git history.
//!
//! ## Overview
//!
//! Contributors declare licences in commit messages with marked stanzas
//! (lines starting `©:` or `©!`). licaudit walks the first-parent history
//! from a starting revision and checks that every commit is licensed under
//! one of a set of accepted licences, by:
//!
//! - **Current grant**: the commit licenses its own changes
//! - **Retroactive grant**: a person licenses all their past and present
//!   changes, made in this commit or any newer one
//! - **Completeness**: a person declares that only the named, covered persons
//!   hold an interest in commits they authored
//! - **Triviality**: a non-root commit adding three lines or fewer
//!
//! Every commit that none of these cover is reported as a [`Finding`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use licaudit::{audit_repository, AuditConfig};
//!
//! let config = AuditConfig {
//!     licence_path: Some("/usr/share/licaudit/licences".into()),
//!     licences: vec!["mit".to_string()],
//!     ..AuditConfig::default()
//! };
//!
//! let report = audit_repository(&config).unwrap();
//! for finding in &report.findings {
//!     eprintln!("{finding}");
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `licaudit::core` - Stanzas, grammar, licence hashes
//! - `licaudit::authz` - Accepted licences and covered persons
//! - `licaudit::history` - The History trait and its backends

pub mod audit;
pub mod auditor;
pub mod config;
pub mod error;
pub mod licences;
pub mod report;
pub mod walker;

// Re-export component crates
pub use licaudit_authz as authz;
pub use licaudit_core as core;
pub use licaudit_history as history;

// Re-export main types for convenience
pub use audit::audit_repository;
pub use auditor::{parse_declarations, Auditor, CommitAudit};
pub use config::{AuditConfig, DEFAULT_REVISION, DEFAULT_TRIVIAL_LINE_LIMIT};
pub use error::{AuditError, Result};
pub use licences::{default_search_path, licence_file_name, locate_licence_dir, LicenceRegistry};
pub use report::{AuditReport, Finding, Verdict, VerdictCounts};
pub use walker::FirstParentWalk;

// Re-export commonly used component types
pub use licaudit_authz::{AcceptedLicences, AuthorizationState, CoveredPersons};
pub use licaudit_core::{LicenceHash, Signature};
pub use licaudit_history::{Commit, CommitId, GitHistory, History, MemoryHistory};
