//! # licaudit Testkit
//!
//! Testing utilities for licaudit.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Stanza vectors**: Known messages with their expected classification
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Declaration text builders, linear in-memory histories,
//!   and temporary licence directories
//!
//! ## Stanza Vectors
//!
//! ```rust
//! use licaudit_testkit::vectors::{all_vectors, classify_vector};
//!
//! for vector in all_vectors() {
//!     assert_eq!(classify_vector(&vector), Some(vector.expected), "{}", vector.name);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use licaudit_testkit::generators::{history_from_params, history_params};
//!
//! proptest! {
//!     #[test]
//!     fn audit_is_deterministic(params in history_params(10)) {
//!         let history = history_from_params(&params, &accepted, &other);
//!         // ...
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use licaudit_core::Signature;
//! use licaudit_testkit::fixtures::{current_grant, message, mit_hash, HistoryBuilder};
//!
//! let alice = Signature::new("Alice", "alice@example.com");
//! let mut builder = HistoryBuilder::new();
//! builder.commit(&alice, "Initial import", 20);
//! builder.commit(&alice, &message("Add feature", &[current_grant(&mit_hash())]), 12);
//! let history = builder.build();
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{licence_dir, mit_hash, mit_licence_dir, HistoryBuilder, MIT_TEXT};
pub use generators::{history_from_params, history_params, CommitParams};
pub use vectors::{all_vectors, classify_vector, verify_all_vectors, StanzaVector};
