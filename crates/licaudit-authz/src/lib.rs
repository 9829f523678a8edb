//! # licaudit Authorization
//!
//! Resolution of licence declarations into authorization decisions.
//!
//! ## Overview
//!
//! Authorization is computed by replaying the declarations found in each
//! commit, newest commit first, into an [`AuthorizationState`]. The state
//! holds two sets:
//!
//! - **Accepted licences**: fixed for the run, injected at construction
//! - **Covered persons**: grows as commits are replayed, never shrinks
//!
//! ## Resolution Rules
//!
//! For each commit:
//!
//! 1. A current grant under an accepted licence authorizes the commit outright
//! 2. A retroactive grant under an accepted licence covers its person
//! 3. A completeness declaration covers its declaring person once every
//!    person it names has a retroactive grant in the same commit
//! 4. A commit whose author is covered (after steps 2 and 3) is authorized
//!
//! ## Usage
//!
//! ```rust
//! use licaudit_authz::{AcceptedLicences, AuthorizationState};
//! use licaudit_core::{LicenceHash, ParsedDeclaration, Signature};
//!
//! let mit = LicenceHash::digest(b"MIT licence text");
//! let mut state = AuthorizationState::new(AcceptedLicences::from_iter([mit]));
//!
//! let author = Signature::new("Alice", "alice@example.com");
//! let declarations = vec![ParsedDeclaration::RetroactiveGrant { person: None, hash: mit }];
//!
//! let outcome = state.apply_commit(&author, &declarations);
//! assert!(outcome.is_authorized());
//! assert!(state.covered().contains("Alice <alice@example.com>"));
//! ```

pub mod accepted;
pub mod covered;
pub mod state;

pub use accepted::AcceptedLicences;
pub use covered::CoveredPersons;
pub use state::{AuthorizationState, CommitAuthorization};
