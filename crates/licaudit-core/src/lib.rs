//! # licaudit Core
//!
//! Pure primitives for licaudit: licence hashes, stanza extraction, and the
//! declaration grammar.
//!
//! This crate contains no I/O, no repository access, no logging. It is pure
//! computation over commit message text.
//!
//! ## Key Types
//!
//! - [`LicenceHash`] - SHA-256 digest identifying an accepted licence text
//! - [`Stanza`] - One logical declaration, de-wrapped from a commit message
//! - [`ParsedDeclaration`] - A stanza classified against the fixed grammar
//! - [`DeclarationKind`] - Discriminator for the three declaration kinds
//! - [`Signature`] - Name and email recorded on a commit
//!
//! ## Pipeline
//!
//! ```rust
//! use licaudit_core::{classify, extract_stanzas, Classification};
//!
//! let message = "Fix typo\n\n\u{a9}: Something unrelated.\n";
//! for stanza in extract_stanzas(message) {
//!     match classify(&stanza) {
//!         Classification::Declaration(decl) => println!("{:?}", decl.kind()),
//!         Classification::Malformed { error, .. } => println!("skipped: {error}"),
//!         Classification::Unrecognized => {}
//!     }
//! }
//! ```

pub mod error;
pub mod grammar;
pub mod persons;
pub mod stanza;
pub mod types;

pub use error::{CoreError, Result};
pub use grammar::{classify, Classification, DeclarationKind, GrammarId, ParsedDeclaration};
pub use persons::{parse_persons, THEIR_PERSON};
pub use stanza::{extract_stanzas, Stanza};
pub use types::{LicenceHash, Signature};
