//! The fixed declaration grammar.
//!
//! Every recognized stanza matches exactly one of a small, ordered table of
//! patterns. Each pattern maps to a [`DeclarationKind`]; two textual forms
//! (current and deprecated) both produce a retroactive grant.
//!
//! Stanzas matching no pattern are [`Classification::Unrecognized`] and are
//! ignored by callers, so new declaration forms can be introduced without
//! breaking older auditors.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::error::CoreError;
use crate::persons::parse_persons;
use crate::stanza::Stanza;
use crate::types::LicenceHash;

/// Discriminator for how a declaration authorizes changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclarationKind {
    /// The changes in this commit are licensed under the named hash.
    CurrentGrant,
    /// A person's past contributions are fully covered once the named
    /// persons are each covered.
    RetroactiveCompleteness,
    /// A person licenses all their past contributions under the named hash.
    RetroactiveGrant,
}

/// Identifies the grammar entry a stanza matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrammarId {
    /// Standard single-commit licensing declaration.
    CurrentGrant,
    /// Standard retroactive licensing completeness declaration.
    RetroactiveCompleteness,
    /// Standard retroactive licensing entity declaration.
    RetroactiveGrant,
    /// Retroactive licensing entity declaration, first version (deprecated).
    /// Carries no person; it speaks for the commit author.
    RetroactiveGrantV1,
}

impl GrammarId {
    /// The declaration kind this grammar produces.
    pub const fn kind(self) -> DeclarationKind {
        match self {
            GrammarId::CurrentGrant => DeclarationKind::CurrentGrant,
            GrammarId::RetroactiveCompleteness => DeclarationKind::RetroactiveCompleteness,
            GrammarId::RetroactiveGrant | GrammarId::RetroactiveGrantV1 => {
                DeclarationKind::RetroactiveGrant
            }
        }
    }

    /// Whether this form is kept only for old histories.
    pub const fn is_deprecated(self) -> bool {
        matches!(self, GrammarId::RetroactiveGrantV1)
    }
}

/// A stanza classified against the grammar, with its captured fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParsedDeclaration {
    /// Licenses only this commit's changes. `person`, when absent, is the
    /// commit author; the resolver does not track it either way.
    CurrentGrant {
        person: Option<String>,
        hash: LicenceHash,
    },

    /// `person` declares no entity other than `persons` holds copyright in
    /// their contributions.
    RetroactiveCompleteness {
        person: String,
        persons: Vec<String>,
    },

    /// Licenses all of `person`'s past contributions. `person` is `None` for
    /// the deprecated form, meaning the commit author.
    RetroactiveGrant {
        person: Option<String>,
        hash: LicenceHash,
    },
}

impl ParsedDeclaration {
    /// The kind of this declaration.
    pub fn kind(&self) -> DeclarationKind {
        match self {
            ParsedDeclaration::CurrentGrant { .. } => DeclarationKind::CurrentGrant,
            ParsedDeclaration::RetroactiveCompleteness { .. } => {
                DeclarationKind::RetroactiveCompleteness
            }
            ParsedDeclaration::RetroactiveGrant { .. } => DeclarationKind::RetroactiveGrant,
        }
    }

    /// The explicitly named person, if any.
    pub fn person(&self) -> Option<&str> {
        match self {
            ParsedDeclaration::CurrentGrant { person, .. }
            | ParsedDeclaration::RetroactiveGrant { person, .. } => person.as_deref(),
            ParsedDeclaration::RetroactiveCompleteness { person, .. } => Some(person),
        }
    }

    /// The licence hash, for grant declarations.
    pub fn hash(&self) -> Option<&LicenceHash> {
        match self {
            ParsedDeclaration::CurrentGrant { hash, .. }
            | ParsedDeclaration::RetroactiveGrant { hash, .. } => Some(hash),
            ParsedDeclaration::RetroactiveCompleteness { .. } => None,
        }
    }
}

/// Outcome of classifying one stanza.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The stanza matched a grammar and all fields are well formed.
    Declaration(ParsedDeclaration),
    /// The stanza matched a grammar but a field is unusable.
    Malformed { grammar: GrammarId, error: CoreError },
    /// The stanza matched no grammar.
    Unrecognized,
}

struct Grammar {
    id: GrammarId,
    regex: Regex,
}

// Hash captures accept any run of hex digits so that a truncated hash is
// reported as malformed instead of silently falling through as unknown.
static GRAMMARS: LazyLock<Vec<Grammar>> = LazyLock::new(|| {
    [
        (
            GrammarId::CurrentGrant,
            r"^(?:I|We)(?:, (?P<person>.+),)? hereby licen[cs]e these changes under the licen[cs]e with SHA256 hash (?P<hash>[0-9a-fA-F]+)\.$",
        ),
        (
            GrammarId::RetroactiveCompleteness,
            r"^As regards this commit, and all commits upon which this commit depends, (?P<person>.+) hereby declares that no entity other than (?P<persons>.+) has a copyright interest in any such commit \(and the changes therein\) authored by their person\.$",
        ),
        (
            GrammarId::RetroactiveGrant,
            r"^To the extent that (?:I|we), (?P<person>.+), have a copyright interest in the changes in this commit, and the changes in all commits upon which this commit depends, including changes occluded by subsequent changes, (?:I|we) hereby licence those changes under the copyright licence with SHA256 hash (?P<hash>[0-9a-fA-F]+)\.$",
        ),
        (
            GrammarId::RetroactiveGrantV1,
            r"^To the extent that I have a copyright interest in the files in this repository, and the sequence of changes leading to those files, and all intermediate states resulting from a partial application of those changes, including changes occluded by subsequent changes, I hereby licence those files and changes present and past under the copyright licence with SHA256 hash (?P<hash>[0-9a-fA-F]+)\.$",
        ),
    ]
    .into_iter()
    .map(|(id, pattern)| Grammar {
        id,
        regex: Regex::new(pattern).expect("declaration grammar is valid"),
    })
    .collect()
});

impl Grammar {
    fn parse(&self, caps: &Captures<'_>) -> Classification {
        let person = caps.name("person").map(|m| m.as_str().trim().to_string());

        let hash = match caps.name("hash").map(|m| LicenceHash::from_hex(m.as_str())) {
            Some(Ok(hash)) => Some(hash),
            Some(Err(error)) => {
                return Classification::Malformed {
                    grammar: self.id,
                    error,
                }
            }
            None => None,
        };

        let declaration = match (self.id, hash) {
            (GrammarId::CurrentGrant, Some(hash)) => ParsedDeclaration::CurrentGrant { person, hash },
            (GrammarId::RetroactiveGrant | GrammarId::RetroactiveGrantV1, Some(hash)) => {
                ParsedDeclaration::RetroactiveGrant { person, hash }
            }
            (GrammarId::RetroactiveCompleteness, _) => {
                let person = person.unwrap_or_default();
                let persons = caps
                    .name("persons")
                    .map(|m| parse_persons(m.as_str(), &person))
                    .unwrap_or_default();
                ParsedDeclaration::RetroactiveCompleteness { person, persons }
            }
            // Every grant pattern captures a hash.
            (_, None) => return Classification::Unrecognized,
        };

        Classification::Declaration(declaration)
    }
}

/// Classify a stanza against the grammar table, first match wins.
pub fn classify(stanza: &Stanza) -> Classification {
    GRAMMARS
        .iter()
        .find_map(|grammar| {
            grammar
                .regex
                .captures(stanza.as_str())
                .map(|caps| grammar.parse(&caps))
        })
        .unwrap_or(Classification::Unrecognized)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "8ceb4b9ee5adedde47b31e975c1d90c73ad27b6b165a1dcd80c7c545eb65b903";

    fn classify_str(text: &str) -> Classification {
        classify(&Stanza::new(text))
    }

    fn declaration(text: &str) -> ParsedDeclaration {
        match classify_str(text) {
            Classification::Declaration(d) => d,
            other => panic!("expected declaration, got {other:?}"),
        }
    }

    fn hash() -> LicenceHash {
        LicenceHash::from_hex(HASH).unwrap()
    }

    #[test]
    fn test_current_grant_without_person() {
        let d = declaration(&format!(
            "I hereby licence these changes under the licence with SHA256 hash {HASH}."
        ));
        assert_eq!(d, ParsedDeclaration::CurrentGrant { person: None, hash: hash() });
        assert_eq!(d.kind(), DeclarationKind::CurrentGrant);
    }

    #[test]
    fn test_current_grant_with_person_and_american_spelling() {
        let d = declaration(&format!(
            "We, Acme Corp <legal@acme.example>, hereby license these changes under the license with SHA256 hash {}.",
            HASH.to_uppercase()
        ));
        assert_eq!(
            d,
            ParsedDeclaration::CurrentGrant {
                person: Some("Acme Corp <legal@acme.example>".into()),
                hash: hash(),
            }
        );
    }

    #[test]
    fn test_retroactive_completeness() {
        let d = declaration(
            "As regards this commit, and all commits upon which this commit depends, Alice <a@x> hereby declares that no entity other than Bob <b@x> and their person has a copyright interest in any such commit (and the changes therein) authored by their person.",
        );
        assert_eq!(
            d,
            ParsedDeclaration::RetroactiveCompleteness {
                person: "Alice <a@x>".into(),
                persons: vec!["Bob <b@x>".into(), "Alice <a@x>".into()],
            }
        );
        assert_eq!(d.hash(), None);
    }

    #[test]
    fn test_retroactive_grant() {
        let d = declaration(&format!(
            "To the extent that I, Alice <a@x>, have a copyright interest in the changes in this commit, and the changes in all commits upon which this commit depends, including changes occluded by subsequent changes, I hereby licence those changes under the copyright licence with SHA256 hash {HASH}."
        ));
        assert_eq!(
            d,
            ParsedDeclaration::RetroactiveGrant {
                person: Some("Alice <a@x>".into()),
                hash: hash(),
            }
        );
        assert_eq!(d.person(), Some("Alice <a@x>"));
    }

    #[test]
    fn test_retroactive_grant_deprecated_form_has_no_person() {
        let d = declaration(&format!(
            "To the extent that I have a copyright interest in the files in this repository, and the sequence of changes leading to those files, and all intermediate states resulting from a partial application of those changes, including changes occluded by subsequent changes, I hereby licence those files and changes present and past under the copyright licence with SHA256 hash {HASH}."
        ));
        assert_eq!(d, ParsedDeclaration::RetroactiveGrant { person: None, hash: hash() });
        assert_eq!(d.kind(), DeclarationKind::RetroactiveGrant);
    }

    #[test]
    fn test_short_hash_is_malformed() {
        let short = &HASH[..60];
        let result = classify_str(&format!(
            "I hereby licence these changes under the licence with SHA256 hash {short}."
        ));
        assert!(matches!(
            result,
            Classification::Malformed {
                grammar: GrammarId::CurrentGrant,
                error: CoreError::InvalidHashLength { len: 60, .. },
            }
        ));
    }

    #[test]
    fn test_unknown_stanza_is_unrecognized() {
        assert_eq!(classify_str("Signed-off-by: nobody"), Classification::Unrecognized);
        assert_eq!(classify_str(""), Classification::Unrecognized);
    }

    #[test]
    fn test_missing_period_is_unrecognized() {
        let result = classify_str(&format!(
            "I hereby licence these changes under the licence with SHA256 hash {HASH}"
        ));
        assert_eq!(result, Classification::Unrecognized);
    }

    #[test]
    fn test_grammar_kinds() {
        assert_eq!(GrammarId::RetroactiveGrantV1.kind(), DeclarationKind::RetroactiveGrant);
        assert!(GrammarId::RetroactiveGrantV1.is_deprecated());
        assert!(!GrammarId::RetroactiveGrant.is_deprecated());
    }
}
