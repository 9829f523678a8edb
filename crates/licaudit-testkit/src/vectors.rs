//! Stanza vectors: known commit-message fragments and how they classify.
//!
//! These pin down the grammar's exact wording, including the edge cases that
//! are easy to break: spelling variants, hard-wrapping, truncated hashes,
//! and near-miss text.

use licaudit_core::{classify, extract_stanzas, Classification, DeclarationKind};

use crate::fixtures::{
    completeness, current_grant, current_grant_by, deprecated_grant, mit_hash, retroactive_grant,
    wrap_stanza,
};

/// Expected classification of a vector's single stanza.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Declaration(DeclarationKind),
    Malformed,
    Unrecognized,
}

/// A stanza vector.
#[derive(Debug, Clone)]
pub struct StanzaVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Commit message containing exactly one stanza.
    pub message: String,
    /// How that stanza classifies.
    pub expected: Expected,
}

fn marked(text: &str) -> String {
    format!("Subject\n\n\u{a9}: {text}\n")
}

/// Get all stanza vectors.
pub fn all_vectors() -> Vec<StanzaVector> {
    let hash = mit_hash();
    let hex = hash.to_hex();

    vec![
        StanzaVector {
            name: "current grant",
            message: marked(&current_grant(&hash)),
            expected: Expected::Declaration(DeclarationKind::CurrentGrant),
        },
        StanzaVector {
            name: "current grant, plural with person and US spelling",
            message: marked(&current_grant_by("Acme Corp", &hash)),
            expected: Expected::Declaration(DeclarationKind::CurrentGrant),
        },
        StanzaVector {
            name: "current grant, upper-case hash",
            message: marked(&format!(
                "I hereby licence these changes under the licence with SHA256 hash {}.",
                hex.to_uppercase()
            )),
            expected: Expected::Declaration(DeclarationKind::CurrentGrant),
        },
        StanzaVector {
            name: "current grant, hard-wrapped",
            message: format!("Subject\n\n{}", wrap_stanza(&current_grant(&hash), 30)),
            expected: Expected::Declaration(DeclarationKind::CurrentGrant),
        },
        StanzaVector {
            name: "current grant, mis-decoded marker",
            message: format!("Subject\n\n\u{c2}\u{a9}: {}\n", current_grant(&hash)),
            expected: Expected::Declaration(DeclarationKind::CurrentGrant),
        },
        StanzaVector {
            name: "current grant, truncated hash",
            message: marked(&format!(
                "I hereby licence these changes under the licence with SHA256 hash {}.",
                &hex[..63]
            )),
            expected: Expected::Malformed,
        },
        StanzaVector {
            name: "current grant, missing final period",
            message: marked(&format!(
                "I hereby licence these changes under the licence with SHA256 hash {hex}"
            )),
            expected: Expected::Unrecognized,
        },
        StanzaVector {
            name: "retroactive grant",
            message: marked(&retroactive_grant("Alice <alice@example.com>", &hash)),
            expected: Expected::Declaration(DeclarationKind::RetroactiveGrant),
        },
        StanzaVector {
            name: "retroactive grant, hard-wrapped",
            message: format!(
                "Subject\n\n{}",
                wrap_stanza(&retroactive_grant("Alice", &hash), 72)
            ),
            expected: Expected::Declaration(DeclarationKind::RetroactiveGrant),
        },
        StanzaVector {
            name: "deprecated retroactive grant",
            message: marked(&deprecated_grant(&hash)),
            expected: Expected::Declaration(DeclarationKind::RetroactiveGrant),
        },
        StanzaVector {
            name: "completeness declaration",
            message: marked(&completeness("Alice", &["their person", "Acme Corp"])),
            expected: Expected::Declaration(DeclarationKind::RetroactiveCompleteness),
        },
        StanzaVector {
            name: "unrelated marked text",
            message: marked("This commit is dedicated to the public domain."),
            expected: Expected::Unrecognized,
        },
    ]
}

/// Classify a vector's message. `None` if it does not hold exactly one
/// stanza.
pub fn classify_vector(vector: &StanzaVector) -> Option<Expected> {
    let stanzas = extract_stanzas(&vector.message);
    let [stanza] = stanzas.as_slice() else {
        return None;
    };
    Some(match classify(stanza) {
        Classification::Declaration(d) => Expected::Declaration(d.kind()),
        Classification::Malformed { .. } => Expected::Malformed,
        Classification::Unrecognized => Expected::Unrecognized,
    })
}

/// Verify all vectors, returning `(name, passed)` for each.
pub fn verify_all_vectors() -> Vec<(&'static str, bool)> {
    all_vectors()
        .iter()
        .map(|v| (v.name, classify_vector(v) == Some(v.expected)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_classify_as_expected() {
        for vector in all_vectors() {
            assert_eq!(
                classify_vector(&vector),
                Some(vector.expected),
                "vector {:?}",
                vector.name
            );
        }
    }

    #[test]
    fn test_verify_reports_every_vector() {
        let results = verify_all_vectors();
        assert_eq!(results.len(), all_vectors().len());
        assert!(results.iter().all(|(_, ok)| *ok));
    }
}
