//! Person list parsing for completeness declarations.
//!
//! Accepts the usual English enumeration forms:
//!
//! ```text
//! John Smith <jsmith@example.com>
//! John Smith <jsmith@example.com> and Jane Doe <jdoe@example.com>
//! John Smith <jsmith@example.com>, Jane Doe <jdoe@example.com> and their person
//! John Smith <jsmith@example.com>, Jane Doe <jdoe@example.com>, and their person
//! ```

use regex::Regex;
use std::sync::LazyLock;

/// Shorthand in a persons list for the declaring person themself.
pub const THEIR_PERSON: &str = "their person";

static PERSON_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",? and |, ").expect("person separator pattern is valid"));

/// Split a free-text enumeration into identity strings.
///
/// Separators are `", and "`, `" and "`, and `", "`. Entries are trimmed, and
/// [`THEIR_PERSON`] is replaced with `declaring_person` when one is given.
/// Never fails: odd input degrades to whatever the split produces.
pub fn parse_persons(persons: &str, declaring_person: &str) -> Vec<String> {
    PERSON_SEPARATOR
        .split(persons)
        .map(str::trim)
        .map(|entry| {
            if entry == THEIR_PERSON && !declaring_person.is_empty() {
                declaring_person.to_string()
            } else {
                entry.to_string()
            }
        })
        .collect()
}
