//! Stanza extraction from commit messages.
//!
//! A declaration line starts with the copyright sigil followed by `:` or `!`.
//! Runs of consecutive declaration lines are folded into one logical stanza,
//! so long declarations can be hard-wrapped in the message body.
//!
//! ```text
//! Add parser
//!
//! ©: I hereby licence these changes under the licence with SHA256 hash
//! ©: 0123...cdef.
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// The copyright sigil that opens every declaration line.
pub const STANZA_SIGIL: char = '\u{a9}';

// `Â©` is how the sigil reads when a UTF-8 message was decoded as Latin-1
// somewhere upstream; both spellings are accepted.
static STANZA_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\x{c2})?\x{a9}[:!][ \t]*(.*)$").expect("stanza line pattern is valid")
});

/// One logical declaration extracted from a commit message.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stanza(String);

impl Stanza {
    /// Wrap already de-wrapped declaration text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The declaration text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the declaration text.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for Stanza {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stanza({:?})", self.0)
    }
}

impl fmt::Display for Stanza {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Stanza {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extract the stanzas of a commit message, in message order.
///
/// Each marked line contributes its trimmed remainder; consecutive marked
/// lines are joined with a single space. Any unmarked line (including a
/// blank one) ends the current stanza. Marked lines with nothing after the
/// marker contribute nothing, and a run that contributes nothing yields no
/// stanza.
pub fn extract_stanzas(message: &str) -> Vec<Stanza> {
    let mut stanzas = Vec::new();
    let mut fragments: Vec<&str> = Vec::new();

    for line in message.lines() {
        match STANZA_LINE.captures(line) {
            Some(caps) => {
                let fragment = caps.get(1).map_or("", |m| m.as_str()).trim();
                if !fragment.is_empty() {
                    fragments.push(fragment);
                }
            }
            None => flush(&mut fragments, &mut stanzas),
        }
    }
    flush(&mut fragments, &mut stanzas);

    stanzas
}

fn flush(fragments: &mut Vec<&str>, stanzas: &mut Vec<Stanza>) {
    if !fragments.is_empty() {
        stanzas.push(Stanza(fragments.join(" ")));
        fragments.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_message() {
        assert!(extract_stanzas("").is_empty());
    }

    #[test]
    fn test_message_without_markers() {
        let msg = "Fix the build\n\nThis was broken on Tuesday.\n";
        assert!(extract_stanzas(msg).is_empty());
    }

    #[test]
    fn test_single_line_stanza() {
        let msg = "Subject\n\n\u{a9}: hello world.\n";
        let stanzas = extract_stanzas(msg);
        assert_eq!(stanzas, vec![Stanza::new("hello world.")]);
    }

    #[test]
    fn test_bang_marker() {
        let stanzas = extract_stanzas("\u{a9}! shouted\n");
        assert_eq!(stanzas, vec![Stanza::new("shouted")]);
    }

    #[test]
    fn test_mis_decoded_marker() {
        let stanzas = extract_stanzas("\u{c2}\u{a9}: legacy\n");
        assert_eq!(stanzas, vec![Stanza::new("legacy")]);
    }

    #[test]
    fn test_wrapped_lines_fold() {
        let msg = "\u{a9}: first half   \n\u{a9}:    second half\n";
        let stanzas = extract_stanzas(msg);
        assert_eq!(stanzas, vec![Stanza::new("first half second half")]);
    }

    #[test]
    fn test_unmarked_line_separates_stanzas() {
        let msg = "\u{a9}: one\n\n\u{a9}: two\nplain\n\u{a9}: three";
        let stanzas = extract_stanzas(msg);
        assert_eq!(
            stanzas,
            vec![Stanza::new("one"), Stanza::new("two"), Stanza::new("three")]
        );
    }

    #[test]
    fn test_last_line_without_newline() {
        let stanzas = extract_stanzas("subject\n\u{a9}: tail");
        assert_eq!(stanzas, vec![Stanza::new("tail")]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let stanzas = extract_stanzas("\u{a9}: a \r\n\u{a9}: b\r\n");
        assert_eq!(stanzas, vec![Stanza::new("a b")]);
    }

    #[test]
    fn test_marker_must_start_line() {
        assert!(extract_stanzas("  \u{a9}: indented\n").is_empty());
        assert!(extract_stanzas("\u{a9} missing colon\n").is_empty());
    }

    #[test]
    fn test_empty_marker_lines_contribute_nothing() {
        assert!(extract_stanzas("\u{a9}:\n\u{a9}:   \n").is_empty());
        let stanzas = extract_stanzas("\u{a9}: a\n\u{a9}:\n\u{a9}: b\n");
        assert_eq!(stanzas, vec![Stanza::new("a b")]);
    }

    proptest! {
        #[test]
        fn prop_wrapping_folds_words(words in prop::collection::vec("[a-z]{1,8}", 1..20)) {
            let wrapped: String = words
                .iter()
                .map(|w| format!("\u{a9}: {w}\n"))
                .collect();
            let stanzas = extract_stanzas(&wrapped);
            prop_assert_eq!(stanzas.len(), 1);
            prop_assert_eq!(stanzas[0].as_str(), words.join(" "));
        }

        #[test]
        fn prop_unmarked_text_yields_nothing(text in "[a-zA-Z0-9 .,\n]{0,200}") {
            prop_assert!(extract_stanzas(&text).is_empty());
        }
    }
}
