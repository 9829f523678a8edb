//! Proptest generators for property-based testing.

use proptest::prelude::*;

use licaudit_core::{LicenceHash, Signature};
use licaudit_history::MemoryHistory;

use crate::fixtures::{
    completeness, current_grant, deprecated_grant, message, retroactive_grant, HistoryBuilder,
};

/// Generate a person name. Never contains a list separator.
pub fn person() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,8}( [A-Z][a-z]{1,8})?".prop_map(String::from)
}

/// Generate a non-empty list of person names.
pub fn person_list(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(person(), 1..=max.max(1))
}

/// Generate a random LicenceHash.
pub fn licence_hash() -> impl Strategy<Value = LicenceHash> {
    any::<[u8; 32]>().prop_map(LicenceHash::from_bytes)
}

/// Generate a commit author from a small pool, so authors repeat.
pub fn signature() -> impl Strategy<Value = Signature> {
    (0usize..4).prop_map(|i| {
        let name = ["Alice", "Bob", "Carol", "Dave"][i];
        Signature::new(name, format!("{}@example.com", name.to_lowercase()))
    })
}

/// Generate free text that may or may not carry the stanza marker.
pub fn message_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z ,.]{0,40}".prop_map(String::from),
        "[a-zA-Z ,.]{0,40}".prop_map(|s| format!("\u{a9}: {s}")),
        "[a-zA-Z ,.]{0,40}".prop_map(|s| format!("\u{a9}! {s}")),
    ]
}

/// Which declaration a generated commit carries.
#[derive(Debug, Clone)]
pub enum StanzaChoice {
    None,
    CurrentGrant { accepted: bool },
    RetroactiveGrant { person: usize, accepted: bool },
    DeprecatedGrant { accepted: bool },
    Completeness { person: usize, persons: Vec<usize> },
}

impl StanzaChoice {
    fn render(&self, people: &[&str], accepted: &LicenceHash, other: &LicenceHash) -> Option<String> {
        let hash = |ok: bool| if ok { accepted } else { other };
        match self {
            StanzaChoice::None => None,
            StanzaChoice::CurrentGrant { accepted } => Some(current_grant(hash(*accepted))),
            StanzaChoice::RetroactiveGrant { person, accepted } => Some(retroactive_grant(
                people[person % people.len()],
                hash(*accepted),
            )),
            StanzaChoice::DeprecatedGrant { accepted } => Some(deprecated_grant(hash(*accepted))),
            StanzaChoice::Completeness { person, persons } => {
                let named: Vec<&str> = persons.iter().map(|p| people[p % people.len()]).collect();
                Some(completeness(people[person % people.len()], &named))
            }
        }
    }
}

fn stanza_choice() -> impl Strategy<Value = StanzaChoice> {
    prop_oneof![
        3 => Just(StanzaChoice::None),
        1 => any::<bool>().prop_map(|accepted| StanzaChoice::CurrentGrant { accepted }),
        2 => (0usize..8, any::<bool>())
            .prop_map(|(person, accepted)| StanzaChoice::RetroactiveGrant { person, accepted }),
        1 => any::<bool>().prop_map(|accepted| StanzaChoice::DeprecatedGrant { accepted }),
        1 => (0usize..8, prop::collection::vec(0usize..8, 1..3))
            .prop_map(|(person, persons)| StanzaChoice::Completeness { person, persons }),
    ]
}

/// Parameters for generating one commit.
#[derive(Debug, Clone)]
pub struct CommitParams {
    pub author: Signature,
    pub stanzas: Vec<StanzaChoice>,
    pub added_lines: usize,
}

impl Arbitrary for CommitParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            signature(),
            prop::collection::vec(stanza_choice(), 0..3),
            0usize..8, // added lines, straddling the trivial limit
        )
            .prop_map(|(author, stanzas, added_lines)| CommitParams {
                author,
                stanzas,
                added_lines,
            })
            .boxed()
    }
}

/// Generate a linear history of up to `max_len` commits, oldest first.
pub fn history_params(max_len: usize) -> impl Strategy<Value = Vec<CommitParams>> {
    prop::collection::vec(any::<CommitParams>(), 1..=max_len.max(1))
}

/// Build a history from parameters. Persons named in declarations are drawn
/// from the authors' composite identities, so declarations can cover the
/// generated authors.
pub fn history_from_params(
    params: &[CommitParams],
    accepted: &LicenceHash,
    other: &LicenceHash,
) -> MemoryHistory {
    let people = [
        "Alice <alice@example.com>",
        "Bob <bob@example.com>",
        "Carol <carol@example.com>",
        "Dave <dave@example.com>",
        "Alice",
        "Bob",
        "Mallory",
        "Trent",
    ];

    let mut builder = HistoryBuilder::new();
    for (i, commit) in params.iter().enumerate() {
        let stanzas: Vec<String> = commit
            .stanzas
            .iter()
            .filter_map(|choice| choice.render(&people, accepted, other))
            .collect();
        builder.commit(
            &commit.author,
            &message(&format!("commit {i}"), &stanzas),
            commit.added_lines,
        );
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_person_never_contains_separator(p in person()) {
            prop_assert!(!p.contains(", "));
            prop_assert!(!p.contains(" and "));
        }

        #[test]
        fn test_history_from_params_has_one_commit_each(params in history_params(6)) {
            let accepted = LicenceHash::digest(b"accepted");
            let other = LicenceHash::digest(b"other");
            let history = history_from_params(&params, &accepted, &other);
            prop_assert_eq!(history.commit_count(), params.len());
        }

        #[test]
        fn test_every_rendered_stanza_is_extracted(params in history_params(6)) {
            let accepted = LicenceHash::digest(b"accepted");
            let other = LicenceHash::digest(b"other");
            let people = ["Alice <alice@example.com>", "Bob", "Carol", "Dave"];
            for commit in &params {
                let stanzas: Vec<String> = commit
                    .stanzas
                    .iter()
                    .filter_map(|choice| choice.render(&people, &accepted, &other))
                    .collect();
                let extracted = licaudit_core::extract_stanzas(&message("subject", &stanzas));
                prop_assert_eq!(extracted.len(), stanzas.len());
            }
        }
    }
}
