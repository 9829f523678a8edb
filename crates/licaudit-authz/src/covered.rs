//! The covered-persons set.
//!
//! A person is covered once their copyright interest is established as
//! licensed under an accepted licence. Coverage accumulates across the whole
//! walk and is never withdrawn, so this type offers no removal.

use std::collections::BTreeSet;

use licaudit_core::Signature;
use serde::Serialize;

/// Monotonically growing set of covered identity strings.
///
/// Identities are compared exactly; a commit signature matches either by
/// bare name or by its `Name <email>` composite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoveredPersons {
    persons: BTreeSet<String>,
}

impl CoveredPersons {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cover a person. Returns `true` if they were not covered before.
    pub fn insert(&mut self, person: impl Into<String>) -> bool {
        self.persons.insert(person.into())
    }

    /// Whether this exact identity string is covered.
    pub fn contains(&self, person: &str) -> bool {
        self.persons.contains(person)
    }

    /// Whether the commit signature is covered by name or by composite.
    pub fn covers(&self, signature: &Signature) -> bool {
        self.contains(&signature.name) || self.contains(&signature.composite())
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    /// Iterate in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.persons.iter().map(String::as_str)
    }

    /// Whether every person covered here is also covered in `other`.
    pub fn is_subset(&self, other: &CoveredPersons) -> bool {
        self.persons.is_subset(&other.persons)
    }
}

impl<S: Into<String>> FromIterator<S> for CoveredPersons {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            persons: iter.into_iter().map(Into::into).collect(),
        }
    }
}
