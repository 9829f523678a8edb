//! The set of accepted licence hashes.

use std::collections::BTreeSet;

use licaudit_core::LicenceHash;

/// Licence hashes a declaration may name to be honoured.
///
/// Built once at startup and never modified during a walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcceptedLicences {
    hashes: BTreeSet<LicenceHash>,
}

impl AcceptedLicences {
    /// Create an empty set. Nothing is accepted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hash. Returns `false` if it was already present.
    pub fn insert(&mut self, hash: LicenceHash) -> bool {
        self.hashes.insert(hash)
    }

    /// Whether declarations naming `hash` are honoured.
    pub fn contains(&self, hash: &LicenceHash) -> bool {
        self.hashes.contains(hash)
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    /// Iterate in hash order.
    pub fn iter(&self) -> impl Iterator<Item = &LicenceHash> {
        self.hashes.iter()
    }
}

impl FromIterator<LicenceHash> for AcceptedLicences {
    fn from_iter<I: IntoIterator<Item = LicenceHash>>(iter: I) -> Self {
        Self {
            hashes: iter.into_iter().collect(),
        }
    }
}

impl Extend<LicenceHash> for AcceptedLicences {
    fn extend<I: IntoIterator<Item = LicenceHash>>(&mut self, iter: I) {
        self.hashes.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership() {
        let mit = LicenceHash::digest(b"mit");
        let gpl = LicenceHash::digest(b"gpl");
        let accepted = AcceptedLicences::from_iter([mit]);

        assert!(accepted.contains(&mit));
        assert!(!accepted.contains(&gpl));
        assert_eq!(accepted.len(), 1);
    }

    #[test]
    fn test_duplicate_insert() {
        let mut accepted = AcceptedLicences::new();
        assert!(accepted.is_empty());
        assert!(accepted.insert(LicenceHash::digest(b"mit")));
        assert!(!accepted.insert(LicenceHash::digest(b"mit")));
        assert_eq!(accepted.len(), 1);
    }
}
