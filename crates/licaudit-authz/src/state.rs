//! Authorization state computation.
//!
//! Authorization state is computed by replaying each commit's declarations,
//! newest commit first. Coverage established while visiting one commit
//! carries over to every older commit visited afterwards.

use std::collections::{BTreeSet, HashSet};

use licaudit_core::{LicenceHash, ParsedDeclaration, Signature};
use tracing::{debug, warn};

use crate::accepted::AcceptedLicences;
use crate::covered::CoveredPersons;

/// What one commit's declarations established.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitAuthorization {
    /// A current grant named an accepted licence.
    pub current_grant: bool,

    /// The commit author was covered once this commit was applied.
    pub author_covered: bool,

    /// Persons covered by retroactive grants in this commit, in stanza order.
    pub granted: Vec<String>,

    /// Declaring persons promoted by completeness declarations in this commit.
    pub promoted: Vec<String>,

    /// Declaring persons whose completeness declaration was not promoted.
    pub unpromoted: Vec<String>,

    /// Declaring persons with more than one completeness declaration.
    pub duplicates: Vec<String>,
}

impl CommitAuthorization {
    /// Whether the declarations alone authorize the commit.
    pub fn is_authorized(&self) -> bool {
        self.current_grant || self.author_covered
    }
}

/// A completeness declaration waiting for the end of its commit.
#[derive(Debug)]
struct PendingCompleteness<'a> {
    person: &'a str,
    required: &'a [String],
}

/// Aggregated authorization state for one walk.
///
/// Both sets are injected, so a caller can resume from a known coverage or
/// inspect it after the walk.
#[derive(Debug, Clone, Default)]
pub struct AuthorizationState {
    /// Licences declarations must name. Fixed for the walk.
    accepted: AcceptedLicences,

    /// Persons covered so far. Only grows.
    covered: CoveredPersons,
}

impl AuthorizationState {
    /// Create a state with nothing covered yet.
    pub fn new(accepted: AcceptedLicences) -> Self {
        Self::with_covered(accepted, CoveredPersons::new())
    }

    /// Create a state seeded with already-covered persons.
    pub fn with_covered(accepted: AcceptedLicences, covered: CoveredPersons) -> Self {
        Self { accepted, covered }
    }

    /// The accepted licences.
    pub fn accepted(&self) -> &AcceptedLicences {
        &self.accepted
    }

    /// The persons covered so far.
    pub fn covered(&self) -> &CoveredPersons {
        &self.covered
    }

    /// Consume the state, keeping the accumulated coverage.
    pub fn into_covered(self) -> CoveredPersons {
        self.covered
    }

    fn is_accepted(&self, hash: &LicenceHash) -> bool {
        self.accepted.contains(hash)
    }

    /// Apply the declarations of one commit authored by `author`.
    ///
    /// Grants are applied first. Completeness declarations are then resolved
    /// against the persons granted in this same commit only; they never
    /// satisfy one another. Finally the author is checked against the
    /// coverage as it stands after this commit, so a commit may cover its own
    /// author.
    pub fn apply_commit(
        &mut self,
        author: &Signature,
        declarations: &[ParsedDeclaration],
    ) -> CommitAuthorization {
        let mut outcome = CommitAuthorization::default();
        let mut granted_here: BTreeSet<String> = BTreeSet::new();
        let mut pending: Vec<PendingCompleteness<'_>> = Vec::new();
        let mut declarers: HashSet<&str> = HashSet::new();

        // 1. Grants, and collect completeness declarations
        for declaration in declarations {
            match declaration {
                ParsedDeclaration::CurrentGrant { hash, .. } => {
                    if self.is_accepted(hash) {
                        outcome.current_grant = true;
                    } else {
                        debug!(%hash, "current grant names a licence that is not accepted");
                    }
                }
                ParsedDeclaration::RetroactiveGrant { person, hash } => {
                    if !self.is_accepted(hash) {
                        debug!(%hash, "retroactive grant names a licence that is not accepted");
                        continue;
                    }
                    let person = person.clone().unwrap_or_else(|| author.composite());
                    granted_here.insert(person.clone());
                    self.covered.insert(person.clone());
                    outcome.granted.push(person);
                }
                ParsedDeclaration::RetroactiveCompleteness { person, persons } => {
                    if !declarers.insert(person.as_str()) {
                        warn!(
                            person = %person,
                            "repeated retroactive licensing completeness declaration, keeping the first"
                        );
                        outcome.duplicates.push(person.clone());
                        continue;
                    }
                    pending.push(PendingCompleteness {
                        person,
                        required: persons,
                    });
                }
            }
        }

        // 2. Resolve completeness against this commit's grants
        for declaration in pending {
            let missing: Vec<&str> = declaration
                .required
                .iter()
                .filter(|p| !granted_here.contains(p.as_str()))
                .map(String::as_str)
                .collect();

            if missing.is_empty() {
                self.covered.insert(declaration.person);
                outcome.promoted.push(declaration.person.to_string());
            } else {
                debug!(
                    person = declaration.person,
                    ?missing,
                    "completeness declaration not promoted"
                );
                outcome.unpromoted.push(declaration.person.to_string());
            }
        }

        // 3. Author check against coverage including this commit
        outcome.author_covered = self.covered.covers(author);

        outcome
    }
}
