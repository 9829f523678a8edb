//! The commit auditor.
//!
//! Decides, for one commit at a time, whether its licence is provable. The
//! auditor owns the [`AuthorizationState`], so commits must be fed to it in
//! walk order, newest first.

use licaudit_authz::{AuthorizationState, CommitAuthorization};
use licaudit_core::{classify, extract_stanzas, Classification, ParsedDeclaration};
use licaudit_history::{Commit, History, HistoryExt};
use tracing::{debug, warn};

use crate::config::DEFAULT_TRIVIAL_LINE_LIMIT;
use crate::error::Result;
use crate::report::Verdict;

/// The auditor's decision for one commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitAudit {
    /// Final verdict.
    pub verdict: Verdict,

    /// What the commit's own declarations established.
    pub authorization: CommitAuthorization,

    /// Declarations recognized in the message.
    pub declarations: Vec<ParsedDeclaration>,
}

/// Parse the licence declarations out of a commit message.
///
/// Unrecognized stanzas are dropped silently. Stanzas that match a grammar
/// but carry an unusable hash are dropped with a warning.
pub fn parse_declarations(commit: &Commit) -> Vec<ParsedDeclaration> {
    extract_stanzas(&commit.message)
        .into_iter()
        .filter_map(|stanza| match classify(&stanza) {
            Classification::Declaration(declaration) => Some(declaration),
            Classification::Malformed { grammar, error } => {
                warn!(
                    commit = %commit.id,
                    ?grammar,
                    %error,
                    "skipping malformed licence declaration"
                );
                None
            }
            Classification::Unrecognized => None,
        })
        .collect()
}

/// Audits commits against an accumulating authorization state.
pub struct Auditor<H: History> {
    /// Repository access.
    history: H,
    /// Accepted licences and covered persons.
    state: AuthorizationState,
    /// Commits adding at most this many lines are exempt.
    trivial_line_limit: usize,
}

impl<H: History> Auditor<H> {
    /// Create an auditor over `history` starting from `state`.
    pub fn new(history: H, state: AuthorizationState) -> Self {
        Self {
            history,
            state,
            trivial_line_limit: DEFAULT_TRIVIAL_LINE_LIMIT,
        }
    }

    /// Set the triviality threshold.
    pub fn with_trivial_line_limit(mut self, limit: usize) -> Self {
        self.trivial_line_limit = limit;
        self
    }

    /// The history being audited.
    pub fn history(&self) -> &H {
        &self.history
    }

    /// The authorization state as of the last audited commit.
    pub fn state(&self) -> &AuthorizationState {
        &self.state
    }

    /// Consume the auditor, keeping its authorization state.
    pub fn into_state(self) -> AuthorizationState {
        self.state
    }

    /// Audit one commit.
    ///
    /// Errors only if the history cannot produce the diff needed for the
    /// triviality check.
    pub fn audit_commit(&mut self, commit: &Commit) -> Result<CommitAudit> {
        judge(
            &self.history,
            &mut self.state,
            self.trivial_line_limit,
            commit,
        )
    }

    /// Split borrow for the walker, which iterates the history while
    /// updating the state.
    pub(crate) fn parts(&mut self) -> (&H, &mut AuthorizationState, usize) {
        (&self.history, &mut self.state, self.trivial_line_limit)
    }
}

pub(crate) fn judge<H: History>(
    history: &H,
    state: &mut AuthorizationState,
    trivial_line_limit: usize,
    commit: &Commit,
) -> Result<CommitAudit> {
    // 1. Declarations in the message
    let declarations = parse_declarations(commit);

    // 2. Apply them; the state now includes this commit's coverage
    let authorization = state.apply_commit(&commit.author, &declarations);

    // 3. Verdict, diffing only when the declarations were not enough
    let verdict = if authorization.current_grant {
        Verdict::CurrentGrant
    } else if authorization.author_covered {
        Verdict::CoveredAuthor
    } else {
        match history.added_lines(commit)? {
            Some(added_lines) if added_lines <= trivial_line_limit => {
                Verdict::Trivial { added_lines }
            }
            _ => Verdict::Unauthorized,
        }
    };

    debug!(
        commit = %commit.id.short(),
        author = %commit.author,
        declarations = declarations.len(),
        ?verdict,
        "audited commit"
    );

    Ok(CommitAudit {
        verdict,
        authorization,
        declarations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use licaudit_authz::AcceptedLicences;
    use licaudit_core::{LicenceHash, Signature};
    use licaudit_history::{CommitId, MemoryHistory};

    fn mit() -> LicenceHash {
        LicenceHash::digest(b"MIT licence text")
    }

    fn bob() -> Signature {
        Signature::new("Bob", "bob@example.com")
    }

    fn auditor(history: &MemoryHistory) -> Auditor<&MemoryHistory> {
        Auditor::new(
            history,
            AuthorizationState::new(AcceptedLicences::from_iter([mit()])),
        )
    }

    /// A root commit plus a child adding `added` lines with `message`.
    fn two_commits(added: usize, message: &str) -> (MemoryHistory, CommitId) {
        let mut history = MemoryHistory::new();
        let t0 = history.insert_tree([("f", "base\n")]);
        let root = history.insert_commit(t0, vec![], bob(), "root");
        let body: String = (0..added).map(|i| format!("line {i}\n")).collect();
        let t1 = history.insert_tree([("f", format!("base\n{body}"))]);
        let child = history.insert_commit(t1, vec![root], bob(), message);
        (history, child)
    }

    #[test]
    fn test_current_grant_authorizes() {
        let message = format!(
            "Add feature\n\n\u{a9}: I hereby licence these changes under the licence with SHA256 hash {}.\n",
            mit()
        );
        let (history, id) = two_commits(10, &message);
        let commit = history.commit(&id).unwrap();

        let audit = auditor(&history).audit_commit(&commit).unwrap();
        assert_eq!(audit.verdict, Verdict::CurrentGrant);
        assert_eq!(audit.declarations.len(), 1);
    }

    #[test]
    fn test_unaccepted_current_grant_does_not_authorize() {
        let other = LicenceHash::digest(b"other");
        let message = format!(
            "\u{a9}: I hereby licence these changes under the licence with SHA256 hash {other}.\n"
        );
        let (history, id) = two_commits(10, &message);
        let commit = history.commit(&id).unwrap();

        let audit = auditor(&history).audit_commit(&commit).unwrap();
        assert_eq!(audit.verdict, Verdict::Unauthorized);
    }

    #[test]
    fn test_trivial_threshold_is_inclusive() {
        let (history, id) = two_commits(3, "tiny");
        let commit = history.commit(&id).unwrap();
        assert_eq!(
            auditor(&history).audit_commit(&commit).unwrap().verdict,
            Verdict::Trivial { added_lines: 3 }
        );

        let (history, id) = two_commits(4, "small");
        let commit = history.commit(&id).unwrap();
        assert_eq!(
            auditor(&history).audit_commit(&commit).unwrap().verdict,
            Verdict::Unauthorized
        );
    }

    #[test]
    fn test_custom_trivial_limit() {
        let (history, id) = two_commits(4, "small");
        let commit = history.commit(&id).unwrap();
        let mut auditor = auditor(&history).with_trivial_line_limit(10);
        assert_eq!(
            auditor.audit_commit(&commit).unwrap().verdict,
            Verdict::Trivial { added_lines: 4 }
        );
    }

    #[test]
    fn test_root_commit_is_never_trivial() {
        let mut history = MemoryHistory::new();
        let tree = history.insert_tree([("f", "one\n")]);
        let root = history.insert_commit(tree, vec![], bob(), "root");
        let commit = history.commit(&root).unwrap();

        assert_eq!(
            auditor(&history).audit_commit(&commit).unwrap().verdict,
            Verdict::Unauthorized
        );
    }

    #[test]
    fn test_malformed_hash_is_skipped() {
        let message = format!(
            "\u{a9}: I hereby licence these changes under the licence with SHA256 hash {}.\n",
            &mit().to_hex()[..40]
        );
        let (history, id) = two_commits(10, &message);
        let commit = history.commit(&id).unwrap();

        let audit = auditor(&history).audit_commit(&commit).unwrap();
        assert!(audit.declarations.is_empty());
        assert_eq!(audit.verdict, Verdict::Unauthorized);
    }

    #[test]
    fn test_deprecated_grant_covers_own_author() {
        let message = format!(
            "\u{a9}: To the extent that I have a copyright interest in the files in this repository, and the sequence of changes leading to those files, and all intermediate states resulting from a partial application of those changes, including changes occluded by subsequent changes, I hereby licence those files and changes present and past under the copyright licence with SHA256 hash {}.\n",
            mit()
        );
        let (history, id) = two_commits(10, &message);
        let commit = history.commit(&id).unwrap();

        let mut auditor = auditor(&history);
        let audit = auditor.audit_commit(&commit).unwrap();
        assert_eq!(audit.verdict, Verdict::CoveredAuthor);
        assert!(auditor.state().covered().contains("Bob <bob@example.com>"));
    }
}
