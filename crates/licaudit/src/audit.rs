//! One-call audit of a repository on disk.

use licaudit_authz::AuthorizationState;
use licaudit_history::GitHistory;
use tracing::debug;

use crate::auditor::Auditor;
use crate::config::AuditConfig;
use crate::error::Result;
use crate::licences::LicenceRegistry;
use crate::report::AuditReport;

/// Audit the repository described by `config`.
///
/// Fails before the walk if the licence directory, repository, or any named
/// licence is unavailable. Unprovable commits are findings in the report,
/// not errors.
pub fn audit_repository(config: &AuditConfig) -> Result<AuditReport> {
    // 1. Licence directory, searched for if not configured
    let registry = LicenceRegistry::open(config.licence_path.as_deref())?;

    // 2. Repository
    let history = GitHistory::open(&config.repository)?;

    // 3. Accepted licences
    let accepted = registry.accepted(&config.licences)?;
    debug!(
        accepted = accepted.len(),
        revision = %config.revision,
        "starting audit"
    );

    // 4. Walk
    let mut auditor = Auditor::new(history, AuthorizationState::new(accepted))
        .with_trivial_line_limit(config.trivial_line_limit);
    auditor.audit_revision(&config.revision)
}
