//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use licaudit::{AuditConfig, DEFAULT_REVISION, DEFAULT_TRIVIAL_LINE_LIMIT};

/// Check that every commit in a git history is provably licensed.
#[derive(Debug, Parser)]
#[command(name = "licaudit")]
#[command(version)]
pub struct Cli {
    /// Repository to audit
    #[arg(default_value = ".")]
    pub repository: PathBuf,

    /// Revision to start from
    #[arg(short = 'B', long = "branch", default_value = DEFAULT_REVISION)]
    pub branch: String,

    /// Accepted licence: a short name (looked up as COPYING.<NAME>) or a
    /// SHA-256 hash. May be repeated
    #[arg(short = 'L', long = "licence", value_name = "LICENCE")]
    pub licences: Vec<String>,

    /// Directory containing licence texts
    #[arg(long, env = "LICAUDIT_LICENCE_PATH", value_name = "DIR")]
    pub licence_path: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The audit configuration these arguments describe.
    pub fn config(&self) -> AuditConfig {
        AuditConfig {
            repository: self.repository.clone(),
            revision: self.branch.clone(),
            licence_path: self.licence_path.clone(),
            licences: self.licences.clone(),
            trivial_line_limit: DEFAULT_TRIVIAL_LINE_LIMIT,
        }
    }
}
