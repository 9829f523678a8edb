//! Report output.

use licaudit::AuditReport;
use serde::Serialize;

/// Envelope for `--json` output.
#[derive(Debug, Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// Print the report. Findings go to stderr, everything else to stdout.
pub fn print_report(json: bool, report: &AuditReport) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut {
                ok: report.is_clean(),
                data: report,
            })?
        );
        return Ok(());
    }

    if report.is_clean() {
        println!(
            "All {} commits have provable licences.",
            report.commits_checked
        );
    } else {
        eprintln!("There were {} errors:", report.findings.len());
        for finding in &report.findings {
            eprintln!("{finding}");
        }
    }
    Ok(())
}
