use super::OutputOptions;
use crate::persist::{report_file_name, save_json};
use crate::render::format_report;
use crate::state::AppState;
use anyhow::Context;
use siteaudit_audit::AuditReport;
use std::io::Write;

/// Audit a single URL. Any fatal audit error is returned to the caller.
pub async fn run(
    state: &AppState,
    url: &str,
    opts: &OutputOptions,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    tracing::info!("Auditing {}", url);
    let report = state.orchestrator.audit_one(url).await?;

    if opts.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    print_report(&report, opts, out)
}

/// Render one report as text and save it when saving is enabled.
pub(crate) fn print_report(
    report: &AuditReport,
    opts: &OutputOptions,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    write!(out, "{}", format_report(report))?;
    if opts.save {
        let name = report_file_name(&report.url, report.timestamp);
        let path = save_json(&opts.directory, &name, report)
            .with_context(|| format!("failed to save report {name}"))?;
        writeln!(out, "Report saved: {}", path.display())?;
    }
    Ok(())
}
