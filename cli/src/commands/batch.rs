use super::audit::print_report;
use super::OutputOptions;
use crate::persist::{batch_file_name, save_json};
use crate::render::format_batch_summary;
use crate::state::AppState;
use anyhow::Context;
use chrono::Utc;
use siteaudit_audit::{BatchItemResult, BatchRunner};
use std::io::Write;

/// Audit several URLs in order. Per-URL failures are part of the result,
/// not errors.
pub async fn run(
    state: &AppState,
    urls: &[String],
    opts: &OutputOptions,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    tracing::info!("Batch auditing {} URLs", urls.len());
    let result = BatchRunner::new(state.orchestrator.clone())
        .run_batch(urls)
        .await;

    if opts.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
        return Ok(());
    }

    for item in &result.results {
        if let BatchItemResult::Succeeded(report) = item {
            print_report(report, opts, out)?;
        }
    }

    write!(out, "{}", format_batch_summary(&result))?;
    if opts.save {
        let name = batch_file_name(Utc::now());
        let path = save_json(&opts.directory, &name, &result)
            .with_context(|| format!("failed to save batch report {name}"))?;
        writeln!(out, "Batch report saved: {}", path.display())?;
    }
    Ok(())
}
