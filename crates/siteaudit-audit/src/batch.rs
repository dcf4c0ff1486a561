//! Sequential multi-URL runs.

use crate::model::{BatchItemResult, BatchResult, BatchSummary};
use crate::orchestrator::AuditOrchestrator;
use chrono::Utc;
use std::time::{Duration, Instant};

/// Audits a list of URLs one at a time.
///
/// A failing URL is recorded and the run moves on; results always line up
/// with the input order.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    orchestrator: AuditOrchestrator,
}

impl BatchRunner {
    /// Create a runner over an orchestrator.
    #[must_use]
    pub fn new(orchestrator: AuditOrchestrator) -> Self {
        Self { orchestrator }
    }

    /// Audit every URL in order.
    pub async fn run_batch<S: AsRef<str>>(&self, urls: &[S]) -> BatchResult {
        let started = Instant::now();
        let total = urls.len();
        let mut results = Vec::with_capacity(total);

        for (index, url) in urls.iter().enumerate() {
            let url = url.as_ref();
            tracing::info!("[{}/{}] {}", index + 1, total, url);

            let outcome = match self.orchestrator.audit_one(url).await {
                Ok(report) => BatchItemResult::Succeeded(report),
                Err(e) => {
                    tracing::warn!("Audit failed for {}: {}", url, e);
                    BatchItemResult::Failed {
                        url: url.to_string(),
                        error: e.to_string(),
                        timestamp: Utc::now(),
                    }
                }
            };
            results.push(outcome);
        }

        let summary = BatchSummary::from_results(&results, round_seconds(started.elapsed()));
        tracing::info!(
            "Batch complete: {}/{} succeeded in {}s",
            summary.successful,
            summary.total,
            summary.duration_seconds
        );

        BatchResult { summary, results }
    }
}

/// Round to the nearest whole second.
#[allow(clippy::cast_possible_truncation)]
fn round_seconds(elapsed: Duration) -> u64 {
    let millis = elapsed.as_millis() as u64;
    (millis + 500) / 1000
}
