use crate::model::{AuditReport, RecommendationSet};
use chrono::Utc;
use siteaudit_core::{PerformanceReport, StructuralReport};

/// Assemble the final report for one URL, stamped with the current time.
#[must_use]
pub fn aggregate(
    url: &str,
    performance: PerformanceReport,
    structural: StructuralReport,
    recommendations: RecommendationSet,
) -> AuditReport {
    AuditReport {
        url: url.to_string(),
        timestamp: Utc::now(),
        performance,
        structural,
        recommendations,
    }
}
