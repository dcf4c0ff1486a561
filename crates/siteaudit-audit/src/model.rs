//! Audit and batch records.
//!
//! These are the machine-readable outputs of the pipeline. Attribute names
//! are camelCase and stable across runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use siteaudit_core::{PerformanceReport, StructuralReport};
use std::fmt;

/// Urgency of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    /// Fix first
    High,
    /// Worth doing
    Medium,
    /// Nice to have
    Low,
}

impl Priority {
    /// Normalize a priority token. `MED` is accepted as `MEDIUM`; case is ignored.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "HIGH" => Some(Self::High),
            "MEDIUM" | "MED" => Some(Self::Medium),
            "LOW" => Some(Self::Low),
            _ => None,
        }
    }

    /// Uppercase label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One prioritized fix. `fix` is never empty; it repeats `issue` when the
/// generator gave no explicit fix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Urgency
    pub priority: Priority,
    /// What is wrong
    pub issue: String,
    /// What to do about it
    pub fix: String,
}

/// Recommendations attached to an audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationSet {
    /// False when generation was unavailable or failed
    pub enabled: bool,
    /// Provider id, when enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Model name, when enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Parsed recommendations in generator order
    pub recommendations: Vec<Recommendation>,
    /// Unparsed generator output, when enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
    /// Why generation failed, when it was attempted and failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RecommendationSet {
    /// The set used when no recommendations could be generated.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            provider: None,
            model: None,
            recommendations: Vec::new(),
            raw_text: None,
            error: None,
        }
    }

    /// A disabled set that records why generation failed.
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::disabled()
        }
    }
}

/// The unified result of auditing one URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    /// Audited URL as given
    pub url: String,
    /// When the report was assembled
    pub timestamp: DateTime<Utc>,
    /// Lighthouse findings
    pub performance: PerformanceReport,
    /// Markup findings
    pub structural: StructuralReport,
    /// Generated recommendations
    pub recommendations: RecommendationSet,
}

/// Outcome of one URL in a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchItemResult {
    /// The audit completed
    Succeeded(AuditReport),
    /// The audit failed with a fatal error
    Failed {
        /// URL that failed
        url: String,
        /// Error message
        error: String,
        /// When the failure was recorded
        timestamp: DateTime<Utc>,
    },
}

impl BatchItemResult {
    /// Whether the audit completed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    /// The URL this outcome belongs to.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Succeeded(report) => &report.url,
            Self::Failed { url, .. } => url,
        }
    }

    /// The report, if the audit completed.
    #[must_use]
    pub fn report(&self) -> Option<&AuditReport> {
        match self {
            Self::Succeeded(report) => Some(report),
            Self::Failed { .. } => None,
        }
    }
}

#[derive(Serialize)]
struct SucceededItem<'a> {
    #[serde(flatten)]
    report: &'a AuditReport,
    success: bool,
}

#[derive(Serialize)]
struct FailedItem<'a> {
    url: &'a str,
    success: bool,
    error: &'a str,
    timestamp: &'a DateTime<Utc>,
}

// Success serializes as the report's own fields plus `success: true`.
impl Serialize for BatchItemResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Succeeded(report) => SucceededItem {
                report,
                success: true,
            }
            .serialize(serializer),
            Self::Failed {
                url,
                error,
                timestamp,
            } => FailedItem {
                url,
                success: false,
                error,
                timestamp,
            }
            .serialize(serializer),
        }
    }
}

/// Batch-level counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// Number of input URLs
    pub total: usize,
    /// Audits that completed
    pub successful: usize,
    /// Audits that failed
    pub failed: usize,
    /// Wall-clock time for the whole batch, rounded to whole seconds
    pub duration_seconds: u64,
}

impl BatchSummary {
    /// Count outcomes.
    #[must_use]
    pub fn from_results(results: &[BatchItemResult], duration_seconds: u64) -> Self {
        let successful = results.iter().filter(|r| r.is_success()).count();
        Self {
            total: results.len(),
            successful,
            failed: results.len() - successful,
            duration_seconds,
        }
    }
}

/// Everything a batch run produced, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    /// Counts and duration
    pub summary: BatchSummary,
    /// One entry per input URL
    pub results: Vec<BatchItemResult>,
}
