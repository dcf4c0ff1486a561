//! Reduce a Lighthouse result (LHR) to a [`PerformanceReport`].
//!
//! Audits are visited in the LHR's own key order, so the capped lists are
//! deterministic for a given report.

use crate::error::{ProbeError, Result};
use serde_json::{Map, Value};
use siteaudit_core::{
    CategoryScores, Diagnostic, FailedAudit, Opportunity, PerformanceReport, ProbeConfig,
    SeoChecks, WebVitals,
};

/// Build a report from a parsed LHR.
///
/// A `runtimeError` in the LHR means the page never loaded and is reported
/// as [`ProbeError::Navigation`].
pub fn extract_report(url: &str, lhr: &Value, limits: &ProbeConfig) -> Result<PerformanceReport> {
    if let Some(runtime_error) = lhr.get("runtimeError") {
        let code = runtime_error
            .get("code")
            .and_then(Value::as_str)
            .unwrap_or("UNKNOWN");
        let message = runtime_error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default();
        return Err(ProbeError::Navigation {
            url: url.to_string(),
            reason: format!("{code} {message}").trim().to_string(),
        });
    }

    let categories = lhr
        .get("categories")
        .and_then(Value::as_object)
        .ok_or_else(|| ProbeError::InvalidReport("missing categories".to_string()))?;
    let audits = lhr
        .get("audits")
        .and_then(Value::as_object)
        .ok_or_else(|| ProbeError::InvalidReport("missing audits".to_string()))?;

    Ok(PerformanceReport {
        scores: CategoryScores {
            performance: category_score(categories, "performance"),
            seo: category_score(categories, "seo"),
            accessibility: category_score(categories, "accessibility"),
            best_practices: category_score(categories, "best-practices"),
        },
        metrics: WebVitals {
            lcp: numeric_value(audits, "largest-contentful-paint"),
            cls: numeric_value(audits, "cumulative-layout-shift"),
            fcp: numeric_value(audits, "first-contentful-paint"),
            tti: numeric_value(audits, "interactive"),
            tbt: numeric_value(audits, "total-blocking-time"),
            si: numeric_value(audits, "speed-index"),
        },
        audits: SeoChecks {
            meta_description: passed(audits, "meta-description"),
            http_status_code: passed(audits, "http-status-code"),
            link_text: passed(audits, "link-text"),
            crawlable: passed(audits, "is-crawlable"),
            robots: passed(audits, "robots-txt"),
            hreflang: passed(audits, "hreflang"),
            canonical: passed(audits, "canonical"),
        },
        failed_audits: failed_audits(audits, limits.max_failed_audits),
        opportunities: opportunities(audits, limits.max_opportunities),
        diagnostics: diagnostics(audits, limits.max_diagnostics),
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn category_score(categories: &Map<String, Value>, id: &str) -> u8 {
    let score = categories
        .get(id)
        .and_then(|c| c.get("score"))
        .and_then(Value::as_f64)
        .unwrap_or(0.0);
    (score * 100.0).round().clamp(0.0, 100.0) as u8
}

fn numeric_value(audits: &Map<String, Value>, id: &str) -> f64 {
    audits
        .get(id)
        .and_then(|a| a.get("numericValue"))
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

fn passed(audits: &Map<String, Value>, id: &str) -> bool {
    audit_score(audits.get(id)).is_some_and(|score| (score - 1.0).abs() < f64::EPSILON)
}

fn audit_score(audit: Option<&Value>) -> Option<f64> {
    audit.and_then(|a| a.get("score")).and_then(Value::as_f64)
}

fn details_type(audit: &Value) -> Option<&str> {
    audit
        .get("details")
        .and_then(|d| d.get("type"))
        .and_then(Value::as_str)
}

fn text(audit: &Value, field: &str) -> String {
    audit
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn failed_audits(audits: &Map<String, Value>, limit: usize) -> Vec<FailedAudit> {
    audits
        .iter()
        .filter_map(|(id, audit)| {
            let score = audit_score(Some(audit)).filter(|s| *s < 1.0)?;
            Some(FailedAudit {
                id: id.clone(),
                title: text(audit, "title"),
                description: text(audit, "description"),
                score,
            })
        })
        .take(limit)
        .collect()
}

fn opportunities(audits: &Map<String, Value>, limit: usize) -> Vec<Opportunity> {
    audits
        .iter()
        .filter(|(_, audit)| details_type(audit) == Some("opportunity"))
        .map(|(id, audit)| Opportunity {
            id: id.clone(),
            title: text(audit, "title"),
            description: text(audit, "description"),
            savings: audit
                .get("details")
                .and_then(|d| d.get("overallSavingsMs"))
                .and_then(Value::as_f64)
                .unwrap_or(0.0),
        })
        .take(limit)
        .collect()
}

fn diagnostics(audits: &Map<String, Value>, limit: usize) -> Vec<Diagnostic> {
    audits
        .iter()
        .filter(|(_, audit)| {
            details_type(audit) == Some("table")
                && audit_score(Some(audit)).is_some_and(|s| s < 1.0)
        })
        .map(|(id, audit)| Diagnostic {
            id: id.clone(),
            title: text(audit, "title"),
            description: text(audit, "description"),
        })
        .take(limit)
        .collect()
}
