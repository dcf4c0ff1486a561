//! Plain-text rendering of audit and batch results.

use siteaudit_audit::{AuditReport, BatchItemResult, BatchResult, Priority};
use std::fmt::Write;

const RULE_WIDTH: usize = 70;

/// Status label for a 0-100 category score.
#[must_use]
pub fn score_status(score: u8) -> &'static str {
    if score >= 90 {
        "Good"
    } else if score >= 50 {
        "Fair"
    } else {
        "Needs Work"
    }
}

/// Rating for a metric where lower is better.
#[must_use]
pub fn vital_rating(value: f64, good: f64, fair: f64) -> &'static str {
    if value <= good {
        "good"
    } else if value <= fair {
        "needs improvement"
    } else {
        "poor"
    }
}

fn length_marker(length: usize, ideal: std::ops::RangeInclusive<usize>) -> &'static str {
    if ideal.contains(&length) {
        "OK"
    } else {
        "WARN"
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}

/// Full text report for one audit.
#[must_use]
pub fn format_report(report: &AuditReport) -> String {
    let mut out = String::new();
    write_report(&mut out, report).expect("writing to a String cannot fail");
    out
}

fn write_report(out: &mut String, report: &AuditReport) -> std::fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);
    let perf = &report.performance;
    let html = &report.structural;

    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "{:^RULE_WIDTH$}", "SEO AUDIT REPORT")?;
    writeln!(out, "{:^RULE_WIDTH$}", report.url)?;
    writeln!(out, "{rule}")?;
    writeln!(out)?;

    writeln!(out, "LIGHTHOUSE SCORES")?;
    writeln!(out)?;
    writeln!(out, "  {:<16} {:>7}  Status", "Category", "Score")?;
    for (name, score) in [
        ("Performance", perf.scores.performance),
        ("SEO", perf.scores.seo),
        ("Accessibility", perf.scores.accessibility),
        ("Best Practices", perf.scores.best_practices),
    ] {
        writeln!(
            out,
            "  {:<16} {:>7}  {}",
            name,
            format!("{score}/100"),
            score_status(score)
        )?;
    }
    writeln!(out)?;

    let m = &perf.metrics;
    writeln!(out, "CORE WEB VITALS")?;
    writeln!(out)?;
    writeln!(
        out,
        "  LCP: {:.0}ms ({}, good < 2.5s)",
        m.lcp.round(),
        vital_rating(m.lcp, 2500.0, 4000.0)
    )?;
    writeln!(
        out,
        "  CLS: {:.3} ({}, good < 0.1)",
        m.cls,
        vital_rating(m.cls, 0.1, 0.25)
    )?;
    writeln!(
        out,
        "  FCP: {:.0}ms ({}, good < 1.8s)",
        m.fcp.round(),
        vital_rating(m.fcp, 1800.0, 3000.0)
    )?;
    writeln!(
        out,
        "  TTI: {:.0}ms ({}, good < 3.8s)",
        m.tti.round(),
        vital_rating(m.tti, 3800.0, 7300.0)
    )?;
    writeln!(out)?;

    let meta = &html.meta;
    writeln!(out, "META TAGS")?;
    writeln!(out)?;
    match &meta.title {
        Some(title) => writeln!(
            out,
            "  Title        [{}]  {} ({} chars)",
            length_marker(meta.title_length, 50..=60),
            truncate(title, 37),
            meta.title_length
        )?,
        None => writeln!(out, "  Title        [MISSING]")?,
    }
    match &meta.description {
        Some(_) => writeln!(
            out,
            "  Description  [{}]  {} chars",
            length_marker(meta.description_length, 150..=160),
            meta.description_length
        )?,
        None => writeln!(out, "  Description  [MISSING]")?,
    }
    match &meta.canonical {
        Some(canonical) => writeln!(out, "  Canonical    [OK]  {canonical}")?,
        None => writeln!(out, "  Canonical    [MISSING]")?,
    }
    writeln!(out)?;

    writeln!(out, "HEADING STRUCTURE")?;
    writeln!(out)?;
    let h1_count = html.headings.h1.len();
    writeln!(
        out,
        "  H1: {} {} - {}",
        if h1_count == 1 { "OK" } else { "WARN" },
        h1_count,
        truncate(&html.headings.h1.join(", "), 50)
    )?;
    writeln!(out, "  H2: {} headings", html.headings.h2.len())?;
    writeln!(out)?;

    writeln!(out, "IMAGES")?;
    writeln!(out)?;
    writeln!(out, "  Total: {}", html.images.total)?;
    writeln!(out, "  Missing alt: {}", html.images.missing_alt)?;
    writeln!(out)?;

    writeln!(out, "SCHEMA MARKUP")?;
    writeln!(out)?;
    if html.schema.is_empty() {
        writeln!(out, "  No schema found")?;
    } else {
        for block in &html.schema {
            let kind = block
                .get("@type")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("Unknown");
            writeln!(out, "  - {kind}")?;
        }
    }
    writeln!(out)?;

    let recs = &report.recommendations;
    if recs.enabled && !recs.recommendations.is_empty() {
        writeln!(out, "RECOMMENDATIONS")?;
        writeln!(out)?;
        for (i, rec) in recs.recommendations.iter().enumerate() {
            let label = match rec.priority {
                Priority::High => "HIGH",
                Priority::Medium => "MED",
                Priority::Low => "LOW",
            };
            writeln!(out, "  {}. [{}] {}", i + 1, label, rec.issue)?;
            writeln!(out, "     → {}", rec.fix)?;
            writeln!(out)?;
        }
    }

    writeln!(out, "{rule}")?;
    Ok(())
}

/// Summary block for a batch run.
#[must_use]
pub fn format_batch_summary(result: &BatchResult) -> String {
    let mut out = String::new();
    write_batch_summary(&mut out, result).expect("writing to a String cannot fail");
    out
}

fn write_batch_summary(out: &mut String, result: &BatchResult) -> std::fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);
    let s = &result.summary;

    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "BATCH AUDIT SUMMARY")?;
    writeln!(out, "{rule}")?;
    writeln!(out)?;
    for item in &result.results {
        match item {
            BatchItemResult::Succeeded(report) => {
                let scores = &report.performance.scores;
                writeln!(
                    out,
                    "  OK    {}  (performance {}, seo {})",
                    report.url, scores.performance, scores.seo
                )?;
            }
            BatchItemResult::Failed { url, error, .. } => {
                writeln!(out, "  FAIL  {url}  {error}")?;
            }
        }
    }
    writeln!(out)?;
    writeln!(out, "Successful: {}/{}", s.successful, s.total)?;
    writeln!(out, "Failed:     {}/{}", s.failed, s.total)?;
    writeln!(out, "Duration:   {}s", s.duration_seconds)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use siteaudit_audit::{BatchSummary, Recommendation, RecommendationSet};
    use siteaudit_core::{CategoryScores, PageMeta, PerformanceReport, StructuralReport, WebVitals};

    fn report() -> AuditReport {
        AuditReport {
            url: "https://ok.example".to_string(),
            timestamp: Utc::now(),
            performance: PerformanceReport {
                scores: CategoryScores {
                    performance: 49,
                    seo: 90,
                    accessibility: 50,
                    best_practices: 100,
                },
                metrics: WebVitals {
                    lcp: 2600.4,
                    cls: 0.05,
                    fcp: 900.0,
                    tti: 8000.0,
                    tbt: 0.0,
                    si: 0.0,
                },
                ..Default::default()
            },
            structural: StructuralReport {
                meta: PageMeta {
                    title: Some("A title that is definitely longer than thirty-seven characters".to_string()),
                    title_length: 62,
                    ..Default::default()
                },
                ..Default::default()
            },
            recommendations: RecommendationSet {
                enabled: true,
                provider: Some("openai".to_string()),
                model: Some("gpt-5-mini".to_string()),
                recommendations: vec![Recommendation {
                    priority: Priority::Medium,
                    issue: "Title too long".to_string(),
                    fix: "Shorten the title to 60 characters".to_string(),
                }],
                raw_text: None,
                error: None,
            },
        }
    }

    #[test]
    fn test_score_status_thresholds() {
        assert_eq!(score_status(100), "Good");
        assert_eq!(score_status(90), "Good");
        assert_eq!(score_status(89), "Fair");
        assert_eq!(score_status(50), "Fair");
        assert_eq!(score_status(49), "Needs Work");
        assert_eq!(score_status(0), "Needs Work");
    }

    #[test]
    fn test_vital_rating() {
        assert_eq!(vital_rating(2500.0, 2500.0, 4000.0), "good");
        assert_eq!(vital_rating(2600.0, 2500.0, 4000.0), "needs improvement");
        assert_eq!(vital_rating(0.3, 0.1, 0.25), "poor");
    }

    #[test]
    fn test_format_report_sections() {
        let text = format_report(&report());

        assert!(text.contains("SEO AUDIT REPORT"));
        assert!(text.contains("49/100  Needs Work"));
        assert!(text.contains("LCP: 2600ms (needs improvement, good < 2.5s)"));
        assert!(text.contains("TTI: 8000ms (poor, good < 3.8s)"));
        assert!(text.contains("Title        [WARN]  A title that is definitely longer tha... (62 chars)"));
        assert!(text.contains("Description  [MISSING]"));
        assert!(text.contains("No schema found"));
        assert!(text.contains("1. [MED] Title too long"));
        assert!(text.contains("→ Shorten the title to 60 characters"));
    }

    #[test]
    fn test_disabled_recommendations_are_not_rendered() {
        let mut report = report();
        report.recommendations = RecommendationSet::disabled();

        assert!(!format_report(&report).contains("RECOMMENDATIONS"));
    }

    #[test]
    fn test_batch_summary() {
        let result = BatchResult {
            summary: BatchSummary {
                total: 2,
                successful: 1,
                failed: 1,
                duration_seconds: 37,
            },
            results: vec![
                BatchItemResult::Succeeded(report()),
                BatchItemResult::Failed {
                    url: "https://broken.example".to_string(),
                    error: "performance probe failed: timeout".to_string(),
                    timestamp: Utc::now(),
                },
            ],
        };

        let text = format_batch_summary(&result);
        assert!(text.contains("OK    https://ok.example  (performance 49, seo 90)"));
        assert!(text.contains("FAIL  https://broken.example  performance probe failed: timeout"));
        assert!(text.contains("Successful: 1/2"));
        assert!(text.contains("Duration:   37s"));
    }
}
