//! Prompt sent to the recommendation generator.

use siteaudit_core::{PerformanceReport, StructuralReport};
use std::fmt::Write;

/// Headings shown by example in the prompt.
const H1_SAMPLE: usize = 2;

/// Build the generator prompt from both reports.
///
/// The output-format section must stay in sync with the grammar accepted by
/// [`parse_recommendations`](crate::recommendations::parse_recommendations).
#[must_use]
pub fn build_prompt(
    url: &str,
    performance: &PerformanceReport,
    structural: &StructuralReport,
) -> String {
    let mut out = String::with_capacity(4096);
    // Writing to a String cannot fail
    let _ = write_prompt(&mut out, url, performance, structural);
    out
}

fn write_prompt(
    out: &mut String,
    url: &str,
    perf: &PerformanceReport,
    html: &StructuralReport,
) -> std::fmt::Result {
    let scores = &perf.scores;
    let m = &perf.metrics;

    writeln!(out, "Analyze this website's SEO and provide 5-10 actionable fixes.")?;
    writeln!(out)?;
    writeln!(out, "URL: {url}")?;
    writeln!(out)?;

    writeln!(out, "LIGHTHOUSE SCORES:")?;
    writeln!(out, "- Performance: {}/100", scores.performance)?;
    writeln!(out, "- SEO: {}/100", scores.seo)?;
    writeln!(out, "- Accessibility: {}/100", scores.accessibility)?;
    writeln!(out, "- Best Practices: {}/100", scores.best_practices)?;
    writeln!(out)?;

    writeln!(out, "CORE WEB VITALS:")?;
    writeln!(out, "- LCP: {}ms", ms(m.lcp))?;
    writeln!(out, "- CLS: {:.3}", m.cls)?;
    writeln!(out, "- FCP: {}ms", ms(m.fcp))?;
    writeln!(out, "- TTI: {}ms", ms(m.tti))?;
    writeln!(out, "- TBT: {}ms", ms(m.tbt))?;
    writeln!(out, "- Speed Index: {}ms", ms(m.si))?;
    writeln!(out)?;

    writeln!(
        out,
        "FAILED LIGHTHOUSE AUDITS (Top {}):",
        perf.failed_audits.len()
    )?;
    bullets(
        out,
        perf.failed_audits
            .iter()
            .map(|a| format!("{}: {}", a.title, a.description)),
    )?;
    writeln!(out)?;

    writeln!(out, "PERFORMANCE OPPORTUNITIES:")?;
    bullets(
        out,
        perf.opportunities.iter().map(|o| {
            format!("{} (saves {}ms): {}", o.title, ms(o.savings), o.description)
        }),
    )?;
    writeln!(out)?;

    writeln!(out, "DIAGNOSTICS:")?;
    bullets(
        out,
        perf.diagnostics
            .iter()
            .map(|d| format!("{}: {}", d.title, d.description)),
    )?;
    writeln!(out)?;

    let meta = &html.meta;
    writeln!(out, "META DATA:")?;
    writeln!(
        out,
        "- Title: {} ({} chars)",
        meta.title.as_deref().unwrap_or("MISSING"),
        meta.title_length
    )?;
    match &meta.description {
        Some(_) => writeln!(
            out,
            "- Description: Present ({} chars)",
            meta.description_length
        )?,
        None => writeln!(out, "- Description: MISSING")?,
    }
    writeln!(
        out,
        "- Canonical: {}",
        meta.canonical.as_deref().unwrap_or("MISSING")
    )?;
    writeln!(out)?;

    let h1_sample = &html.headings.h1[..html.headings.h1.len().min(H1_SAMPLE)];
    writeln!(out, "HEADINGS:")?;
    writeln!(
        out,
        "- H1: {} found - {}",
        html.headings.h1.len(),
        serde_json::to_string(h1_sample).unwrap_or_default()
    )?;
    writeln!(out, "- H2: {} found", html.headings.h2.len())?;
    writeln!(out)?;

    writeln!(out, "IMAGES:")?;
    writeln!(out, "- Total: {}", html.images.total)?;
    writeln!(out, "- Missing alt: {}", html.images.missing_alt)?;
    writeln!(out)?;

    writeln!(out, "SCHEMA:")?;
    writeln!(out, "- Found: {} schemas", html.schema.len())?;
    writeln!(out, "- Types: {}", html.schema_types().join(", "))?;
    writeln!(out)?;

    writeln!(out, "OPEN GRAPH:")?;
    for (label, key) in [
        ("Title", "title"),
        ("Description", "description"),
        ("Image", "image"),
    ] {
        let present = html.open_graph.get(key).is_some_and(|v| !v.is_empty());
        writeln!(out, "- {label}: {}", if present { "Yes" } else { "No" })?;
    }
    writeln!(out)?;

    out.push_str(FORMAT_INSTRUCTIONS);
    Ok(())
}

const FORMAT_INSTRUCTIONS: &str = "\
CRITICAL: Use EXACTLY this format for each recommendation:
1. [HIGH] Issue title → Specific fix action in 1-2 sentences
2. [MEDIUM] Issue title → Specific fix action in 1-2 sentences
3. [LOW] Issue title → Specific fix action in 1-2 sentences

Requirements:
- ONE line per recommendation
- Priority must be HIGH, MEDIUM, or LOW in brackets
- Use → arrow between issue and fix
- Fix must be 1-2 sentences maximum
- No bullet points, no sub-lists
- Max 10 recommendations

Focus on:
- Quick wins (high impact, low effort)
- Failed Lighthouse audits with specific savings
- Core Web Vitals improvements
- Technical SEO gaps

Example:
1. [HIGH] LCP 5.8s exceeds threshold → Preload hero image and defer non-critical CSS/JS to reduce LCP below 2.5s
2. [MEDIUM] 50 images missing alt text → Add descriptive alt attributes to all images for accessibility and SEO";

/// Whole milliseconds for display.
fn ms(value: f64) -> String {
    format!("{:.0}", value.round())
}

fn bullets(out: &mut String, items: impl Iterator<Item = String>) -> std::fmt::Result {
    let mut any = false;
    for item in items {
        writeln!(out, "- {item}")?;
        any = true;
    }
    if !any {
        writeln!(out, "- None")?;
    }
    Ok(())
}
