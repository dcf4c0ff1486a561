//! Report records shared across the SiteAudit crates.
//!
//! `PerformanceReport` is produced by the Lighthouse probe and
//! `StructuralReport` by the markup analyzer. Both are built once per audit
//! and never mutated afterwards. Field names serialize in camelCase so the
//! JSON output is stable for downstream tooling.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lighthouse results for one page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    /// Category scores, 0-100
    pub scores: CategoryScores,
    /// Core Web Vitals
    pub metrics: WebVitals,
    /// Pass/fail state of individual SEO checks
    pub audits: SeoChecks,
    /// Audits that scored below 1
    pub failed_audits: Vec<FailedAudit>,
    /// Audits with an estimated time saving
    pub opportunities: Vec<Opportunity>,
    /// Table-type audits that scored below 1
    pub diagnostics: Vec<Diagnostic>,
}

/// Category scores as integers in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScores {
    /// Performance category
    pub performance: u8,
    /// SEO category
    pub seo: u8,
    /// Accessibility category
    pub accessibility: u8,
    /// Best practices category
    pub best_practices: u8,
}

/// Core Web Vitals. Times are in milliseconds; CLS is unitless.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WebVitals {
    /// Largest Contentful Paint
    pub lcp: f64,
    /// Cumulative Layout Shift
    pub cls: f64,
    /// First Contentful Paint
    pub fcp: f64,
    /// Time to Interactive
    pub tti: f64,
    /// Total Blocking Time
    pub tbt: f64,
    /// Speed Index
    pub si: f64,
}

/// Individual SEO checks, true when the audit passed outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct SeoChecks {
    /// `meta-description`
    pub meta_description: bool,
    /// `http-status-code`
    pub http_status_code: bool,
    /// `link-text`
    pub link_text: bool,
    /// `is-crawlable`
    pub crawlable: bool,
    /// `robots-txt`
    pub robots: bool,
    /// `hreflang`
    pub hreflang: bool,
    /// `canonical`
    pub canonical: bool,
}

/// An audit that did not fully pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedAudit {
    /// Lighthouse audit id
    pub id: String,
    /// Audit title
    pub title: String,
    /// Audit description (markdown)
    pub description: String,
    /// Score in `0.0..1.0`
    pub score: f64,
}

/// An optimization opportunity with its estimated saving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    /// Lighthouse audit id
    pub id: String,
    /// Audit title
    pub title: String,
    /// Audit description (markdown)
    pub description: String,
    /// Estimated saving in milliseconds
    pub savings: f64,
}

/// A diagnostic table audit that did not fully pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Lighthouse audit id
    pub id: String,
    /// Audit title
    pub title: String,
    /// Audit description (markdown)
    pub description: String,
}

/// Markup findings for one page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralReport {
    /// Title, description, canonical and other head metadata
    pub meta: PageMeta,
    /// Heading text grouped by level
    pub headings: Headings,
    /// Image inventory
    pub images: ImageInventory,
    /// Link counts
    pub links: LinkSummary,
    /// Parsed JSON-LD blocks; malformed blocks are omitted
    pub schema: Vec<serde_json::Value>,
    /// `og:*` properties with the prefix stripped
    pub open_graph: BTreeMap<String, String>,
    /// `twitter:*` properties with the prefix stripped
    pub twitter: BTreeMap<String, String>,
    /// Script and stylesheet counts
    pub technical: TechnicalSignals,
}

impl StructuralReport {
    /// `@type` values of the structured-data blocks, in document order.
    ///
    /// Blocks without a string `@type` are skipped.
    #[must_use]
    pub fn schema_types(&self) -> Vec<&str> {
        self.schema
            .iter()
            .filter_map(|block| block.get("@type").and_then(serde_json::Value::as_str))
            .collect()
    }
}

/// Head metadata. Lengths are in characters and are 0 when the tag is absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// `<title>` text
    pub title: Option<String>,
    /// Title length in characters
    pub title_length: usize,
    /// `meta[name=description]` content
    pub description: Option<String>,
    /// Description length in characters
    pub description_length: usize,
    /// `meta[name=keywords]` content
    pub keywords: Option<String>,
    /// `meta[name=robots]` content
    pub robots: Option<String>,
    /// `link[rel=canonical]` href
    pub canonical: Option<String>,
    /// `meta[name=author]` content
    pub author: Option<String>,
    /// `meta[name=viewport]` content
    pub viewport: Option<String>,
}

/// Heading text by level.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Headings {
    /// Level 1
    pub h1: Vec<String>,
    /// Level 2
    pub h2: Vec<String>,
    /// Level 3
    pub h3: Vec<String>,
    /// Level 4
    pub h4: Vec<String>,
    /// Level 5
    pub h5: Vec<String>,
    /// Level 6
    pub h6: Vec<String>,
}

impl Headings {
    /// Mutable access to the list for a level in `1..=6`.
    pub fn level_mut(&mut self, level: u8) -> Option<&mut Vec<String>> {
        match level {
            1 => Some(&mut self.h1),
            2 => Some(&mut self.h2),
            3 => Some(&mut self.h3),
            4 => Some(&mut self.h4),
            5 => Some(&mut self.h5),
            6 => Some(&mut self.h6),
            _ => None,
        }
    }
}

/// Image counts and a short sample.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInventory {
    /// Total `<img>` elements
    pub total: usize,
    /// Images with no or blank `alt`
    pub missing_alt: usize,
    /// First few images
    pub images: Vec<ImageRef>,
}

/// One sampled image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// `src` attribute
    pub src: Option<String>,
    /// `alt` attribute
    pub alt: Option<String>,
}

/// Link counts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSummary {
    /// Same-site links
    pub internal: usize,
    /// Off-site links
    pub external: usize,
    /// Sample of off-site URLs
    pub external_links: Vec<String>,
}

/// Script and stylesheet signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalSignals {
    /// Google Analytics or gtag script present
    pub has_google_analytics: bool,
    /// Google Tag Manager script present
    #[serde(rename = "hasGTM")]
    pub has_gtm: bool,
    /// All `<script>` elements
    pub scripts: usize,
    /// Scripts with `defer`
    pub deferred_scripts: usize,
    /// Scripts with `async`
    pub async_scripts: usize,
    /// Scripts without `src`
    pub inline_scripts: usize,
    /// `link[rel=stylesheet]` elements
    pub stylesheets: usize,
}
