use crate::error::{FetchError, Result};
use scraper::{ElementRef, Html, Selector};
use siteaudit_core::{
    FetchConfig, Headings, ImageInventory, ImageRef, LinkSummary, PageMeta, StructuralReport,
    TechnicalSignals,
};
use std::collections::BTreeMap;
use std::time::Duration;

/// Fetches a page and reports on its markup.
#[derive(Debug, Clone)]
pub struct HtmlAnalyzer {
    client: reqwest::Client,
    config: FetchConfig,
}

impl HtmlAnalyzer {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetch `url` and analyze the returned HTML.
    pub async fn analyze(&self, url: &str) -> Result<StructuralReport> {
        let parsed = url::Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        tracing::debug!("Fetching {} for markup analysis", url);
        let response = self.client.get(parsed).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response.text().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(analyze_html(&html, url, &self.config))
    }
}

/// Compute a structural report from raw HTML.
///
/// `base_url` decides which links count as internal.
#[must_use]
pub fn analyze_html(html: &str, base_url: &str, config: &FetchConfig) -> StructuralReport {
    let document = Html::parse_document(html);

    StructuralReport {
        meta: extract_meta(&document),
        headings: extract_headings(&document),
        images: analyze_images(&document, config.max_images),
        links: analyze_links(&document, base_url, config.max_external_links),
        schema: extract_schema(&document),
        open_graph: prefixed_meta(&document, "property", "og:"),
        twitter: prefixed_meta(&document, "name", "twitter:"),
        technical: analyze_technical(&document),
    }
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

fn first_attr(document: &Html, css: &str, attr: &str) -> Option<String> {
    document
        .select(&selector(css))
        .next()
        .and_then(|el| el.value().attr(attr))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn element_text(el: &ElementRef) -> String {
    el.text().collect::<String>()
}

fn extract_meta(document: &Html) -> PageMeta {
    let title = document
        .select(&selector("title"))
        .next()
        .map(|el| element_text(&el))
        .filter(|t| !t.is_empty());
    let description = first_attr(document, r#"meta[name="description"]"#, "content");

    PageMeta {
        title_length: title.as_deref().map_or(0, |t| t.chars().count()),
        title,
        description_length: description.as_deref().map_or(0, |d| d.chars().count()),
        description,
        keywords: first_attr(document, r#"meta[name="keywords"]"#, "content"),
        robots: first_attr(document, r#"meta[name="robots"]"#, "content"),
        canonical: first_attr(document, r#"link[rel="canonical"]"#, "href"),
        author: first_attr(document, r#"meta[name="author"]"#, "content"),
        viewport: first_attr(document, r#"meta[name="viewport"]"#, "content"),
    }
}

fn extract_headings(document: &Html) -> Headings {
    let mut headings = Headings::default();
    for level in 1..=6u8 {
        let found: Vec<String> = document
            .select(&selector(&format!("h{level}")))
            .map(|el| element_text(&el).trim().to_string())
            .filter(|text| !text.is_empty())
            .collect();
        if let Some(slot) = headings.level_mut(level) {
            *slot = found;
        }
    }
    headings
}

fn analyze_images(document: &Html, sample: usize) -> ImageInventory {
    let mut inventory = ImageInventory::default();

    for el in document.select(&selector("img")) {
        let src = el.value().attr("src").map(str::to_string);
        let alt = el
            .value()
            .attr("alt")
            .filter(|a| !a.is_empty())
            .map(str::to_string);

        inventory.total += 1;
        if alt.as_deref().map_or(true, |a| a.trim().is_empty()) {
            inventory.missing_alt += 1;
        }
        if inventory.images.len() < sample {
            inventory.images.push(ImageRef { src, alt });
        }
    }

    inventory
}

fn analyze_links(document: &Html, base_url: &str, sample: usize) -> LinkSummary {
    let host = url::Url::parse(base_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default();
    let mut summary = LinkSummary::default();

    for href in document
        .select(&selector("a[href]"))
        .filter_map(|el| el.value().attr("href"))
    {
        if href.starts_with("http") && !href.contains(host.as_str()) {
            summary.external += 1;
            if summary.external_links.len() < sample {
                summary.external_links.push(href.to_string());
            }
        } else if href.starts_with('/') || href.starts_with(base_url) {
            summary.internal += 1;
        }
    }

    summary
}

fn extract_schema(document: &Html) -> Vec<serde_json::Value> {
    document
        .select(&selector(r#"script[type="application/ld+json"]"#))
        .filter_map(|el| {
            let raw = element_text(&el);
            match serde_json::from_str(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::trace!("Skipping malformed JSON-LD block: {}", e);
                    None
                }
            }
        })
        .collect()
}

fn prefixed_meta(document: &Html, attr: &str, prefix: &str) -> BTreeMap<String, String> {
    document
        .select(&selector(&format!(r#"meta[{attr}^="{prefix}"]"#)))
        .filter_map(|el| {
            let key = el.value().attr(attr)?.strip_prefix(prefix)?.to_string();
            let content = el.value().attr("content").unwrap_or_default().to_string();
            Some((key, content))
        })
        .collect()
}

fn analyze_technical(document: &Html) -> TechnicalSignals {
    let count = |css: &str| document.select(&selector(css)).count();

    TechnicalSignals {
        has_google_analytics: count(r#"script[src*="google-analytics"]"#) > 0
            || count(r#"script[src*="gtag"]"#) > 0,
        has_gtm: count(r#"script[src*="googletagmanager"]"#) > 0,
        scripts: count("script"),
        deferred_scripts: count("script[defer]"),
        async_scripts: count("script[async]"),
        inline_scripts: count("script:not([src])"),
        stylesheets: count(r#"link[rel="stylesheet"]"#),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"<!DOCTYPE html>
<html>
<head>
  <title>Acme Widgets | Durable widgets for every workshop</title>
  <meta name="description" content="Acme builds durable widgets.">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <meta name="robots" content="index,follow">
  <link rel="canonical" href="https://acme.example/">
  <link rel="stylesheet" href="/main.css">
  <meta property="og:title" content="Acme Widgets">
  <meta property="og:type" content="website">
  <meta name="twitter:card" content="summary_large_image">
  <script type="application/ld+json">{"@context": "https://schema.org", "@type": "Organization", "name": "Acme"}</script>
  <script type="application/ld+json">{ not json </script>
  <script async src="https://www.googletagmanager.com/gtag/js?id=G-123"></script>
  <script defer src="/app.js"></script>
  <script>window.dataLayer = [];</script>
</head>
<body>
  <h1>  Widgets  </h1>
  <h2>Catalog</h2>
  <h2>   </h2>
  <h3>Pricing</h3>
  <img src="/a.png" alt="A widget">
  <img src="/b.png" alt="  ">
  <img src="/c.png">
  <a href="/about">About</a>
  <a href="https://acme.example/contact">Contact</a>
  <a href="https://partner.example/">Partner</a>
  <a href="mailto:hi@acme.example">Mail</a>
  <a href="#top">Top</a>
</body>
</html>"##;

    fn analyze(html: &str) -> StructuralReport {
        analyze_html(html, "https://acme.example", &FetchConfig::default())
    }

    #[test]
    fn test_meta_extraction() {
        let report = analyze(PAGE);

        assert_eq!(
            report.meta.title.as_deref(),
            Some("Acme Widgets | Durable widgets for every workshop")
        );
        assert_eq!(report.meta.title_length, 49);
        assert_eq!(report.meta.description_length, 28);
        assert_eq!(report.meta.canonical.as_deref(), Some("https://acme.example/"));
        assert_eq!(report.meta.robots.as_deref(), Some("index,follow"));
        assert!(report.meta.keywords.is_none());
        assert!(report.meta.author.is_none());
    }

    #[test]
    fn test_headings_are_trimmed_and_non_empty() {
        let report = analyze(PAGE);

        assert_eq!(report.headings.h1, vec!["Widgets".to_string()]);
        assert_eq!(report.headings.h2, vec!["Catalog".to_string()]);
        assert_eq!(report.headings.h3, vec!["Pricing".to_string()]);
        assert!(report.headings.h4.is_empty());
    }

    #[test]
    fn test_images_missing_alt() {
        let report = analyze(PAGE);

        assert_eq!(report.images.total, 3);
        assert_eq!(report.images.missing_alt, 2);
        assert_eq!(report.images.images[0].alt.as_deref(), Some("A widget"));
        assert!(report.images.images[2].alt.is_none());
    }

    #[test]
    fn test_image_sample_is_capped() {
        let html: String = (0..15).map(|i| format!(r#"<img src="/{i}.png">"#)).collect();
        let report = analyze(&html);

        assert_eq!(report.images.total, 15);
        assert_eq!(report.images.images.len(), 10);
    }

    #[test]
    fn test_link_classification() {
        let report = analyze(PAGE);

        assert_eq!(report.links.internal, 2);
        assert_eq!(report.links.external, 1);
        assert_eq!(report.links.external_links, vec!["https://partner.example/".to_string()]);
    }

    #[test]
    fn test_external_sample_is_capped() {
        let html: String = (0..8)
            .map(|i| format!(r#"<a href="https://site{i}.example/">x</a>"#))
            .collect();
        let report = analyze(&html);

        assert_eq!(report.links.external, 8);
        assert_eq!(report.links.external_links.len(), 5);
    }

    #[test]
    fn test_malformed_json_ld_is_dropped() {
        let report = analyze(PAGE);

        assert_eq!(report.schema.len(), 1);
        assert_eq!(report.schema_types(), vec!["Organization"]);
    }

    #[test]
    fn test_social_tags() {
        let report = analyze(PAGE);

        assert_eq!(report.open_graph.get("title").map(String::as_str), Some("Acme Widgets"));
        assert_eq!(report.open_graph.get("type").map(String::as_str), Some("website"));
        assert_eq!(
            report.twitter.get("card").map(String::as_str),
            Some("summary_large_image")
        );
    }

    #[test]
    fn test_technical_signals() {
        let report = analyze(PAGE);

        assert!(report.technical.has_gtm);
        assert!(report.technical.has_google_analytics);
        assert_eq!(report.technical.scripts, 5);
        assert_eq!(report.technical.async_scripts, 1);
        assert_eq!(report.technical.deferred_scripts, 1);
        assert_eq!(report.technical.inline_scripts, 3);
        assert_eq!(report.technical.stylesheets, 1);
    }

    #[test]
    fn test_broken_markup_still_reports() {
        let report = analyze("<html><head><title>Half</title><body><h1>Open <p>never closed");

        assert_eq!(report.meta.title.as_deref(), Some("Half"));
        assert_eq!(report.headings.h1.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected() {
        let analyzer = HtmlAnalyzer::new(FetchConfig::default()).expect("build client");
        let err = analyzer.analyze("not a url").await.expect_err("invalid url");
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }
}
