use siteaudit_core::FetchConfig;
use siteaudit_markup::{FetchError, HtmlAnalyzer};

#[tokio::test]
#[ignore = "requires network access"]
async fn test_analyze_live_page() {
    let analyzer = HtmlAnalyzer::new(FetchConfig::default()).expect("build client");
    let report = analyzer
        .analyze("https://example.com")
        .await
        .expect("fetch example.com");

    assert_eq!(report.meta.title.as_deref(), Some("Example Domain"));
    assert_eq!(report.headings.h1.len(), 1);
}

#[tokio::test]
#[ignore = "requires network access"]
async fn test_missing_page_is_http_status_error() {
    let analyzer = HtmlAnalyzer::new(FetchConfig::default()).expect("build client");
    let err = analyzer
        .analyze("https://example.com/definitely-missing-page")
        .await
        .expect_err("404 page");

    assert!(matches!(err, FetchError::HttpStatus { status: 404, .. }));
}
