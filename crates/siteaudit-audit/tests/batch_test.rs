use async_trait::async_trait;
use siteaudit_audit::{
    AuditOrchestrator, BatchItemResult, BatchRunner, GenerationError, PerformanceProbe,
    RecommendationGenerator, StructuralAnalyzer,
};
use siteaudit_core::{CategoryScores, PerformanceReport, StructuralReport};
use siteaudit_llm::GeneratedText;
use siteaudit_markup::FetchError;
use siteaudit_probe::ProbeError;
use std::sync::{Arc, Mutex};

/// Probe that fails for any URL containing "broken" and records call order.
#[derive(Default)]
struct ScriptedProbe {
    seen: Mutex<Vec<String>>,
}

#[async_trait]
impl PerformanceProbe for ScriptedProbe {
    async fn run(&self, url: &str) -> Result<PerformanceReport, ProbeError> {
        self.seen.lock().expect("lock").push(url.to_string());
        if url.contains("broken") {
            return Err(ProbeError::Navigation {
                url: url.to_string(),
                reason: "ERRORED_DOCUMENT_REQUEST".to_string(),
            });
        }
        Ok(PerformanceReport {
            scores: CategoryScores {
                performance: 77,
                seo: 91,
                accessibility: 88,
                best_practices: 100,
            },
            ..Default::default()
        })
    }
}

struct StaticAnalyzer;

#[async_trait]
impl StructuralAnalyzer for StaticAnalyzer {
    async fn analyze(&self, url: &str) -> Result<StructuralReport, FetchError> {
        if url.contains("offline") {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: 502,
            });
        }
        Ok(StructuralReport::default())
    }
}

struct StaticGenerator;

#[async_trait]
impl RecommendationGenerator for StaticGenerator {
    async fn generate(&self, _prompt: &str) -> Result<GeneratedText, GenerationError> {
        Ok(GeneratedText {
            text: "1. [HIGH] Missing title tag → Add a descriptive title element.\n2. [LOW] No canonical link".to_string(),
            provider: "gemini".to_string(),
            model: "gemini-2.0-flash-exp".to_string(),
        })
    }
}

fn runner(probe: Arc<ScriptedProbe>) -> BatchRunner {
    BatchRunner::new(AuditOrchestrator::new(
        probe,
        Arc::new(StaticAnalyzer),
        Arc::new(StaticGenerator),
    ))
}

#[tokio::test]
async fn test_failed_item_does_not_abort_batch() {
    let probe = Arc::new(ScriptedProbe::default());
    let result = runner(probe.clone())
        .run_batch(&["https://ok.example", "https://broken.example"])
        .await;

    assert_eq!(result.results.len(), 2);
    assert!(result.results[0].is_success());
    assert!(!result.results[1].is_success());
    assert_eq!(result.summary.total, 2);
    assert_eq!(result.summary.successful, 1);
    assert_eq!(result.summary.failed, 1);

    match &result.results[1] {
        BatchItemResult::Failed { url, error, .. } => {
            assert_eq!(url, "https://broken.example");
            assert!(error.contains("ERRORED_DOCUMENT_REQUEST"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_results_follow_input_order() {
    let probe = Arc::new(ScriptedProbe::default());
    let urls = vec![
        "https://broken-one.example".to_string(),
        "https://a.example".to_string(),
        "https://offline.example".to_string(),
        "https://b.example".to_string(),
        "https://broken-two.example".to_string(),
    ];

    let result = runner(probe.clone()).run_batch(&urls).await;

    let urls_out: Vec<&str> = result.results.iter().map(BatchItemResult::url).collect();
    assert_eq!(urls_out, urls.iter().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(
        result
            .results
            .iter()
            .map(BatchItemResult::is_success)
            .collect::<Vec<_>>(),
        vec![false, true, false, true, false]
    );
    assert_eq!(result.summary.failed, 3);

    // Every URL was attempted, in order, despite earlier failures
    assert_eq!(*probe.seen.lock().expect("lock"), urls);
}

#[tokio::test]
async fn test_successful_items_carry_parsed_recommendations() {
    let result = runner(Arc::new(ScriptedProbe::default()))
        .run_batch(&["https://ok.example"])
        .await;

    let report = result.results[0].report().expect("audit succeeded");
    let recs = &report.recommendations.recommendations;
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].issue, "Missing title tag");
    assert_eq!(recs[0].fix, "Add a descriptive title element.");
    assert_eq!(recs[1].fix, "No canonical link");
    assert_eq!(report.recommendations.provider.as_deref(), Some("gemini"));
}

#[tokio::test]
async fn test_empty_batch() {
    let urls: Vec<String> = Vec::new();
    let result = runner(Arc::new(ScriptedProbe::default()))
        .run_batch(&urls)
        .await;

    assert!(result.results.is_empty());
    assert_eq!(result.summary.total, 0);
    assert_eq!(result.summary.duration_seconds, 0);
}

#[tokio::test]
async fn test_batch_json_shape() {
    let result = runner(Arc::new(ScriptedProbe::default()))
        .run_batch(&["https://ok.example", "https://broken.example"])
        .await;

    let json = serde_json::to_value(&result).expect("serialize batch");
    assert_eq!(json["summary"]["total"], 2);
    assert!(json["summary"]["durationSeconds"].is_u64());
    assert_eq!(json["results"][0]["success"], true);
    assert_eq!(json["results"][0]["performance"]["scores"]["seo"], 91);
    assert_eq!(json["results"][1]["success"], false);
    assert!(json["results"][1]["error"].is_string());
    assert!(json["results"][1].get("performance").is_none());
}
