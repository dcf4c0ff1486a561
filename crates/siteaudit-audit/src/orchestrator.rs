//! Per-URL audit sequencing.
//!
//! An audit runs three stages strictly one after another: the performance
//! probe, the structural analyzer, then the recommendation generator. The
//! first two are mandatory and their failures end the audit. Generation is
//! optional and its failure only disables the recommendations section.

use crate::aggregate::aggregate;
use crate::collaborators::{PerformanceProbe, RecommendationGenerator, StructuralAnalyzer};
use crate::error::{GenerationError, Result};
use crate::model::{AuditReport, RecommendationSet};
use crate::prompt::build_prompt;
use crate::recommendations::parse_recommendations;
use std::sync::Arc;

/// Runs a complete audit for one URL.
#[derive(Clone)]
pub struct AuditOrchestrator {
    probe: Arc<dyn PerformanceProbe>,
    analyzer: Arc<dyn StructuralAnalyzer>,
    generator: Arc<dyn RecommendationGenerator>,
}

impl AuditOrchestrator {
    /// Create an orchestrator over the given collaborators.
    #[must_use]
    pub fn new(
        probe: Arc<dyn PerformanceProbe>,
        analyzer: Arc<dyn StructuralAnalyzer>,
        generator: Arc<dyn RecommendationGenerator>,
    ) -> Self {
        Self {
            probe,
            analyzer,
            generator,
        }
    }

    /// Audit one URL.
    ///
    /// # Errors
    /// Returns [`AuditError::Probe`](crate::AuditError::Probe) or
    /// [`AuditError::Fetch`](crate::AuditError::Fetch) when a mandatory stage
    /// fails. Never fails because of recommendation generation.
    pub async fn audit_one(&self, url: &str) -> Result<AuditReport> {
        tracing::debug!("Running performance probe for {}", url);
        let performance = self.probe.run(url).await?;

        tracing::debug!("Analyzing markup for {}", url);
        let structural = self.analyzer.analyze(url).await?;

        tracing::debug!("Generating recommendations for {}", url);
        let prompt = build_prompt(url, &performance, &structural);
        let recommendations = self.recommend(url, &prompt).await;

        let report = aggregate(url, performance, structural, recommendations);
        tracing::info!(
            "Audit complete for {}: performance={} seo={} recommendations={}",
            url,
            report.performance.scores.performance,
            report.performance.scores.seo,
            report.recommendations.recommendations.len()
        );
        Ok(report)
    }

    async fn recommend(&self, url: &str, prompt: &str) -> RecommendationSet {
        match self.generator.generate(prompt).await {
            Ok(generated) => RecommendationSet {
                enabled: true,
                provider: Some(generated.provider),
                model: Some(generated.model),
                recommendations: parse_recommendations(&generated.text),
                raw_text: Some(generated.text),
                error: None,
            },
            Err(GenerationError::NoProviderAvailable) => {
                tracing::debug!("No recommendation provider, skipping for {}", url);
                RecommendationSet::disabled()
            }
            Err(e) => {
                tracing::warn!("Recommendation generation failed for {}: {}", url, e);
                RecommendationSet::failed(e.to_string())
            }
        }
    }
}

impl std::fmt::Debug for AuditOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditOrchestrator").finish_non_exhaustive()
    }
}
