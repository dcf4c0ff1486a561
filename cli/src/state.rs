//! Wiring of configuration into the audit pipeline.

use siteaudit_audit::{
    AuditOrchestrator, PerformanceProbe, RecommendationGenerator, StructuralAnalyzer,
};
use siteaudit_core::{AppConfig, OutputConfig, Result, SiteAuditError};
use siteaudit_llm::TextGenerator;
use siteaudit_markup::HtmlAnalyzer;
use siteaudit_probe::LighthouseProbe;
use std::sync::Arc;

/// Everything a command needs to run.
#[derive(Debug, Clone)]
pub struct AppState {
    pub orchestrator: AuditOrchestrator,
    pub output: OutputConfig,
}

impl AppState {
    /// Build the production collaborators from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let probe: Arc<dyn PerformanceProbe> =
            Arc::new(LighthouseProbe::new(config.probe.clone()));
        let analyzer: Arc<dyn StructuralAnalyzer> = Arc::new(
            HtmlAnalyzer::new(config.fetch.clone())
                .map_err(|e| SiteAuditError::Fetch(e.to_string()))?,
        );
        let generator = TextGenerator::from_config(&config.llm)
            .map_err(|e| SiteAuditError::Llm(e.to_string()))?;

        match generator.provider_id() {
            Some(provider) => tracing::info!(
                "Recommendations via {} ({})",
                provider,
                generator.model().unwrap_or_default()
            ),
            None => tracing::info!(
                "No OPENAI_API_KEY or GEMINI_API_KEY set, recommendations disabled"
            ),
        }
        let generator: Arc<dyn RecommendationGenerator> = Arc::new(generator);

        Ok(Self {
            orchestrator: AuditOrchestrator::new(probe, analyzer, generator),
            output: config.output.clone(),
        })
    }
}
