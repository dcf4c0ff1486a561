//! The three services an audit depends on.
//!
//! The orchestrator only sees these traits, so tests can swap in fakes and
//! the concrete backends stay in their own crates.

use crate::error::GenerationError;
use async_trait::async_trait;
use siteaudit_core::{PerformanceReport, StructuralReport};
use siteaudit_llm::{GeneratedText, TextGenerator};
use siteaudit_markup::{FetchError, HtmlAnalyzer};
use siteaudit_probe::{LighthouseProbe, ProbeError};

/// Measures page performance.
#[async_trait]
pub trait PerformanceProbe: Send + Sync {
    /// Measure `url`.
    async fn run(&self, url: &str) -> Result<PerformanceReport, ProbeError>;
}

/// Reports on page markup.
#[async_trait]
pub trait StructuralAnalyzer: Send + Sync {
    /// Fetch and analyze `url`. Malformed markup must not be an error.
    async fn analyze(&self, url: &str) -> Result<StructuralReport, FetchError>;
}

/// Produces free text recommendations from a prompt.
#[async_trait]
pub trait RecommendationGenerator: Send + Sync {
    /// Generate text for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<GeneratedText, GenerationError>;
}

#[async_trait]
impl PerformanceProbe for LighthouseProbe {
    async fn run(&self, url: &str) -> Result<PerformanceReport, ProbeError> {
        LighthouseProbe::run(self, url).await
    }
}

#[async_trait]
impl StructuralAnalyzer for HtmlAnalyzer {
    async fn analyze(&self, url: &str) -> Result<StructuralReport, FetchError> {
        HtmlAnalyzer::analyze(self, url).await
    }
}

#[async_trait]
impl RecommendationGenerator for TextGenerator {
    async fn generate(&self, prompt: &str) -> Result<GeneratedText, GenerationError> {
        TextGenerator::generate(self, prompt).await
    }
}
