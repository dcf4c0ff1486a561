use siteaudit_markup::FetchError;
use siteaudit_probe::ProbeError;
use thiserror::Error;

/// Failure of a recommendation generator. Always recovered by the orchestrator.
pub use siteaudit_llm::LlmError as GenerationError;

/// Errors that end a single page audit.
///
/// Recommendation generation failures are absent on purpose: they degrade
/// the report instead of failing it.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Performance measurement failed
    #[error("performance probe failed: {0}")]
    Probe(#[from] ProbeError),

    /// The page could not be fetched for structural analysis
    #[error("structural analysis failed: {0}")]
    Fetch(#[from] FetchError),
}

/// Result alias for audit operations.
pub type Result<T> = std::result::Result<T, AuditError>;
