//! SiteAudit Audit - the audit pipeline.
//!
//! Combines a Lighthouse performance report, a structural markup report and
//! generated recommendations into one [`AuditReport`] per URL, and runs
//! batches of URLs with per-item failure isolation.
//!
//! # Components
//!
//! - [`recommendations`] - parses generator output into prioritized fixes
//! - [`mod@aggregate`] - assembles the final report
//! - [`orchestrator`] - sequences the collaborators for one URL
//! - [`batch`] - runs many URLs in order and summarizes them
//!
//! # Example
//!
//! ```rust,ignore
//! use siteaudit_audit::{AuditOrchestrator, BatchRunner};
//! use std::sync::Arc;
//!
//! let orchestrator = AuditOrchestrator::new(
//!     Arc::new(LighthouseProbe::new(config.probe.clone())),
//!     Arc::new(HtmlAnalyzer::new(config.fetch.clone())?),
//!     Arc::new(TextGenerator::from_config(&config.llm)?),
//! );
//!
//! let result = BatchRunner::new(orchestrator)
//!     .run_batch(&["https://example.com", "https://example.org"])
//!     .await;
//! println!("{} failed", result.summary.failed);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod aggregate;
pub mod batch;
pub mod collaborators;
pub mod error;
pub mod model;
pub mod orchestrator;
pub mod prompt;
pub mod recommendations;

pub use aggregate::aggregate;
pub use batch::BatchRunner;
pub use collaborators::{PerformanceProbe, RecommendationGenerator, StructuralAnalyzer};
pub use error::{AuditError, GenerationError, Result};
pub use model::{
    AuditReport, BatchItemResult, BatchResult, BatchSummary, Priority, Recommendation,
    RecommendationSet,
};
pub use orchestrator::AuditOrchestrator;
pub use prompt::build_prompt;
pub use recommendations::parse_recommendations;
