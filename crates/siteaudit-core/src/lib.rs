//! SiteAudit Core - Foundation crate for the SiteAudit toolkit.
//!
//! This crate provides the shared report model, error handling, and
//! configuration management that all other SiteAudit crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths and env overrides
//! - [`types`] - Performance and structural report records
//!
//! # Example
//!
//! ```rust
//! use siteaudit_core::AppConfig;
//!
//! let config = AppConfig::default();
//! assert_eq!(config.fetch.timeout_secs, 10);
//! assert!(config.probe.headless);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, FetchConfig, LlmConfig, OutputConfig, ProbeConfig};
pub use error::{ConfigError, ConfigResult, Result, SiteAuditError};
pub use types::{
    CategoryScores, Diagnostic, FailedAudit, Headings, ImageInventory, ImageRef, LinkSummary,
    Opportunity, PageMeta, PerformanceReport, SeoChecks, StructuralReport, TechnicalSignals,
    WebVitals,
};
