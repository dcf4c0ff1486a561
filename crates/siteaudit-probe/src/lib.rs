//! Page performance measurement.
//!
//! Launches a headless Chromium through chromiumoxide and points the
//! Lighthouse CLI at its DevTools port. The Lighthouse result is reduced to
//! a [`PerformanceReport`](siteaudit_core::PerformanceReport).

pub mod engine;
pub mod error;
pub mod extract;
pub mod lighthouse;

pub use engine::BrowserEngine;
pub use error::{ProbeError, Result};
pub use extract::extract_report;
pub use lighthouse::{lighthouse_args, LighthouseProbe};
