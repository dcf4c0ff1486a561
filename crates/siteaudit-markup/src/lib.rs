//! Structural SEO analysis of a page's markup.
//!
//! [`HtmlAnalyzer`] fetches a page over HTTP; [`analyze_html`] does the
//! actual extraction and works on any HTML string.

pub mod analyzer;
pub mod error;

pub use analyzer::{analyze_html, HtmlAnalyzer};
pub use error::{FetchError, Result};
