//! SiteAudit LLM - text-generation backends for audit recommendations.
//!
//! This crate provides a unified interface over the `OpenAI` and Gemini
//! APIs. The backend is chosen once from [`siteaudit_core::LlmConfig`] based
//! on which credentials are present; callers only deal with
//! [`TextGenerator`].
//!
//! # Example
//!
//! ```rust,no_run
//! use siteaudit_core::LlmConfig;
//! use siteaudit_llm::TextGenerator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = LlmConfig {
//!     openai_api_key: Some("sk-...".to_string()),
//!     ..LlmConfig::default()
//! };
//!
//! let generator = TextGenerator::from_config(&config)?;
//! let generated = generator.generate("List three SEO quick wins").await?;
//! println!("{} says: {}", generated.provider, generated.text);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod generator;
pub mod provider;
pub mod providers;

// Re-export commonly used types
pub use error::{LlmError, Result};
pub use generator::{select_provider, GeneratedText, ProviderKind, TextGenerator};
pub use provider::{CompletionRequest, CompletionResponse, LlmProvider, Message, Role, Usage};
pub use providers::{GeminiProvider, OpenAiProvider};
