//! Provider selection and the text generator used by the audit pipeline.
//!
//! The backend is picked once, from configuration, when the generator is
//! built. Callers only ever see [`TextGenerator::generate`].

use crate::error::{LlmError, Result};
use crate::provider::{CompletionRequest, LlmProvider};
use crate::providers::{GeminiProvider, OpenAiProvider};
use siteaudit_core::LlmConfig;
use std::fmt;
use std::sync::Arc;

/// Backends the generator can be built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// `OpenAI` chat completions
    OpenAi,
    /// Google Gemini `generateContent`
    Gemini,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenAi => write!(f, "openai"),
            Self::Gemini => write!(f, "gemini"),
        }
    }
}

/// Decide which backend the credentials allow.
///
/// An explicit `openai` preference wins only when an `OpenAI` key exists;
/// otherwise a Gemini key is used if present. Without an explicit
/// preference `OpenAI` is preferred whenever its key is set.
#[must_use]
pub fn select_provider(config: &LlmConfig) -> Option<ProviderKind> {
    let has_openai = config.openai_api_key.is_some();
    let has_gemini = config.gemini_api_key.is_some();

    let preferred = config
        .provider
        .as_deref()
        .unwrap_or(if has_openai { "openai" } else { "gemini" });

    if preferred == "openai" && has_openai {
        Some(ProviderKind::OpenAi)
    } else if has_gemini {
        Some(ProviderKind::Gemini)
    } else {
        None
    }
}

/// Text returned by a successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedText {
    /// Raw model output
    pub text: String,
    /// Provider that produced it
    pub provider: String,
    /// Configured model name
    pub model: String,
}

/// Generates free text from a prompt using whichever provider was configured.
///
/// An unconfigured generator is valid; every call to [`generate`](Self::generate)
/// then fails with [`LlmError::NoProviderAvailable`].
#[derive(Clone)]
pub struct TextGenerator {
    provider: Option<Arc<dyn LlmProvider>>,
}

impl TextGenerator {
    /// Build a generator from configuration.
    ///
    /// # Errors
    /// Returns error if the selected provider's HTTP client cannot be created.
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let provider: Option<Arc<dyn LlmProvider>> = match select_provider(config) {
            Some(ProviderKind::OpenAi) => {
                let key = config.openai_api_key.clone().unwrap_or_default();
                Some(Arc::new(OpenAiProvider::with_model(
                    key,
                    config.openai_model.clone(),
                    Some(config.timeout_secs),
                )?))
            }
            Some(ProviderKind::Gemini) => {
                let key = config.gemini_api_key.clone().unwrap_or_default();
                Some(Arc::new(GeminiProvider::with_model(
                    key,
                    config.gemini_model.clone(),
                    Some(config.timeout_secs),
                )?))
            }
            None => None,
        };

        match &provider {
            Some(p) => tracing::debug!(
                "Recommendation provider: {} ({})",
                p.provider_id(),
                p.model_name()
            ),
            None => tracing::debug!("No recommendation provider configured"),
        }

        Ok(Self { provider })
    }

    /// Build a generator around an existing provider.
    #[must_use]
    pub fn with_provider(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// A generator with no backend.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { provider: None }
    }

    /// Whether a backend is available.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Provider identifier, if configured.
    #[must_use]
    pub fn provider_id(&self) -> Option<&str> {
        self.provider.as_deref().map(|p| p.provider_id())
    }

    /// Model name, if configured.
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        self.provider.as_deref().map(|p| p.model_name())
    }

    /// Send a single-turn prompt and return the raw text.
    ///
    /// # Errors
    /// Returns [`LlmError::NoProviderAvailable`] when unconfigured, or the
    /// provider's error when the remote call fails.
    pub async fn generate(&self, prompt: &str) -> Result<GeneratedText> {
        let provider = self.provider.as_ref().ok_or(LlmError::NoProviderAvailable)?;

        let response = provider.complete(CompletionRequest::new(prompt)).await?;
        if let Some(usage) = &response.usage {
            tracing::debug!(
                "{} used {} tokens ({} in, {} out)",
                provider.provider_id(),
                usage.total_tokens(),
                usage.input_tokens,
                usage.output_tokens
            );
        }

        Ok(GeneratedText {
            text: response.content,
            provider: provider.provider_id().to_string(),
            model: provider.model_name().to_string(),
        })
    }
}

impl fmt::Debug for TextGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextGenerator")
            .field("provider", &self.provider_id())
            .field("model", &self.model())
            .finish()
    }
}
