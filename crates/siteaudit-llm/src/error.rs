//! Error types for the text-generation subsystem.

use thiserror::Error;

/// Errors that can occur while generating text.
#[derive(Error, Debug)]
pub enum LlmError {
    /// No provider credentials were configured
    #[error("no text-generation provider configured (set OPENAI_API_KEY or GEMINI_API_KEY)")]
    NoProviderAvailable,

    /// API error with status code
    #[error("API error ({provider}): status {status}, {message}")]
    ApiError {
        /// Provider name
        provider: String,
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {provider}: {message}")]
    RateLimitExceeded {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },

    /// Invalid API key or authentication failure
    #[error("authentication failed for {provider}: {message}")]
    AuthenticationFailed {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },

    /// Response parsing error
    #[error("failed to parse response from {provider}: {message}")]
    ParseError {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },

    /// The provider answered but produced no text
    #[error("empty response from {provider}")]
    EmptyResponse {
        /// Provider name
        provider: String,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for LLM operations.
pub type Result<T> = std::result::Result<T, LlmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LlmError::ApiError {
            provider: "openai".to_string(),
            status: 429,
            message: "Too Many Requests".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error (openai): status 429, Too Many Requests"
        );

        let err = LlmError::EmptyResponse {
            provider: "gemini".to_string(),
        };
        assert_eq!(err.to_string(), "empty response from gemini");
    }

    #[test]
    fn test_no_provider_mentions_credentials() {
        let err = LlmError::NoProviderAvailable;
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }
}
