//! Common utilities shared across LLM providers.

use crate::error::{LlmError, Result};
use crate::provider::Role;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Build a standard HTTP client with common timeout settings.
///
/// # Arguments
/// * `timeout_secs` - Timeout in seconds (defaults to 60 if not specified)
///
/// # Errors
/// Returns error if the HTTP client cannot be created.
pub fn build_http_client(timeout_secs: Option<u64>) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs.unwrap_or(60)))
        .build()
        .map_err(|e| LlmError::Internal(format!("failed to create HTTP client: {e}")))
}

/// Map a non-success HTTP response to the matching `LlmError`.
///
/// Successful responses are passed through untouched.
pub async fn check_status(provider: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(status_error(provider, status, message))
}

/// Classify an HTTP failure status.
#[must_use]
pub fn status_error(provider: &str, status: StatusCode, message: String) -> LlmError {
    let provider = provider.to_string();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            LlmError::AuthenticationFailed { provider, message }
        }
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded { provider, message },
        _ => LlmError::ApiError {
            provider,
            status: status.as_u16(),
            message,
        },
    }
}

/// Convert internal Role enum to standard role string.
///
/// Most providers use "system", "user", "assistant" roles.
#[must_use]
pub fn convert_role_standard(role: Role) -> String {
    match role {
        Role::System => "system".to_string(),
        Role::User => "user".to_string(),
        Role::Assistant => "assistant".to_string(),
    }
}

/// Convert internal Role enum to Gemini-specific role string.
///
/// Gemini uses "user" and "model" instead of "user" and "assistant".
/// System prompts are handled separately.
#[must_use]
pub fn convert_role_gemini(role: Role) -> String {
    match role {
        Role::System | Role::User => "user".to_string(),
        Role::Assistant => "model".to_string(),
    }
}

/// Common message structure for `OpenAI`-compatible APIs.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StandardMessage {
    /// The role of the message sender (e.g., "system", "user", "assistant")
    pub role: String,
    /// The text content of the message
    #[serde(default)]
    pub content: Option<String>,
}

/// Common usage statistics structure.
#[derive(Debug, Deserialize, Clone)]
pub struct StandardUsage {
    /// Number of tokens in the prompt/input
    pub prompt_tokens: u32,
    /// Number of tokens in the completion/output
    pub completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(Some(30));
        assert!(client.is_ok());
    }

    #[test]
    fn test_build_http_client_default() {
        let client = build_http_client(None);
        assert!(client.is_ok());
    }

    #[test]
    fn test_status_error_classification() {
        let err = status_error("openai", StatusCode::UNAUTHORIZED, "bad key".to_string());
        assert!(matches!(err, LlmError::AuthenticationFailed { .. }));

        let err = status_error("gemini", StatusCode::TOO_MANY_REQUESTS, "slow down".to_string());
        assert!(matches!(err, LlmError::RateLimitExceeded { .. }));

        let err = status_error("openai", StatusCode::BAD_GATEWAY, "upstream".to_string());
        assert!(matches!(err, LlmError::ApiError { status: 502, .. }));
    }

    #[test]
    fn test_convert_role_standard() {
        assert_eq!(convert_role_standard(Role::System), "system");
        assert_eq!(convert_role_standard(Role::User), "user");
        assert_eq!(convert_role_standard(Role::Assistant), "assistant");
    }

    #[test]
    fn test_convert_role_gemini() {
        assert_eq!(convert_role_gemini(Role::System), "user");
        assert_eq!(convert_role_gemini(Role::User), "user");
        assert_eq!(convert_role_gemini(Role::Assistant), "model");
    }
}
