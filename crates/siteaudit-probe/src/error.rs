use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProbeError>;

/// Failures while measuring a page. Any of these is fatal to that page's audit.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("browser launch failed: {0}")]
    BrowserLaunch(String),

    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("lighthouse timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to start {bin}: {source}")]
    Spawn {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("lighthouse exited with {status}: {stderr}")]
    LighthouseFailed { status: String, stderr: String },

    #[error("invalid lighthouse report: {0}")]
    InvalidReport(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProbeError::Navigation {
            url: "https://broken.example".to_string(),
            reason: "ERRORED_DOCUMENT_REQUEST".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "navigation to https://broken.example failed: ERRORED_DOCUMENT_REQUEST"
        );
    }

    #[test]
    fn test_timeout_error() {
        let err = ProbeError::Timeout(Duration::from_secs(165));
        assert!(err.to_string().contains("165s"));
    }
}
