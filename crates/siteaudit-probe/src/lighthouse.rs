use crate::engine::BrowserEngine;
use crate::error::{ProbeError, Result};
use crate::extract::extract_report;
use siteaudit_core::{PerformanceReport, ProbeConfig};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Time allowed on top of the page-load budget for Lighthouse to finish.
const RUN_MARGIN: Duration = Duration::from_secs(120);

/// Runs Lighthouse against a freshly launched Chromium for each URL.
#[derive(Debug, Clone)]
pub struct LighthouseProbe {
    config: ProbeConfig,
}

impl LighthouseProbe {
    #[must_use]
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Measure one page.
    ///
    /// The browser is shut down whether or not Lighthouse succeeds.
    pub async fn run(&self, url: &str) -> Result<PerformanceReport> {
        tracing::info!("Running Lighthouse for {}", url);

        let engine = BrowserEngine::launch(self.config.headless).await?;
        let outcome = self.run_lighthouse(url, engine.devtools_port()).await;
        engine.shutdown().await;

        let lhr = outcome?;
        let report = extract_report(url, &lhr, &self.config)?;
        tracing::debug!(
            "Lighthouse scores for {}: performance={} seo={}",
            url,
            report.scores.performance,
            report.scores.seo
        );
        Ok(report)
    }

    async fn run_lighthouse(&self, url: &str, port: u16) -> Result<serde_json::Value> {
        let bin = &self.config.lighthouse_bin;
        let child = Command::new(bin)
            .args(lighthouse_args(url, port, &self.config))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ProbeError::Spawn {
                bin: bin.clone(),
                source,
            })?;

        let limit = Duration::from_millis(self.config.max_wait_for_load_ms) + RUN_MARGIN;
        let output = tokio::time::timeout(limit, child.wait_with_output())
            .await
            .map_err(|_| ProbeError::Timeout(limit))?
            .map_err(|source| ProbeError::Spawn {
                bin: bin.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ProbeError::LighthouseFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| ProbeError::InvalidReport(format!("lighthouse output is not JSON: {e}")))
    }
}

/// Command-line arguments for one Lighthouse run.
#[must_use]
pub fn lighthouse_args(url: &str, port: u16, config: &ProbeConfig) -> Vec<String> {
    let mut args = vec![
        url.to_string(),
        format!("--port={port}"),
        "--output=json".to_string(),
        "--output-path=stdout".to_string(),
        "--quiet".to_string(),
        format!("--max-wait-for-load={}", config.max_wait_for_load_ms),
    ];
    if !config.categories.is_empty() {
        args.push(format!("--only-categories={}", config.categories.join(",")));
    }
    if !config.skip_audits.is_empty() {
        args.push(format!("--skip-audits={}", config.skip_audits.join(",")));
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lighthouse_args_defaults() {
        let args = lighthouse_args("https://ok.example", 9222, &ProbeConfig::default());

        assert_eq!(args[0], "https://ok.example");
        assert!(args.contains(&"--port=9222".to_string()));
        assert!(args.contains(&"--output=json".to_string()));
        assert!(args.contains(&"--output-path=stdout".to_string()));
        assert!(args.contains(&"--max-wait-for-load=45000".to_string()));
        assert!(args.contains(
            &"--only-categories=performance,seo,accessibility,best-practices".to_string()
        ));
        assert!(args.contains(&"--skip-audits=screenshot-thumbnails,final-screenshot".to_string()));
    }

    #[test]
    fn test_lighthouse_args_without_filters() {
        let config = ProbeConfig {
            skip_audits: Vec::new(),
            ..ProbeConfig::default()
        };
        let args = lighthouse_args("https://ok.example", 41873, &config);

        assert!(!args.iter().any(|a| a.starts_with("--skip-audits")));
        assert!(args.iter().any(|a| a.starts_with("--only-categories")));
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let probe = LighthouseProbe::new(ProbeConfig {
            lighthouse_bin: "/nonexistent/lighthouse-binary".to_string(),
            ..ProbeConfig::default()
        });

        let err = tokio_test::assert_err!(probe.run_lighthouse("https://ok.example", 9222).await);
        assert!(matches!(err, ProbeError::Spawn { .. }));
    }
}
