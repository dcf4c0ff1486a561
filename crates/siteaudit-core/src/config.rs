//! Configuration management for SiteAudit.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. Environment access is confined to this
//! module; everything downstream receives plain config values.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// This is loaded from `~/.config/siteaudit/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Recommendation generator settings
    pub llm: LlmConfig,
    /// Lighthouse probe settings
    pub probe: ProbeConfig,
    /// Markup fetch settings
    pub fetch: FetchConfig,
    /// Report output settings
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::read(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path.
    ///
    /// Unlike [`AppConfig::load`], a missing file is an error here.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }
        Self::read(path)
    }

    fn read(path: &Path) -> ConfigResult<Self> {
        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `OPENAI_API_KEY` / `GEMINI_API_KEY`: provider credentials
    /// - `AI_PROVIDER`: preferred provider (`openai` or `gemini`)
    /// - `OPENAI_MODEL`: override the `OpenAI` model name
    /// - `SITEAUDIT_LIGHTHOUSE_BIN`: path to the lighthouse executable
    /// - `SITEAUDIT_HEADLESS`: override browser headless mode (true/false)
    pub fn load_with_env(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup function.
    ///
    /// Empty values are treated as unset.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("OPENAI_API_KEY") {
            self.llm.openai_api_key = Some(key);
        }
        if let Some(key) = get("GEMINI_API_KEY") {
            self.llm.gemini_api_key = Some(key);
        }
        if let Some(provider) = get("AI_PROVIDER") {
            tracing::debug!("Override llm.provider from env: {}", provider);
            self.llm.provider = Some(provider.to_lowercase());
        }
        if let Some(model) = get("OPENAI_MODEL") {
            tracing::debug!("Override llm.openai_model from env: {}", model);
            self.llm.openai_model = model;
        }
        if let Some(bin) = get("SITEAUDIT_LIGHTHOUSE_BIN") {
            tracing::debug!("Override probe.lighthouse_bin from env: {}", bin);
            self.probe.lighthouse_bin = bin;
        }
        if let Some(val) = get("SITEAUDIT_HEADLESS") {
            if let Ok(headless) = val.parse() {
                self.probe.headless = headless;
                tracing::debug!("Override probe.headless from env: {}", headless);
            }
        }
    }

    /// Check values that would otherwise fail late, mid-audit.
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(provider) = &self.llm.provider {
            if provider != "openai" && provider != "gemini" {
                return Err(ConfigError::InvalidValue {
                    field: "llm.provider".to_string(),
                    reason: format!("expected \"openai\" or \"gemini\", got \"{provider}\""),
                });
            }
        }
        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "fetch.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.probe.categories.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "probe.categories".to_string(),
                reason: "at least one category is required".to_string(),
            });
        }
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/siteaudit/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "siteaudit", "siteaudit").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Recommendation generator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Preferred provider: `openai` or `gemini`. When unset, `OpenAI` is
    /// chosen if its key is present, otherwise Gemini.
    pub provider: Option<String>,
    /// `OpenAI` API key (from environment only)
    #[serde(skip)]
    pub openai_api_key: Option<String>,
    /// Gemini API key (from environment only)
    #[serde(skip)]
    pub gemini_api_key: Option<String>,
    /// `OpenAI` model name
    pub openai_model: String,
    /// Gemini model name
    pub gemini_model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: None,
            openai_api_key: None,
            gemini_api_key: None,
            openai_model: "gpt-5-mini".to_string(),
            gemini_model: "gemini-2.0-flash-exp".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Lighthouse probe settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Lighthouse executable name or path
    pub lighthouse_bin: String,
    /// Run Chromium in headless mode
    pub headless: bool,
    /// Maximum time Lighthouse waits for page load, in milliseconds
    pub max_wait_for_load_ms: u64,
    /// Lighthouse categories to run
    pub categories: Vec<String>,
    /// Lighthouse audits to skip
    pub skip_audits: Vec<String>,
    /// Cap on reported failed audits
    pub max_failed_audits: usize,
    /// Cap on reported opportunities
    pub max_opportunities: usize,
    /// Cap on reported diagnostics
    pub max_diagnostics: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            lighthouse_bin: "lighthouse".to_string(),
            headless: true,
            max_wait_for_load_ms: 45_000,
            categories: vec![
                "performance".to_string(),
                "seo".to_string(),
                "accessibility".to_string(),
                "best-practices".to_string(),
            ],
            skip_audits: vec![
                "screenshot-thumbnails".to_string(),
                "final-screenshot".to_string(),
            ],
            max_failed_audits: 15,
            max_opportunities: 10,
            max_diagnostics: 10,
        }
    }
}

/// Markup fetch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// User agent sent with page requests
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Cap on sampled external link URLs
    pub max_external_links: usize,
    /// Cap on sampled image entries
    pub max_images: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 SEO-Audit-Toolkit".to_string(),
            timeout_secs: 10,
            max_external_links: 5,
            max_images: 10,
        }
    }
}

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory where report files are written
    pub directory: PathBuf,
    /// Whether text-mode runs persist a JSON report
    pub save_reports: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            save_reports: true,
        }
    }
}
