//! Saving reports as JSON files.

use chrono::{DateTime, Utc};
use serde::Serialize;
use siteaudit_core::Result;
use std::path::{Path, PathBuf};

/// `seo-audit-<host>-<epoch-ms>.json`
#[must_use]
pub fn report_file_name(url: &str, at: DateTime<Utc>) -> String {
    let host = url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string());
    format!("seo-audit-{host}-{}.json", at.timestamp_millis())
}

/// `seo-audit-batch-<epoch-ms>.json`
#[must_use]
pub fn batch_file_name(at: DateTime<Utc>) -> String {
    format!("seo-audit-batch-{}.json", at.timestamp_millis())
}

/// Write `value` as pretty JSON to `dir/name`, creating `dir` if needed.
pub fn save_json<T: Serialize>(dir: &Path, name: &str, value: &T) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(name);
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(&path, json)?;
    tracing::debug!("Saved report to {}", path.display());
    Ok(path)
}
