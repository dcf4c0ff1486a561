//! The two run modes of the binary.

pub mod audit;
pub mod batch;

use crate::args::Cli;
use siteaudit_core::OutputConfig;
use std::path::PathBuf;

/// How results are emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputOptions {
    /// Print JSON to stdout instead of the text report
    pub json: bool,
    /// Write a report file
    pub save: bool,
    /// Where report files go
    pub directory: PathBuf,
}

impl OutputOptions {
    /// Combine command-line flags with the `[output]` config section.
    ///
    /// JSON mode never writes files.
    #[must_use]
    pub fn resolve(cli: &Cli, config: &OutputConfig) -> Self {
        Self {
            json: cli.json,
            save: config.save_reports && !cli.no_save && !cli.json,
            directory: cli
                .output_dir
                .clone()
                .unwrap_or_else(|| config.directory.clone()),
        }
    }
}
