use clap::Parser;
use std::path::PathBuf;

/// Audit website performance, accessibility and SEO.
///
/// One URL runs a single audit; several URLs run a batch.
#[derive(Parser, Debug, Clone)]
#[command(name = "siteaudit", version)]
pub struct Cli {
    /// URLs to audit
    pub urls: Vec<String>,

    /// Print machine-readable JSON instead of the text report
    #[arg(long)]
    pub json: bool,

    /// Configuration file (defaults to the user config directory)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Directory for saved reports
    #[arg(short = 'o', long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// Do not write report files
    #[arg(long = "no-save")]
    pub no_save: bool,
}

pub const USAGE: &str = "\
Error: URL required

Usage:
  Single: siteaudit <url>
  Batch:  siteaudit <url1> <url2> <url3>...
  JSON:   siteaudit <url> --json

Example:
  siteaudit https://example.com
  siteaudit https://site1.com https://site2.com https://site3.com";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_batch_with_flags() {
        let cli = Cli::try_parse_from([
            "siteaudit",
            "https://a.example",
            "--json",
            "https://b.example",
            "--output-dir",
            "/tmp/reports",
        ])
        .expect("valid arguments");

        assert_eq!(cli.urls, vec!["https://a.example", "https://b.example"]);
        assert!(cli.json);
        assert!(!cli.no_save);
        assert_eq!(cli.output_dir, Some(PathBuf::from("/tmp/reports")));
    }

    #[test]
    fn test_no_urls_is_not_a_parse_error() {
        let cli = Cli::try_parse_from(["siteaudit"]).expect("urls are validated later");
        assert!(cli.urls.is_empty());
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["siteaudit", "--fast", "https://a.example"]).is_err());
    }
}
