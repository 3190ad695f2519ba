//! Command-line interface definitions for the fresh news robot.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Run parameters themselves (search phrase, category, recency window, page
//! cap) live in the JSON payload the flags point at, not in flags.

use crate::config::ParameterSource;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the fresh news robot.
///
/// # Examples
///
/// ```sh
/// # Static config file
/// fresh_news --config config/config.json
///
/// # Orchestrator-provided work item
/// fresh_news --work-item /tmp/work-item.json -o ./output
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the JSON config file with the run parameters
    #[arg(short, long, default_value = "config/config.json")]
    pub config: PathBuf,

    /// Path to a JSON work-item payload; takes precedence over --config
    #[arg(short, long, env = "WORK_ITEM_PAYLOAD")]
    pub work_item: Option<PathBuf>,

    /// Directory for the report and the downloaded images
    #[arg(short, long, default_value = "output")]
    pub output_dir: PathBuf,

    /// News site to search
    #[arg(long, env = "NEWS_BASE_URL", default_value = "https://www.latimes.com/")]
    pub base_url: String,
}

impl Cli {
    /// The parameter source this invocation selected. A work item wins over
    /// the config file; the pipeline never sees which one it was.
    pub fn parameter_source(&self) -> ParameterSource {
        match &self.work_item {
            Some(path) => ParameterSource::WorkItem(path.clone()),
            None => ParameterSource::ConfigFile(self.config.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["fresh_news"]);

        assert_eq!(cli.config, PathBuf::from("config/config.json"));
        assert_eq!(cli.output_dir, PathBuf::from("output"));
        assert!(cli.work_item.is_none());
        assert!(matches!(cli.parameter_source(), ParameterSource::ConfigFile(_)));
    }

    #[test]
    fn test_work_item_takes_precedence() {
        let cli = Cli::parse_from([
            "fresh_news",
            "--config",
            "/etc/params.json",
            "--work-item",
            "/tmp/item.json",
        ]);

        match cli.parameter_source() {
            ParameterSource::WorkItem(path) => assert_eq!(path, PathBuf::from("/tmp/item.json")),
            other => panic!("expected work item source, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["fresh_news", "-c", "/tmp/c.json", "-o", "/tmp/out"]);

        assert_eq!(cli.config, PathBuf::from("/tmp/c.json"));
        assert_eq!(cli.output_dir, PathBuf::from("/tmp/out"));
    }
}
