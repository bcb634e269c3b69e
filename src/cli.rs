//! Command-line interface definitions for blurber.
//!
//! This module defines the CLI arguments using the `clap` crate. Network
//! settings can also be provided through environment variables.

use crate::batch::{BatchConfig, DEFAULT_MAX_BLURBS, FailurePolicy};
use crate::fetch::{DEFAULT_USER_AGENT, FetchConfig};
use crate::outputs::OutputFormat;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line arguments for blurber.
///
/// Runs in single-URL mode when given a URL, or in batch mode with `--file`.
///
/// # Examples
///
/// ```sh
/// # One article
/// blurber https://example.substack.com/p/robots
///
/// # First 25 links of a reading list, as JSON
/// blurber --file reading_list.md --max-blurbs 25 --format json
///
/// # Every link, skipping the ones that fail
/// blurber --file reading_list.md --no-limit --skip-failures -o blurbs.md
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// URL of the web article
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    pub url: Option<String>,

    /// Text file with one URL per line
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Maximum number of blurbs produced in batch mode
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_BLURBS, requires = "file")]
    pub max_blurbs: usize,

    /// Process every line of the batch file
    #[arg(long, requires = "file", conflicts_with = "max_blurbs")]
    pub no_limit: bool,

    /// Log and skip failing lines instead of aborting the batch
    #[arg(long, requires = "file")]
    pub skip_failures: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// User-Agent header sent with every request
    #[arg(long, env = "BLURBER_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Request timeout in seconds (no timeout when unset)
    #[arg(long, env = "BLURBER_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

impl Cli {
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            user_agent: self.user_agent.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn batch_config(&self) -> BatchConfig {
        BatchConfig {
            max_blurbs: (!self.no_limit).then_some(self.max_blurbs),
            failure_policy: if self.skip_failures {
                FailurePolicy::Skip
            } else {
                FailurePolicy::Abort
            },
        }
    }
}
