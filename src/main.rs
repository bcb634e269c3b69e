//! # blurber
//!
//! Fetches web articles and summarizes their bibliographic metadata (title,
//! authors, publisher, platform, content type, keywords) as short Markdown
//! "blurbs".
//!
//! ## Usage
//!
//! ```sh
//! blurber https://example.substack.com/p/robots
//! blurber --file reading_list.md --max-blurbs 25
//! ```
//!
//! ## Architecture
//!
//! 1. **Fetching**: download the page with a browser-like `User-Agent`
//! 2. **Extraction**: apply independent rules to the parsed document
//!    (`<title>` pattern, citation meta tags, keywords)
//! 3. **Output**: render Markdown or JSON to stdout or a file
//!
//! Batch mode repeats steps 1 and 2 for each line of a file, strictly in
//! order, before rendering everything at once.

use clap::Parser;
use std::error::Error;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod batch;
mod cli;
mod document;
mod encoding;
mod error;
mod extract;
mod fetch;
mod models;
mod outputs;
mod utils;

use batch::{BatchRunner, blurb_url};
use cli::Cli;
use fetch::HttpFetcher;
use utils::truncate_for_log;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    // stdout carries the blurbs, so logs go to stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let fetcher = HttpFetcher::new(&args.fetch_config())?;

    let rendered = if let Some(path) = &args.file {
        info!(path = %path.display(), "Running batch");
        let runner = BatchRunner::new(fetcher, args.batch_config());
        let blurbs = runner.run_file(path).await?;
        outputs::render_batch(&blurbs, args.format)?
    } else {
        let url = args.url.as_deref().ok_or("a URL or --file is required")?;
        let blurb = blurb_url(&fetcher, url).await?;
        outputs::render_single(&blurb, args.format)?
    };

    debug!(preview = %truncate_for_log(&rendered, 200), "Rendered output");
    outputs::emit(&rendered, args.output.as_deref()).await?;

    let elapsed = start_time.elapsed();
    info!(?elapsed, "Execution complete");
    Ok(())
}
