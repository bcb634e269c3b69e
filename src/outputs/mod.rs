//! Rendering and writing blurbs.
//!
//! # Submodules
//!
//! - [`markdown`]: the Markdown blurb layout, the default output
//! - [`json`]: the same records as JSON
//!
//! [`emit`] sends the rendered text to stdout or to a file.

pub mod json;
pub mod markdown;

use crate::error::{BlurbError, Result};
use crate::models::Blurb;
use clap::ValueEnum;
use std::io::Write;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Markdown blurbs
    #[default]
    Markdown,
    /// JSON records
    Json,
}

/// Render the blurb for a single URL.
pub fn render_single(blurb: &Blurb, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(markdown::render_blurb(&blurb.metadata)),
        OutputFormat::Json => json::render_blurb(blurb),
    }
}

/// Render the blurbs of a batch run.
pub fn render_batch(blurbs: &[Blurb], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(markdown::render_batch(blurbs)),
        OutputFormat::Json => json::render_batch(blurbs),
    }
}

/// Write `rendered` followed by a newline to `path`, or to stdout when no
/// path is given.
///
/// # Arguments
///
/// * `rendered` - Output of [`render_single`] or [`render_batch`]
/// * `path` - Destination file; missing parent directories are created
///
/// # Returns
///
/// `Ok(())` once the text is written, or [`BlurbError::Io`] naming the
/// destination.
#[instrument(level = "info", skip_all, fields(path = ?path))]
pub async fn emit(rendered: &str, path: Option<&Path>) -> Result<()> {
    let contents = format!("{rendered}\n");

    let Some(path) = path else {
        let mut stdout = std::io::stdout().lock();
        return stdout
            .write_all(contents.as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(|source| BlurbError::Io {
                path: "<stdout>".to_string(),
                source,
            });
    };

    let io_err = |source: std::io::Error| BlurbError::Io {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(io_err)?;
    }
    fs::write(path, contents).await.map_err(io_err)?;
    info!(bytes = rendered.len(), "Wrote output file");
    Ok(())
}
