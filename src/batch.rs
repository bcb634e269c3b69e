//! Batch mode: one blurb per URL line of a text file.
//!
//! Lines are processed strictly in order, one fetch at a time, so the
//! `max_blurbs` limit always selects the first entries of the file.

use crate::document::Document;
use crate::error::{BlurbError, Result};
use crate::extract;
use crate::fetch::PageSource;
use crate::models::Blurb;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::{debug, error, info, instrument};

/// Default cap on the number of blurbs produced from one file.
pub const DEFAULT_MAX_BLURBS: usize = 10;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(https?://\S+)").unwrap());

/// What to do when a single line fails to produce a blurb.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the whole batch and return the error.
    #[default]
    Abort,
    /// Log the error and continue with the next line.
    Skip,
}

/// Settings for a [`BatchRunner`].
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Maximum number of blurbs to produce; `None` consumes every line.
    pub max_blurbs: Option<usize>,
    pub failure_policy: FailurePolicy,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_blurbs: Some(DEFAULT_MAX_BLURBS),
            failure_policy: FailurePolicy::Abort,
        }
    }
}

/// Drives fetch and extraction over the lines of a batch source.
#[derive(Debug)]
pub struct BatchRunner<S> {
    source: S,
    config: BatchConfig,
}

/// First `http://` or `https://` URL in `line`, up to the next whitespace.
pub fn extract_url(line: &str) -> Option<&str> {
    URL_RE.find(line).map(|m| m.as_str())
}

/// Fetch `url` from `source` and extract its metadata.
///
/// Secondary rules that are not part of the blurb are reported at `debug`.
///
/// # Arguments
///
/// * `source` - Where to fetch the page from
/// * `url` - Absolute `http`/`https` URL of the article
///
/// # Returns
///
/// The [`Blurb`] for `url`, or the fetch error. Missing markup is never an
/// error.
#[instrument(level = "info", skip(source))]
pub async fn blurb_url<S: PageSource>(source: &S, url: &str) -> Result<Blurb> {
    let html = source.fetch_page(url).await?;
    let doc = Document::parse(&html);
    debug!(
        journal_title = ?extract::extract_publisher(&doc),
        markup_authors = ?extract::extract_markup_authors(&doc),
        affiliations = ?extract::extract_affiliations(&doc),
        site_name = ?extract::extract_site_name(&doc),
        "Secondary metadata (not part of the blurb)"
    );
    Ok(Blurb {
        url: url.to_string(),
        metadata: extract::extract(&doc),
    })
}

impl<S: PageSource> BatchRunner<S> {
    pub fn new(source: S, config: BatchConfig) -> Self {
        Self { source, config }
    }

    /// Produce blurbs for the lines of `text`, in line order.
    ///
    /// Lines may end in `\n`, `\r\n` or a lone `\r`. A line without a URL
    /// fails with [`BlurbError::MissingUrl`], which is handled like any fetch
    /// failure under the configured [`FailurePolicy`].
    ///
    /// # Arguments
    ///
    /// * `text` - Batch source, one candidate URL per line
    ///
    /// # Returns
    ///
    /// At most `max_blurbs` blurbs, in line order. Under
    /// [`FailurePolicy::Abort`] the first failing line's error is returned
    /// instead and no partial results are kept.
    #[instrument(level = "info", skip_all, fields(max_blurbs = ?self.config.max_blurbs))]
    pub async fn run(&self, text: &str) -> Result<Vec<Blurb>> {
        let mut blurbs = Vec::new();
        let text = text.replace("\r\n", "\n").replace('\r', "\n");

        for (index, line) in text.lines().enumerate() {
            if self.limit_reached(blurbs.len()) {
                debug!(line = index + 1, "Blurb limit reached; stopping");
                break;
            }

            let result = match extract_url(line) {
                Some(url) => blurb_url(&self.source, url).await,
                None => Err(BlurbError::MissingUrl { line: index + 1 }),
            };

            match (result, self.config.failure_policy) {
                (Ok(blurb), _) => blurbs.push(blurb),
                (Err(e), FailurePolicy::Abort) => {
                    error!(line = index + 1, error = %e, "Batch aborted");
                    return Err(e);
                }
                (Err(e), FailurePolicy::Skip) => {
                    error!(line = index + 1, error = %e, "Skipping line");
                }
            }
        }

        info!(count = blurbs.len(), "Batch complete");
        Ok(blurbs)
    }

    /// Read `path` and run every line through [`BatchRunner::run`].
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn run_file(&self, path: impl AsRef<Path>) -> Result<Vec<Blurb>> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| BlurbError::Io {
                path: path.display().to_string(),
                source,
            })?;
        self.run(&text).await
    }

    fn limit_reached(&self, produced: usize) -> bool {
        self.config.max_blurbs.is_some_and(|max| produced >= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Serves canned pages and records every URL it was asked for.
    #[derive(Default)]
    struct StaticPages {
        pages: HashMap<String, String>,
        requested: RefCell<Vec<String>>,
    }

    impl StaticPages {
        fn with(mut self, url: &str, title: &str) -> Self {
            self.pages.insert(
                url.to_string(),
                format!("<html><head><title>{title}</title></head><body></body></html>"),
            );
            self
        }
    }

    impl PageSource for StaticPages {
        async fn fetch_page(&self, url: &str) -> Result<String> {
            self.requested.borrow_mut().push(url.to_string());
            crate::fetch::validate_url(url)?;
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| BlurbError::InvalidUrl {
                    url: url.to_string(),
                    reason: "not served".to_string(),
                })
        }
    }

    fn titles(blurbs: &[Blurb]) -> Vec<&str> {
        blurbs
            .iter()
            .filter_map(|b| b.metadata.title.as_deref())
            .collect()
    }

    #[test]
    fn test_extract_url_embedded_in_text() {
        assert_eq!(
            extract_url("- [Robots](see https://example.com/p/robots) today"),
            Some("https://example.com/p/robots)")
        );
        assert_eq!(
            extract_url("read http://a.example/x and https://b.example/y"),
            Some("http://a.example/x")
        );
        assert_eq!(extract_url("no link here"), None);
        assert_eq!(extract_url("ftp://example.com"), None);
        assert_eq!(extract_url(""), None);
    }

    #[tokio::test]
    async fn test_limit_takes_first_lines_in_order() {
        let pages = StaticPages::default()
            .with("https://a.example/1", "First - by Ann")
            .with("https://a.example/2", "Second");
        let text = "1. https://a.example/1\n2. https://a.example/2\nthis line is malformed\n";

        let runner = BatchRunner::new(
            pages,
            BatchConfig {
                max_blurbs: Some(2),
                ..BatchConfig::default()
            },
        );
        let blurbs = runner.run(text).await.unwrap();

        assert_eq!(titles(&blurbs), vec!["First", "Second"]);
        assert_eq!(blurbs[0].url, "https://a.example/1");
        assert_eq!(blurbs[0].metadata.authors, vec!["Ann"]);
        assert_eq!(runner.source.requested.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_default_limit_is_ten() {
        let mut pages = StaticPages::default();
        let mut text = String::new();
        for i in 0..12 {
            let url = format!("https://a.example/{i}");
            pages = pages.with(&url, &format!("Post {i}"));
            text.push_str(&url);
            text.push('\n');
        }

        let runner = BatchRunner::new(pages, BatchConfig::default());
        let blurbs = runner.run(&text).await.unwrap();
        assert_eq!(blurbs.len(), DEFAULT_MAX_BLURBS);
        assert_eq!(blurbs[9].metadata.title.as_deref(), Some("Post 9"));
    }

    #[tokio::test]
    async fn test_no_limit_consumes_everything() {
        let mut pages = StaticPages::default();
        let mut text = String::new();
        for i in 0..12 {
            let url = format!("https://a.example/{i}");
            pages = pages.with(&url, "Post");
            text.push_str(&format!("{url}\n"));
        }

        let runner = BatchRunner::new(
            pages,
            BatchConfig {
                max_blurbs: None,
                ..BatchConfig::default()
            },
        );
        assert_eq!(runner.run(&text).await.unwrap().len(), 12);
    }

    #[tokio::test]
    async fn test_line_without_url_aborts_batch() {
        let pages = StaticPages::default().with("https://a.example/1", "First");
        let text = "https://a.example/1\n\nhttps://a.example/1\n";

        let runner = BatchRunner::new(pages, BatchConfig::default());
        let err = runner.run(text).await.unwrap_err();
        assert!(matches!(err, BlurbError::MissingUrl { line: 2 }));
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts_batch() {
        let pages = StaticPages::default().with("https://a.example/1", "First");
        let text = "https://a.example/404\nhttps://a.example/1\n";

        let runner = BatchRunner::new(pages, BatchConfig::default());
        assert!(runner.run(text).await.is_err());
        assert_eq!(runner.source.requested.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_skip_policy_isolates_failures() {
        let pages = StaticPages::default()
            .with("https://a.example/1", "First")
            .with("https://a.example/2", "Second")
            .with("https://a.example/3", "Third");
        let text = "https://a.example/1\nnothing\nhttps://a.example/404\nhttps://a.example/2\nhttps://a.example/3\n";

        let runner = BatchRunner::new(
            pages,
            BatchConfig {
                max_blurbs: Some(2),
                failure_policy: FailurePolicy::Skip,
            },
        );
        let blurbs = runner.run(text).await.unwrap();
        assert_eq!(titles(&blurbs), vec!["First", "Second"]);
    }

    #[tokio::test]
    async fn test_carriage_return_line_endings() {
        let pages = StaticPages::default()
            .with("https://a.example/1", "First")
            .with("https://a.example/2", "Second")
            .with("https://a.example/3", "Third");
        let text = "https://a.example/1\rhttps://a.example/2\r\nhttps://a.example/3\r";

        let runner = BatchRunner::new(pages, BatchConfig::default());
        let blurbs = runner.run(text).await.unwrap();
        assert_eq!(titles(&blurbs), vec!["First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn test_run_file_missing_path() {
        let runner = BatchRunner::new(StaticPages::default(), BatchConfig::default());
        let err = runner
            .run_file("/nonexistent/blurber/links.md")
            .await
            .unwrap_err();
        assert!(matches!(err, BlurbError::Io { .. }));
    }

    #[tokio::test]
    async fn test_run_file_reads_lines() {
        let path = std::env::temp_dir().join(format!("blurber-batch-{}.md", std::process::id()));
        tokio::fs::write(&path, "https://a.example/1\n").await.unwrap();

        let pages = StaticPages::default().with("https://a.example/1", "From File");
        let runner = BatchRunner::new(pages, BatchConfig::default());
        let blurbs = runner.run_file(&path).await.unwrap();
        let _ = tokio::fs::remove_file(&path).await;

        assert_eq!(titles(&blurbs), vec!["From File"]);
    }
}
