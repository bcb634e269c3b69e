//! Page fetching over HTTP.
//!
//! [`PageSource`] is the seam between the batch driver and the network:
//! [`HttpFetcher`] is the real implementation, tests substitute an in-memory
//! source.

use crate::encoding::decode_body;
use crate::error::{BlurbError, Result};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Desktop Chrome identification; some newsletter platforms serve reduced
/// markup to unknown agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Trait for anything that can turn a URL into page HTML.
pub trait PageSource {
    /// Fetch the page at `url` and return its body as text.
    async fn fetch_page(&self, url: &str) -> Result<String>;
}

/// Settings for [`HttpFetcher`].
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Whole-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

/// [`PageSource`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build the underlying client from `config`.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(BlurbError::ClientBuild)?;
        Ok(Self { client })
    }
}

impl PageSource for HttpFetcher {
    /// Non-success statuses are logged and their body is still returned;
    /// error pages simply yield sparse metadata. The body is decoded with the
    /// charset from the response header or the page's own `<meta>` declaration.
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch_page(&self, url: &str) -> Result<String> {
        let parsed = validate_url(url)?;
        let t0 = Instant::now();

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|source| BlurbError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Non-success status; parsing body anyway");
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await.map_err(|source| BlurbError::Request {
            url: url.to_string(),
            source,
        })?;
        let body = decode_body(&bytes, content_type.as_deref());

        info!(
            bytes = bytes.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body)
    }
}

/// Parse `url` and require an `http` or `https` scheme.
pub fn validate_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| BlurbError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => {
            debug!(host = ?parsed.host_str(), "URL accepted");
            Ok(parsed)
        }
        other => Err(BlurbError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme {other}"),
        }),
    }
}
