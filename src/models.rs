//! Data models for extracted article metadata.
//!
//! - [`ArticleMetadata`]: everything extracted from one fetched page
//! - [`Blurb`]: an [`ArticleMetadata`] paired with the URL it came from
//!
//! Both serialize with serde for the JSON output format. They are never read
//! back, so only `Serialize` is derived.

use serde::Serialize;

/// Bibliographic-style metadata extracted from a single article page.
///
/// Built once per fetched page and never mutated afterwards. `authors` and
/// `keywords` are always present, possibly empty; the scalar fields are
/// `None` when the page carries no matching markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArticleMetadata {
    /// Article title, cleaned of its "- publisher by authors" suffix when present.
    pub title: Option<String>,
    /// Content type from the `citation_type` meta tag.
    pub website_type: Option<String>,
    /// Authors parsed from the title suffix.
    pub authors: Vec<String>,
    /// Publication name parsed from the title suffix.
    pub publisher: Option<String>,
    /// Hosting platform from the `citation_publisher` meta tag.
    pub platform: Option<String>,
    /// Contents of every `keywords` meta tag, in document order.
    pub keywords: Vec<String>,
}

/// One processed URL and the metadata extracted from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Blurb {
    /// The URL the page was fetched from.
    pub url: String,
    #[serde(flatten)]
    pub metadata: ArticleMetadata,
}
