//! Metadata extraction rules.
//!
//! Each rule is a pure function of a parsed [`Document`] and never fails: when
//! the markup it looks for is missing, it returns `None` or an empty `Vec`.
//! [`extract`] runs the default set of rules and assembles an
//! [`ArticleMetadata`]; the remaining public rules can be invoked on their own.
//!
//! # Title pattern
//!
//! Newsletter platforms commonly title posts in one of two shapes:
//!
//! ```text
//! AI Product Managers - by Alex Alexakis and Marily Nika
//! Construction Goes Robotic - Startup Pirate by Alex Alexakis
//! ```
//!
//! [`extract_title_authors_publisher`] splits such titles into the article
//! title, an optional publication name and the author list. The pattern and
//! its author splitting are kept deliberately literal, quirks included.

use crate::document::Document;
use crate::models::ArticleMetadata;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, instrument};

/// `<title> - [publisher] by <authors>`, anchored at the start only.
static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?) - ([\s\w]*)by([\s\w]*)").unwrap());

/// Author separators. `and` is matched as a substring, not a word.
static AUTHOR_SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r",|and").unwrap());

/// Run the default extraction rules over a page.
///
/// Title, authors and publisher all come from the `<title>` element; the
/// publisher found in `citation_journal_title` is not consulted here (see
/// [`extract_publisher`]).
#[instrument(level = "debug", skip_all)]
pub fn extract(doc: &Document) -> ArticleMetadata {
    let (title, authors, publisher) = extract_title(doc);
    let metadata = ArticleMetadata {
        title,
        website_type: extract_website_type(doc),
        authors,
        publisher,
        platform: extract_platform(doc),
        keywords: extract_keywords(doc),
    };
    debug!(
        title = ?metadata.title,
        authors = metadata.authors.len(),
        keywords = metadata.keywords.len(),
        "Extracted article metadata"
    );
    metadata
}

/// Apply [`extract_title_authors_publisher`] to the page's first `<title>`.
///
/// Without a `<title>` element every part is absent.
pub fn extract_title(doc: &Document) -> (Option<String>, Vec<String>, Option<String>) {
    match doc.find_first("title") {
        Some(element) => {
            let (title, authors, publisher) = extract_title_authors_publisher(&element.text());
            (Some(title), authors, publisher)
        }
        None => (None, Vec::new(), None),
    }
}

/// Split a raw `<title>` text into `(title, authors, publisher)`.
///
/// When the text does not match the pattern it is returned untouched (not
/// even trimmed) with no authors and no publisher.
///
/// Authors are split on every `,` and on every occurrence of the substring
/// `and`, so `"Alexander"` yields `"Alex"` and `"er"`. The split is
/// case-sensitive: `"Anderson"` survives intact. Since the author capture only
/// spans word and whitespace characters, it ends at the first comma or other
/// punctuation anyway.
///
/// # Examples
///
/// ```ignore
/// let (title, authors, publisher) =
///     extract_title_authors_publisher("Construction Goes Robotic - Startup Pirate by Alex Alexakis");
/// assert_eq!(title, "Construction Goes Robotic");
/// assert_eq!(authors, vec!["Alex Alexakis"]);
/// assert_eq!(publisher.as_deref(), Some("Startup Pirate"));
/// ```
pub fn extract_title_authors_publisher(raw: &str) -> (String, Vec<String>, Option<String>) {
    let Some(caps) = TITLE_RE.captures(raw) else {
        return (raw.to_string(), Vec::new(), None);
    };

    let title = caps[1].trim().to_string();
    let publisher = Some(caps[2].trim())
        .filter(|p| !p.is_empty())
        .map(str::to_string);
    let authors = split_authors(&caps[3]);

    (title, authors, publisher)
}

fn split_authors(segment: &str) -> Vec<String> {
    if segment.trim().is_empty() {
        return Vec::new();
    }
    AUTHOR_SEPARATOR_RE
        .split(segment)
        .map(str::trim)
        .filter(|author| !author.is_empty())
        .map(str::to_string)
        .collect()
}

/// `content` of the first `<meta name="...">` with the given name.
fn meta_content(doc: &Document, name: &str) -> Option<String> {
    doc.find_first_matching("meta", &[("name", name)])
        .and_then(|el| el.attribute("content"))
        .map(str::to_string)
}

/// `content` of every `<meta name="...">` with the given name, skipping tags
/// without a `content` attribute.
fn meta_contents(doc: &Document, name: &str) -> Vec<String> {
    doc.find_all("meta", &[("name", name)])
        .iter()
        .filter_map(|el| el.attribute("content"))
        .map(str::to_string)
        .collect()
}

/// Content type from `<meta name="citation_type">`.
pub fn extract_website_type(doc: &Document) -> Option<String> {
    meta_content(doc, "citation_type")
}

/// Publication name from `<meta name="citation_journal_title">`.
///
/// Not part of [`extract`]; the title-derived publisher takes precedence there.
pub fn extract_publisher(doc: &Document) -> Option<String> {
    meta_content(doc, "citation_journal_title")
}

/// Hosting platform from `<meta name="citation_publisher">`.
pub fn extract_platform(doc: &Document) -> Option<String> {
    meta_content(doc, "citation_publisher")
}

/// Contents of every `<meta name="keywords">`, in document order.
///
/// A tag's content is kept whole; commas inside it are not split.
pub fn extract_keywords(doc: &Document) -> Vec<String> {
    meta_contents(doc, "keywords")
}

/// Authors declared in markup rather than in the title.
///
/// Collects `<meta name="author">` contents, then the text of every
/// `span.author`, then every `div.author`. Independent of [`extract`] and
/// never merged into its result.
pub fn extract_markup_authors(doc: &Document) -> Vec<String> {
    let from_meta = meta_contents(doc, "author");
    let from_markup = ["span", "div"].into_iter().flat_map(|tag| {
        doc.find_all(tag, &[("class", "author")])
            .into_iter()
            .map(|el| el.text().trim().to_string())
            .collect::<Vec<_>>()
    });
    from_meta.into_iter().chain(from_markup).collect()
}

/// Author institutions from `<meta name="citation_author_institution">`.
pub fn extract_affiliations(doc: &Document) -> Vec<String> {
    meta_contents(doc, "citation_author_institution")
}

/// Site name from `<meta property="og:site_name">`, falling back to the last
/// `" | "`-separated segment of the `<title>`.
pub fn extract_site_name(doc: &Document) -> Option<String> {
    doc.find_first_matching("meta", &[("property", "og:site_name")])
        .and_then(|el| el.attribute("content"))
        .map(str::to_string)
        .or_else(|| {
            let title = doc.find_first("title")?.text();
            let segments: Vec<&str> = title.split(" | ").collect();
            match segments.as_slice() {
                [_, .., last] => Some(last.to_string()),
                _ => None,
            }
        })
}
