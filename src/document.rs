//! A small query surface over a parsed HTML page.
//!
//! Extraction rules only ever need three things from a page: the first
//! element with a given tag, every element with a given tag whose attributes
//! match a filter, and the text or attributes of such an element. This module
//! exposes exactly that on top of [`scraper`], so the rules in
//! [`crate::extract`] never touch selectors directly.

use scraper::{ElementRef, Html, Selector};

/// A parsed HTML document.
pub struct Document {
    html: Html,
}

/// A single element found in a [`Document`].
#[derive(Clone, Copy)]
pub struct Element<'a>(ElementRef<'a>);

impl Document {
    /// Parse a full HTML document. Malformed markup is recovered, never rejected.
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// First element with the given tag name, in document order.
    pub fn find_first(&self, tag: &str) -> Option<Element<'_>> {
        let selector = Selector::parse(tag).ok()?;
        self.html.select(&selector).next().map(Element)
    }

    /// Every element with the given tag name whose attributes satisfy all of
    /// `filter`, in document order.
    ///
    /// A `("class", value)` pair matches when `value` is one of the element's
    /// classes; any other pair requires an exact, case-sensitive attribute value.
    pub fn find_all(&self, tag: &str, filter: &[(&str, &str)]) -> Vec<Element<'_>> {
        let Ok(selector) = Selector::parse(tag) else {
            return Vec::new();
        };
        self.html
            .select(&selector)
            .map(Element)
            .filter(|el| filter.iter().all(|(name, value)| el.matches(name, value)))
            .collect()
    }

    /// First element with the given tag that satisfies `filter`.
    pub fn find_first_matching(&self, tag: &str, filter: &[(&str, &str)]) -> Option<Element<'_>> {
        self.find_all(tag, filter).into_iter().next()
    }
}

impl<'a> Element<'a> {
    /// All descendant text, concatenated as it appears in the source.
    pub fn text(&self) -> String {
        self.0.text().collect()
    }

    /// Value of the named attribute, if present.
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }

    fn matches(&self, name: &str, value: &str) -> bool {
        if name == "class" {
            self.0.value().classes().any(|class| class == value)
        } else {
            self.attribute(name) == Some(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>  Hello   World </title>
  <meta name="keywords" content="first">
  <meta name="Keywords" content="wrong case">
  <meta name="keywords" content="second">
  <meta name="description">
</head>
<body>
  <span class="byline author">Ada</span>
  <span class="authors">Not me</span>
</body>
</html>"#;

    #[test]
    fn test_find_first_returns_raw_text() {
        let doc = Document::parse(PAGE);
        let title = doc.find_first("title").unwrap();
        assert_eq!(title.text(), "  Hello   World ");
    }

    #[test]
    fn test_find_first_missing_tag() {
        let doc = Document::parse(PAGE);
        assert!(doc.find_first("article").is_none());
    }

    #[test]
    fn test_find_all_exact_attribute_match_in_order() {
        let doc = Document::parse(PAGE);
        let contents: Vec<_> = doc
            .find_all("meta", &[("name", "keywords")])
            .iter()
            .filter_map(|el| el.attribute("content"))
            .collect();
        assert_eq!(contents, vec!["first", "second"]);
    }

    #[test]
    fn test_find_all_class_filter_matches_single_class() {
        let doc = Document::parse(PAGE);
        let spans = doc.find_all("span", &[("class", "author")]);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text(), "Ada");
    }

    #[test]
    fn test_missing_attribute_is_none() {
        let doc = Document::parse(PAGE);
        let meta = doc
            .find_first_matching("meta", &[("name", "description")])
            .unwrap();
        assert_eq!(meta.attribute("content"), None);
    }

    #[test]
    fn test_invalid_tag_yields_nothing() {
        let doc = Document::parse(PAGE);
        assert!(doc.find_first("[[").is_none());
        assert!(doc.find_all("[[", &[]).is_empty());
    }
}
