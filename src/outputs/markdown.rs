//! Markdown blurb rendering.
//!
//! The layout is consumed by existing notes and scripts, so it must stay
//! byte-for-byte stable:
//!
//! ```text
//! # {title}
//!
//! **Website Type:** {website_type}
//!
//! **Authors:**
//! - {author}
//!
//! **Publisher:** {publisher}
//!
//! **Platform:** {platform}
//!
//! **Keywords:**
//! - {keyword}
//! ```
//!
//! Absent scalar fields are written as `None`.

use crate::models::{ArticleMetadata, Blurb};
use std::fmt::Write;

/// Separator placed between blurbs in batch output.
pub const BLURB_SEPARATOR: &str = "\n\n---\n\n";

const MISSING: &str = "None";

fn or_missing(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(MISSING)
}

/// Render a single blurb.
pub fn render_blurb(metadata: &ArticleMetadata) -> String {
    let mut md = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(md, "# {}\n", or_missing(&metadata.title));
    let _ = writeln!(md, "**Website Type:** {}\n", or_missing(&metadata.website_type));
    md.push_str("**Authors:**\n");
    for author in &metadata.authors {
        let _ = writeln!(md, "- {author}");
    }
    md.push('\n');
    let _ = writeln!(md, "**Publisher:** {}\n", or_missing(&metadata.publisher));
    let _ = writeln!(md, "**Platform:** {}\n", or_missing(&metadata.platform));
    md.push_str("**Keywords:**\n");
    for keyword in &metadata.keywords {
        let _ = writeln!(md, "- {keyword}");
    }

    md
}

/// Render every blurb and join them with [`BLURB_SEPARATOR`].
pub fn render_batch(blurbs: &[Blurb]) -> String {
    blurbs
        .iter()
        .map(|blurb| render_blurb(&blurb.metadata))
        .collect::<Vec<_>>()
        .join(BLURB_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ArticleMetadata {
        ArticleMetadata {
            title: Some("AI Product Managers".to_string()),
            website_type: Some("newsletter".to_string()),
            authors: vec!["Alex Alexakis".to_string(), "Marily Nika".to_string()],
            publisher: None,
            platform: Some("Substack".to_string()),
            keywords: vec!["ai".to_string(), "product".to_string()],
        }
    }

    #[test]
    fn test_render_blurb_exact_layout() {
        let expected = "# AI Product Managers\n\
                        \n\
                        **Website Type:** newsletter\n\
                        \n\
                        **Authors:**\n\
                        - Alex Alexakis\n\
                        - Marily Nika\n\
                        \n\
                        **Publisher:** None\n\
                        \n\
                        **Platform:** Substack\n\
                        \n\
                        **Keywords:**\n\
                        - ai\n\
                        - product\n";
        assert_eq!(render_blurb(&sample()), expected);
    }

    #[test]
    fn test_render_empty_metadata() {
        let expected = "# None\n\n**Website Type:** None\n\n**Authors:**\n\n**Publisher:** None\n\n**Platform:** None\n\n**Keywords:**\n";
        assert_eq!(render_blurb(&ArticleMetadata::default()), expected);
    }

    #[test]
    fn test_render_batch_separator() {
        let first = Blurb {
            url: "https://a.example/1".to_string(),
            metadata: ArticleMetadata {
                title: Some("One".to_string()),
                ..Default::default()
            },
        };
        let second = Blurb {
            url: "https://a.example/2".to_string(),
            metadata: ArticleMetadata {
                title: Some("Two".to_string()),
                ..Default::default()
            },
        };

        let rendered = render_batch(&[first.clone(), second.clone()]);
        let expected = format!(
            "{}\n\n---\n\n{}",
            render_blurb(&first.metadata),
            render_blurb(&second.metadata)
        );
        assert_eq!(rendered, expected);
        assert_eq!(render_batch(&[]), "");
        assert_eq!(render_batch(&[first.clone()]), render_blurb(&first.metadata));
    }
}
