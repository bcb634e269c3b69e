//! JSON rendering of blurbs.
//!
//! A single URL renders as one object; a batch renders as an array, even when
//! it holds a single entry. Field names match [`crate::models::Blurb`].

use crate::error::Result;
use crate::models::Blurb;

/// Pretty-printed JSON object for one blurb.
pub fn render_blurb(blurb: &Blurb) -> Result<String> {
    Ok(serde_json::to_string_pretty(blurb)?)
}

/// Pretty-printed JSON array of blurbs, in input order.
pub fn render_batch(blurbs: &[Blurb]) -> Result<String> {
    Ok(serde_json::to_string_pretty(blurbs)?)
}
