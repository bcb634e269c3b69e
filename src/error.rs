//! Error types for fetching articles and producing blurbs.
//!
//! Extraction itself never fails: missing markup degrades to absent or empty
//! fields. Everything here comes from the edges of the program, namely the
//! batch file, the network and the output sink.

use thiserror::Error;

/// Errors that can occur while producing blurbs.
#[derive(Debug, Error)]
pub enum BlurbError {
    /// A batch line did not contain an `http://` or `https://` URL.
    #[error("No URL found on line {line}")]
    MissingUrl {
        /// 1-based line number in the batch source.
        line: usize,
    },

    /// The URL could not be parsed or does not use an HTTP scheme.
    #[error("Invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The HTTP client could not be constructed.
    #[error("Failed to create HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    /// Network or transport failure while fetching a page.
    #[error("Request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Reading the batch file or writing the output failed.
    #[error("I/O error on {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Serializing blurbs to JSON failed.
    #[error("Failed to serialize blurbs to JSON")]
    Json(#[from] serde_json::Error),
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BlurbError>;
