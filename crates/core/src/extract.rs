//! Candidate extraction.
//!
//! Runs every [`Heuristic`] against a document and concatenates their
//! results in the fixed [`Heuristic::ALL`] order. The output is the raw
//! candidate list: strings exactly as written in the markup, not yet
//! resolved against any base URL.
//!
//! # Example
//!
//! ```rust
//! use iconic_core::extract_from_html;
//!
//! let html = r#"
//!     <link rel="icon" href="/favicon.png">
//!     <meta property="og:image" content="https://cdn.example.com/card.jpg">
//! "#;
//!
//! let candidates = extract_from_html(html).unwrap();
//! assert_eq!(candidates, vec!["https://cdn.example.com/card.jpg", "/favicon.png"]);
//! ```

use std::io::Read;

use crate::heuristics::Heuristic;
use crate::{Document, Result};

/// Extracts raw candidates from a parsed document.
///
/// Never fails: heuristics that find nothing contribute nothing.
pub fn extract_candidates(doc: &Document) -> Vec<String> {
    let mut candidates = Vec::new();
    for heuristic in Heuristic::ALL {
        let found = heuristic.extract(doc);
        tracing::debug!(heuristic = heuristic.name(), count = found.len(), "heuristic finished");
        candidates.extend(found);
    }
    candidates
}

/// Extracts raw candidates from an HTML string.
pub fn extract_from_html(html: &str) -> Result<Vec<String>> {
    let doc = Document::parse(html)?;
    Ok(extract_candidates(&doc))
}

/// Extracts raw candidates from an HTML byte buffer.
pub fn extract_from_bytes(bytes: &[u8]) -> Result<Vec<String>> {
    let doc = Document::parse_bytes(bytes)?;
    Ok(extract_candidates(&doc))
}

/// Extracts raw candidates from a byte stream.
///
/// # Errors
///
/// Returns [`crate::IconicError::HtmlParseError`] if the stream cannot be read.
pub fn extract_from_reader<R: Read>(reader: R) -> Result<Vec<String>> {
    let doc = Document::from_reader(reader)?;
    Ok(extract_candidates(&doc))
}
