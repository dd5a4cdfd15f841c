//! Error types for Iconic operations.
//!
//! This module defines the main error type [`IconicError`] which represents
//! every fatal condition of the icon discovery pipeline: fetching the page,
//! parsing the document and validating base URLs.
//!
//! Skipped entries (a candidate that is not a valid URL reference, a JSON-LD
//! block that does not decode, an element without its attribute) are not
//! errors and never surface here.
//!
//! # Example
//!
//! ```rust
//! use iconic_core::{ErrorKind, resolve_icons};
//!
//! let err = resolve_icons(&[], "not a url", true).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Config);
//! ```

use thiserror::Error;

/// Main error type for icon discovery.
///
/// Variants are grouped into three kinds (see [`ErrorKind`]): fetch errors,
/// parse errors and configuration errors.
#[derive(Error, Debug)]
pub enum IconicError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(reqwest::Error),

    /// The server answered with a non-success status.
    ///
    /// `status` holds the status line text, e.g. `404 Not Found`.
    #[error("{status}")]
    HttpStatus { status: String },

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    ///
    /// Returned when the page URL or the base URL cannot be parsed, or
    /// cannot be used to resolve relative references.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors.
    ///
    /// Returned when the document stream cannot be read or a CSS selector
    /// is invalid.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),
}

/// Coarse classification of an [`IconicError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure, timeout or non-success status while retrieving the page.
    Fetch,
    /// The document could not be parsed.
    Parse,
    /// The page URL or base URL is unusable.
    Config,
}

impl IconicError {
    /// Returns the kind of failure this error represents.
    pub fn kind(&self) -> ErrorKind {
        match self {
            #[cfg(feature = "fetch")]
            IconicError::HttpError(_) => ErrorKind::Fetch,
            IconicError::HttpStatus { .. } | IconicError::Timeout { .. } => ErrorKind::Fetch,
            IconicError::HtmlParseError(_) => ErrorKind::Parse,
            IconicError::InvalidUrl(_) => ErrorKind::Config,
        }
    }
}

/// Result type alias for IconicError.
///
/// This is a convenience alias for `std::result::Result<T, IconicError>`.
pub type Result<T> = std::result::Result<T, IconicError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IconicError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_status_error_is_verbatim() {
        let err = IconicError::HttpStatus { status: "404 Not Found".to_string() };
        assert_eq!(err.to_string(), "404 Not Found");
    }

    #[test]
    fn test_timeout_error() {
        let err = IconicError::Timeout { timeout: 30 };
        assert!(err.to_string().contains("30"));
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(IconicError::Timeout { timeout: 1 }.kind(), ErrorKind::Fetch);
        assert_eq!(
            IconicError::HttpStatus { status: "500 Internal Server Error".into() }.kind(),
            ErrorKind::Fetch
        );
        assert_eq!(IconicError::HtmlParseError("x".into()).kind(), ErrorKind::Parse);
        assert_eq!(IconicError::InvalidUrl("x".into()).kind(), ErrorKind::Config);
    }
}
